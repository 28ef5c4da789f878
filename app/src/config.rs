use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "cuetime";
const APP: &str = "cuetime";
const APP_CAPS: &str = "CUETIME";

const DEMO_DURATION_KEY: &str = "demo_duration_secs";
const DEFAULT_DEMO_DURATION: f64 = 60.0;

const CAPTION_FONT_KEY: &str = "caption_font_points";
const DEFAULT_CAPTION_FONT: f64 = 16.0;

const SEED_DEMO_CUES_KEY: &str = "seed_demo_cues";

const DEFAULT_CONFIG_FILE: &str = "cuetime.toml";

type ExtConfigBuilder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error("unable to get user home directory")]
    NoUserHome,
    #[error("path is not utf8: {:?}", _0)]
    NonUtf8Path(PathBuf),
}

fn camino_path(std_path: &Path) -> Result<&Utf8Path, ConfigError> {
    Utf8Path::from_path(std_path).ok_or_else(|| ConfigError::NonUtf8Path(std_path.to_path_buf()))
}

fn new_config_builder() -> ExtConfigBuilder {
    // unwraps fire only if the static KEYs are not strings
    config::Config::builder()
        .set_default(DEMO_DURATION_KEY, DEFAULT_DEMO_DURATION)
        .unwrap()
        .set_default(CAPTION_FONT_KEY, DEFAULT_CAPTION_FONT)
        .unwrap()
        .set_default(SEED_DEMO_CUES_KEY, true)
        .unwrap()
}

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_dir: Utf8PathBuf,
    config_path: Option<Utf8PathBuf>,
    load_environment: bool,
    config_builder: ExtConfigBuilder,
}

impl ConfigBuilder {
    #[cfg(test)]
    pub fn new_test_config(root: &Path) -> Result<EditorConfig, ConfigError> {
        let root = camino_path(root)?;
        let mut builder = new_config_builder();
        let cfg_file = root.join(DEFAULT_CONFIG_FILE);
        if cfg_file.exists() {
            builder = builder.add_source(config::File::from(cfg_file.as_std_path()));
        }
        Ok(EditorConfig {
            inner: builder.build()?,
        })
    }

    pub fn new() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APP)
            .ok_or(ConfigError::NoUserHome)?;
        let config_dir = camino_path(dirs.config_dir())?.to_path_buf();
        Ok(ConfigBuilder {
            config_dir,
            config_path: None,
            load_environment: false,
            config_builder: new_config_builder(),
        })
    }

    /// Should we load configuration from the environment?
    pub fn load_environment(mut self, load_environment: bool) -> Self {
        self.load_environment = load_environment;
        self
    }

    pub fn config_file(mut self, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        self.config_path = config_file
            .map(|p| camino_path(p).map(|p| p.to_path_buf()))
            .transpose()?;
        Ok(self)
    }

    pub fn build(mut self) -> Result<EditorConfig, ConfigError> {
        let cfg_file = self
            .config_path
            .unwrap_or_else(|| self.config_dir.join(DEFAULT_CONFIG_FILE));

        if cfg_file.exists() {
            self.config_builder = self
                .config_builder
                .add_source(config::File::from(cfg_file.as_std_path()));
        }

        if self.load_environment {
            self.config_builder = self
                .config_builder
                .add_source(config::Environment::with_prefix(APP_CAPS));
        }

        let editor_cfg = EditorConfig {
            inner: self.config_builder.build().map_err(ConfigError::from)?,
        };
        log::trace!("{:#?}", editor_cfg);
        Ok(editor_cfg)
    }
}

#[derive(Debug, Clone)]
pub struct EditorConfig {
    inner: config::Config,
}

impl EditorConfig {
    // the unwraps below are safe: every key has a default

    /// Length in seconds the simulated playback surface reports.
    pub fn demo_duration_secs(&self) -> f64 {
        self.inner.get_float(DEMO_DURATION_KEY).unwrap()
    }

    /// Point size of the caption overlay text.
    pub fn caption_font_points(&self) -> f32 {
        self.inner.get_float(CAPTION_FONT_KEY).unwrap() as f32
    }

    /// Start the editor with the two demo cues loaded?
    pub fn seed_demo_cues(&self) -> bool {
        self.inner.get_bool(SEED_DEMO_CUES_KEY).unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_without_a_config_file() {
        let root = tempfile::tempdir().unwrap();
        let cfg = ConfigBuilder::new_test_config(root.path()).unwrap();
        assert_eq!(cfg.demo_duration_secs(), DEFAULT_DEMO_DURATION);
        assert_eq!(cfg.caption_font_points(), DEFAULT_CAPTION_FONT as f32);
        assert!(cfg.seed_demo_cues());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "demo_duration_secs = 120.0\nseed_demo_cues = false\n",
        )
        .unwrap();
        let cfg = ConfigBuilder::new_test_config(root.path()).unwrap();
        assert_eq!(cfg.demo_duration_secs(), 120.0);
        assert!(!cfg.seed_demo_cues());
        // untouched keys keep their defaults
        assert_eq!(cfg.caption_font_points(), DEFAULT_CAPTION_FONT as f32);
    }
}
