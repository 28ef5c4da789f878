pub mod error_popup;

mod editor;
mod player;

use anyhow::Context;
pub use error_popup::ErrorPopup;

struct ShellCtx<'a> {
    error_manager: &'a mut error_popup::ErrorManager,
}

impl<'a> ErrorPopup for ShellCtx<'a> {
    fn raise(&mut self, err: anyhow::Error) {
        self.error_manager.raise(err)
    }
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
/// Only shell preferences are persisted; the cue timeline always starts
/// fresh.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
#[derive(Default)]
pub struct ShellApp {
    editor: editor::EditorShell,
    #[serde(skip)]
    error_manager: error_popup::ErrorManager,
}

impl ShellApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let app: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        app
    }
}

impl eframe::App for ShellApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let ShellApp {
            editor,
            error_manager,
        } = self;
        let mut app_ctx = ShellCtx { error_manager };
        app_ctx.handle_err(editor.load().context("unable to launch editor"));

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        frame.close();
                    }
                });
                ui.menu_button("Playback", |ui| {
                    editor.playback_menu(ui);
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            editor.update_central_panel(ui, &mut app_ctx);
        });

        self.error_manager.show(ctx);
    }
}
