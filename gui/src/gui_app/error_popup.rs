use std::fmt;

use egui::RichText;

const POPUP_ID_SALT: &str = "cuetime_error_popup";

/// Context surface for raising errors out of nested UI code. The shell
/// implements this on its frame context; everything below just calls
/// `raise` and keeps rendering.
pub trait ErrorPopup {
    fn raise(&mut self, err: anyhow::Error);

    fn handle_err<T>(&mut self, res: anyhow::Result<T>) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                self.raise(e);
                None
            }
        }
    }
}

/// Renders an error chain on one log line, `context -> context -> root`.
pub struct ChainDisplay<'a>(pub &'a anyhow::Error);

impl<'a> fmt::Debug for ChainDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cause) in self.0.chain().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cause)?;
        }
        Ok(())
    }
}

struct RaisedError {
    open: bool,
    id: egui::Id,
    error: anyhow::Error,
}

fn error_chain_ui(ui: &mut egui::Ui, error: &anyhow::Error) {
    let mut chain = error.chain();
    if let Some(top) = chain.next() {
        ui.label(
            RichText::new(top.to_string())
                .text_style(egui::style::TextStyle::Monospace)
                .strong(),
        );
    }
    for cause in chain {
        ui.label(
            RichText::new(format!("-> {}", cause)).text_style(egui::style::TextStyle::Monospace),
        );
    }
}

/// Holds every raised error until the user closes its window.
#[derive(Default)]
pub struct ErrorManager {
    raised: Vec<RaisedError>,
    serial: usize,
}

impl ErrorManager {
    pub fn raise(&mut self, err: anyhow::Error) {
        log::error!("{:?}", ChainDisplay(&err));
        let id = egui::Id::new((POPUP_ID_SALT, self.serial));
        self.serial += 1;
        self.raised.push(RaisedError {
            open: true,
            id,
            error: err,
        });
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        for raised in &mut self.raised {
            egui::Window::new("Error")
                .id(raised.id)
                .collapsible(false)
                .open(&mut raised.open)
                .show(ctx, |ui| error_chain_ui(ui, &raised.error));
        }
        self.raised.retain(|r| r.open);
    }
}
