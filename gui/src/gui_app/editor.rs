use anyhow::Context;
use app::{
    config::ConfigBuilder,
    session::{EditorSession, SliderHandle, Submission},
};
use cuetime_core::CueId;
use egui::{Align2, Color32, FontId, Rect, Sense, Stroke};
use timeline::TimelineError;

use super::{player::Player, ErrorPopup};

const PREVIEW_MAX_HEIGHT: f32 = 360.0;
const CAPTION_BOTTOM_MARGIN: f32 = 24.0;
const CAPTION_COLOR: Color32 = Color32::from_rgb(255, 80, 80);
const TRACK_HEIGHT: f32 = 14.0;
const MARK_COLOR: Color32 = Color32::from_gray(90);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgba_premultiplied(50, 80, 125, 140);

/// The editor behind the shell: nothing until configuration loads, then a
/// session plus a simulated playback surface.
#[derive(serde::Deserialize, serde::Serialize, Default)]
pub struct EditorShell {
    #[serde(skip)]
    state: Option<ReadyEditor>,
}

struct ReadyEditor {
    session: EditorSession,
    player: Player,
    caption_font: f32,
}

impl EditorShell {
    /// Build the session from configuration, once. Reports media metadata
    /// to the session the moment the playback surface exists.
    pub fn load(&mut self) -> anyhow::Result<()> {
        if self.state.is_some() {
            return Ok(());
        }
        let config = ConfigBuilder::new()
            .context("locate configuration directory")?
            .load_environment(true)
            .build()
            .context("load configuration")?;

        let mut session = if config.seed_demo_cues() {
            EditorSession::with_demo_cues()
        } else {
            EditorSession::new()
        };
        let player = Player::new(config.demo_duration_secs());
        session.metadata_loaded(player.duration());
        log::info!("editor ready, clip duration {:.2}s", player.duration());

        self.state = Some(ReadyEditor {
            session,
            player,
            caption_font: config.caption_font_points(),
        });
        Ok(())
    }

    pub fn playback_menu(&mut self, ui: &mut egui::Ui) {
        let ready = match &mut self.state {
            Some(r) => r,
            None => return,
        };
        let label = if ready.player.playing() {
            "Pause"
        } else {
            "Play"
        };
        if ui.button(label).clicked() {
            ready.player.toggle();
            ui.close_menu();
        }
        if ui.button("Restart").clicked() {
            ready.player.restart();
            ui.close_menu();
        }
    }

    pub fn update_central_panel(&mut self, ui: &mut egui::Ui, ctx: &mut impl ErrorPopup) {
        match &mut self.state {
            Some(ready) => ready.update(ui, ctx),
            None => {
                ui.heading("loading configuration");
            }
        }
    }
}

impl ReadyEditor {
    fn update(&mut self, ui: &mut egui::Ui, ctx: &mut impl ErrorPopup) {
        let dt = ui.input(|i| i.stable_dt);
        self.player.tick(dt);
        if self.player.playing() {
            ui.ctx().request_repaint();
        }

        self.preview(ui);
        self.transport(ui);
        self.range_selector(ui);
        self.draft_row(ui, ctx);
        ui.separator();
        self.cue_list(ui);
    }

    /// The "video" area: a dark canvas with the active captions painted
    /// centered near the bottom. Clicking it toggles playback.
    fn preview(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let height = (width * 9.0 / 16.0).min(PREVIEW_MAX_HEIGHT);
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::click());
        if response.clicked() {
            self.player.toggle();
        }

        let rect = response.rect;
        if self.session.viewport() != (rect.width(), rect.height()) {
            self.session.viewport_resized(rect.width(), rect.height());
        }

        painter.rect_filled(rect, 4.0, Color32::from_gray(16));

        let now = self.player.current_time();
        let lines: Vec<String> = self
            .session
            .time_changed(now)
            .into_iter()
            .map(|cue| cue.text.clone())
            .collect();

        let mut anchor = egui::pos2(rect.center().x, rect.bottom() - CAPTION_BOTTOM_MARGIN);
        for line in lines.iter().rev() {
            painter.text(
                anchor,
                Align2::CENTER_BOTTOM,
                line,
                FontId::proportional(self.caption_font),
                CAPTION_COLOR,
            );
            anchor.y -= self.caption_font * 1.4;
        }
    }

    fn transport(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.player.playing() {
                "Pause"
            } else {
                "Play"
            };
            if ui.button(label).clicked() {
                self.player.toggle();
            }
            ui.label(format!(
                "{:.2}s / {:.2}s",
                self.player.current_time(),
                self.player.duration()
            ));
        });
    }

    /// Two percentage sliders plus the track underneath showing every
    /// cue's span and the staged range. Dragging a handle scrubs playback
    /// to that boundary, like dragging on a video timeline.
    fn range_selector(&mut self, ui: &mut egui::Ui) {
        let (mut start_pct, mut end_pct) = self.session.highlight();

        let start_resp = ui.add(
            egui::Slider::new(&mut start_pct, 0.0..=100.0)
                .fixed_decimals(2)
                .text("start %"),
        );
        if start_resp.changed() {
            if let Some(seek) = self.session.slider_changed(SliderHandle::Start, start_pct) {
                self.player.seek(seek);
            }
        }

        let end_resp = ui.add(
            egui::Slider::new(&mut end_pct, 0.0..=100.0)
                .fixed_decimals(2)
                .text("end %"),
        );
        if end_resp.changed() {
            if let Some(seek) = self.session.slider_changed(SliderHandle::End, end_pct) {
                self.player.seek(seek);
            }
        }

        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(egui::vec2(width, TRACK_HEIGHT), Sense::hover());
        let rect = response.rect;
        let span = |a: f64, b: f64| {
            Rect::from_min_max(
                egui::pos2(rect.left() + rect.width() * (a as f32 / 100.0), rect.top()),
                egui::pos2(rect.left() + rect.width() * (b as f32 / 100.0), rect.bottom()),
            )
        };

        painter.rect_filled(rect, 2.0, Color32::from_gray(40));
        for (mark_start, mark_end) in self.session.range_marks() {
            painter.rect_filled(span(mark_start, mark_end), 0.0, MARK_COLOR);
        }
        let (hl_start, hl_end) = self.session.highlight();
        painter.rect_filled(span(hl_start, hl_end), 0.0, HIGHLIGHT_COLOR);

        // playhead
        let duration = self.player.duration();
        if duration > 0.0 {
            let x = rect.left()
                + rect.width() * (self.player.current_time() / duration) as f32;
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                Stroke::new(2.0, Color32::WHITE),
            );
        }
    }

    fn draft_row(&mut self, ui: &mut egui::Ui, ctx: &mut impl ErrorPopup) {
        ui.horizontal(|ui| {
            ui.text_edit_singleline(self.session.draft_mut());
            let submit_label = if self.session.selected().is_some() {
                "Update Subtitle"
            } else {
                "Add Subtitle"
            };
            if ui.button(submit_label).clicked() {
                match self.session.submit() {
                    Ok(Submission::Created(cue)) => log::info!("added cue {}", cue.id),
                    Ok(Submission::Updated(cue)) => log::info!("updated cue {}", cue.id),
                    Ok(Submission::Ignored) => log::debug!("submit ignored"),
                    Err(e) => {
                        let msg = match e {
                            TimelineError::InvalidRange { .. } | TimelineError::Overlap { .. } => {
                                "invalid range or overlapping with an existing subtitle"
                            }
                            _ => "unable to save subtitle",
                        };
                        ctx.raise(anyhow::Error::new(e).context(msg));
                    }
                }
            }
        });
    }

    fn cue_list(&mut self, ui: &mut egui::Ui) {
        let text_style = egui::TextStyle::Body;
        let row_height = ui.text_style_height(&text_style);
        let rows = self.session.rows();
        let mut clicked: Option<CueId> = None;
        egui::ScrollArea::vertical()
            .id_source("cue_list")
            .auto_shrink([false, true])
            .show_rows(ui, row_height, rows.len(), |ui, row_range| {
                for row in &rows[row_range] {
                    if ui.selectable_label(row.selected, &row.label).clicked() {
                        clicked = Some(row.id);
                    }
                }
            });
        if let Some(id) = clicked {
            self.session.cue_clicked(id);
        }
    }
}
