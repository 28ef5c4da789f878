use cuetime_core::{Cue, CueId};
use timeline::{Timeline, TimelineError};

/// Minimum gap kept between the two range handles, in percent of the
/// 0-100 track. A handle that would cross or meet the other one is nudged
/// back by this much instead.
pub const HANDLE_EPSILON: f64 = 0.01;

const DEMO_CUES: &[(&str, f64, f64)] = &[
    (
        "Hello everyone! Nice to meet you here in my video",
        0.0,
        10.0,
    ),
    ("Have fun watching this video ;)", 10.0, 20.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderHandle {
    Start,
    End,
}

/// What a submit actually did.
#[derive(Debug, PartialEq)]
pub enum Submission {
    Created(Cue),
    Updated(Cue),
    /// Empty draft text, or no media loaded yet: nothing touched.
    Ignored,
}

/// Row data for the cue list.
#[derive(Debug, PartialEq)]
pub struct CueRow {
    pub id: CueId,
    pub label: String,
    pub selected: bool,
}

/// Editing state for one media clip: the cue timeline plus everything the
/// widgets stage before a submit commits it.
///
/// The session owns all mutable editor state so the shell holds no globals.
/// Each external notification (slider moved, row clicked, playback time
/// changed, metadata loaded, viewport resized, submit) maps to exactly one
/// method, called synchronously from the host event loop.
///
/// While a cue is selected, slider motion and typing only move the staged
/// draft; the stored cue changes on [`EditorSession::submit`], which is
/// where range validation runs.
pub struct EditorSession {
    timeline: Timeline,
    selected: Option<CueId>,
    draft: String,
    start_pct: f64,
    end_pct: f64,
    duration: Option<f64>,
    viewport: (f32, f32),
}

impl Default for EditorSession {
    fn default() -> Self {
        EditorSession::new()
    }
}

impl EditorSession {
    pub fn new() -> EditorSession {
        EditorSession {
            timeline: Timeline::new(),
            selected: None,
            draft: String::new(),
            start_pct: 0.0,
            end_pct: 100.0,
            duration: None,
            viewport: (0.0, 0.0),
        }
    }

    /// A session pre-populated with the two demo cues.
    pub fn with_demo_cues() -> EditorSession {
        let mut session = EditorSession::new();
        for (text, start, end) in DEMO_CUES {
            session
                .timeline
                .add(*text, *start, *end)
                .expect("demo cues are valid");
        }
        session
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn selected(&self) -> Option<CueId> {
        self.selected
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    /// Media metadata became available; percent/seconds mapping works from
    /// here on.
    pub fn metadata_loaded(&mut self, duration: f64) {
        log::debug!("media duration {:.2}s", duration);
        self.duration = Some(duration);
    }

    /// The overlay surface was resized to match the rendered media view.
    pub fn viewport_resized(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Playback advanced to `now`; returns the cues to paint on the
    /// overlay. Read-only.
    pub fn time_changed(&self, now: f64) -> Vec<&Cue> {
        self.timeline.active_at(now)
    }

    /// Move one handle to `percent`, keeping `start < end` by nudging the
    /// moved handle off the other by [`HANDLE_EPSILON`]. Returns the
    /// seconds position the playback surface should scrub to, `None`
    /// before metadata is loaded.
    pub fn slider_changed(&mut self, handle: SliderHandle, percent: f64) -> Option<f64> {
        let percent = percent.clamp(0.0, 100.0);
        let moved = match handle {
            SliderHandle::Start => {
                self.start_pct = if percent >= self.end_pct {
                    (self.end_pct - HANDLE_EPSILON).max(0.0)
                } else {
                    percent
                };
                self.start_pct
            }
            SliderHandle::End => {
                self.end_pct = if percent <= self.start_pct {
                    (self.start_pct + HANDLE_EPSILON).min(100.0)
                } else {
                    percent
                };
                self.end_pct
            }
        };
        self.seconds_at(moved)
    }

    /// A list row was clicked: select that cue and stage its fields, or
    /// deselect when it was already the selection.
    pub fn cue_clicked(&mut self, id: CueId) {
        if self.selected == Some(id) {
            self.selected = None;
            self.draft.clear();
            return;
        }
        let cue = match self.timeline.get(id) {
            Some(c) => c.clone(),
            None => {
                log::warn!("click on unknown cue {}", id);
                return;
            }
        };
        self.draft = cue.text.clone();
        if let Some(pct) = self.percent_of(cue.start).zip(self.percent_of(cue.end)) {
            self.start_pct = pct.0;
            self.end_pct = pct.1;
        }
        self.selected = Some(id);
    }

    /// Commit the staged draft: update the selected cue, or create a new
    /// one when nothing is selected. An empty draft is ignored without
    /// touching the timeline. On error the timeline is unchanged and the
    /// staged state stays put so the user can fix it.
    pub fn submit(&mut self) -> Result<Submission, TimelineError> {
        if self.draft.is_empty() {
            return Ok(Submission::Ignored);
        }
        let duration = match self.duration {
            Some(d) => d,
            None => {
                log::warn!("submit before media metadata loaded");
                return Ok(Submission::Ignored);
            }
        };
        let start = self.start_pct / 100.0 * duration;
        let end = self.end_pct / 100.0 * duration;
        let text = self.draft.clone();
        let submission = match self.selected {
            Some(id) => self
                .timeline
                .update(id, text, start, end)
                .map(Submission::Updated)?,
            None => self.timeline.add(text, start, end).map(Submission::Created)?,
        };
        self.selected = None;
        self.draft.clear();
        Ok(submission)
    }

    /// Sorted rows for the cue list.
    pub fn rows(&self) -> Vec<CueRow> {
        self.timeline
            .sorted()
            .into_iter()
            .map(|cue| CueRow {
                id: cue.id,
                label: cue.to_string(),
                selected: self.selected == Some(cue.id),
            })
            .collect()
    }

    /// Percent spans of every cue, for the marks under the selector track.
    pub fn range_marks(&self) -> Vec<(f64, f64)> {
        self.timeline
            .iter()
            .filter_map(|c| self.percent_of(c.start).zip(self.percent_of(c.end)))
            .collect()
    }

    /// Current handle positions `(start%, end%)`.
    pub fn highlight(&self) -> (f64, f64) {
        (self.start_pct, self.end_pct)
    }

    fn seconds_at(&self, percent: f64) -> Option<f64> {
        self.duration.map(|d| percent / 100.0 * d)
    }

    fn percent_of(&self, seconds: f64) -> Option<f64> {
        match self.duration {
            Some(d) if d > 0.0 => Some(seconds / d * 100.0),
            _ => None,
        }
    }
}
