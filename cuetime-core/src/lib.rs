use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::identifiers::CueId;

pub mod identifiers;

/// One subtitle record: an immutable id, the display text, and a time range
/// in float seconds of media time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub id: CueId,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Cue {
    pub fn new<S: Into<String>>(text: S, start: f64, end: f64) -> Cue {
        Cue {
            id: CueId::generate(),
            text: text.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Half-open intersection test against `[start, end)`.
    ///
    /// Ranges that only touch at a boundary do not overlap.
    pub fn overlaps_range(&self, start: f64, end: f64) -> bool {
        start < self.end && end > self.start
    }

    /// Inclusive containment, used for on-screen visibility: a cue is
    /// visible at both of its boundary instants.
    pub fn active_at(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s - {:.2}s)", self.text, self.start, self.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn boundary_touch_is_not_overlap() {
        let cue = Cue::new("a", 0.0, 10.0);
        assert!(!cue.overlaps_range(10.0, 20.0));
        assert!(cue.overlaps_range(9.9, 20.0));
    }

    #[test]
    fn visibility_is_inclusive_on_both_bounds() {
        let cue = Cue::new("a", 5.0, 15.0);
        assert!(cue.active_at(5.0));
        assert!(cue.active_at(15.0));
        assert!(!cue.active_at(15.001));
    }

    #[test]
    fn display_rounds_to_centiseconds() {
        let cue = Cue::new("hi", 1.2345, 6.0);
        assert_eq!(format!("{}", cue), "hi (1.23s - 6.00s)");
    }
}
