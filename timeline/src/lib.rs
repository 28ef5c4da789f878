use cuetime_core::{Cue, CueId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
    #[error("invalid cue range: start {start}s must come before end {end}s")]
    InvalidRange { start: f64, end: f64 },
    #[error("cue range [{start}s, {end}s) overlaps an existing cue")]
    Overlap { start: f64, end: f64 },
    #[error("cue text is empty")]
    EmptyText,
    #[error("no cue with id {0}")]
    UnknownCue(CueId),
}

/// The set of subtitle cues on a single media timeline.
///
/// Storage is unordered; [`Timeline::sorted`] presents cues
/// start-ascending. After every mutation two invariants hold: every cue
/// satisfies `start < end`, and no two cues' half-open `[start, end)`
/// ranges intersect. A rejected mutation leaves the timeline untouched.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    cues: Vec<Cue>,
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline::default()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, id: CueId) -> Option<&Cue> {
        self.cues.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue> + '_ {
        self.cues.iter()
    }

    /// True if `[start, end)` intersects any stored cue's half-open range.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.overlaps_excluding(start, end, None)
    }

    fn overlaps_excluding(&self, start: f64, end: f64, skip: Option<CueId>) -> bool {
        self.cues
            .iter()
            .filter(|c| Some(c.id) != skip)
            .any(|c| c.overlaps_range(start, end))
    }

    fn check_range(&self, start: f64, end: f64, skip: Option<CueId>) -> Result<(), TimelineError> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(TimelineError::InvalidRange { start, end });
        }
        if self.overlaps_excluding(start, end, skip) {
            return Err(TimelineError::Overlap { start, end });
        }
        Ok(())
    }

    /// Insert a new cue with a fresh id and return a copy of it.
    pub fn add<S: Into<String>>(
        &mut self,
        text: S,
        start: f64,
        end: f64,
    ) -> Result<Cue, TimelineError> {
        let text = text.into();
        if text.is_empty() {
            return Err(TimelineError::EmptyText);
        }
        self.check_range(start, end, None)?;
        let cue = Cue::new(text, start, end);
        log::debug!("add cue {}: [{}s, {}s)", cue.id, start, end);
        self.cues.push(cue.clone());
        Ok(cue)
    }

    /// Replace the text and range of the cue matching `id`.
    ///
    /// The same checks as [`Timeline::add`] apply, with the edited cue
    /// excluded from the overlap scan so a cue can always keep or shrink
    /// its own slot.
    pub fn update<S: Into<String>>(
        &mut self,
        id: CueId,
        text: S,
        start: f64,
        end: f64,
    ) -> Result<Cue, TimelineError> {
        let text = text.into();
        if text.is_empty() {
            return Err(TimelineError::EmptyText);
        }
        self.check_range(start, end, Some(id))?;
        let cue = self
            .cues
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TimelineError::UnknownCue(id))?;
        log::debug!("update cue {}: [{}s, {}s)", id, start, end);
        cue.text = text;
        cue.start = start;
        cue.end = end;
        Ok(cue.clone())
    }

    /// All cues ordered by ascending start, ties broken by id.
    pub fn sorted(&self) -> Vec<&Cue> {
        let mut cues: Vec<&Cue> = self.cues.iter().collect();
        cues.sort_by(|a, b| a.start.total_cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        cues
    }

    /// Every cue whose inclusive `[start, end]` range contains `time`.
    ///
    /// Visibility is inclusive on both bounds, unlike the half-open overlap
    /// test: at a shared boundary instant both neighbors are on screen.
    pub fn active_at(&self, time: f64) -> Vec<&Cue> {
        self.cues.iter().filter(|c| c.active_at(time)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn snapshot(timeline: &Timeline) -> Vec<Cue> {
        timeline.sorted().into_iter().cloned().collect()
    }

    fn assert_invariants(timeline: &Timeline) {
        let cues = timeline.sorted();
        for cue in &cues {
            assert!(cue.start < cue.end, "cue {} has reversed range", cue.id);
        }
        for (i, a) in cues.iter().enumerate() {
            for b in &cues[i + 1..] {
                assert!(
                    !a.overlaps_range(b.start, b.end),
                    "cues {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn add_into_empty() {
        let mut timeline = Timeline::new();
        let cue = timeline.add("x", 5.0, 15.0).unwrap();
        assert_eq!(cue.text, "x");
        assert_eq!(cue.start, 5.0);
        assert_eq!(cue.end, 15.0);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.get(cue.id), Some(&cue));
        assert_invariants(&timeline);
    }

    #[test]
    fn reject_reversed_range() {
        let mut timeline = Timeline::new();
        assert_eq!(
            timeline.add("x", 10.0, 10.0),
            Err(TimelineError::InvalidRange {
                start: 10.0,
                end: 10.0
            })
        );
        assert_eq!(
            timeline.add("x", 10.0, 5.0),
            Err(TimelineError::InvalidRange {
                start: 10.0,
                end: 5.0
            })
        );
        assert!(timeline.is_empty());
    }

    #[test]
    fn reject_negative_start() {
        let mut timeline = Timeline::new();
        assert_eq!(
            timeline.add("x", -1.0, 5.0),
            Err(TimelineError::InvalidRange {
                start: -1.0,
                end: 5.0
            })
        );
    }

    #[test]
    fn reject_empty_text() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.add("", 0.0, 5.0), Err(TimelineError::EmptyText));
        assert!(timeline.is_empty());
    }

    #[test]
    fn boundary_touching_ranges_are_accepted() {
        let mut timeline = Timeline::new();
        timeline.add("a", 0.0, 10.0).unwrap();
        timeline.add("b", 10.0, 20.0).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_invariants(&timeline);
    }

    #[test]
    fn rejected_overlap_leaves_timeline_unchanged() {
        let mut timeline = Timeline::new();
        timeline.add("a", 0.0, 10.0).unwrap();
        timeline.add("b", 10.0, 20.0).unwrap();
        let before = snapshot(&timeline);

        assert_eq!(
            timeline.add("y", 10.0, 20.0),
            Err(TimelineError::Overlap {
                start: 10.0,
                end: 20.0
            })
        );
        assert_eq!(
            timeline.add("z", 5.0, 11.0),
            Err(TimelineError::Overlap {
                start: 5.0,
                end: 11.0
            })
        );

        assert_eq!(snapshot(&timeline), before);
        assert_invariants(&timeline);
    }

    #[test]
    fn overlap_probe_is_half_open() {
        let mut timeline = Timeline::new();
        timeline.add("a", 0.0, 10.0).unwrap();
        assert!(!timeline.overlaps(10.0, 20.0));
        assert!(timeline.overlaps(9.5, 20.0));
        assert!(timeline.overlaps(-5.0, 0.5));
        assert!(!timeline.overlaps(-5.0, 0.0));
    }

    #[test]
    fn active_lookup_is_inclusive_on_both_sides() {
        let mut timeline = Timeline::new();
        let a = timeline.add("a", 0.0, 10.0).unwrap();
        let b = timeline.add("b", 10.0, 20.0).unwrap();

        let at_boundary = timeline.active_at(10.0);
        assert_eq!(at_boundary.len(), 2);
        assert!(at_boundary.iter().any(|c| c.id == a.id));
        assert!(at_boundary.iter().any(|c| c.id == b.id));

        assert!(timeline.active_at(25.0).is_empty());
    }

    #[test]
    fn sorted_orders_by_start() {
        let mut timeline = Timeline::new();
        timeline.add("third", 20.0, 30.0).unwrap();
        timeline.add("first", 0.0, 10.0).unwrap();
        timeline.add("second", 10.0, 20.0).unwrap();

        let texts: Vec<&str> = timeline.sorted().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let mut timeline = Timeline::new();
        let cue = timeline.add("before", 0.0, 10.0).unwrap();
        let updated = timeline.update(cue.id, "after", 2.0, 8.0).unwrap();
        assert_eq!(updated.id, cue.id);
        assert_eq!(updated.text, "after");
        assert_eq!(timeline.get(cue.id), Some(&updated));
        assert_invariants(&timeline);
    }

    #[test]
    fn update_excludes_own_slot_from_overlap_scan() {
        let mut timeline = Timeline::new();
        let cue = timeline.add("a", 0.0, 10.0).unwrap();
        // widening within its own slot is fine
        timeline.update(cue.id, "a", 1.0, 9.0).unwrap();
        timeline.update(cue.id, "a", 0.0, 10.0).unwrap();
        assert_invariants(&timeline);
    }

    #[test]
    fn update_revalidates_against_other_cues() {
        let mut timeline = Timeline::new();
        let a = timeline.add("a", 0.0, 10.0).unwrap();
        timeline.add("b", 10.0, 20.0).unwrap();
        let before = snapshot(&timeline);

        assert_eq!(
            timeline.update(a.id, "a", 5.0, 15.0),
            Err(TimelineError::Overlap {
                start: 5.0,
                end: 15.0
            })
        );
        assert_eq!(
            timeline.update(a.id, "a", 8.0, 3.0),
            Err(TimelineError::InvalidRange {
                start: 8.0,
                end: 3.0
            })
        );

        assert_eq!(snapshot(&timeline), before);
    }

    #[test]
    fn update_unknown_cue() {
        let mut timeline = Timeline::new();
        let ghost = CueId::generate();
        assert_eq!(
            timeline.update(ghost, "x", 0.0, 1.0),
            Err(TimelineError::UnknownCue(ghost))
        );
    }
}
