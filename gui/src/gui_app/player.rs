/// Stand-in for a real media element: a clock with a fixed duration that
/// advances while playing and loops at the end of the clip. The editor only
/// ever talks to it through `current_time`, `duration`, and seek, so
/// swapping in real decode later would not touch the session.
pub struct Player {
    duration: f64,
    current_time: f64,
    playing: bool,
}

impl Player {
    pub fn new(duration: f64) -> Player {
        Player {
            duration,
            current_time: 0.0,
            playing: false,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn seek(&mut self, secs: f64) {
        self.current_time = secs.clamp(0.0, self.duration);
    }

    pub fn restart(&mut self) {
        self.current_time = 0.0;
    }

    /// Advance by one frame's wall-clock delta.
    pub fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.current_time += dt as f64;
        if self.current_time >= self.duration {
            self.current_time = 0.0;
        }
    }
}
