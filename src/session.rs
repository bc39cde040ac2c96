use tracing::info;

pub const STARTING_LIFE_POINTS: u32 = 3;
pub const POINTS_PER_CHAR: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionPhase {
    NotStarted,
    /// Waiting on the word pool before the first tick
    Loading,
    Running,
    Ended,
}

/// End-of-session numbers handed to the summary screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalStats {
    pub score: u64,
    pub words_completed: u32,
    pub wpm: u32,
    pub accuracy: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub life_points: u32,
    pub score: u64,
    pub started_at_ms: f64,
    pub elapsed_ms: f64,
    // Typing counters
    pub words_completed: u32,
    pub total_keystrokes: u32,
    pub correct_keystrokes: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            life_points: STARTING_LIFE_POINTS,
            score: 0,
            started_at_ms: 0.0,
            elapsed_ms: 0.0,
            words_completed: 0,
            total_keystrokes: 0,
            correct_keystrokes: 0,
        }
    }
}

impl SessionState {
    pub fn begin_loading(&mut self) {
        self.phase = SessionPhase::Loading;
    }

    /// Resets every counter and starts the clock at `now_ms`
    pub fn begin(&mut self, now_ms: f64) {
        *self = Self {
            phase: SessionPhase::Running,
            started_at_ms: now_ms,
            ..Self::default()
        };
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn has_ended(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn set_clock(&mut self, now_ms: f64) {
        self.elapsed_ms = (now_ms - self.started_at_ms).max(0.0);
    }

    /// A target reached the base. Returns true if this ended the session.
    pub fn record_base_collision(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.life_points = self.life_points.saturating_sub(1);
        if self.life_points == 0 {
            self.phase = SessionPhase::Ended;
            info!(
                score = self.score,
                words = self.words_completed,
                "Session ended"
            );
            return true;
        }
        false
    }

    pub fn record_keystroke(&mut self) {
        self.record_keystrokes(1);
    }

    /// One key press can land several chars in the buffer; each counts
    pub fn record_keystrokes(&mut self, count: usize) {
        self.total_keystrokes = self.total_keystrokes.saturating_add(count as u32);
    }

    /// Credits a fully typed word of `len` characters
    pub fn record_match(&mut self, len: usize) {
        self.score += POINTS_PER_CHAR * len as u64;
        self.words_completed += 1;
        self.correct_keystrokes += len as u32;
    }

    pub fn final_stats(&self, now_ms: f64) -> FinalStats {
        let duration_ms = now_ms - self.started_at_ms;
        let duration_minutes = duration_ms / 60_000.0;

        let wpm = if duration_minutes > 0.0 {
            (self.words_completed as f64 / duration_minutes).round() as u32
        } else {
            0
        };

        let accuracy = if self.total_keystrokes == 0 {
            0
        } else {
            (100.0 * self.correct_keystrokes as f64 / self.total_keystrokes as f64).round() as u32
        };

        FinalStats {
            score: self.score,
            words_completed: self.words_completed,
            wpm,
            accuracy,
            duration_ms: duration_ms.max(0.0),
        }
    }
}
