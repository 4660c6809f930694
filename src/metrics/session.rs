use std::time::{Duration, Instant};

/// Tracking across rounds of one sitting: round timer, rounds played and
/// the best score seen.
pub struct SessionMetrics {
    pub round_start: Instant,
    pub round_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            round_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.round_time = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.round_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.round_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
