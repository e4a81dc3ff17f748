use std::time::Instant;

/// Wall-clock for the whole session, started when the session page loads.
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Advisory per-question countdown. Ticks once per second; reaching zero is
/// display-only and never advances the session.
pub struct QuestionCountdown {
    remaining: u32,
}

impl QuestionCountdown {
    pub fn new(time_limit: u32) -> Self {
        Self {
            remaining: time_limit,
        }
    }

    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self, time_limit: u32) {
        self.remaining = time_limit;
    }
}

/// mm:ss display formatting for clocks and countdowns.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
