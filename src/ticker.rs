use std::time::{Duration, Instant};

/// Default event poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Cadence of the countdown
pub const SECOND: Duration = Duration::from_secs(1);

/// Get the event poll interval
pub fn tick_duration(tick_ms: Option<u64>) -> Duration {
    Duration::from_millis(tick_ms.unwrap_or(DEFAULT_TICK_MS).max(1))
}

/// A once-per-second schedule the timer engine arms while running.
///
/// At most one schedule is outstanding: `arm` restarts the cadence from
/// now and `cancel` drops it.
pub trait TickSource {
    fn arm(&mut self);
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
    /// Whole seconds due since the last call, zero when not armed
    fn take_due(&mut self) -> u32;
}

/// Wall-clock schedule backed by `Instant`
#[derive(Debug, Default)]
pub struct WallClockTicker {
    next_due: Option<Instant>,
}

impl WallClockTicker {
    pub fn new() -> Self {
        Self::default()
    }

    fn take_due_at(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };
        let mut due = 0;
        while next <= now {
            due += 1;
            next += SECOND;
        }
        self.next_due = Some(next);
        due
    }
}

impl TickSource for WallClockTicker {
    fn arm(&mut self) {
        self.next_due = Some(Instant::now() + SECOND);
    }

    fn cancel(&mut self) {
        self.next_due = None;
    }

    fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    fn take_due(&mut self) -> u32 {
        self.take_due_at(Instant::now())
    }
}

/// Simulated seconds, pushed by hand
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualTicker {
    armed: bool,
    pending: u32,
}

#[cfg(test)]
impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `seconds` of simulated time pass. Ignored while not armed.
    pub fn advance(&mut self, seconds: u32) {
        if self.armed {
            self.pending += seconds;
        }
    }
}

#[cfg(test)]
impl TickSource for ManualTicker {
    fn arm(&mut self) {
        self.armed = true;
        self.pending = 0;
    }

    fn cancel(&mut self) {
        self.armed = false;
        self.pending = 0;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn take_due(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}
