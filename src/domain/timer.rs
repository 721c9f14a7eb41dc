use super::enums::TimerMode;
use crate::ticker::TickSource;

/// Snapshot of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// Seconds left in the current phase
    pub remaining: u32,
    pub mode: TimerMode,
    pub running: bool,
}

impl TimerState {
    fn initial() -> Self {
        Self {
            remaining: TimerMode::Focus.total_seconds(),
            mode: TimerMode::Focus,
            running: false,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.remaining / 60
    }

    pub fn seconds(&self) -> u32 {
        self.remaining % 60
    }

    /// Countdown as "MM:SS"
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes(), self.seconds())
    }

    /// "Deep Work" or "Short Break"
    pub fn phase_label(&self) -> &'static str {
        self.mode.label()
    }

    /// Fraction of the current phase already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        let total = self.mode.total_seconds();
        let elapsed = total.saturating_sub(self.remaining);
        f64::from(elapsed) / f64::from(total)
    }
}

/// Pomodoro countdown: 25 minutes of focus, 5 of break, repeating.
///
/// The engine arms its tick source while running and cancels it when
/// paused or reset, so there is never more than one schedule. Reaching
/// 0:00 flips the mode, reloads the full duration and keeps running.
pub struct FocusTimerEngine<T: TickSource> {
    state: TimerState,
    ticker: T,
}

impl<T: TickSource> FocusTimerEngine<T> {
    pub fn new(mut ticker: T) -> Self {
        ticker.cancel();
        Self {
            state: TimerState::initial(),
            ticker,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn start(&mut self) {
        if !self.state.running {
            self.state.running = true;
            self.ticker.arm();
        }
    }

    pub fn pause(&mut self) {
        if self.state.running {
            self.state.running = false;
            self.ticker.cancel();
        }
    }

    /// Start if paused, pause if running
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Back to Paused / Focus / 25:00 from any state
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state = TimerState::initial();
    }

    /// Advance one second. Returns the phase that just finished, if any.
    pub fn tick(&mut self) -> Option<TimerMode> {
        if !self.state.running {
            return None;
        }
        self.state.remaining = self.state.remaining.saturating_sub(1);
        if self.state.remaining == 0 {
            return Some(self.switch_mode());
        }
        None
    }

    /// Apply every second the tick source has accumulated.
    /// Returns the last phase that finished during these ticks.
    pub fn pump(&mut self) -> Option<TimerMode> {
        if !self.ticker.is_armed() {
            return None;
        }
        let due = self.ticker.take_due();
        let mut finished = None;
        for _ in 0..due {
            if let Some(mode) = self.tick() {
                finished = Some(mode);
            }
        }
        finished
    }

    fn switch_mode(&mut self) -> TimerMode {
        let finished = self.state.mode;
        self.state.mode = finished.next();
        self.state.remaining = self.state.mode.total_seconds();
        self.ticker.arm();
        tracing::debug!(finished = ?finished, next = ?self.state.mode, "timer phase switched");
        finished
    }

    #[cfg(test)]
    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}
