use std::time::{Duration, Instant};

/// Wall-clock tick counter for interactive shells
///
/// Counts how many whole tick periods have elapsed while running. Pausing
/// freezes the count; changing the period keeps the current count and
/// continues at the new rate.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    base_ticks: u64,
    running_since: Option<Instant>,
}

impl TickClock {
    pub fn new(tick_period_ms: u32) -> Self {
        Self {
            period: Duration::from_millis(tick_period_ms.max(1) as u64),
            base_ticks: 0,
            running_since: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn ticks(&self) -> u64 {
        self.ticks_at(Instant::now())
    }

    pub fn reset(&mut self) {
        self.base_ticks = 0;
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Jump to `tick`, keeping the running state
    pub fn seek(&mut self, tick: u64) {
        self.seek_at(tick, Instant::now());
    }

    pub fn set_period(&mut self, tick_period_ms: u32) {
        let now = Instant::now();
        self.base_ticks = self.ticks_at(now);
        if self.running_since.is_some() {
            self.running_since = Some(now);
        }
        self.period = Duration::from_millis(tick_period_ms.max(1) as u64);
    }

    /// Time left until the next tick, when running
    pub fn until_next_tick(&self) -> Option<Duration> {
        let since = self.running_since?;
        let elapsed = since.elapsed();
        let period_ns = self.period.as_nanos();
        let into_tick = elapsed.as_nanos() % period_ns;
        Some(Duration::from_nanos((period_ns - into_tick) as u64))
    }

    fn start_at(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    fn seek_at(&mut self, tick: u64, now: Instant) {
        self.base_ticks = tick;
        if self.running_since.is_some() {
            self.running_since = Some(now);
        }
    }

    fn pause_at(&mut self, now: Instant) {
        self.base_ticks = self.ticks_at(now);
        self.running_since = None;
    }

    fn ticks_at(&self, now: Instant) -> u64 {
        let running = self
            .running_since
            .map(|since| {
                (now.saturating_duration_since(since).as_nanos() / self.period.as_nanos()) as u64
            })
            .unwrap_or(0);
        self.base_ticks + running
    }
}
