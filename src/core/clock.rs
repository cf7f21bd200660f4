use std::cell::Cell;
use std::time::Instant;

/// Source of elapsed seconds since scene initialization
pub trait TimeSource {
    fn elapsed(&self) -> f32;
}

/// Monotonic scene clock
/// Elapsed time feeds shader uniforms, delta feeds animations
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for Clock {
    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Hand-driven time source for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f32) {
        self.now.set(seconds);
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::rc::Rc<T> {
    fn elapsed(&self) -> f32 {
        (**self).elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009 && delta <= 0.050);
    }

    #[test]
    fn clock_resets() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        assert!(clock.tick() < 0.005);
        assert!(clock.elapsed() < 0.005);
    }

    #[test]
    fn clock_elapsed_is_monotonic() {
        let clock = Clock::new();
        let a = clock.elapsed();
        thread::sleep(Duration::from_millis(2));
        assert!(clock.elapsed() > a);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
        clock.set(2.0);
        assert_eq!(clock.elapsed(), 2.0);
    }
}
