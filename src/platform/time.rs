//! Wall-clock sources

use std::cell::Cell;

/// Milliseconds on a monotonic-enough wall clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// The real clock: `Date.now()` in the browser, `SystemTime` natively
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100.0);
        assert_eq!(clock.now_ms(), 100.0);
        clock.advance(16.5);
        assert_eq!(clock.now_ms(), 116.5);

        // A borrowed clock sees later advances
        fn read<C: Clock>(c: C) -> f64 {
            c.now_ms()
        }
        let shared = &clock;
        clock.advance(1000.0);
        assert_eq!(read(shared), 1116.5);
        assert_eq!(read(shared), read(&clock));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a > 0.0);
        assert!(b >= a);
    }
}
