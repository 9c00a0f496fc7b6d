//! Millisecond time sources for [`Button`](crate::Button).

use embassy_time::Instant;

/// A monotonic millisecond counter.
///
/// The counter may wrap around `u32::MAX`; all elapsed time is computed with
/// [`elapsed_ms`], which stays correct across a single rollover.
pub trait Clock {
    /// Current tick count in milliseconds.
    fn now_ms(&mut self) -> u32;
}

/// Any `FnMut() -> u32` is a clock, e.g. `|| HAL_GetTick()` or a simulated counter in tests.
impl<F: FnMut() -> u32> Clock for F {
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// Clock backed by the `embassy-time` driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&mut self) -> u32 {
        // Truncation wraps every ~49.7 days, which `elapsed_ms` tolerates
        Instant::now().as_millis() as u32
    }
}

/// Milliseconds from `since` to `now`, wraparound-safe.
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
