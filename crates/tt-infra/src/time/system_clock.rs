use std::time::{SystemTime, UNIX_EPOCH};

use tt_core::ports::ClockPort;

/// Wall-clock [`ClockPort`]. Task ids derive from these millis, so the
/// value must be monotone enough for ordering within one session; a clock
/// behind the epoch clamps to zero rather than panicking.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_a_plausible_epoch_time() {
        // 2020-01-01 in millis; anything earlier means a broken clock.
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
