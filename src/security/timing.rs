//! Timing attack protection utilities
//!
//! Credential checks must not reveal through response latency whether an
//! email exists or how much of a digest matched. Digest comparison is
//! constant time, and failed logins are padded to a minimum duration.

use std::time::{Duration, Instant};

/// Constant-time string comparison.
///
/// Used for password digest comparison so equality checks do not
/// short-circuit on the first differing byte.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.bytes().zip(b.bytes()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

/// Add artificial delay so authentication failures take a minimum amount of time
pub async fn add_auth_delay(start_time: Instant, min_duration: Duration) {
    let elapsed = start_time.elapsed();
    if elapsed < min_duration {
        tokio::time::sleep(min_duration - elapsed).await;
    }
}

/// Tracks elapsed time for a credential check and pads it to a floor.
pub struct AuthTimer {
    start: Instant,
    min_duration: Duration,
}

impl AuthTimer {
    pub fn new(min_duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            min_duration,
        }
    }

    /// Wait until the minimum duration has elapsed
    pub async fn wait(self) {
        add_auth_delay(self.start, self.min_duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("hello", "hello"));
        assert!(!constant_time_eq("hello", "world"));
        assert!(!constant_time_eq("hello", "hell"));
        assert!(!constant_time_eq("", "a"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_constant_time_eq_hex_digests() {
        let a = "a".repeat(64);
        let mut b = "a".repeat(63);
        b.push('b');
        assert!(constant_time_eq(&a, &a.clone()));
        assert!(!constant_time_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_auth_timer_pads_to_minimum() {
        let timer = AuthTimer::new(Duration::from_millis(10));
        let start = Instant::now();
        timer.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
