// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sliding-window admission control.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Key used when callers are not told apart.
pub const GLOBAL_KEY: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rate limit exceeded. Please wait before making another request.")]
pub struct RateLimitError {
    pub max_calls: usize,
    pub window: Duration,
}

#[derive(Debug)]
pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    calls: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self { max_calls, window, calls: Mutex::new(HashMap::new()) }
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> Result<(), RateLimitError> {
        self.check_at(key, Instant::now())
    }

    /// Drops timestamps at least one window old, then admits and records `now` if fewer than
    /// `max_calls` remain.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
        let recent = calls.entry(key.to_owned()).or_default();

        while recent
            .front()
            .is_some_and(|&stamp| now.saturating_duration_since(stamp) >= self.window)
        {
            recent.pop_front();
        }

        if recent.len() < self.max_calls {
            recent.push_back(now);
            Ok(())
        } else {
            Err(RateLimitError { max_calls: self.max_calls, window: self.window })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::{RateLimiter, GLOBAL_KEY};

    #[test]
    fn rejects_once_the_window_is_full() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let t0 = Instant::now();

        for step in 0..3 {
            limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(step)).expect("admitted");
        }
        let err = limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(10)).unwrap_err();
        assert_eq!(err.max_calls, 3);
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Please wait before making another request."
        );
    }

    #[test]
    fn old_calls_slide_out_of_the_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let t0 = Instant::now();

        limiter.check_at(GLOBAL_KEY, t0).expect("first");
        limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(30)).expect("second");
        limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(59)).unwrap_err();

        // The first call is exactly one window old now.
        limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(60)).expect("slot freed");
        limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(61)).unwrap_err();
    }

    #[test]
    fn rejected_calls_are_not_recorded() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let t0 = Instant::now();

        limiter.check_at(GLOBAL_KEY, t0).expect("first");
        for step in 1..9 {
            limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(step)).unwrap_err();
        }
        limiter.check_at(GLOBAL_KEY, t0 + Duration::from_secs(10)).expect("window passed");
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        limiter.check_at("alice", now).expect("alice");
        limiter.check_at("bob", now).expect("bob");
        limiter.check_at("alice", now).unwrap_err();
    }

    #[test]
    fn concurrent_checks_admit_exactly_the_cap() {
        let limiter = Arc::new(RateLimiter::new(25, Duration::from_secs(3600)));
        let admitted = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|scope| {
            for _ in 0..10 {
                let limiter = limiter.clone();
                let admitted = admitted.clone();
                scope.spawn(move || {
                    for _ in 0..10 {
                        if limiter.check(GLOBAL_KEY).is_ok() {
                            admitted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(admitted.load(Ordering::Relaxed), 25);
    }
}
