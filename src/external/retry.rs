// ABOUTME: Retry policy for outbound HTTP calls: transient classification and backoff timing
// ABOUTME: Exponential backoff clamped between a floor and a ceiling, with optional jitter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use rand::Rng;

use crate::config::RetrySettings;
use crate::constants::recipe_search::MAX_ATTEMPTS;

/// Retry policy for one upstream API
///
/// Only transient transport failures are retried. `max_attempts` counts the
/// first call, so a value of 3 means at most two retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first call
    pub max_attempts: u32,
    /// Smallest delay between attempts
    pub floor: Duration,
    /// Largest delay between attempts, before jitter
    pub ceiling: Duration,
    /// Add up to half the delay as random jitter
    pub jitter: bool,
}

impl RetryConfig {
    /// Policy with no delay between attempts
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            floor: Duration::ZERO,
            ceiling: Duration::ZERO,
            jitter: false,
        }
    }

    /// Deterministic delay before the attempt following `attempt` (1-based)
    ///
    /// `floor * 2^(attempt-1)`, clamped to `[floor, ceiling]`.
    #[must_use]
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let floor_ms = u64::try_from(self.floor.as_millis()).unwrap_or(u64::MAX);
        let ceiling_ms = u64::try_from(self.ceiling.as_millis()).unwrap_or(u64::MAX);
        let delay_ms = floor_ms
            .saturating_mul(1_u64 << exponent)
            .clamp(floor_ms, ceiling_ms.max(floor_ms));
        Duration::from_millis(delay_ms)
    }

    /// Delay to sleep before the next attempt, including jitter when enabled
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        if !self.jitter {
            return base;
        }
        let max_jitter_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX) / 2;
        if max_jitter_ms == 0 {
            return base;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..=max_jitter_ms);
        base + Duration::from_millis(jitter_ms)
    }

    /// Whether another attempt is allowed after `attempt` calls
    #[must_use]
    pub const fn can_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.clamp(1, MAX_ATTEMPTS),
            floor: Duration::from_millis(settings.floor_ms),
            ceiling: Duration::from_millis(settings.ceiling_ms),
            jitter: settings.jitter_enabled,
        }
    }
}

/// Check if a transport error is transient (timeout, refused or reset connection)
///
/// Anything else, including unparseable or truncated responses, is not.
#[must_use]
pub fn is_transient(error: &reqwest::Error) -> bool {
    if error.is_status() || error.is_decode() || error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || is_connection_reset(error)
}

/// Walk the source chain looking for a reset connection
fn is_connection_reset(error: &(dyn StdError + 'static)) -> bool {
    let mut source = error.source();
    while let Some(cause) = source {
        if cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_error| io_error.kind() == io::ErrorKind::ConnectionReset)
        {
            return true;
        }
        source = cause.source();
    }
    false
}
