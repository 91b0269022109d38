//! Provider failover chain: retry with backoff, then the next provider.
//!
//! [`ProviderChain`] is the explicit state machine behind each category
//! query. The chain sits in [`ChainState::Attempting`] for one provider at
//! a time: errors burn that provider's retry budget with exponentially
//! doubling backoff, an authoritative empty answer advances to the next
//! provider immediately (the provider is healthy, retrying it would not
//! produce data), and running out of providers lands in
//! [`ChainState::Exhausted`]. The chain never sleeps itself; it hands the
//! backoff duration to the caller.

use std::time::Duration;

use tracing::warn;

use crate::types::Provider;

/// Chain position: which provider is live and which try this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    /// `provider` is about to run try number `attempt` (1-based).
    Attempting { provider: Provider, attempt: u32 },
    /// Every provider in the chain has been used up.
    Exhausted,
}

/// Ordered failover chain over the configured providers.
#[derive(Debug)]
pub struct ProviderChain {
    providers: Vec<Provider>,
    max_attempts: u32,
    backoff_base: Duration,
    index: usize,
    attempt: u32,
}

impl ProviderChain {
    /// Create a chain trying `providers` in order, giving each up to
    /// `max_attempts` tries with `backoff_base_ms` doubling between them.
    pub fn new(providers: Vec<Provider>, max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            providers,
            max_attempts,
            backoff_base: Duration::from_millis(backoff_base_ms),
            index: 0,
            attempt: 1,
        }
    }

    /// Current chain state. Call before each attempt.
    pub fn state(&self) -> ChainState {
        match self.providers.get(self.index) {
            Some(&provider) => ChainState::Attempting {
                provider,
                attempt: self.attempt,
            },
            None => ChainState::Exhausted,
        }
    }

    /// Record an error from the live provider.
    ///
    /// Returns the backoff to wait before retrying the same provider, or
    /// `None` when the retry budget is spent and the chain has moved to
    /// the next provider (or exhausted).
    pub fn record_failure(&mut self) -> Option<Duration> {
        let Some(&provider) = self.providers.get(self.index) else {
            return None;
        };

        if self.attempt < self.max_attempts {
            let backoff = self.backoff();
            warn!(
                provider = %provider,
                attempt = self.attempt,
                backoff_ms = backoff.as_millis() as u64,
                "provider attempt failed, retrying"
            );
            self.attempt += 1;
            Some(backoff)
        } else {
            warn!(
                provider = %provider,
                attempts = self.attempt,
                "provider retry budget spent, moving to next"
            );
            self.advance();
            None
        }
    }

    /// Record an authoritative empty answer from the live provider and
    /// advance to the next one.
    pub fn record_empty(&mut self) {
        if let Some(&provider) = self.providers.get(self.index) {
            tracing::debug!(provider = %provider, "provider answered empty, trying next");
        }
        self.advance();
    }

    /// Return `true` once every provider has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.providers.len()
    }

    /// Return the number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Return `true` if the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn advance(&mut self) {
        self.index += 1;
        self.attempt = 1;
    }

    /// Exponential backoff for the current attempt: `base * 2^(attempt-1)`.
    fn backoff(&self) -> Duration {
        self.backoff_base * 2u32.saturating_pow(self.attempt - 1)
    }
}
