// ABOUTME: Sequential admission gate mapping Ping/Pong requests through a token bucket.
// ABOUTME: Validates the whole batch up front, then admits one request per permit.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::bucket::TokenBucket;
use crate::error::GateError;

/// Default burst allowance for a gate.
pub const DEFAULT_BURST: usize = 4;

/// Default permit refill period (steady state: 10 admissions/second).
pub const DEFAULT_REFILL_PERIOD: Duration = Duration::from_millis(100);

/// One admitted request: the mapped response plus the mint time of the
/// permit that admitted it.
///
/// Displays as `"<MappedWord> <unix-millis>"`. Requests admitted from
/// the pre-filled burst share a single mint time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// The mapped response word.
    pub response: &'static str,
    /// Mint time of the consumed permit.
    pub admitted_at: SystemTime,
}

impl std::fmt::Display for Admission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let millis = self
            .admitted_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        write!(f, "{} {}", self.response, millis)
    }
}

/// Rate-limiting admission gate over a sequential request stream.
///
/// Requests are processed strictly in input order: the gate consumes
/// one permit (blocking until available) before admitting each
/// request. The first `burst` requests are admitted immediately from
/// the pre-filled bucket; after that, admissions proceed at one per
/// `refill_period`.
///
/// # Request mapping
///
/// `"Ping"` maps to `"Pong"` and `"Pong"` maps to `"Ping"`. Any other
/// request is rejected: the whole batch is validated before a single
/// permit is consumed, so an unmapped request fails the call with
/// `GateError::Unmapped` and zero admissions.
pub struct Gate {
    burst: usize,
    refill_period: Duration,
}

impl Default for Gate {
    /// A gate with the canonical burst of 4 and 100ms refill period.
    fn default() -> Self {
        Self {
            burst: DEFAULT_BURST,
            refill_period: DEFAULT_REFILL_PERIOD,
        }
    }
}

impl Gate {
    /// Create a gate with an explicit burst size and refill period.
    ///
    /// Returns `Err(GateError::Config)` if `burst` is zero or
    /// `refill_period` is zero.
    pub fn new(burst: usize, refill_period: Duration) -> Result<Self, GateError> {
        if burst == 0 {
            return Err(GateError::Config("burst must be at least 1".into()));
        }
        if refill_period.is_zero() {
            return Err(GateError::Config("refill period must be positive".into()));
        }
        Ok(Self {
            burst,
            refill_period,
        })
    }

    /// Map a request word to its response word.
    ///
    /// Returns `Err(GateError::Unmapped)` for anything other than the
    /// two known request words.
    pub fn map_request(request: &str) -> Result<&'static str, GateError> {
        match request {
            "Ping" => Ok("Pong"),
            "Pong" => Ok("Ping"),
            other => Err(GateError::Unmapped(other.to_string())),
        }
    }

    /// Admit every request in order, one permit each.
    ///
    /// Returns one [`Admission`] per request, in input order. The
    /// gate's refill task is stopped before returning; it never
    /// outlives the call.
    pub async fn process<S>(&self, requests: &[S]) -> Result<Vec<Admission>, GateError>
    where
        S: AsRef<str>,
    {
        // Reject unmapped input before consuming any permits.
        let responses = requests
            .iter()
            .map(|request| Self::map_request(request.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if responses.is_empty() {
            return Ok(Vec::new());
        }

        let mut bucket = TokenBucket::new(self.burst, self.refill_period)?;

        let mut admissions = Vec::with_capacity(responses.len());
        for response in responses {
            let admitted_at = bucket.acquire().await?;
            admissions.push(Admission {
                response,
                admitted_at,
            });
        }

        bucket.stop();
        Ok(admissions)
    }
}
