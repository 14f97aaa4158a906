// ABOUTME: Admission gate module - token-bucket rate limiting with burst allowance.
// ABOUTME: Contains the TokenBucket permit primitive and the sequential Gate front.

mod bucket;
mod gate;

pub use bucket::TokenBucket;
pub use gate::{Admission, DEFAULT_BURST, DEFAULT_REFILL_PERIOD, Gate};
