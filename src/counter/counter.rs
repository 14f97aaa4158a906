// ABOUTME: Mutex-guarded integer counter for concurrent producers and consumers.
// ABOUTME: Every update is linearizable; no increment or decrement is ever lost.

use std::sync::Mutex;

/// A shared integer protected by a mutual-exclusion lock.
///
/// Any number of producers and consumers may update the counter
/// concurrently; the lock is held only for the duration of the
/// read-modify-write, so the final count is always the exact
/// arithmetic sum of every completed call.
///
/// The operations are synchronous and cheap, making the counter usable
/// from plain threads and async tasks alike.
pub struct Counter {
    items: Mutex<i64>,
}

impl Counter {
    /// Create a new counter starting at zero.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(0),
        }
    }

    /// Add `amount` to the count.
    pub fn produce(&self, amount: i64) {
        let mut items = self.items.lock().unwrap();
        *items += amount;
    }

    /// Subtract `amount` from the count.
    pub fn consume(&self, amount: i64) {
        let mut items = self.items.lock().unwrap();
        *items -= amount;
    }

    /// Get the current count.
    ///
    /// Reflects every `produce`/`consume` call that completed before
    /// this call; calls still in flight may or may not be included.
    pub fn count(&self) -> i64 {
        *self.items.lock().unwrap()
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
