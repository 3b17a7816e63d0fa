//! Request id allocation.

/// Hands out request ids 1, 2, 3, … for the lifetime of one client.
///
/// Takes `&mut self`; the owning client serializes access, so no atomics
/// are needed here.
#[derive(Debug, Default)]
pub struct RequestIdAllocator {
    last: u64,
}

impl RequestIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next id, one greater than the previous.
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// The most recently issued id, or 0 if none has been issued.
    pub fn last(&self) -> u64 {
        self.last
    }
}
