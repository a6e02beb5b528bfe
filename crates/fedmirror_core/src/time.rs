//! Epoch-millis timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An instant expressed as milliseconds since the Unix epoch.
///
/// Timestamps are totally ordered. The epoch itself is the neutral
/// element used when no previous synchronization exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The Unix epoch (zero milliseconds).
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw epoch-millis value.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ts:{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero() {
        assert_eq!(Timestamp::EPOCH.as_millis(), 0);
    }

    #[test]
    fn ordering() {
        let earlier = Timestamp::from_millis(50);
        let later = Timestamp::from_millis(100);
        assert!(earlier < later);
        assert!(Timestamp::EPOCH < earlier);
    }

    #[test]
    fn display() {
        let ts = Timestamp::from_millis(1234);
        assert_eq!(format!("{ts}"), "ts:1234");
    }
}
