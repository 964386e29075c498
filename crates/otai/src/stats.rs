//! Statistics counter types.
//!
//! Counters are read-only numeric values keyed by an opaque counter id.
//! Which counters an object supports, and what each one measures, is
//! defined by the driver behind the dispatch table, not by this contract.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque statistics counter id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatId(pub u32);

impl StatId {
    /// Returns the raw counter id.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stat-{}", self.0)
    }
}

impl fmt::LowerHex for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Counter accounting mode for extended statistics retrieval.
///
/// Numeric codes are stable (from `sai_stats_mode_t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum StatsMode {
    /// Read the counters, leaving them untouched.
    #[default]
    Read = 0,
    /// Read the counters, then reset each one to its baseline.
    ReadAndClear = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_id_display() {
        assert_eq!(StatId(7).to_string(), "stat-7");
        assert_eq!(format!("0x{:x}", StatId(0xab)), "0xab");
        assert_eq!(StatId(7).as_raw(), 7);
    }

    #[test]
    fn test_stats_mode_default() {
        assert_eq!(StatsMode::default(), StatsMode::Read);
        assert_eq!(StatsMode::ReadAndClear as u32, 1);
    }
}
