//! Fixed-point optical units.
//!
//! Optical power and gain figures travel across the wire as scaled
//! integers (units of 0.01 dB / 0.01 dBm) so that values interchange
//! bit-exactly between vendors. These newtypes keep the scaling explicit
//! in the typed API; nothing in this crate converts them to floating
//! point except for display.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relative gain, attenuation, or loss in units of 0.01 dB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Db(i32);

impl Db {
    pub const ZERO: Self = Db(0);

    /// Creates a value from hundredths of a dB.
    pub const fn from_hundredths(hundredths: i32) -> Self {
        Db(hundredths)
    }

    /// Returns the value in hundredths of a dB.
    pub const fn as_hundredths(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Db {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} dB",
            sign,
            (self.0 / 100).unsigned_abs(),
            (self.0 % 100).unsigned_abs()
        )
    }
}

/// Absolute optical power in units of 0.01 dBm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dbm(i32);

impl Dbm {
    pub const ZERO: Self = Dbm(0);

    /// Creates a value from hundredths of a dBm.
    pub const fn from_hundredths(hundredths: i32) -> Self {
        Dbm(hundredths)
    }

    /// Returns the value in hundredths of a dBm.
    pub const fn as_hundredths(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Dbm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} dBm",
            sign,
            (self.0 / 100).unsigned_abs(),
            (self.0 % 100).unsigned_abs()
        )
    }
}
