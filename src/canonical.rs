//! Every checked operation takes its input in one of two canonical forms: `long long` (`i64`)
//!  or `unsigned long long` (`u64`). Instrumented code widens narrower expressions to one of
//!  those before calling a check, so the checks only ever need to deal with these two.

use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Signedness {
    Signed,
    Unsigned,
}
impl Signedness {
    /// the suffix that distinguishes the two entry points of a target, e.g. `__INTCHECK_INT_S`
    pub fn suffix(&self) -> &'static str {
        match self {
            Signedness::Signed => "S",
            Signedness::Unsigned => "U",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Signedness> {
        match suffix {
            "S" => Some(Signedness::Signed),
            "U" => Some(Signedness::Unsigned),
            _ => None,
        }
    }

    /// the C spelling of the canonical type for this signedness
    pub fn c_canonical_type(&self) -> &'static str {
        match self {
            Signedness::Signed => "long long signed int",
            Signedness::Unsigned => "long long unsigned int",
        }
    }
}

/// A canonical input value, tagged with its signedness.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Canonical {
    Signed(i64),
    Unsigned(u64),
}

impl Display for Canonical {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Canonical::Signed(v) => write!(f, "{}", v),
            Canonical::Unsigned(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Canonical {
    fn from(value: i64) -> Self {
        Canonical::Signed(value)
    }
}

impl From<u64> for Canonical {
    fn from(value: u64) -> Self {
        Canonical::Unsigned(value)
    }
}

impl Canonical {
    pub fn signedness(&self) -> Signedness {
        match self {
            Canonical::Signed(_) => Signedness::Signed,
            Canonical::Unsigned(_) => Signedness::Unsigned,
        }
    }

    /// The exact numeric value. Every `i64` and every `u64` is representable as `i128`, so
    ///  comparisons on this value never mix up sign and magnitude.
    pub fn value(&self) -> i128 {
        match *self {
            Canonical::Signed(v) => v as i128,
            Canonical::Unsigned(v) => v as i128,
        }
    }

    /// Parses a decimal literal into the canonical form selected by `signedness`.
    pub fn parse(s: &str, signedness: Signedness) -> anyhow::Result<Canonical> {
        let s = s.trim();
        match signedness {
            Signedness::Signed => Ok(Canonical::Signed(s.parse()?)),
            Signedness::Unsigned => Ok(Canonical::Unsigned(s.parse()?)),
        }
    }
}
