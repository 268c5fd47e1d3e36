//! The target types of checked narrowing conversions, and the naming scheme that ties each
//!  (target, input signedness) pair to its entry point symbol `__INTCHECK_<STEM>_<S|U>`.
//!
//! The rewriter picks an entry point by the target type of a cast and the static signedness of
//!  the expression being cast, so both directions of the mapping are needed.

use std::ffi::{c_int, c_long, c_longlong, c_schar, c_short, c_uchar, c_uint, c_ulong, c_ulonglong, c_ushort};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use anyhow::anyhow;
use crate::canonical::Signedness;

pub const SYMBOL_PREFIX: &str = "__INTCHECK_";

macro_rules! targets {
    ($($variant:ident: $ty:ty, $stem:literal, $c_type:literal;)*) => {
        /// A target type of a checked narrowing conversion. Ranges come from the corresponding
        ///  Rust types, so platform dependent types (`long`, `size_t`, ...) get the range of
        ///  the platform the library is compiled for.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum Target {
            $($variant,)*
        }

        impl Target {
            pub const ALL: &'static [Target] = &[$(Target::$variant,)*];

            /// the part of the entry point symbol that identifies the target, e.g. `USHORT`
            pub fn stem(&self) -> &'static str {
                match self {
                    $(Target::$variant => $stem,)*
                }
            }

            /// the target type as it is spelled in C declarations
            pub fn c_type(&self) -> &'static str {
                match self {
                    $(Target::$variant => $c_type,)*
                }
            }

            pub fn min(&self) -> i128 {
                match self {
                    $(Target::$variant => <$ty>::MIN as i128,)*
                }
            }

            pub fn max(&self) -> i128 {
                match self {
                    $(Target::$variant => <$ty>::MAX as i128,)*
                }
            }

            pub fn symbol(&self, signedness: Signedness) -> &'static str {
                match (self, signedness) {
                    $(
                        (Target::$variant, Signedness::Signed) => concat!("__INTCHECK_", $stem, "_S"),
                        (Target::$variant, Signedness::Unsigned) => concat!("__INTCHECK_", $stem, "_U"),
                    )*
                }
            }
        }
    }
}

targets! {
    Int:       c_int,       "INT",     "int";
    UInt:      c_uint,      "UINT",    "unsigned int";
    Short:     c_short,     "SHORT",   "short";
    UShort:    c_ushort,    "USHORT",  "unsigned short";
    Char:      c_schar,     "CHAR",    "signed char";
    UChar:     c_uchar,     "UCHAR",   "unsigned char";
    Long:      c_long,      "LINT",    "long int";
    ULong:     c_ulong,     "ULINT",   "long unsigned int";
    LongLong:  c_longlong,  "LLINT",   "long long int";
    ULongLong: c_ulonglong, "ULLINT",  "long long unsigned int";
    Index:     usize,       "INDEX",   "size_t";
    PtrDiff:   isize,       "PTRDIFF", "ptrdiff_t";
    Int8:      i8,          "INT8",    "int8_t";
    UInt8:     u8,          "UINT8",   "uint8_t";
    Int16:     i16,         "INT16",   "int16_t";
    UInt16:    u16,         "UINT16",  "uint16_t";
    Int32:     i32,         "INT32",   "int32_t";
    UInt32:    u32,         "UINT32",  "uint32_t";
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.c_type())
    }
}

impl Target {
    pub fn from_stem(stem: &str) -> Option<Target> {
        Target::ALL.iter()
            .find(|t| t.stem() == stem)
            .copied()
    }

    pub fn is_signed(&self) -> bool {
        self.min() < 0
    }

    pub fn contains(&self, value: i128) -> bool {
        self.min() <= value && value <= self.max()
    }
}


/// One of the two narrowing entry points of a target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct EntryPoint {
    pub target: Target,
    pub signedness: Signedness,
}

impl Display for EntryPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Accepts both the full symbol (`__INTCHECK_INT_S`) and the unprefixed form (`INT_S`).
impl FromStr for EntryPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unprefixed = s.strip_prefix(SYMBOL_PREFIX).unwrap_or(s);

        let (stem, suffix) = unprefixed.rsplit_once('_')
            .ok_or_else(|| anyhow!("not a narrowing entry point: {}", s))?;

        let target = Target::from_stem(stem)
            .ok_or_else(|| anyhow!("unknown target type `{}` in {}", stem, s))?;
        let signedness = Signedness::from_suffix(suffix)
            .ok_or_else(|| anyhow!("entry point suffix must be S or U: {}", s))?;

        Ok(EntryPoint::new(target, signedness))
    }
}

impl EntryPoint {
    pub fn new(target: Target, signedness: Signedness) -> EntryPoint {
        EntryPoint { target, signedness }
    }

    pub fn symbol(&self) -> &'static str {
        self.target.symbol(self.signedness)
    }

    pub fn all() -> impl Iterator<Item = EntryPoint> {
        Target::ALL.iter()
            .flat_map(|&t| [EntryPoint::new(t, Signedness::Signed), EntryPoint::new(t, Signedness::Unsigned)])
    }

    /// The C declaration of this entry point, e.g.
    ///  `extern int __INTCHECK_INT_S(long long signed int x);`
    pub fn c_declaration(&self) -> String {
        format!("extern {} {}({} x);", self.target.c_type(), self.symbol(), self.signedness.c_canonical_type())
    }
}


#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use rstest::rstest;
    use super::*;

    #[test]
    fn test_matrix_size() {
        assert_eq!(Target::ALL.len(), 18);
        assert_eq!(EntryPoint::all().count(), 36);

        let symbols = EntryPoint::all().map(|e| e.symbol()).collect::<HashSet<_>>();
        assert_eq!(symbols.len(), 36);
    }

    #[rstest]
    #[case(Target::Char, -128, 127)]
    #[case(Target::UChar, 0, 255)]
    #[case(Target::Short, -32768, 32767)]
    #[case(Target::UShort, 0, 65535)]
    #[case(Target::Int, i32::MIN as i128, i32::MAX as i128)]
    #[case(Target::UInt, 0, u32::MAX as i128)]
    #[case(Target::LongLong, i64::MIN as i128, i64::MAX as i128)]
    #[case(Target::ULongLong, 0, u64::MAX as i128)]
    #[case(Target::Index, 0, usize::MAX as i128)]
    #[case(Target::PtrDiff, isize::MIN as i128, isize::MAX as i128)]
    #[case(Target::Int8, -128, 127)]
    #[case(Target::UInt32, 0, u32::MAX as i128)]
    fn test_range(#[case] target: Target, #[case] min: i128, #[case] max: i128) {
        assert_eq!(target.min(), min);
        assert_eq!(target.max(), max);
        assert_eq!(target.is_signed(), min < 0);
        assert!(target.contains(min));
        assert!(target.contains(max));
        assert!(!target.contains(min - 1));
        assert!(!target.contains(max + 1));
    }

    #[rstest]
    #[case("__INTCHECK_INT_S", Target::Int, Signedness::Signed)]
    #[case("__INTCHECK_ULLINT_U", Target::ULongLong, Signedness::Unsigned)]
    #[case("UCHAR_U", Target::UChar, Signedness::Unsigned)]
    #[case("INDEX_S", Target::Index, Signedness::Signed)]
    #[case("__INTCHECK_UINT16_S", Target::UInt16, Signedness::Signed)]
    fn test_parse_entry_point(#[case] s: &str, #[case] target: Target, #[case] signedness: Signedness) {
        let entry_point: EntryPoint = s.parse().unwrap();
        assert_eq!(entry_point, EntryPoint::new(target, signedness));
    }

    #[rstest]
    #[case("")]
    #[case("INT")]
    #[case("__INTCHECK_INT_X")]
    #[case("__INTCHECK_LONG_S")]
    #[case("__INTLEFTSHIFT")]
    fn test_parse_entry_point_invalid(#[case] s: &str) {
        assert!(s.parse::<EntryPoint>().is_err());
    }

    #[test]
    fn test_symbol_round_trip() {
        for entry_point in EntryPoint::all() {
            assert_eq!(entry_point.symbol().parse::<EntryPoint>().unwrap(), entry_point);
        }
    }

    #[rstest]
    #[case(Target::Int, Signedness::Signed, "extern int __INTCHECK_INT_S(long long signed int x);")]
    #[case(Target::ULong, Signedness::Unsigned, "extern long unsigned int __INTCHECK_ULINT_U(long long unsigned int x);")]
    #[case(Target::Index, Signedness::Signed, "extern size_t __INTCHECK_INDEX_S(long long signed int x);")]
    fn test_c_declaration(#[case] target: Target, #[case] signedness: Signedness, #[case] expected: &str) {
        assert_eq!(EntryPoint::new(target, signedness).c_declaration(), expected);
    }
}
