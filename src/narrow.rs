//! Checked narrowing conversions from the canonical 64-bit forms to every target type.
//!
//! All 36 entry points are instances of [checked_narrow]: narrow with the target type's native
//!  truncation, widen the result back and compare it *by value* with the original input. The
//!  comparison happens in `i128`, which holds every value of every participating type, so a
//!  negative value that happens to survive as a bit pattern (e.g. `-1i64 as u64 as i64`) or a
//!  large unsigned value that turns into a negative one (e.g. `u64::MAX as i32`) is rejected
//!  just like plain truncation.
//!
//! Because of that, the targets that need special handling in a bit-pattern based comparison are
//!  covered by the same code:
//! * same width and signedness as the input (`long long` from `i64`, ...) can never fail
//! * crossing signedness at 64 bits fails exactly for negative values / values above `i64::MAX`
//! * `size_t` fails for negative values and for values above `usize::MAX`

use std::ffi::{c_int, c_long, c_longlong, c_schar, c_short, c_uchar, c_uint, c_ulong, c_ulonglong, c_ushort};
use crate::canonical::Canonical;
use crate::error::Violation;
use crate::target::{EntryPoint, Target};

/// A primitive integer type that can be the result of a checked narrowing conversion.
pub trait Narrowable: Copy {
    const MIN: i128;
    const MAX: i128;

    /// the C cast `(T) x` for a signed canonical input
    fn truncate_from_signed(x: i64) -> Self;
    /// the C cast `(T) x` for an unsigned canonical input
    fn truncate_from_unsigned(x: u64) -> Self;

    /// lossless widening for value-based comparison
    fn widen(self) -> i128;

    fn to_canonical(self) -> Canonical;
}

macro_rules! narrowable {
    ($canonical:ident: $($t:ty),*) => {
        $(
            impl Narrowable for $t {
                const MIN: i128 = <$t>::MIN as i128;
                const MAX: i128 = <$t>::MAX as i128;

                #[inline]
                fn truncate_from_signed(x: i64) -> Self {
                    x as $t
                }

                #[inline]
                fn truncate_from_unsigned(x: u64) -> Self {
                    x as $t
                }

                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }

                fn to_canonical(self) -> Canonical {
                    Canonical::$canonical(self as _)
                }
            }
        )*
    }
}

narrowable!(Signed: i8, i16, i32, i64, isize);
narrowable!(Unsigned: u8, u16, u32, u64, usize);


/// Converts `x` to `T` if the value is exactly representable in `T`.
///
/// `target` identifies the entry point in the error; its range must be `T`'s range.
#[inline]
pub fn checked_narrow<T: Narrowable>(target: Target, x: Canonical) -> Result<T, Violation> {
    debug_assert_eq!((target.min(), target.max()), (T::MIN, T::MAX));

    let narrowed = match x {
        Canonical::Signed(v) => T::truncate_from_signed(v),
        Canonical::Unsigned(v) => T::truncate_from_unsigned(v),
    };

    if narrowed.widen() == x.value() {
        Ok(narrowed)
    }
    else {
        Err(Violation::Narrowing {
            entry_point: EntryPoint::new(target, x.signedness()),
            value: x,
        })
    }
}

macro_rules! entry_points {
    ($($signed_fn:ident, $unsigned_fn:ident => $target:ident: $ty:ty;)*) => {
        $(
            #[inline]
            pub fn $signed_fn(x: i64) -> Result<$ty, Violation> {
                checked_narrow(Target::$target, Canonical::Signed(x))
            }

            #[inline]
            pub fn $unsigned_fn(x: u64) -> Result<$ty, Violation> {
                checked_narrow(Target::$target, Canonical::Unsigned(x))
            }
        )*

        /// Runs the entry point for `target` selected by the signedness of `x`, returning the
        ///  narrowed value in its canonical form (signed for signed targets, unsigned otherwise).
        pub fn narrow_to(target: Target, x: Canonical) -> Result<Canonical, Violation> {
            match target {
                $(Target::$target => checked_narrow::<$ty>(target, x).map(Narrowable::to_canonical),)*
            }
        }
    }
}

entry_points! {
    int_s,     int_u     => Int:       c_int;
    uint_s,    uint_u    => UInt:      c_uint;
    short_s,   short_u   => Short:     c_short;
    ushort_s,  ushort_u  => UShort:    c_ushort;
    char_s,    char_u    => Char:      c_schar;
    uchar_s,   uchar_u   => UChar:     c_uchar;
    lint_s,    lint_u    => Long:      c_long;
    ulint_s,   ulint_u   => ULong:     c_ulong;
    llint_s,   llint_u   => LongLong:  c_longlong;
    ullint_s,  ullint_u  => ULongLong: c_ulonglong;
    index_s,   index_u   => Index:     usize;
    ptrdiff_s, ptrdiff_u => PtrDiff:   isize;
    int8_s,    int8_u    => Int8:      i8;
    uint8_s,   uint8_u   => UInt8:     u8;
    int16_s,   int16_u   => Int16:     i16;
    uint16_s,  uint16_u  => UInt16:    u16;
    int32_s,   int32_u   => Int32:     i32;
    uint32_s,  uint32_u  => UInt32:    u32;
}
