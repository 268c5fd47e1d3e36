//! Checked shifts over `unsigned long long`.
//!
//! C leaves `x << n` and `x >> n` undefined for `n >= 64`, and silently drops bits on a left
//!  shift that overflows. A left shift is accepted only if every significant bit of the operand
//!  stays inside 64 bits. A right shift never fails: shifting further than the operand has
//!  significant bits yields 0.

use tracing::trace;
use crate::error::Violation;

/// The number of bits needed to represent `x`, i.e. the position of the highest set bit plus
///  one. 0 for 0, 64 for `u64::MAX`.
#[inline]
pub fn bit_length(x: u64) -> u32 {
    u64::BITS - x.leading_zeros()
}

/// `op1 << op2`, provided no significant bit of `op1` is shifted out. Zero can be shifted by any
///  amount.
pub fn checked_shl(op1: u64, op2: u64) -> Result<u64, Violation> {
    let bit_length = bit_length(op1);
    if bit_length == 0 {
        return Ok(0);
    }

    let max_shift = u64::from(u64::BITS - bit_length);
    if op2 > max_shift {
        return Err(Violation::LeftShift { value: op1, shift: op2 });
    }

    // max_shift <= 63, so the shift is defined
    Ok(op1 << op2)
}

/// `op1 >> op2`, with every shift beyond the significant bits of `op1` defined as 0.
pub fn checked_shr(op1: u64, op2: u64) -> u64 {
    let bit_length = bit_length(op1);
    if op2 <= u64::from(bit_length) {
        // op2 is at most 64 here; only a shift by exactly 64 needs clamping
        op1.checked_shr(op2 as u32).unwrap_or(0)
    }
    else {
        trace!(op1, op2, bit_length, "right shift beyond significant bits - result is 0");
        0
    }
}


#[cfg(test)]
mod test {
    use rstest::rstest;
    use super::*;

    /// scans down from the most significant bit
    fn reference_bit_length(x: u64) -> u32 {
        let mut len = u64::BITS;
        let mut mask = 1u64 << (len - 1);
        while len > 0 {
            if x & mask != 0 {
                break;
            }
            mask >>= 1;
            len -= 1;
        }
        len
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 2)]
    #[case(8, 4)]
    #[case(255, 8)]
    #[case(256, 9)]
    #[case(1 << 63, 64)]
    #[case(u64::MAX, 64)]
    fn test_bit_length(#[case] x: u64, #[case] expected: u32) {
        assert_eq!(bit_length(x), expected);
    }

    #[test]
    fn test_bit_length_matches_scan() {
        for k in 0..64 {
            let x = 1u64 << k;
            assert_eq!(bit_length(x), k + 1);
            assert_eq!(bit_length(x), reference_bit_length(x));
            assert_eq!(bit_length(x - 1), reference_bit_length(x - 1));
            assert_eq!(bit_length(x | 1), reference_bit_length(x | 1));
        }
        assert_eq!(reference_bit_length(0), 0);
        assert_eq!(reference_bit_length(u64::MAX), 64);
    }

    #[rstest]
    #[case(1, 0, Some(1))]
    #[case(1, 63, Some(1 << 63))]
    #[case(1, 64, None)]
    #[case(3, 62, Some(3 << 62))]
    #[case(3, 63, None)]
    #[case(u64::MAX, 0, Some(u64::MAX))]
    #[case(u64::MAX, 1, None)]
    #[case(0xff, 56, Some(0xff << 56))]
    #[case(0xff, 57, None)]
    #[case(5, u64::MAX, None)]
    fn test_checked_shl(#[case] op1: u64, #[case] op2: u64, #[case] expected: Option<u64>) {
        assert_eq!(checked_shl(op1, op2).ok(), expected);
    }

    #[test]
    fn test_shl_violation() {
        assert_eq!(checked_shl(1, 64), Err(Violation::LeftShift { value: 1, shift: 64 }));
        assert_eq!(checked_shl(1, 64).unwrap_err().operation(), "__INTLEFTSHIFT");
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(63)]
    #[case(64)]
    #[case(u64::MAX)]
    fn test_shl_zero(#[case] op2: u64) {
        assert_eq!(checked_shl(0, op2), Ok(0));
    }

    #[test]
    fn test_shl_maximum_keeps_all_bits() {
        for op1 in [1u64, 2, 3, 0x1234_5678, u64::MAX >> 1, u64::MAX] {
            let max_shift = 64 - u64::from(bit_length(op1));
            let shifted = checked_shl(op1, max_shift).unwrap();
            assert_eq!(shifted >> max_shift, op1);
            assert!(checked_shl(op1, max_shift + 1).is_err());
        }
    }

    #[rstest]
    #[case(8, 3, 1)]
    #[case(8, 4, 0)]
    #[case(8, 5, 0)]
    #[case(8, 64, 0)]
    #[case(8, u64::MAX, 0)]
    #[case(0, 0, 0)]
    #[case(0, 1, 0)]
    #[case(1 << 63, 63, 1)]
    #[case(1 << 63, 64, 0)]
    #[case(u64::MAX, 64, 0)]
    #[case(u64::MAX, 65, 0)]
    #[case(0xf0, 4, 0xf)]
    fn test_checked_shr(#[case] op1: u64, #[case] op2: u64, #[case] expected: u64) {
        assert_eq!(checked_shr(op1, op2), expected);
    }

    #[test]
    fn test_shr_by_bit_length() {
        for op1 in [1u64, 2, 7, 8, 0x1234_5678, u64::MAX] {
            let bit_length = u64::from(bit_length(op1));
            assert_eq!(checked_shr(op1, bit_length), 0);
            assert_ne!(checked_shr(op1, bit_length - 1), 0);
            assert_eq!(checked_shr(op1, bit_length + 1), 0);
        }
    }
}
