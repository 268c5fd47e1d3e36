use crate::canonical::Canonical;
use crate::target::EntryPoint;

pub const LEFT_SHIFT_SYMBOL: &str = "__INTLEFTSHIFT";

/// A representability violation: a checked operation would have lost information, either by
///  truncating a value, by corrupting its sign, or by shifting significant bits out of 64 bits.
///
/// There is deliberately only one kind of failure. The variants differ in what was checked, and
///  [Violation::operation] names the failing check for the diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum Violation {
    #[error("{value} is not representable as `{}` (failed in: {entry_point})", .entry_point.target)]
    Narrowing {
        entry_point: EntryPoint,
        value: Canonical,
    },
    #[error("shifting {value} left by {shift} discards significant bits (failed in: __INTLEFTSHIFT)")]
    LeftShift {
        value: u64,
        shift: u64,
    },
}

impl Violation {
    /// the name of the failing entry point, as it appears in instrumented code
    pub fn operation(&self) -> &'static str {
        match self {
            Violation::Narrowing { entry_point, .. } => entry_point.symbol(),
            Violation::LeftShift { .. } => LEFT_SHIFT_SYMBOL,
        }
    }

    /// the line that is written to stderr before the process terminates
    pub fn diagnostic(&self) -> String {
        format!("Error!(Failed in: {})\n", self.operation())
    }
}


#[cfg(test)]
mod test {
    use rstest::rstest;
    use crate::canonical::Signedness;
    use crate::target::Target;
    use super::*;

    #[rstest]
    #[case(
        Violation::Narrowing { entry_point: EntryPoint::new(Target::Char, Signedness::Signed), value: Canonical::Signed(300) },
        "__INTCHECK_CHAR_S",
        "300 is not representable as `signed char` (failed in: __INTCHECK_CHAR_S)"
    )]
    #[case(
        Violation::Narrowing { entry_point: EntryPoint::new(Target::UInt, Signedness::Signed), value: Canonical::Signed(-1) },
        "__INTCHECK_UINT_S",
        "-1 is not representable as `unsigned int` (failed in: __INTCHECK_UINT_S)"
    )]
    #[case(
        Violation::LeftShift { value: 1, shift: 64 },
        "__INTLEFTSHIFT",
        "shifting 1 left by 64 discards significant bits (failed in: __INTLEFTSHIFT)"
    )]
    fn test_messages(#[case] violation: Violation, #[case] operation: &str, #[case] display: &str) {
        assert_eq!(violation.operation(), operation);
        assert_eq!(violation.to_string(), display);
        assert_eq!(violation.diagnostic(), format!("Error!(Failed in: {})\n", operation));
    }
}
