//! Runtime checks for instrumented C code: checked integer narrowing and checked shifts.
//!
//! An instrumentation tool rewrites every narrowing cast `(T) e` into a call of the matching
//!  entry point `__INTCHECK_<T>_<S|U>(e)`, with `e` widened to `long long` (`_S`) or
//!  `unsigned long long` (`_U`), and every shift into `__INTLEFTSHIFT` / `__INTRIGHTSHIFT`.
//!  Instead of silently truncating a value or invoking undefined behaviour, instrumented code
//!  then stops at the first operation that would lose information:
//!
//! ```ascii
//! Error!(Failed in: __INTCHECK_CHAR_S)
//! ```
//!
//! on stderr, exit status 1.
//!
//! ## Structure
//!
//! * [narrow] and [shift] are the checks proper. They return `Result<_, Violation>` and have no
//!    side effects.
//! * [report] is the fatal path: it turns a [Violation] into the diagnostic and terminates the
//!    process, according to a [report::ReportPolicy] installed once at startup.
//! * [ffi] exports the checks with their C names and the fatal policy applied; this is what
//!    instrumented code links against (the crate builds a static library for that).
//!    `include/intcheck.h` declares them.
//! * [target] and [canonical] describe the inputs and outputs: the two canonical 64-bit input
//!    forms, the 18 target types, and the naming scheme of the entry points.
//!
//! ## Shift semantics
//!
//! A left shift must keep every significant bit of its operand - stricter than C, which only
//!  requires the shift amount to be less than 64. A right shift never fails: shifting further
//!  than the operand has significant bits yields 0.

pub mod canonical;
pub mod error;
pub mod ffi;
pub mod narrow;
pub mod report;
pub mod shift;
pub mod target;

pub use canonical::{Canonical, Signedness};
pub use error::Violation;
pub use report::OrFatal;
pub use target::{EntryPoint, Target};


#[cfg(test)]
mod test {
    use tracing::Level;

    #[ctor::ctor]
    fn init_test_logging() {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(Level::TRACE)
            .try_init()
            .ok();
    }
}
