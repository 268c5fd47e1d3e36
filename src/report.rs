//! The fatal path: every violation that reaches it ends the process.
//!
//! The checks themselves return `Result`s. Terminating is a policy applied on top, either
//!  explicitly through [OrFatal::or_fatal] or implicitly by the C entry points in [crate::ffi],
//!  where there is no way to hand an error back to instrumented code.

use std::io::Write;
use std::sync::OnceLock;
use anyhow::{anyhow, bail};
use tracing::error;
use crate::error::Violation;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum OnViolation {
    /// `exit()` with the configured status - flushes stdio, runs no destructors
    #[default]
    Exit,
    /// `abort()` - useful for getting a core dump at the point of failure
    Abort,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ReportPolicy {
    pub action: OnViolation,
    /// The process exit status for [OnViolation::Exit]. Instrumented programs are expected to
    ///  exit with status 1, which is the default.
    pub exit_status: i32,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        ReportPolicy {
            action: OnViolation::Exit,
            exit_status: 1,
        }
    }
}

impl ReportPolicy {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.exit_status == 0 {
            bail!("exit status 0 would report a violation as success");
        }

        Ok(())
    }
}

static POLICY: OnceLock<ReportPolicy> = OnceLock::new();

/// Installs the policy for the rest of the process. This can happen at most once, and it must
///  happen before the first violation is reported - the default policy applies until then.
pub fn install_policy(policy: ReportPolicy) -> anyhow::Result<()> {
    policy.validate()?;

    POLICY.set(policy)
        .map_err(|_| anyhow!("a report policy was already installed"))
}

pub fn policy() -> ReportPolicy {
    POLICY.get()
        .copied()
        .unwrap_or_default()
}

/// Reports `violation` on stderr as `Error!(Failed in: <operation>)` and terminates the process.
#[cold]
#[inline(never)]
pub fn fatal(violation: &Violation) -> ! {
    error!(operation = violation.operation(), "{}", violation);
    fatal_message(&violation.diagnostic())
}

/// Writes `msg` verbatim to stderr and terminates the process.
#[cold]
#[inline(never)]
pub fn fatal_message(msg: &str) -> ! {
    let mut stderr = std::io::stderr().lock();
    // a failing stderr cannot be reported anywhere
    let _ = stderr.write_all(msg.as_bytes());
    let _ = stderr.flush();

    let policy = policy();
    match policy.action {
        OnViolation::Exit => std::process::exit(policy.exit_status),
        OnViolation::Abort => std::process::abort(),
    }
}

pub trait OrFatal<T> {
    /// Unwraps a successful check, or reports the violation and terminates the process.
    fn or_fatal(self) -> T;
}

impl <T> OrFatal<T> for Result<T, Violation> {
    #[inline]
    fn or_fatal(self) -> T {
        match self {
            Ok(v) => v,
            Err(violation) => fatal(&violation),
        }
    }
}
