use clap::Parser;
use clap_derive::{Parser, Subcommand};
use intcheck::canonical::{Canonical, Signedness};
use intcheck::ffi::c_declarations;
use intcheck::narrow::narrow_to;
use intcheck::report::{install_policy, OnViolation, OrFatal, ReportPolicy};
use intcheck::shift::{bit_length, checked_shl, checked_shr};
use intcheck::target::{EntryPoint, Target};
use tracing::{debug, Level};

/// Runs the checks of the instrumentation runtime on literal values. A failing check terminates
///  the process exactly like it does in instrumented code.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// exit status for a failing check
    #[arg(long, global = true, default_value_t = 1)]
    exit_status: i32,

    /// abort instead of exiting when a check fails
    #[arg(long, global = true, default_value_t = false)]
    abort: bool,

    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[arg(long, global = true, default_value_t = false)]
    very_verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Narrows a value through an entry point, e.g. `narrow __INTCHECK_CHAR_S -- -5`
    Narrow {
        entry_point: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Checked `op1 << op2`
    Shl {
        op1: u64,
        op2: u64,
    },
    /// Checked `op1 >> op2`
    Shr {
        op1: u64,
        op2: u64,
    },
    BitLength {
        x: u64,
    },
    /// Lists all target types with their ranges and entry points
    Targets,
    /// Prints the C declarations of all entry points
    Header,
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match (args.verbose, args.very_verbose) {
        (_, true) => Level::TRACE,
        (true, _) => Level::DEBUG,
        (false, false) => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init()
        .ok();

    install_policy(ReportPolicy {
        action: if args.abort { OnViolation::Abort } else { OnViolation::Exit },
        exit_status: args.exit_status,
    })?;

    match args.command {
        Command::Narrow { entry_point, value } => {
            let entry_point: EntryPoint = entry_point.parse()?;
            let value = Canonical::parse(&value, entry_point.signedness)?;
            debug!("narrowing {} through {}", value, entry_point);

            println!("{}", narrow_to(entry_point.target, value).or_fatal());
        }
        Command::Shl { op1, op2 } => {
            println!("{}", checked_shl(op1, op2).or_fatal());
        }
        Command::Shr { op1, op2 } => {
            println!("{}", checked_shr(op1, op2));
        }
        Command::BitLength { x } => {
            println!("{}", bit_length(x));
        }
        Command::Targets => {
            for target in Target::ALL {
                println!("{:<8} {:<24} {:>21} {:>21}  {} {}",
                         target.stem(),
                         target.c_type(),
                         target.min(),
                         target.max(),
                         target.symbol(Signedness::Signed),
                         target.symbol(Signedness::Unsigned),
                );
            }
        }
        Command::Header => {
            print!("{}", c_declarations());
        }
    }

    Ok(())
}
