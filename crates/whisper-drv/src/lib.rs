//! whisper-drv - The `whisperc` command-line driver (spec.md section
//! 6). Parses CLI arguments with `clap`, wires up a [`Session`], and
//! maps its result onto the exit-code / stdout / stderr contract: 0 and
//! the translation unit on stdout for success, 1 and a diagnostic on
//! stderr for failure.

pub mod config;
pub mod error;
pub mod session;

pub use config::{Config, EmitType};
pub use error::CompileError;
pub use session::Session;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser as ClapParser;

/// Compiles a Whisper source file to portable C.
#[derive(ClapParser, Debug)]
#[command(name = "whisperc", version, about = "Compiles Whisper source to portable C")]
struct Cli {
    /// Path to the Whisper source file.
    path: PathBuf,

    /// What to print on success.
    #[arg(long, value_enum, default_value = "c")]
    emit: EmitType,

    /// Trace each pipeline phase to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config { path: cli.path, emit: cli.emit, verbose: cli.verbose }
    }
}

/// Entry point shared by `main.rs`: parse argv, run the pipeline, print
/// the result. Returns the error so the caller decides the exit code.
///
/// `--help`/`--version` are handled here rather than left to clap's own
/// `Parser::parse`, which would print the message itself and call
/// `std::process::exit(0)` before `main.rs` ever sees a result. Routing
/// them through `Ok` instead keeps exit-code ownership in one place:
/// `main.rs` always decides the process exit code, 0 on `Ok` and 1 on
/// `Err` (spec.md section 6's "exit 1 on usage error or any semantic
/// error" applies to every other `clap::Error` kind).
pub fn main() -> anyhow::Result<String> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(err.render().to_string());
        }
        Err(err) => return Err(err.into()),
    };
    let verbose = cli.verbose;

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    );
    let _ = builder.try_init();

    let config: Config = cli.into();
    let session = Session::new(config);
    Ok(session.compile()?)
}
