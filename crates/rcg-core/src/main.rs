//! group-configs binary entry point.

use clap::Parser;
use std::io;

use rcg_core::cli::{run, Cli};
use rcg_core::logging::init_logging;
use rcg_core::ExitCode;

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures.
            let code = if err.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Consistent
            };
            let _ = err.print();
            return code.into();
        }
    };

    init_logging(cli.verbosity(), cli.log_format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::for_error(&err).into()
        }
    }
}
