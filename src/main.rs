//! Pixicon - command-line editor for animated pixel icons

use std::process::ExitCode;

use pixicon::cli;

fn main() -> ExitCode {
    cli::run()
}
