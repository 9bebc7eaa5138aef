// arm64cc: C subset to ARM64 assembly compiler

use std::fs;
use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{bail, Context};
use tracing::{debug, Level};

use arm64cc::config::{Command, Options, USAGE};
use arm64cc::compile;

fn main() -> ExitCode {
    let options = match Options::from_args(std::env::args_os().skip(1)) {
        Ok(Command::Compile(options)) => options,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    init_logging(options.verbose);

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: &Options) -> anyhow::Result<()> {
    let source = fs::read_to_string(&options.input)
        .with_context(|| format!("failed to read {}", options.input.display()))?;
    debug!(input = %options.input.display(), bytes = source.len(), "read source");

    let asm = match compile(&source, options) {
        Ok(asm) => asm,
        Err(err) => {
            let color = std::io::stderr().is_terminal();
            eprint!("{}", err.render(&options.input, &source, color));
            bail!("could not compile {}", options.input.display());
        }
    };

    fs::write(&options.output, asm)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    debug!(output = %options.output.display(), "wrote assembly");

    Ok(())
}
