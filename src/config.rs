//! Compiler options and command-line parsing

use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Source compiled when no input path is given
pub const DEFAULT_INPUT: &str = "sample/main.c";

pub const USAGE: &str = "\
Usage: arm64cc [options] [<input.c>]

Options:
  -o <path>          Write assembly to <path> (default: input with .s extension)
  --short-circuit    Skip the right operand of && and || when the left decides
  -v, --verbose      Log pipeline stages to stderr
  -h, --help         Show this message";

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Evaluate `&&`/`||` lazily instead of evaluating both operands first
    pub short_circuit: bool,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        let input = PathBuf::from(DEFAULT_INPUT);
        Self {
            output: input.with_extension("s"),
            input,
            short_circuit: false,
            verbose: false,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Compile(Options),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' requires a value")]
    MissingValue(String),
    #[error("unexpected argument '{0}', only one input file is accepted")]
    ExtraInput(String),
}

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I, S>(args: I) -> Result<Command, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut options = Options::default();
        let mut input: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.to_str() {
                Some("-h") | Some("--help") => return Ok(Command::Help),
                Some("-v") | Some("--verbose") => options.verbose = true,
                Some("--short-circuit") => options.short_circuit = true,
                Some("-o") => {
                    let path = args
                        .next()
                        .ok_or_else(|| UsageError::MissingValue("-o".to_string()))?;
                    output = Some(PathBuf::from(path));
                }
                Some(flag) if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(UsageError::UnknownOption(flag.to_string()));
                }
                _ => {
                    if input.is_some() {
                        return Err(UsageError::ExtraInput(arg.to_string_lossy().into_owned()));
                    }
                    input = Some(PathBuf::from(&arg));
                }
            }
        }

        if let Some(input) = input {
            options.input = input;
        }
        options.output = output.unwrap_or_else(|| options.input.with_extension("s"));

        Ok(Command::Compile(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_options(args: &[&str]) -> Options {
        match Options::from_args(args.iter().copied()) {
            Ok(Command::Compile(options)) => options,
            other => panic!("expected compile command, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let options = compile_options(&[]);
        assert_eq!(options.input, PathBuf::from("sample/main.c"));
        assert_eq!(options.output, PathBuf::from("sample/main.s"));
        assert!(!options.short_circuit);
        assert!(!options.verbose);
    }

    #[test]
    fn test_output_follows_input() {
        let options = compile_options(&["prog/test.c"]);
        assert_eq!(options.output, PathBuf::from("prog/test.s"));
    }

    #[test]
    fn test_flags() {
        let options = compile_options(&["-o", "out.s", "--short-circuit", "-v", "a.c"]);
        assert_eq!(options.input, PathBuf::from("a.c"));
        assert_eq!(options.output, PathBuf::from("out.s"));
        assert!(options.short_circuit);
        assert!(options.verbose);
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            Options::from_args(["--bogus"]),
            Err(UsageError::UnknownOption("--bogus".to_string()))
        );
        assert_eq!(
            Options::from_args(["a.c", "-o"]),
            Err(UsageError::MissingValue("-o".to_string()))
        );
        assert!(matches!(
            Options::from_args(["a.c", "b.c"]),
            Err(UsageError::ExtraInput(_))
        ));
        assert_eq!(Options::from_args(["a.c", "--help"]), Ok(Command::Help));
    }
}
