//! Contains structures and functionality for the binary
use std::path::PathBuf;

use scasp_nlg::{parser::ParseMode, render::ENGLISH};

/// Cli Arguments related to logging
#[derive(clap::Args, Debug)]
pub(crate) struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::builder::ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Initialising Logging
    ///
    /// Sets the logging verbosity to the given log-level in the following order:
    ///  * `Info`, `Debug`, `Trace`; depending on the count of `-v`
    ///  * `Error` when `-q` is used
    ///  * The `SNLG_LOG` environment variable value
    ///  * `Warn` otherwise
    pub(crate) fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(log::LevelFilter::Warn);

        builder.parse_env("SNLG_LOG");
        if let Some(ref level) = self.log_level {
            builder.parse_filters(level);
        } else if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                3 => log::LevelFilter::Trace,
                _ => log::LevelFilter::Warn,
            });
        }
        builder.init();
    }
}

/// Cli arguments related to parsing
#[derive(Debug, clap::Args)]
pub(crate) struct ParsingArgs {
    /// Accept responses followed by unparsed text
    #[arg(long = "partial")]
    partial: bool,
    /// Print the parse tree of the response
    #[arg(long = "print-tree")]
    pub(crate) print_tree: bool,
    /// Print the facts of every model
    #[arg(long = "print-models")]
    pub(crate) print_models: bool,
}

impl ParsingArgs {
    /// Parse mode selected on the command line
    pub(crate) fn mode(&self) -> ParseMode {
        if self.partial {
            ParseMode::Partial
        } else {
            ParseMode::Strict
        }
    }
}

/// Cli arguments related to rendering explanations
#[derive(Debug, clap::Args)]
pub(crate) struct RenderArgs {
    /// JSON lexicon used to render explanations;
    /// no explanation is printed without it
    #[arg(short, long = "lexicon")]
    pub(crate) lexicon: Option<PathBuf>,
    /// Language of the explanation
    #[arg(long = "language", default_value = ENGLISH)]
    pub(crate) language: String,
    /// Explain every model on its own instead of combining all models
    #[arg(short, long = "single", requires = "lexicon")]
    pub(crate) single: bool,
}

/// s(CASP) explanation CLI
#[derive(clap::Parser, Debug)]
#[command(name = "snlg", author, version, about)]
pub struct CliApp {
    /// File containing the output of s(CASP)
    #[arg(value_parser)]
    pub(crate) response: PathBuf,
    /// Arguments related to parsing
    #[command(flatten)]
    pub(crate) parsing: ParsingArgs,
    /// Arguments related to rendering
    #[command(flatten)]
    pub(crate) render: RenderArgs,
    /// Arguments related to logging
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
