//! Configuration for the huffpack command-line tool.
//!
//! `clap` parses the command line into [`Cli`]; [`Config`] is the resolved
//! form the rest of the program works with.
//!
//! ```text
//! huffpack encode <INPUT> <OUTPUT>
//! huffpack decode <INPUT> <OUTPUT>
//! ```
//!
//! Anything else (a missing path, an unknown mode) is a usage error.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "huffpack", version, about = "Huffman file compressor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Print detailed statistics after running
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub stats: bool,

    /// Print nothing on success
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log pipeline stages (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress INPUT into a container at OUTPUT
    Encode {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Restore the original bytes of container INPUT into OUTPUT
    Decode {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

/// How much to print after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Nothing
    Quiet,
    /// One line
    Result,
    /// Full statistics block
    Summary,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// File to read
    pub input_file: PathBuf,

    /// File to write (replaced atomically on success)
    pub output_file: PathBuf,

    // === Behavior ===
    /// Whether to print the resolved config
    pub print_config: bool,

    /// What to print on success
    pub report: Report,

    /// Default log level when RUST_LOG is unset
    pub log_level: LevelFilter,
}

impl Config {
    /// Parse configuration from command-line arguments (including the
    /// program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_cli(Cli::try_parse_from(args)?))
    }

    pub fn from_cli(cli: Cli) -> Self {
        let (mode, input_file, output_file) = match cli.command {
            Command::Encode { input, output } => (Mode::Encode, input, output),
            Command::Decode { input, output } => (Mode::Decode, input, output),
        };

        let report = if cli.quiet {
            Report::Quiet
        } else if cli.stats {
            Report::Summary
        } else {
            Report::Result
        };

        Config {
            mode,
            input_file,
            output_file,
            print_config: cli.print_config,
            report,
            log_level: if cli.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode:        {:?}", self.mode);
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        println!("Report:      {:?}", self.report);
        println!("Log level:   {}", self.log_level);
        println!();
    }
}
