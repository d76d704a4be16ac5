//! huffpack: compress and decompress files with Huffman coding.
//!
//! ```text
//! huffpack encode <INPUT> <OUTPUT>
//! huffpack decode <INPUT> <OUTPUT>
//! ```
//!
//! Exit status is 0 on success and 1 on any failure, including usage errors.

mod config;
mod io;

use std::process::ExitCode;

use huffpack_core::{
    codec,
    metrics::{Operation, Stats},
    Container, Result,
};

use crate::config::{Config, Mode, Report};

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            // --help / --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(stats) => {
            match config.report {
                Report::Quiet => {}
                Report::Result => stats.print_result(),
                Report::Summary => stats.print_summary(),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{} failed: {}", mode_name(config.mode), err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Execute one encode or decode run.
///
/// The output file is only touched once the whole result is in memory.
fn run(config: &Config) -> Result<Stats> {
    let input = io::read_input(&config.input_file)?;
    log::info!(
        "read {} bytes from {}",
        input.len(),
        config.input_file.display()
    );

    let (mut stats, output) = match config.mode {
        Mode::Encode => {
            let mut stats = Stats::new(Operation::Compress);
            let container = codec::encode(&input)?;
            stats.record_container(&container);
            (stats, container.serialize())
        }
        Mode::Decode => {
            let mut stats = Stats::new(Operation::Decompress);
            let container = Container::parse(&input)?;
            stats.record_container(&container);
            (stats, codec::decode(&container)?)
        }
    };

    io::write_output(&config.output_file, &output)?;

    stats.input_bytes = input.len() as u64;
    stats.output_bytes = output.len() as u64;
    stats.complete();
    Ok(stats)
}

fn mode_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Encode => "encode",
        Mode::Decode => "decode",
    }
}
