use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{bail, Context};
use mealy_moore::{format::TableFormat, pipeline, Mode};
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("mmconv")
        .about("Converts Mealy tables into Moore tables and back, or minimizes them")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .help("character separating the fields of a row")
                .default_value(";"),
        )
        .arg(
            Arg::new("mode")
                .required(true)
                .value_parser(Mode::ALL.map(|mode| mode.name()))
                .help("what to do with the input table"),
        )
        .arg(
            Arg::new("input-file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("source file with the table to process"),
        )
        .arg(
            Arg::new("output-file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("destination file"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn table_format(matches: &ArgMatches) -> anyhow::Result<TableFormat> {
    let raw = matches
        .get_one::<String>("delimiter")
        .map(|d| d.as_str())
        .unwrap_or(";");
    match raw.as_bytes() {
        [delimiter] => Ok(TableFormat::with_delimiter(*delimiter)),
        _ => bail!("delimiter must be a single byte, got `{raw}`"),
    }
}

fn execute(matches: &ArgMatches) -> anyhow::Result<()> {
    let mode: Mode = matches
        .get_one::<String>("mode")
        .context("no mode given")?
        .parse()?;
    let input = matches
        .get_one::<PathBuf>("input-file")
        .context("no input file given")?;
    let output = matches
        .get_one::<PathBuf>("output-file")
        .context("no output file given")?;
    let format = table_format(matches)?;

    debug!("reading from {}", input.display());
    let source =
        File::open(input).with_context(|| format!("could not open {}", input.display()))?;
    let sink =
        File::create(output).with_context(|| format!("could not create {}", output.display()))?;

    let start = std::time::Instant::now();
    pipeline::run(mode, &format, source, BufWriter::new(sink))
        .with_context(|| format!("{mode} failed on {}", input.display()))?;
    info!(
        "{mode} wrote {} in {}µs",
        output.display(),
        start.elapsed().as_micros()
    );
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    if let Err(e) = execute(&matches) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
