use std::{env, path::PathBuf, process::ExitCode};

use catalog_tfidf::{IngestConfig, Pipeline, RecordSink, Result, SqliteSink};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: catalog-ingest <items.csv> [--out DIR] [--config FILE] [--db FILE]";

struct Args {
    csv: PathBuf,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    db: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = env::args().skip(1);
    let mut csv = None;
    let mut out = None;
    let mut config = None;
    let mut db = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = Some(PathBuf::from(args.next()?)),
            "--config" => config = Some(PathBuf::from(args.next()?)),
            "--db" => db = Some(PathBuf::from(args.next()?)),
            "-h" | "--help" => return None,
            _ if csv.is_none() && !arg.starts_with("--") => csv = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }
    Some(Args {
        csv: csv?,
        out,
        config,
        db,
    })
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => IngestConfig::load(path)?,
        None => IngestConfig::default(),
    };
    if let Some(out) = args.out {
        config.output_dir = out;
    }
    if let Some(db) = args.db {
        config.sink_path = Some(db);
    }

    let mut sink = match &config.sink_path {
        Some(path) => Some(SqliteSink::open(path)?),
        None => None,
    };
    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run(
        &args.csv,
        sink.as_mut().map(|s| s as &mut dyn RecordSink),
    )?;

    info!(
        "{} rows read, {} items kept, {} duplicates dropped",
        report.rows_read, report.items, report.duplicates_dropped
    );
    info!(
        "matrix {:?} with {} non-zero entries, vocabulary {} terms, written to {:?}",
        report.matrix_shape,
        report.nnz,
        report.vocabulary_size,
        pipeline.output_dir()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Ingest failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
