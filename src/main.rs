// chonkgrep - keyword sentence search across PDFs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::future::Future;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chonkgrep::config::{self, Settings};
use chonkgrep::{display, export, sources};
use chonkgrep::{scan, CancelFlag, LopdfExtractor, ScanRequest, SentenceMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Context,
    Json,
    Log,
    Csv,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Keyword to look for (matched literally)
    keyword: String,

    /// PDF files, or directories whose *.pdf files are scanned
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Match letter case exactly
    #[arg(short = 's', long)]
    case_sensitive: bool,

    /// Sentences longer than this are split at ; : — -
    #[arg(short, long)]
    max_length: Option<usize>,

    /// Write results as CSV: --csv for results.csv, --csv=FILE for another file
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = config::DEFAULT_CSV_NAME
    )]
    csv: Option<PathBuf>,

    /// Write results as a text log: --log for results.log, --log=FILE for another file
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = config::DEFAULT_LOG_NAME
    )]
    log: Option<PathBuf>,

    /// How results are printed to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Config file (defaults to ./chonkgrep.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// No progress output
    #[arg(short, long)]
    quiet: bool,

    /// Info-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "chonkgrep=info" } else { "chonkgrep=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// The first interrupt cancels the scan. Returns true when a second one
/// arrives, false when interrupts can no longer be received.
async fn watch_interrupts<S, Fut>(cancel: CancelFlag, mut interrupt: S) -> bool
where
    S: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    if interrupt().await.is_err() {
        return false;
    }
    eprintln!("🛑 Cancelling after the current page... (Ctrl-C again to quit)");
    cancel.cancel();
    interrupt().await.is_ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_env()?;
    if args.case_sensitive {
        settings.case_sensitive = true;
    }
    if let Some(len) = args.max_length {
        settings.max_length = len;
    }
    let max_length = settings.clamped_max_length();
    if max_length != settings.max_length {
        tracing::warn!(
            "max length {} is outside {}..={}, using {}",
            settings.max_length,
            config::MIN_MAX_LENGTH,
            config::MAX_MAX_LENGTH,
            max_length
        );
    }

    let request = ScanRequest::new(args.keyword.clone(), settings.case_sensitive, max_length)?;

    let inputs = sources::collect_documents(&args.paths);
    let total_inputs = inputs.len();
    let sources::Inputs { documents, errors: load_errors } = inputs;
    let document_names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();
    tracing::info!("scanning {} documents for '{}'", documents.len(), request.keyword());

    // Ctrl-C stops the scan at the next page boundary; partial results are still reported.
    // A second Ctrl-C exits at once, even if the parser is stuck.
    let cancel = CancelFlag::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if watch_interrupts(on_ctrl_c, tokio::signal::ctrl_c).await {
            std::process::exit(130);
        }
    });

    let quiet = args.quiet;
    let scan_request = request.clone();
    let mut report = tokio::task::spawn_blocking(move || {
        scan(&documents, &scan_request, &LopdfExtractor::new(), &cancel, |progress| {
            if !quiet {
                eprintln!("{}", display::render_progress(progress));
            }
        })
    })
    .await
    .context("scan task failed")?;

    let scan_errors = std::mem::take(&mut report.errors);
    report.errors = sources::merge_errors(&document_names, load_errors, scan_errors);
    export::sort_records(&mut report.records);

    for err in &report.errors {
        eprintln!("❌ {}", err);
    }

    let matcher = SentenceMatcher::new(request.keyword(), max_length, request.case_sensitive());
    let stdout = match args.format {
        OutputFormat::Table if report.is_empty() => String::new(),
        OutputFormat::Table => display::render_table(&report.records),
        OutputFormat::Context => {
            let styled = atty::is(atty::Stream::Stdout);
            display::render_context(&report.records, &matcher, styled)
        }
        OutputFormat::Json => export::to_json(&report.records)? + "\n",
        OutputFormat::Log => export::to_log(&report.records),
        OutputFormat::Csv => export::to_csv(&report.records)?,
    };
    print!("{}", stdout);
    eprintln!("{}", display::render_summary(&report, request.keyword()));

    if let Some(path) = args.csv.or(settings.export.csv) {
        export::write_csv(&path, &report.records)
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("📄 CSV written to {}", path.display());
    }
    if let Some(path) = args.log.or(settings.export.log) {
        export::write_log(&path, &report.records)
            .with_context(|| format!("writing {}", path.display()))?;
        eprintln!("📄 Log written to {}", path.display());
    }

    if total_inputs > 0 && report.errors.len() == total_inputs {
        anyhow::bail!("none of the {} documents could be read", total_inputs);
    }
    Ok(())
}
