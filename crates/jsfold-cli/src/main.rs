use anyhow::{Context, Result};
use clap::Parser;
use jsfold_core::{fold_source, FoldConfig, ShiftSemantics};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "jsfold")]
#[command(about = "Constant propagation and folding for JavaScript")]
#[command(version)]
struct Cli {
    /// JavaScript file to fold
    file: PathBuf,

    /// Print the traversal trace before the program
    #[arg(short, long)]
    debug: bool,

    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Fold `>>>` with unsigned 32-bit semantics
    #[arg(long)]
    unsigned_shift: bool,

    /// Print pass counters to stderr
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` filtering, `warn` by default. Logs go to stderr so stdout
/// carries only the trace and the program.
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<FoldConfig> {
    let mut config = match &cli.config {
        Some(path) => FoldConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FoldConfig::default(),
    };

    // flags override the file
    if cli.debug {
        config.debug_trace = true;
    }
    if cli.unsigned_shift {
        config.shift_semantics = ShiftSemantics::Unsigned;
    }

    debug!(?config, "configuration resolved");
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    let name = cli.file.display().to_string();
    let source =
        std::fs::read_to_string(&cli.file).with_context(|| format!("failed to read {name}"))?;

    let output =
        fold_source(&name, &source, &config).with_context(|| format!("failed to fold {name}"))?;

    let mut stdout = std::io::stdout().lock();
    for line in &output.report.trace {
        writeln!(stdout, "{line}")?;
    }
    write!(stdout, "{}", output.code)?;
    stdout.flush()?;

    let stats = output.report.stats;
    if cli.stats {
        eprintln!(
            "propagated: {}, folded: {}, invalidated: {}",
            stats.propagated, stats.folded, stats.invalidated
        );
    }
    info!(file = %name, changed = output.report.changed(), "fold complete");

    Ok(())
}
