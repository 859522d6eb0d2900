use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, ValueEnum};

use typeslice::{Analysis, AnalysisConfig, ParseErrorPolicy, ReportFormat};

/// CLI arguments for the typeslice binary.
#[derive(Parser, Debug)]
#[command(
    name = "typeslice",
    version,
    about = "List every named type an entry type transitively depends on"
)]
#[command(group(ArgGroup::new("entry").required(true).args(["type_name", "file"])))]
struct CliArgs {
    /// Root directory of the source corpus.
    root: PathBuf,

    /// Seed the closure with the in-source types matching this name
    /// (simple name or fully qualified, e.g. `Order` or `Shop.Order`).
    #[arg(short = 't', long = "type", value_name = "NAME")]
    type_name: Option<String>,

    /// List the types declared in and referenced by one source file,
    /// without following references.
    #[arg(short = 'f', long, value_name = "PATH")]
    file: Option<String>,

    /// Reference catalog listing external types (repeatable).
    #[arg(short = 'r', long = "reference", value_name = "FILE")]
    references: Vec<PathBuf>,

    /// Do not index the built-in core library catalog.
    #[arg(long)]
    no_core_library: bool,

    /// Skip source files with syntax errors instead of failing.
    #[arg(long)]
    skip_unparsable: bool,

    /// Fail when the closure would visit more source files than this.
    #[arg(long, value_name = "N")]
    max_units: Option<usize>,

    /// Source file extension to scan (repeatable; default `cs`).
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Split plain output into in-source and external sections.
    #[arg(long)]
    partition: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Json,
}

impl CliArgs {
    fn config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        config.reference_catalogs = self.references.clone();
        config.core_library = !self.no_core_library;
        if self.skip_unparsable {
            config.parse_errors = ParseErrorPolicy::Skip;
        }
        config.max_units = self.max_units;
        config
    }

    fn report_format(&self) -> ReportFormat {
        match self.format {
            Format::Plain => ReportFormat::Plain,
            Format::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    typeslice::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let analysis = Analysis::load(&args.root, args.config())
        .with_context(|| format!("failed to analyse {}", args.root.display()))?;

    let closure = match (&args.type_name, &args.file) {
        (Some(name), _) => analysis
            .closure_of_type(name)
            .with_context(|| format!("failed to compute the closure of `{name}`"))?,
        (None, Some(file)) => analysis
            .closure_of_unit(file)
            .with_context(|| format!("failed to list the types of `{file}`"))?,
        (None, None) => bail!("either --type or --file is required"),
    };

    // Nothing reaches stdout unless the whole run succeeded
    let report = analysis
        .reporter()
        .format(args.report_format())
        .partitioned(args.partition)
        .render(&closure);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("failed to write report")?;
    stdout.flush().context("failed to write report")?;
    Ok(())
}
