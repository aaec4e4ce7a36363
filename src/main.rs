use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use ctrim::{
    CParser, CallGraphBuilder, ClosureEngine, Config, Emitter, Selector, SymbolSet,
};

/// ctrim - prune a C file down to chosen functions and their callees
#[derive(Parser, Debug)]
#[command(name = "ctrim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// C source file to prune
    input: PathBuf,

    /// Retain a particular function (can be specified multiple times)
    #[arg(short, long, value_name = "SYMBOL")]
    keep: Vec<String>,

    /// Never emit a declaration with this name (can be specified multiple times)
    #[arg(short, long, value_name = "SYMBOL")]
    blacklist: Vec<String>,

    /// Write output to a file, rather than stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("ctrim v{}", env!("CARGO_PKG_VERSION"));

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let mut keep: SymbolSet = config.keep.iter().cloned().collect();
    let blacklist: SymbolSet = config.blacklist.iter().cloned().collect();

    // Parse the source file into a translation unit
    let mut parser = CParser::new();
    let unit = parser.parse_file(&cli.input).into_diagnostic()?;

    // Derive the call graph, then close the keep-set over it so callees of
    // kept functions are kept as well
    let graph = CallGraphBuilder::new().build(&unit).into_diagnostic()?;
    let warnings = ClosureEngine::new().expand(&mut keep, &graph).into_diagnostic()?;

    // A kept function calling a function with no definition here is worth a
    // warning: the pruned file may be incomplete
    for warning in &warnings {
        eprintln!(
            "{}: no definition for called function `{}` (called from `{}`)",
            "Warning".yellow(),
            warning.callee,
            warning.caller
        );
    }

    info!("keep-set closed over calls: {} symbols", keep.len());

    let sink = open_output(config.output.as_deref())?;
    let selector = Selector::new(&keep, &blacklist);
    let mut emitter = Emitter::new(sink);

    for decl in unit.top_level_declarations() {
        let verdict = selector.verdict(&decl);
        if verdict.should_emit() {
            emitter.emit(&unit, &decl)?;
        } else {
            debug!("skipping {}: {:?}", decl.display(), verdict);
        }
    }

    emitter.flush()
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to open output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        let dir = cli
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Config::from_default_locations(dir)?
    };

    // CLI arguments extend the config's sets; an explicit --output wins
    config.keep.extend(cli.keep.iter().cloned());
    config.blacklist.extend(cli.blacklist.iter().cloned());
    if cli.output.is_some() {
        config.output = cli.output.clone();
    }

    Ok(config)
}
