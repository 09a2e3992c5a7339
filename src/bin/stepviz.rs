use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stepviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline and print render bundles as JSON.
    Bundle(BundleArgs),
    /// Print the canonical type chosen for each step.
    Classify(ClassifyArgs),
    /// Print the expected data format for a visualization type.
    Fixture(FixtureArgs),
}

#[derive(Parser, Debug)]
struct BundleArgs {
    /// Input step sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pipeline configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only this step (0-based index).
    #[arg(long)]
    step: Option<usize>,

    /// Run graph layouts to completion instead of reporting the initial placement.
    #[arg(long)]
    settle: bool,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Input step sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pipeline configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FixtureArgs {
    /// Visualization type (lenient spelling, e.g. `linked_list`).
    #[arg(long = "type")]
    ty: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Bundle(args) => cmd_bundle(args),
        Command::Classify(args) => cmd_classify(args),
        Command::Fixture(args) => cmd_fixture(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<stepviz::PipelineConfig> {
    let Some(path) = path else {
        return Ok(stepviz::PipelineConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    stepviz::PipelineConfig::from_json_str(&s)
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn load_engine(in_path: &Path, config: Option<&Path>) -> anyhow::Result<stepviz::VisualizationEngine> {
    let config = read_config(config)?;
    let s = std::fs::read_to_string(in_path)
        .with_context(|| format!("read steps '{}'", in_path.display()))?;
    stepviz::VisualizationEngine::from_json_str(&s, config)
        .with_context(|| format!("load steps '{}'", in_path.display()))
}

fn print_json(v: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(v)?
    } else {
        serde_json::to_string(v)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_bundle(args: BundleArgs) -> anyhow::Result<()> {
    let mut engine = load_engine(&args.in_path, args.config.as_deref())?;
    for w in engine.sequence_warnings() {
        eprintln!("warning: {w}");
    }

    let indices: Vec<usize> = match args.step {
        Some(i) => vec![i],
        None => (0..engine.len()).collect(),
    };

    let mut out = Vec::with_capacity(indices.len());
    for index in indices {
        let bundle = engine
            .bundle(index)
            .with_context(|| format!("bundle step {index}"))?;
        let is_graph = bundle.laid_out_graph().is_some();
        let mut v = serde_json::to_value(bundle.render())?;
        if let Some(notice) = &bundle.fallback {
            v["fallback"] = serde_json::to_value(notice)?;
        }
        if args.settle && is_graph {
            let settled = engine
                .settle_graph(index)
                .with_context(|| format!("settle graph step {index}"))?;
            v["layout"] = serde_json::to_value(settled)?;
        }
        out.push(v);
    }

    let v = match (args.step, out.len()) {
        (Some(_), 1) => out.remove(0),
        _ => serde_json::Value::Array(out),
    };
    print_json(&v, args.pretty)
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let mut engine = load_engine(&args.in_path, args.config.as_deref())?;
    for index in 0..engine.len() {
        let bundle = engine
            .bundle(index)
            .with_context(|| format!("classify step {index}"))?;
        let hint = bundle.classification.hint.as_deref().unwrap_or("-");
        let status = if bundle.is_valid() { "ok" } else { "invalid" };
        println!("{index}\t{}\t{hint}\t{status}", bundle.canonical_type);
    }
    Ok(())
}

fn cmd_fixture(args: FixtureArgs) -> anyhow::Result<()> {
    let Some(ty) = stepviz::CanonicalType::from_hint(&args.ty) else {
        anyhow::bail!("unknown visualization type '{}'", args.ty);
    };
    print_json(&stepviz::expected_format(ty), true)
}
