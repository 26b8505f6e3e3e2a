use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atos_core::{
    registry, render_report, EngineConfig, GuidanceEngine, Module, OutputFormat, Snapshot,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "atos",
    author,
    version,
    about = "Deterministic case-guidance engine CLI"
)]
struct Cli {
    /// Engine threshold overrides (YAML/TOML/JSON); layered under ATOS_* env vars
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one module's rule set against a case snapshot file
    Guide {
        /// Case snapshot JSON produced by the data layer
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,
        /// Guidance module (intelligence|forensic|insurance|execution|equity)
        #[arg(long, value_name = "MODULE")]
        module: String,
        #[arg(long, value_enum, default_value = "human")]
        format: Format,
    },
    /// List registered guidance rules
    ListRules {
        /// Restrict to one module
        #[arg(long, value_name = "MODULE")]
        module: Option<String>,
        /// Emit rules as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// List guidance module identifiers
    Modules,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
    Yaml,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_engine_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Guide {
            snapshot,
            module,
            format,
        } => guide(&GuidanceEngine::with_config(config), &snapshot, &module, format),
        Commands::ListRules { module, json } => list_rules(module.as_deref(), json),
        Commands::Modules => {
            for module in Module::ALL {
                println!("{module}");
            }
            Ok(())
        }
    }
}

fn guide(engine: &GuidanceEngine, snapshot_path: &Path, module: &str, format: Format) -> Result<()> {
    let raw = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("failed to read snapshot at {}", snapshot_path.display()))?;
    let snapshot = Snapshot::from_json_str(&raw).context("guidance unavailable")?;
    let report = engine
        .generate_named(module, &snapshot)
        .context("guidance unavailable")?;

    let rendered = match format {
        Format::Human => render_report(&report, OutputFormat::Human)?,
        Format::Json => render_report(&report, OutputFormat::Json)?,
        Format::Yaml => serde_yaml::to_string(&report)?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn list_rules(module: Option<&str>, json: bool) -> Result<()> {
    let filter = module
        .map(|value| value.parse::<Module>())
        .transpose()
        .context("cannot list rules")?;
    let rules = registry::describe(filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!("{} rule(s) registered", rules.len());
    for rule in rules {
        let terminal = if rule.terminal { " (terminal)" } else { "" };
        println!(
            "- {id:<24} [{module:>12}] {severity:<8} :: {title}{terminal}",
            id = rule.id,
            module = rule.module,
            severity = rule.severity.as_str(),
            title = rule.title,
            terminal = terminal
        );
    }
    Ok(())
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let defaults = config::Config::try_from(&EngineConfig::default())
        .context("failed to encode default engine thresholds")?;
    let mut builder = config::Config::builder().add_source(defaults);
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.to_path_buf()));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("ATOS")
            .separator("__")
            .try_parsing(true),
    );
    builder
        .build()
        .and_then(|settings| settings.try_deserialize::<EngineConfig>())
        .context("invalid engine configuration")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
