use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ownerd::config::ResolverConfig;
use ownerd::{resolve, store};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ownerd", about = "Permission resolution engine", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to the curator-authored permission overrides document.
    #[arg(long, global = true, env = "PERM_OVERRIDES_PATH")]
    overrides: Option<PathBuf>,

    /// Path to the discovered on-chain state snapshot.
    #[arg(long, global = true, env = "PERM_DISCOVERED_PATH")]
    discovered: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, env = "PERM_LOG")]
    log: Option<String>,

    /// Suppress progress output; warnings and errors still print.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve direct and ultimate owners and write the resolved document.
    ///
    /// Examples:
    ///   ownerd resolve --out resolved.json
    ///   ownerd resolve --overrides overrides.json --discovered discovered.json
    Resolve {
        /// Path to write the resolved document to.
        #[arg(long, env = "PERM_RESOLVED_PATH")]
        out: Option<PathBuf>,

        /// Write compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Resolve without writing output; print a warnings-only summary.
    ///
    /// Useful in CI to catch broken owner paths or delay references before
    /// they reach the resolved document.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let (out, compact) = match &args.command {
        Command::Resolve { out, compact } => (out.clone(), *compact),
        Command::Check => (None, false),
    };

    let cfg = ResolverConfig::new(
        args.overrides,
        args.discovered,
        None,
        args.log,
        Some(!compact),
    );

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cfg.log))
        .init();

    let overrides = store::overrides::load(&cfg.overrides_path)
        .await
        .with_context(|| format!("loading overrides from {}", cfg.overrides_path.display()))?;
    let snapshot = store::discovered::load(&cfg.discovered_path)
        .await
        .with_context(|| format!("loading discovered state from {}", cfg.discovered_path.display()))?;

    info!(
        contracts = overrides.contracts.len(),
        discovered_entries = snapshot.len(),
        "loaded overrides and discovered state"
    );

    let document = resolve::run(&overrides, &snapshot, &snapshot.content_hash);

    let warning_count: usize = document
        .contracts
        .values()
        .flat_map(|c| &c.functions)
        .map(|f| f.warnings.len())
        .sum();
    if warning_count > 0 && !quiet {
        warn!(count = warning_count, "resolution produced warnings");
    }

    match args.command {
        Command::Resolve { .. } => {
            let out_path = out.unwrap_or(cfg.resolved_path);
            store::resolved::write(&out_path, &document, cfg.pretty)
                .await
                .with_context(|| format!("writing resolved document to {}", out_path.display()))?;
            if !quiet {
                info!(
                    path = %out_path.display(),
                    contracts = document.contracts.len(),
                    "resolved document written"
                );
            }
        }
        Command::Check => {
            if !quiet {
                info!(
                    contracts = document.contracts.len(),
                    warnings = warning_count,
                    "check complete"
                );
            }
            for (address, contract) in &document.contracts {
                for function in &contract.functions {
                    for warning in &function.warnings {
                        println!("{}::{}: {}", address, function.function_name, warning);
                    }
                }
            }
        }
    }

    Ok(())
}
