#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tnode::domain::config::DeployConfig;
use tnode::kernel::config::load_config;
use tnode_cli::App;
use tnode_logger::{Logger, parse_level};

/// Deploys the testnode contract suite.
#[derive(Debug, Parser)]
#[command(name = "tnode-deploy", version, about)]
struct Cli {
    /// Configuration file; `tnode.{toml,yaml,json}` is picked up when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network name; also the deployments subdirectory.
    #[arg(long, global = true)]
    network: Option<String>,

    /// Directory holding compiled artifacts.
    #[arg(long, global = true)]
    artifacts: Option<PathBuf>,

    /// Directory for deployment records; records stay in memory when unset.
    #[arg(long, global = true)]
    deployments: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the deployment units selected by tag (all when none given).
    Deploy {
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Destroy existing records before deploying.
        #[arg(long)]
        reset: bool,
    },
    /// Print the execution order without deploying.
    Plan {
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// List registered units with their tags and dependencies.
    Units,
    /// Print stored deployments as JSON.
    Export,
}

fn init_logger(cfg: &DeployConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&cfg.logging.level)?);
    let logger = match &cfg.logging.dir {
        Some(dir) => builder.path(dir).json(cfg.logging.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

fn tag_refs(tags: &[String]) -> Vec<&str> {
    tags.iter().map(String::as_str).collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: DeployConfig = load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    let _log = init_logger(&cfg)?;

    let mut builder = App::builder().config(cfg);
    if let Some(network) = cli.network {
        builder = builder.network(network);
    }
    if let Some(dir) = cli.artifacts {
        builder = builder.artifacts_dir(dir);
    }
    if let Some(dir) = cli.deployments {
        builder = builder.deployments_dir(dir);
    }
    let app = builder.build().await?;

    match cli.command {
        Command::Deploy { tags, reset } => {
            for record in app.deploy(&tag_refs(&tags), reset).await? {
                let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
                println!("{:<20} {} [{}]", record.contract_name, record.address, tags.join(","));
            }
        },
        Command::Plan { tags } => {
            for (step, unit) in app.plan(&tag_refs(&tags))?.into_iter().enumerate() {
                println!("{:>2}. {}", step + 1, unit.name());
            }
        },
        Command::Units => {
            for unit in app.units() {
                println!(
                    "{:<20} tags=[{}] deps=[{}]",
                    unit.name(),
                    unit.tags().join(","),
                    unit.dependencies().join(",")
                );
            }
        },
        Command::Export => {
            println!("{}", serde_json::to_string_pretty(&app.export().await?)?);
        },
    }

    Ok(())
}
