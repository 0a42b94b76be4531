//! Reference document generator.
//!
//! Loads the symbol catalogue, binds the sorted `Config` and `Commands`
//! symbols into the README template, and writes the rendered document.
//! Paths come from `symdoc.toml` (or `--config`) and can be overridden per
//! flag. `--check` turns the run into a freshness gate for CI.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use symdoc::{CatalogueStore, DocgenConfig, Freshness, Outcome, WriteMode, generate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "symdoc", version)]
#[command(about = "Render a symbol catalogue into a reference document")]
struct Cli {
    /// Config file (defaults to ./symdoc.toml when present)
    #[arg(long, env = "SYMDOC_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Symbol catalogue (JSON array of named groups)
    #[arg(long, value_name = "PATH")]
    catalogue: Option<PathBuf>,

    /// Jinja template for the document
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Where to write the rendered document
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Exit non-zero if the output is missing or out of date; never writes
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print the rendered document instead of writing it
    #[arg(long)]
    stdout: bool,

    /// List the catalogue's group names and exit
    #[arg(long, conflicts_with_all = ["check", "stdout", "dump_group"])]
    list_groups: bool,

    /// Print the sorted symbols of one group as JSON and exit
    #[arg(long, value_name = "GROUP", conflicts_with_all = ["check", "stdout"])]
    dump_group: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply_overrides(&self, config: &mut DocgenConfig) {
        if let Some(path) = &self.catalogue {
            config.catalogue = path.clone();
        }
        if let Some(path) = &self.template {
            config.template = path.clone();
        }
        if let Some(path) = &self.output {
            config.output = path.clone();
        }
    }

    fn write_mode(&self) -> WriteMode {
        if self.check {
            WriteMode::Check
        } else if self.stdout {
            WriteMode::Stdout
        } else {
            WriteMode::Write
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = if verbose > 0 {
        "symdoc=debug"
    } else {
        "symdoc=info"
    };
    let filter =
        EnvFilter::try_from_env("SYMDOC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("resolving working directory")?;
    let mut config =
        DocgenConfig::discover(cli.config.as_deref(), &cwd).context("loading configuration")?;
    cli.apply_overrides(&mut config);

    if cli.list_groups {
        let store = CatalogueStore::load(&config.catalogue)?;
        for name in store.group_names() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Some(group) = &cli.dump_group {
        let store = CatalogueStore::load(&config.catalogue)?;
        let symbols = store
            .fields(group)
            .with_context(|| format!("extracting group '{group}'"))?;
        println!("{}", serde_json::to_string_pretty(&symbols)?);
        return Ok(());
    }

    let report = generate(&config, cli.write_mode()).with_context(|| {
        format!(
            "generating {} from {}",
            config.output.display(),
            config.catalogue.display()
        )
    })?;

    let output = report.output.display();
    match &report.outcome {
        Outcome::Rendered(text) => print!("{text}"),
        Outcome::Written => info!(
            configs = report.configs,
            commands = report.commands,
            "updated {output}"
        ),
        Outcome::Unchanged => info!("{output} already up to date"),
        Outcome::Checked(Freshness::UpToDate) => info!("{output} is up to date"),
        Outcome::Checked(Freshness::Stale) => {
            bail!("{output} is out of date; run symdoc to regenerate it")
        }
        Outcome::Checked(Freshness::Missing) => {
            bail!("{output} does not exist; run symdoc to generate it")
        }
    }
    Ok(())
}
