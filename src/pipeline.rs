//! Load → render → write, as one fallible pass.
//!
//! Nothing touches the output path until the catalogue has loaded, both
//! symbol groups have been extracted, and the template has rendered in full.

use crate::catalog::CatalogueStore;
use crate::config::DocgenConfig;
use crate::error::{DocgenError, Result};
use crate::output::{Freshness, compare_existing, write_atomically};
use crate::render::{Bindings, DocumentRenderer, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Template variable bound to the sorted `Config` symbols.
pub const CONFIGS_BINDING: &str = "configs";
/// Template variable bound to the sorted `Commands` symbols.
pub const COMMANDS_BINDING: &str = "commands";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Write the output file (skipped when it already matches).
    Write,
    /// Compare against the output file without writing.
    Check,
    /// Hand the rendered text back to the caller.
    Stdout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Written,
    Unchanged,
    Checked(Freshness),
    Rendered(String),
}

#[derive(Clone, Debug)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub configs: usize,
    pub commands: usize,
    pub outcome: Outcome,
}

impl GenerateReport {
    /// False only for a check run that found the output stale or missing.
    pub fn is_current(&self) -> bool {
        !matches!(
            self.outcome,
            Outcome::Checked(Freshness::Stale) | Outcome::Checked(Freshness::Missing)
        )
    }
}

/// Bind `configs` and `commands` from `store` and render `template_text`.
pub fn render_document(
    store: &CatalogueStore,
    template_name: &str,
    template_text: &str,
    options: RenderOptions,
) -> Result<String> {
    let (bindings, _) = bind_groups(store)?;
    DocumentRenderer::new(options).render_named(template_name, template_text, &bindings)
}

/// Bindings for the document template plus `(configs, commands)` counts.
fn bind_groups(store: &CatalogueStore) -> Result<(Bindings, (usize, usize))> {
    let configs = store.configs()?;
    let commands = store.commands()?;
    let counts = (configs.len(), commands.len());
    let bindings = Bindings::new()
        .with(CONFIGS_BINDING, &configs)
        .with(COMMANDS_BINDING, &commands);
    Ok((bindings, counts))
}

pub fn generate(config: &DocgenConfig, mode: WriteMode) -> Result<GenerateReport> {
    let store = CatalogueStore::load(&config.catalogue)?;
    let (bindings, (configs, commands)) = bind_groups(&store)?;

    let template_text = read_template(&config.template)?;
    let template_name = config
        .template
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("template");
    let rendered = DocumentRenderer::new(config.render_options()).render_named(
        template_name,
        &template_text,
        &bindings,
    )?;
    debug!(bytes = rendered.len(), "rendered document");

    let outcome = match mode {
        WriteMode::Stdout => Outcome::Rendered(rendered),
        WriteMode::Check => Outcome::Checked(compare_existing(&config.output, &rendered)?),
        WriteMode::Write => match compare_existing(&config.output, &rendered)? {
            Freshness::UpToDate => Outcome::Unchanged,
            Freshness::Stale | Freshness::Missing => {
                write_atomically(&config.output, &rendered)?;
                info!(path = %config.output.display(), "wrote document");
                Outcome::Written
            }
        },
    };

    Ok(GenerateReport {
        output: config.output.clone(),
        configs,
        commands,
        outcome,
    })
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| DocgenError::Io {
        path: path.to_path_buf(),
        source,
    })
}
