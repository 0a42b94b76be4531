//! Generator configuration: input/output paths and whitespace switches.
//!
//! Values come from built-in defaults, then an optional `symdoc.toml`, then
//! command-line overrides applied by the binary. Relative paths inside a
//! config file are resolved against the file's directory so the generator
//! can be run from anywhere in a checkout.

use crate::error::{DocgenError, Result};
use crate::render::RenderOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory when no config is given.
pub const CONFIG_FILENAME: &str = "symdoc.toml";

pub const DEFAULT_CATALOGUE: &str = "_build/doc.json";
pub const DEFAULT_TEMPLATE: &str = "README.jinja.md";
pub const DEFAULT_OUTPUT: &str = "README.md";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DocgenConfig {
    pub catalogue: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub trim_blocks: bool,
    pub lstrip_blocks: bool,
    pub keep_trailing_newline: bool,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            catalogue: PathBuf::from(DEFAULT_CATALOGUE),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            trim_blocks: render.trim_blocks,
            lstrip_blocks: render.lstrip_blocks,
            keep_trailing_newline: render.keep_trailing_newline,
        }
    }
}

impl DocgenConfig {
    /// Parse and resolve a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DocgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|detail| DocgenError::Config {
            path: path.to_path_buf(),
            detail,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        debug!(path = %path.display(), "loaded config");
        Ok(config.resolved_against(base))
    }

    /// Use `explicit` when given, else `symdoc.toml` in `dir` if it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = dir.join(CONFIG_FILENAME);
        if local.is_file() {
            return Self::load(&local);
        }
        debug!("no config file found; using defaults");
        Ok(Self::default())
    }

    fn from_toml_str(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|err| err.to_string())
    }

    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        Self {
            catalogue: resolve(self.catalogue),
            template: resolve(self.template),
            output: resolve(self.output),
            ..self
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            trim_blocks: self.trim_blocks,
            lstrip_blocks: self.lstrip_blocks,
            keep_trailing_newline: self.keep_trailing_newline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let config = DocgenConfig::default();
        assert_eq!(config.catalogue, PathBuf::from("_build/doc.json"));
        assert_eq!(config.template, PathBuf::from("README.jinja.md"));
        assert_eq!(config.output, PathBuf::from("README.md"));
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = DocgenConfig::from_toml_str(
            r#"
output = "docs/reference.md"
keep-trailing-newline = true
"#,
        )
        .expect("parses");
        assert_eq!(config.output, PathBuf::from("docs/reference.md"));
        assert_eq!(config.catalogue, PathBuf::from(DEFAULT_CATALOGUE));
        assert!(config.keep_trailing_newline);
        assert!(config.trim_blocks);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DocgenConfig::from_toml_str("outptu = \"README.md\"").expect_err("typo");
        assert!(err.contains("outptu"), "{err}");
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "catalogue = \"build/doc.json\"\noutput = \"/tmp/abs.md\"\n",
        )
        .expect("write config");

        let config = DocgenConfig::load(&path).expect("loads");
        assert_eq!(config.catalogue, dir.path().join("build/doc.json"));
        assert_eq!(config.template, dir.path().join(DEFAULT_TEMPLATE));
        assert_eq!(config.output, PathBuf::from("/tmp/abs.md"));
    }

    #[test]
    fn discover_prefers_explicit_then_local_then_defaults() {
        let dir = TempDir::new().expect("tempdir");
        assert_eq!(
            DocgenConfig::discover(None, dir.path()).expect("defaults"),
            DocgenConfig::default()
        );

        fs::write(dir.path().join(CONFIG_FILENAME), "template = \"doc.j2\"\n")
            .expect("write local");
        let local = DocgenConfig::discover(None, dir.path()).expect("local");
        assert_eq!(local.template, dir.path().join("doc.j2"));

        let explicit = dir.path().join("other.toml");
        fs::write(&explicit, "template = \"other.j2\"\n").expect("write explicit");
        let chosen = DocgenConfig::discover(Some(&explicit), dir.path()).expect("explicit");
        assert_eq!(chosen.template, dir.path().join("other.j2"));
    }

    #[test]
    fn invalid_file_names_the_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "trim-blocks = \"yes\"\n").expect("write config");
        let err = DocgenConfig::load(&path).expect_err("wrong type");
        assert!(matches!(err, DocgenError::Config { .. }));
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }
}
