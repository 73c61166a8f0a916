use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::storage::{Format, Model};

const ROOT_DIR_NAME: &str = "SkryptPython";
const CONFIG_DIR_NAME: &str = "solutions-tree";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Optional defaults document, `<config_dir>/solutions-tree/config.toml` unless given explicitly.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<String>,
    pub model: Option<Model>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Write,
    Read,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Overwrite {
    Ask,
    Always,
}

/// Everything the walker needs to know, resolved once up front.
#[derive(Clone, Debug)]
pub struct Settings {
    pub root: Utf8PathBuf,
    pub format: Format,
    pub mode: Mode,
    pub model: Model,
    pub overwrite: Overwrite,
}

/// Flag values that override the defaults file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub root: Option<Utf8PathBuf>,
    pub model: Option<Model>,
    pub read: bool,
    pub json: bool,
    pub assume_yes: bool,
}

impl Settings {
    pub fn resolve(cwd: &Utf8Path, file: &FileConfig, flags: Overrides) -> Self {
        let root = flags
            .root
            .or_else(|| file.root.as_deref().map(Utf8PathBuf::from))
            .map(|root| if root.is_absolute() { root } else { cwd.join(root) })
            .unwrap_or_else(|| cwd.join(ROOT_DIR_NAME));

        Self {
            root,
            format: if flags.json { Format::Json } else { Format::Csv },
            mode: if flags.read { Mode::Read } else { Mode::Write },
            model: flags.model.or(file.model).unwrap_or_default(),
            overwrite: if flags.assume_yes {
                Overwrite::Always
            } else {
                Overwrite::Ask
            },
        }
    }
}

/// Load the defaults file. An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Utf8Path>) -> Result<FileConfig> {
    match explicit {
        Some(path) => load_from_path(path),
        None => match default_path() {
            Some(path) if path.exists() => load_from_path(&path),
            _ => Ok(FileConfig::default()),
        },
    }
}

pub fn load_from_path(path: &Utf8Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

fn default_path() -> Option<Utf8PathBuf> {
    let dir = dirs::config_dir()?;
    let path = dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    Utf8PathBuf::from_path_buf(path).ok()
}

pub fn current_working_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("determining current directory")?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|_| anyhow!("current directory is not valid UTF-8"))
}
