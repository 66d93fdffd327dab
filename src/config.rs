use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::apply::CommandSpec;
use crate::cli::Cli;
use crate::common::paths;
use crate::error::{Error, Result};
use crate::search::unsplash::DEFAULT_API_URL;
use crate::search::{Orientation, SearchCriteria};
use crate::select::Bounds;

/// Optional `config.toml`. Every key can also be given on the command line,
/// which takes precedence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub access_key: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub save_path: Option<String>,
    pub set_command: Option<String>,
    pub api_url: Option<String>,
    pub orientation: Option<Orientation>,
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading {}: {}", path.display(), e)))?;
        toml::from_str(&s).map_err(|e| Error::Config(format!("parsing {}: {}", path.display(), e)))
    }
}

/// Fully resolved options for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub verbose: bool,
    pub access_key: String,
    pub api_url: String,
    pub criteria: SearchCriteria,
    pub save_dir: PathBuf,
    /// True when `save_dir` fell back to the temp directory
    pub save_dir_defaulted: bool,
    pub command: Option<CommandSpec>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let access_key = cli
            .access_key
            .clone()
            .or(file.access_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "an Unsplash access key is required \
                     (--access-key or access_key in config.toml)"
                        .to_string(),
                )
            })?;

        let tags = if cli.tags.is_empty() { file.tags } else { cli.tags.clone() };
        if tags.is_empty() {
            return Err(Error::Config("at least one --tag is required".to_string()));
        }

        let bounds = Bounds {
            min_width: cli.min_width.or(file.min_width).unwrap_or(0),
            min_height: cli.min_height.or(file.min_height).unwrap_or(0),
            max_width: cli.max_width.or(file.max_width).unwrap_or(0),
            max_height: cli.max_height.or(file.max_height).unwrap_or(0),
        };
        check_bounds(&bounds)?;

        let (save_dir, save_dir_defaulted) = match cli.save_path.clone().or(file.save_path) {
            Some(path) if !path.trim().is_empty() => {
                (PathBuf::from(shellexpand::tilde(&path).into_owned()), false)
            }
            _ => (paths::default_save_dir(), true),
        };

        let command = cli
            .set_command
            .as_deref()
            .or(file.set_command.as_deref())
            .and_then(CommandSpec::parse);

        Ok(Self {
            verbose: cli.verbose,
            access_key,
            api_url: file.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            criteria: SearchCriteria {
                tags,
                orientation: Some(file.orientation.unwrap_or_default()),
                bounds,
            },
            save_dir,
            save_dir_defaulted,
            command,
        })
    }
}

/// A minimum above its maximum can never match, so it is refused up front.
fn check_bounds(bounds: &Bounds) -> Result<()> {
    if bounds.max_width > 0 && bounds.min_width > bounds.max_width {
        return Err(Error::Config(format!(
            "minimum width {} exceeds maximum width {}",
            bounds.min_width, bounds.max_width
        )));
    }
    if bounds.max_height > 0 && bounds.min_height > bounds.max_height {
        return Err(Error::Config(format!(
            "minimum height {} exceeds maximum height {}",
            bounds.min_height, bounds.max_height
        )));
    }
    Ok(())
}
