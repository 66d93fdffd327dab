//! Wallpaper set command
//!
//! The configured template gets the saved image path substituted in and is
//! then split on whitespace into a program and its arguments. There is no
//! quoting: a path or argument containing spaces is split into several
//! arguments.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Replaced with the saved path as configured (possibly relative)
pub const RELATIVE_PLACEHOLDER: &str = "%s";
/// Replaced with the saved path resolved against the working directory
pub const ABSOLUTE_PLACEHOLDER: &str = "%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    template: String,
}

impl CommandSpec {
    /// `None` when the template has nothing to run.
    pub fn parse(template: &str) -> Option<Self> {
        if template.trim().is_empty() {
            return None;
        }
        Some(Self {
            template: template.to_string(),
        })
    }

    /// Substitute both placeholders in a single left-to-right pass, so text
    /// inserted for one placeholder is never rescanned.
    pub fn expand(&self, relative: &str, absolute: &str) -> String {
        let mut out = String::with_capacity(self.template.len() + relative.len());
        let mut rest = self.template.as_str();

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if tail.starts_with(RELATIVE_PLACEHOLDER) {
                out.push_str(relative);
                rest = &tail[RELATIVE_PLACEHOLDER.len()..];
            } else if tail.starts_with(ABSOLUTE_PLACEHOLDER) {
                out.push_str(absolute);
                rest = &tail[ABSOLUTE_PLACEHOLDER.len()..];
            } else {
                out.push('%');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }

    /// Program and arguments after expansion.
    pub fn argv(&self, relative: &str, absolute: &str) -> Option<(String, Vec<String>)> {
        split_command(&self.expand(relative, absolute))
    }
}

/// Whitespace split into program and arguments. `None` for a blank command.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Ran { command: String },
    Skipped,
}

pub struct Applier {
    command: Option<CommandSpec>,
}

impl Applier {
    pub fn new(command: Option<CommandSpec>) -> Self {
        Self { command }
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }

    /// Run the set command and wait for it. Without a command this does nothing.
    pub fn apply(&self, relative: &Path, absolute: &Path) -> Result<Applied> {
        let Some(spec) = &self.command else {
            return Ok(Applied::Skipped);
        };

        let relative = relative.to_string_lossy();
        let absolute = absolute.to_string_lossy();
        let command = spec.expand(&relative, &absolute);
        let Some((program, args)) = split_command(&command) else {
            return Ok(Applied::Skipped);
        };

        let status = Command::new(&program)
            .args(&args)
            .status()
            .map_err(|source| Error::ApplyLaunch {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ApplyStatus { command, status });
        }

        Ok(Applied::Ran { command })
    }
}

/// Resolve `path` against the current working directory without touching the filesystem.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| Error::filesystem("resolve working directory for", path, e))?;
    Ok(cwd.join(path))
}
