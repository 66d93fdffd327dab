use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Every fatal condition a run can hit. Not finding a suitable image is not
/// one of them; see `pipeline::Outcome::NoMatch`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{context}: {message}")]
    Transport {
        context: &'static str,
        message: String,
    },

    #[error("Failed to {action} {}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch '{program}'")]
    ApplyLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Set command '{command}' exited with {status}")]
    ApplyStatus { command: String, status: ExitStatus },
}

impl Error {
    /// Flattens the cause chain into the message; reqwest hides the interesting part in `source()`.
    pub fn transport(context: &'static str, err: impl std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut cause = err.source();
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }
        Error::Transport { context, message }
    }

    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
