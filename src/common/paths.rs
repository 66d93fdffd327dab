use std::path::PathBuf;

use crate::error::{Error, Result};

pub const APP_DIR_NAME: &str = "wpchg";

/// Directory holding `config.toml`. Not created; the file is optional.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| Error::Config("unable to determine user config directory".to_string()))
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Where images land when no save path is configured
pub fn default_save_dir() -> PathBuf {
    std::env::temp_dir().join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_save_dir_is_under_temp() {
        let dir = default_save_dir();
        assert!(dir.starts_with(std::env::temp_dir()));
        assert!(dir.ends_with("wpchg"));
    }
}
