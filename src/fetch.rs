use indicatif::ProgressBar;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use crate::common::progress::{create_spinner, finish_spinner_with_success};
use crate::error::{Error, Result};
use crate::search::Candidate;

const CHUNK_SIZE: usize = 64 * 1024;

/// Downloads candidates into one save directory as `<id>.jpg`.
pub struct Fetcher {
    http: Client,
    save_dir: PathBuf,
}

impl Fetcher {
    pub fn new(http: Client, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            save_dir: save_dir.into(),
        }
    }

    /// `<save_dir>/<id>.jpg`. Ids that are not a single plain file name are
    /// refused so the image can never land outside `save_dir`.
    pub fn destination(&self, candidate: &Candidate) -> Result<PathBuf> {
        let id = candidate.id.as_str();
        let mut components = Path::new(id).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name || id.contains(['/', '\\']) {
            return Err(Error::Transport {
                context: "Search service returned a malformed photo id",
                message: format!("{:?}", id),
            });
        }
        Ok(self.save_dir.join(format!("{}.jpg", id)))
    }

    /// Stream the candidate's raw image to disk, replacing any earlier copy.
    ///
    /// A transfer that fails midway leaves the partial file behind; the next
    /// fetch of the same candidate overwrites it.
    pub fn fetch(&self, candidate: &Candidate) -> Result<PathBuf> {
        let path = self.destination(candidate)?;
        fs::create_dir_all(&self.save_dir)
            .map_err(|e| Error::filesystem("create directory", &self.save_dir, e))?;

        let spinner = create_spinner(format!("Downloading {}", candidate.id));
        let result = self.download(&candidate.raw_url, &path, &spinner);

        match result {
            Ok(bytes) => {
                finish_spinner_with_success(spinner, format!("Downloaded {} bytes", bytes));
                Ok(path)
            }
            Err(err) => {
                spinner.finish_and_clear();
                Err(err)
            }
        }
    }

    fn download(&self, url: &str, path: &Path, progress: &ProgressBar) -> Result<u64> {
        let mut response = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::transport("Failed to download image", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                context: "Failed to download image",
                message: format!("HTTP {} from {}", status, url),
            });
        }

        let file = File::create(path).map_err(|e| Error::filesystem("create", path, e))?;
        let mut writer = BufWriter::new(file);
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total = 0u64;

        loop {
            let n = response
                .read(&mut buf)
                .map_err(|e| Error::transport("Failed to read image data", e))?;
            if n == 0 {
                break;
            }
            writer
                .write_all(&buf[..n])
                .map_err(|e| Error::filesystem("write", path, e))?;
            total += n as u64;
            progress.inc(n as u64);
        }

        let file = writer
            .into_inner()
            .map_err(|e| Error::filesystem("write", path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| Error::filesystem("sync", path, e))?;

        Ok(total)
    }
}
