use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use super::{BatchMetadata, Candidate, CandidateBatch, SearchRequest, SearchService};
use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    raw: String,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    width: u32,
    height: u32,
    urls: PhotoUrls,
}

impl From<Photo> for Candidate {
    fn from(photo: Photo) -> Self {
        Candidate {
            id: photo.id,
            width: photo.width,
            height: photo.height,
            raw_url: photo.urls.raw,
        }
    }
}

/// Error body returned by the Unsplash API on failure.
#[derive(Debug, Deserialize)]
struct ApiErrors {
    errors: Vec<String>,
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrors>(body) {
        Ok(api) if !api.errors.is_empty() => format!("HTTP {}: {}", status, api.errors.join("; ")),
        _ if body.trim().is_empty() => format!("HTTP {}", status),
        _ => format!("HTTP {}: {}", status, body.trim()),
    }
}

pub struct UnsplashClient {
    http: Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(http: Client, base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_key: access_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/photos/random", self.base_url.trim_end_matches('/'))
    }
}

impl SearchService for UnsplashClient {
    fn random_batch(&self, request: &SearchRequest) -> Result<CandidateBatch> {
        let mut params = vec![
            ("query", request.query.clone()),
            ("count", request.count.to_string()),
        ];
        if let Some(orientation) = request.orientation {
            params.push(("orientation", orientation.as_str().to_string()));
        }

        let response = self
            .http
            .get(self.endpoint())
            .query(&params)
            .header(AUTHORIZATION, format!("Client-ID {}", self.access_key))
            .header(ACCEPT, "application/json")
            .header("Accept-Version", "v1")
            .send()
            .map_err(|e| Error::transport("Failed to reach the search service", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Transport {
                context: "Search request rejected",
                message: describe_failure(status, &body),
            });
        }

        let metadata = BatchMetadata::from_headers(response.headers());
        let photos: Vec<Photo> = response
            .json()
            .map_err(|e| Error::transport("Failed to parse search results", e))?;

        Ok(CandidateBatch {
            candidates: photos.into_iter().map(Candidate::from).collect(),
            metadata,
        })
    }
}
