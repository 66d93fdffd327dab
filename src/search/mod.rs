//! Search collaborator
//!
//! The pipeline only needs one thing from the image service: a batch of
//! candidates for a query. `SearchService` is that seam; `unsplash` is the
//! production implementation.

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::select::Bounds;

pub mod unsplash;

pub use unsplash::UnsplashClient;

/// Number of candidates requested per run. Unsplash caps random batches at 30.
pub const BATCH_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Squarish,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Squarish => "squarish",
        }
    }
}

/// What the user asked for. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub tags: Vec<String>,
    pub orientation: Option<Orientation>,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub count: u32,
    pub orientation: Option<Orientation>,
}

/// One photo as reported by the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub raw_url: String,
}

/// Pagination links from an RFC 8288 `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    pub fn parse(header: &str) -> Self {
        let mut links = PageLinks::default();
        for part in header.split(',') {
            let mut pieces = part.split(';');
            let Some(target) = pieces.next() else {
                continue;
            };
            let url = target.trim().trim_start_matches('<').trim_end_matches('>');
            if url.is_empty() {
                continue;
            }
            for param in pieces {
                let Some(rel) = param.trim().strip_prefix("rel=") else {
                    continue;
                };
                let slot = match rel.trim_matches('"') {
                    "first" => &mut links.first,
                    "prev" => &mut links.prev,
                    "next" => &mut links.next,
                    "last" => &mut links.last,
                    _ => continue,
                };
                *slot = Some(url.to_string());
            }
        }
        links
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Response metadata the pipeline only reports, never acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetadata {
    pub rate_limit: Option<u32>,
    pub rate_remaining: Option<u32>,
    pub links: PageLinks,
}

impl BatchMetadata {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok())
        };
        let links = headers
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(PageLinks::parse)
            .unwrap_or_default();

        Self {
            rate_limit: number("x-ratelimit-limit"),
            rate_remaining: number("x-ratelimit-remaining"),
            links,
        }
    }
}

/// Candidates in the order the service returned them.
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<Candidate>,
    pub metadata: BatchMetadata,
}

pub trait SearchService {
    fn random_batch(&self, request: &SearchRequest) -> Result<CandidateBatch>;
}
