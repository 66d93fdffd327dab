//! Run orchestration
//!
//! One run walks `BuildQuery -> RequestBatch -> Select -> Fetch -> Apply`
//! exactly once. Failures come back as `Err` and stop the walk where they
//! happen; an unsuitable batch ends in `Outcome::NoMatch` instead.

use reqwest::blocking::Client;
use std::path::PathBuf;

use crate::apply::{Applied, Applier, absolute_path};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::query::build_query;
use crate::search::{
    BATCH_SIZE, Candidate, CandidateBatch, SearchCriteria, SearchRequest, SearchService,
    UnsplashClient,
};
use crate::select::select;
use crate::ui::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing in the batch passed the filter.
    NoMatch { scanned: usize },
    Completed {
        path: PathBuf,
        applied: Applied,
        scanned: usize,
    },
}

impl Outcome {
    pub fn scanned(&self) -> usize {
        match self {
            Outcome::NoMatch { scanned } | Outcome::Completed { scanned, .. } => *scanned,
        }
    }
}

#[derive(Debug)]
enum State {
    BuildQuery,
    RequestBatch { query: String },
    Select { batch: CandidateBatch },
    Fetch { candidate: Candidate, scanned: usize },
    Apply { path: PathBuf, scanned: usize },
    Done(Outcome),
}

pub struct Pipeline<S> {
    search: S,
    fetcher: Fetcher,
    applier: Applier,
    criteria: SearchCriteria,
}

impl Pipeline<UnsplashClient> {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("wpchg/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport("Failed to create HTTP client", e))?;

        let search = UnsplashClient::new(
            http.clone(),
            settings.api_url.clone(),
            settings.access_key.clone(),
        );
        Ok(Self::new(
            search,
            Fetcher::new(http, settings.save_dir.clone()),
            Applier::new(settings.command.clone()),
            settings.criteria.clone(),
        ))
    }
}

impl<S: SearchService> Pipeline<S> {
    pub fn new(search: S, fetcher: Fetcher, applier: Applier, criteria: SearchCriteria) -> Self {
        Self {
            search,
            fetcher,
            applier,
            criteria,
        }
    }

    pub fn run(&self) -> Result<Outcome> {
        let mut state = State::BuildQuery;
        loop {
            state = match self.step(state)? {
                State::Done(outcome) => return Ok(outcome),
                next => next,
            };
        }
    }

    fn step(&self, state: State) -> Result<State> {
        match state {
            State::BuildQuery => {
                let query = build_query(&self.criteria.tags);
                debug("wpchg.query", &format!("Search query: {}", query));
                Ok(State::RequestBatch { query })
            }

            State::RequestBatch { query } => {
                let request = SearchRequest {
                    query,
                    count: BATCH_SIZE,
                    orientation: self.criteria.orientation,
                };
                let batch = self.search.random_batch(&request)?;
                report_batch(&batch);
                Ok(State::Select { batch })
            }

            State::Select { batch } => {
                let selection = select(&batch.candidates, &self.criteria.bounds);
                for (reason, count) in &selection.rejections {
                    debug(
                        "wpchg.select.rejected",
                        &format!("Rejected {} candidate(s): {}", count, reason),
                    );
                }

                match selection.chosen {
                    Some(candidate) => Ok(State::Fetch {
                        candidate: candidate.clone(),
                        scanned: selection.scanned,
                    }),
                    None => {
                        debug(
                            "wpchg.select.none",
                            &format!(
                                "No images found that meet the resolution requirements \
                                 ({} scanned)",
                                selection.scanned
                            ),
                        );
                        Ok(State::Done(Outcome::NoMatch {
                            scanned: selection.scanned,
                        }))
                    }
                }
            }

            State::Fetch { candidate, scanned } => {
                debug(
                    "wpchg.fetch",
                    &format!(
                        "Downloading {} ({}x{}): {}",
                        candidate.id, candidate.width, candidate.height, candidate.raw_url
                    ),
                );
                let path = self.fetcher.fetch(&candidate)?;
                debug("wpchg.fetch.saved", &format!("Saved image to: {}", path.display()));
                Ok(State::Apply { path, scanned })
            }

            State::Apply { path, scanned } => {
                let applied = if self.applier.is_configured() {
                    let absolute = absolute_path(&path)?;
                    let applied = self.applier.apply(&path, &absolute)?;
                    if let Applied::Ran { command } = &applied {
                        debug("wpchg.apply", &format!("Set command ran successfully: {}", command));
                    }
                    applied
                } else {
                    debug(
                        "wpchg.apply.skipped",
                        "No set command configured, leaving image on disk",
                    );
                    Applied::Skipped
                };

                Ok(State::Done(Outcome::Completed {
                    path,
                    applied,
                    scanned,
                }))
            }

            State::Done(outcome) => Ok(State::Done(outcome)),
        }
    }
}

fn report_batch(batch: &CandidateBatch) {
    debug("wpchg.batch", &format!("Total: {}", batch.candidates.len()));

    let meta = &batch.metadata;
    let show = |value: Option<u32>| value.map_or_else(|| "unknown".to_string(), |v| v.to_string());
    debug(
        "wpchg.batch.rate",
        &format!(
            "Rate limit: {}, remaining: {}",
            show(meta.rate_limit),
            show(meta.rate_remaining)
        ),
    );
    debug("wpchg.batch.pages", &format!("Has next page: {}", meta.links.has_next()));
    let pages = [
        ("First page", &meta.links.first),
        ("Prev page", &meta.links.prev),
        ("Next page", &meta.links.next),
        ("Last page", &meta.links.last),
    ];
    for (label, link) in pages {
        if let Some(url) = link {
            debug("wpchg.batch.pages", &format!("{}: {}", label, url));
        }
    }
}
