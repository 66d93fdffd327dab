//! Candidate filtering and first-fit selection
//!
//! Candidates are judged only on the dimensions the search service reports.
//! The first acceptable one in batch order wins; nothing is ranked.

use std::collections::BTreeMap;
use std::fmt;

use crate::search::Candidate;

/// Resolution limits. Zero on any axis means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

/// The first rule a candidate failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rejection {
    Portrait,
    TooNarrow,
    TooShort,
    TooWide,
    TooTall,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Portrait => "taller than wide",
            Rejection::TooNarrow => "below minimum width",
            Rejection::TooShort => "below minimum height",
            Rejection::TooWide => "above maximum width",
            Rejection::TooTall => "above maximum height",
        };
        f.write_str(reason)
    }
}

pub fn rejection(candidate: &Candidate, bounds: &Bounds) -> Option<Rejection> {
    let (width, height) = (candidate.width, candidate.height);

    if height > width {
        return Some(Rejection::Portrait);
    }
    if bounds.min_width > 0 && width < bounds.min_width {
        return Some(Rejection::TooNarrow);
    }
    if bounds.min_height > 0 && height < bounds.min_height {
        return Some(Rejection::TooShort);
    }
    if bounds.max_width > 0 && width > bounds.max_width {
        return Some(Rejection::TooWide);
    }
    if bounds.max_height > 0 && height > bounds.max_height {
        return Some(Rejection::TooTall);
    }
    None
}

pub fn accepts(candidate: &Candidate, bounds: &Bounds) -> bool {
    rejection(candidate, bounds).is_none()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub chosen: Option<&'a Candidate>,
    /// Candidates examined, the chosen one included.
    pub scanned: usize,
    pub rejections: BTreeMap<Rejection, usize>,
}

pub fn select<'a>(candidates: &'a [Candidate], bounds: &Bounds) -> Selection<'a> {
    let mut selection = Selection {
        chosen: None,
        scanned: 0,
        rejections: BTreeMap::new(),
    };

    for candidate in candidates {
        selection.scanned += 1;
        match rejection(candidate, bounds) {
            None => {
                selection.chosen = Some(candidate);
                break;
            }
            Some(reason) => *selection.rejections.entry(reason).or_default() += 1,
        }
    }

    selection
}
