use std::path::PathBuf;
use thiserror::Error;

use crate::template::Hole;

/// A failure of the generation run.
///
/// None of these are recovered locally; the run aborts before the destination is written.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required hole does not appear in the template.
    #[error("Malformed template '{origin}' - missing hole {hole}.")]
    MissingHole { origin: String, hole: Hole },

    /// A hole appears more than once in the template.
    #[error("Malformed template '{origin}' - hole {hole} appears {count} times.")]
    DuplicateHole {
        origin: String,
        hole: Hole,
        count: usize,
    },

    /// The template contains a `$$NAME$$` token that names no hole.
    #[error("Malformed template '{origin}' - unknown hole '{token}'.")]
    UnknownHole { origin: String, token: String },

    /// The template contains a hole which its variant does not fill.
    #[error("Malformed template '{origin}' - hole {hole} is not used by the {variant} variant.")]
    UnexpectedHole {
        origin: String,
        hole: Hole,
        variant: crate::Variant,
    },

    /// A hole survived substitution.
    #[error("Generation defect - hole '{token}' remains in the binder for arity {arity}.")]
    UnresolvedHole { arity: usize, token: String },

    /// A binder would open or close a region of its own, breaking the next splice.
    #[error("Malformed template '{origin}' - the binder for arity {arity} contains the region sentinel '{sentinel}' on line {line}.")]
    RegionSentinel {
        origin: String,
        arity: usize,
        sentinel: String,
        line: usize,
    },

    /// The splice destination does not contain exactly one regeneration region.
    #[error("Cannot splice '{path}': {source}")]
    Region {
        path: PathBuf,
        #[source]
        source: RegionError,
    },

    #[error("Cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a destination text cannot be spliced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("no '//--{{' region found.")]
    MissingRegion,
    /// More than one opening or closing sentinel; the target is ambiguous.
    #[error("ambiguous region - found {openings} '//--{{' and {closings} '//--}}' sentinels.")]
    AmbiguousRegion { openings: usize, closings: usize },
    #[error("region opened on line {line} is never closed.")]
    UnterminatedRegion { line: usize },
}
