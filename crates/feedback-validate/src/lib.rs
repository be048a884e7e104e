//! Validation and normalization of raw feedback records.
//!
//! Each source has its own [`ValidationProfile`]; [`normalize`] applies it
//! and returns an [`Outcome`] that is either the canonical record or the
//! rejection to log.

pub mod dates;
pub mod normalize;
pub mod profile;

pub use dates::{DateFormat, parse_review_date, to_iso_date};
pub use normalize::{MAX_RATING, MIN_RATING, Outcome, RejectReason, normalize, validate};
pub use profile::{
    MARKUP_TREE_PROFILE, RatingWhenAbsent, STRUCTURED_PROFILE, TABULAR_PROFILE, ValidationProfile,
};
