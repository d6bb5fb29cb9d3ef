//! The alignment primitive consumed by every adapter polarity and by the indexed fast path.
//!
//! `locate`, `edit_environment`, `hamming_environment`, `PrefixComparer`, and `SuffixComparer` are
//! all owned by this crate rather than treated as an externally-supplied library, so that the
//! indexed-set build rule (`neighborhood`) and the unindexed fallback (`aligner`, `anchored`)
//! are guaranteed to agree: both ultimately score candidates with [`aligner::align_anchored`].

pub mod aligner;
pub mod anchored;
pub mod flags;
pub mod neighborhood;

pub use aligner::{AlignmentParams, Aligner, Located};
pub use anchored::{PrefixComparer, SuffixComparer};
pub use flags::EndAnchoring;
pub use neighborhood::{edit_environment, hamming_environment};
