//! Single adapters: one normalised sequence, one configuration, one compiled aligner, and one of
//! seven polarities.

mod single;

pub use single::{Matchable, SingleAdapter, SingleAdapterKind};
