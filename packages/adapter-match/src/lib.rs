//! Approximate adapter sequence matching and trimming-classification for short-read sequencing
//! data: locate a known adapter sequence inside a noisy read under a bounded error budget, and
//! report where to cut.
//!
//! The crate is organised as an algorithmic core: an alignment
//! primitive ([`align`]) shared by every higher-level piece, single-polarity adapters built on
//! top of it ([`adapter`]), composition over single adapters ([`linked`], [`multi`]), a fast
//! indexed path that replaces per-read alignment with precomputed neighbourhoods ([`indexed`]),
//! and statistics accumulation ([`stats`]). [`matches`] defines the match records every adapter
//! kind produces; [`config`] groups per-adapter construction parameters; [`error`] is the single
//! fallible-operation error type; [`iupac`] and [`name`] are small shared utilities.

pub mod adapter;
pub mod align;
pub mod config;
pub mod error;
pub mod indexed;
pub mod iupac;
pub mod json;
pub mod linked;
pub mod matches;
pub mod multi;
pub mod name;
pub mod stats;

pub use adapter::{Matchable, SingleAdapter, SingleAdapterKind};
pub use align::EndAnchoring;
pub use config::SingleAdapterConfig;
pub use error::{AdapterError, Result};
pub use indexed::{IndexedPrefixAdapters, IndexedSuffixAdapters, Polarity};
pub use linked::LinkedAdapter;
pub use matches::{InfoRecord, LinkedMatch, MatchResult, RemoveAfterMatch, RemoveBeforeMatch, SingleMatch};
pub use multi::MultipleAdapters;
pub use stats::{AdapterStatistics, EndStatistics, LinkedAdapterStatistics};
