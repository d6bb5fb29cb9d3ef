use thiserror::Error;

/// Errors raised while constructing or merging adapters, indexed adapter sets, and statistics.
///
/// Matching itself never raises: "no match" is represented as `Option::None`, never an `Err`. Only
/// construction-time validation and statistics merging can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
  #[error("adapter sequence contains invalid character '{character}' at position {position}{hint}")]
  InvalidCharacter {
    character: char,
    position: usize,
    hint: String,
  },

  #[error("adapter sequence is empty")]
  EmptySequence,

  #[error("cannot build an indexed adapter set from an empty adapter list")]
  EmptyAdapterList,

  #[error("adapter '{name}' is not acceptable for an indexed adapter set: {reason}")]
  IndexRejection { name: String, reason: String },

  #[error("cannot merge statistics for '{left}' and '{right}': {reason}")]
  StatisticsMismatch {
    left: String,
    right: String,
    reason: String,
  },

  /// Raised when a match variant is fed to a statistics accumulator that cannot record it (e.g. a
  /// linked match delivered to front-only statistics). This is the one seam where the statistics
  /// sum type's variants don't line up with a match's variant, and Rust's type system cannot rule
  /// it out statically, so it surfaces as a runtime error instead.
  #[error("statistics of kind '{stats_kind}' cannot record a match of kind '{match_kind}'")]
  MismatchedMatchKind { stats_kind: String, match_kind: String },
}

pub type Result<T> = std::result::Result<T, AdapterError>;
