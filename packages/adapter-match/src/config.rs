//! Adapter construction parameters, grouped into one `Copy` value type rather than a long
//! constructor argument list. CLI parsing is out of scope for this crate, so unlike a
//! command-line params struct this one is not `clap`-derived; a downstream CLI crate would build
//! one of these from its own argument parsing.

use serde::{Deserialize, Serialize};

/// Parameters shared by every single-polarity adapter, independent of which end is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SingleAdapterConfig {
  /// Maximum error rate in `[0, 1]`. A value `>= 1` is interpreted as an absolute error count and
  /// divided by the adapter length at construction time.
  pub max_error_rate: f64,

  /// Minimum number of adapter bases that must participate in the alignment. Clamped to
  /// `[1, len(sequence)]` at construction, except for `Prefix`/`Suffix` adapters, which force it
  /// to `len(sequence)` regardless of the value given here.
  pub min_overlap: usize,

  /// Whether IUPAC wildcard characters in the *read* match any base.
  pub read_wildcards: bool,

  /// Whether IUPAC wildcard characters in the *adapter* match any base. Disabled automatically
  /// when the adapter sequence is pure `ACGT`, regardless of this value.
  pub adapter_wildcards: bool,

  /// Whether insertions and deletions are permitted during alignment.
  pub indels: bool,
}

impl Default for SingleAdapterConfig {
  fn default() -> Self {
    Self { max_error_rate: 0.1, min_overlap: 3, read_wildcards: true, adapter_wildcards: true, indels: true }
  }
}
