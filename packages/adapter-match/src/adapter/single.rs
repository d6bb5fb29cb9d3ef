//! A single-polarity adapter: one normalised sequence, one configuration, one compiled aligner (or
//! anchored comparator), and a [`SingleAdapterKind`] tag that selects end-anchoring flags and
//! match polarity.
//!
//! Rather than seven structs in an inheritance chain, one per polarity, this uses one struct
//! with a tag, dispatched once in [`SingleAdapter::match_to`] and once in [`SingleAdapter::spec`].

use std::fmt;

use crate::align::{AlignmentParams, Aligner, EndAnchoring, PrefixComparer, SuffixComparer};
use crate::config::SingleAdapterConfig;
use crate::error::Result;
use crate::iupac::{is_pure_acgt, normalize_sequence};
use crate::matches::{MatchResult, RemoveAfterMatch, RemoveBeforeMatch, SingleMatch};
use crate::name::global_name_generator;

/// Which of the seven canonical polarities a [`SingleAdapter`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SingleAdapterKind {
  Front,
  Back,
  Anywhere,
  NonInternalFront,
  NonInternalBack,
  Prefix,
  Suffix,
}

impl SingleAdapterKind {
  fn end_anchoring(self) -> EndAnchoring {
    match self {
      Self::Front => EndAnchoring::FRONT,
      Self::Back => EndAnchoring::BACK,
      Self::Anywhere => EndAnchoring::ANYWHERE,
      Self::NonInternalFront => EndAnchoring::FRONT_NOT_INTERNAL,
      Self::NonInternalBack => EndAnchoring::BACK_NOT_INTERNAL,
      Self::Prefix => EndAnchoring::PREFIX,
      Self::Suffix => EndAnchoring::SUFFIX,
    }
  }

  /// `Prefix`/`Suffix` never report a fully-internal alignment; they anchor `min_overlap` to the
  /// full adapter length and, with indels disabled, bypass the DP aligner entirely.
  fn is_anchored(self) -> bool {
    matches!(self, Self::Prefix | Self::Suffix)
  }
}

/// Anchored comparators used instead of the DP aligner when `indels = false` on a `Prefix`/`Suffix`
/// adapter.
enum AnchoredComparator {
  Prefix(PrefixComparer),
  Suffix(SuffixComparer),
}

/// The shared capability every matchable adapter exposes, so that [`crate::multi::MultipleAdapters`]
/// and [`crate::linked::LinkedAdapter`] can hold heterogeneous adapters uniformly.
pub trait Matchable {
  fn name(&self) -> &str;
  fn enable_debug(&self);
  fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>>;
}

/// One normalised adapter sequence plus the configuration and compiled matcher for one polarity.
pub struct SingleAdapter {
  name: String,
  sequence: String,
  kind: SingleAdapterKind,
  max_error_rate: f64,
  min_overlap: usize,
  read_wildcards: bool,
  adapter_wildcards: bool,
  indels: bool,
  aligner: Aligner,
  anchored: Option<AnchoredComparator>,
}

impl SingleAdapter {
  /// Normalises and validates `sequence`, derives the per-length error rate and clamped overlap,
  /// and compiles an [`Aligner`] (and, for anchored kinds with indels disabled, a direct
  /// comparator). Unnamed adapters (`name = None`) receive the next name from the process-wide
  /// [`global_name_generator`].
  pub fn new(
    kind: SingleAdapterKind,
    sequence: &str,
    config: SingleAdapterConfig,
    name: Option<String>,
  ) -> Result<Self> {
    let sequence = normalize_sequence(sequence)?;
    let name = name.unwrap_or_else(|| global_name_generator().next_name());

    let adapter_wildcards = config.adapter_wildcards && !is_pure_acgt(&sequence);
    let max_error_rate =
      if config.max_error_rate >= 1.0 { config.max_error_rate / sequence.len() as f64 } else { config.max_error_rate };

    let min_overlap =
      if kind.is_anchored() { sequence.len() } else { config.min_overlap.clamp(1, sequence.len()) };

    let params = AlignmentParams {
      flags: kind.end_anchoring(),
      max_error_rate,
      wildcard_ref: adapter_wildcards,
      wildcard_query: config.read_wildcards,
      indels: config.indels,
      min_overlap,
    };
    let aligner = Aligner::new(&sequence, params);

    let anchored = if kind.is_anchored() && !config.indels {
      Some(match kind {
        SingleAdapterKind::Prefix => {
          AnchoredComparator::Prefix(PrefixComparer::new(&sequence, max_error_rate, adapter_wildcards, config.read_wildcards))
        }
        SingleAdapterKind::Suffix => {
          AnchoredComparator::Suffix(SuffixComparer::new(&sequence, max_error_rate, adapter_wildcards, config.read_wildcards))
        }
        _ => unreachable!("is_anchored() only holds for Prefix/Suffix"),
      })
    } else {
      None
    };

    Ok(Self {
      name,
      sequence,
      kind,
      max_error_rate,
      min_overlap,
      read_wildcards: config.read_wildcards,
      adapter_wildcards,
      indels: config.indels,
      aligner,
      anchored,
    })
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn sequence(&self) -> &str {
    &self.sequence
  }

  #[must_use]
  pub fn kind(&self) -> SingleAdapterKind {
    self.kind
  }

  #[must_use]
  pub fn max_error_rate(&self) -> f64 {
    self.max_error_rate
  }

  #[must_use]
  pub fn min_overlap(&self) -> usize {
    self.min_overlap
  }

  #[must_use]
  pub fn read_wildcards(&self) -> bool {
    self.read_wildcards
  }

  #[must_use]
  pub fn adapter_wildcards(&self) -> bool {
    self.adapter_wildcards
  }

  #[must_use]
  pub fn indels(&self) -> bool {
    self.indels
  }

  /// `Prefix`/`Suffix` adapters never report a fully-internal match.
  #[must_use]
  pub fn allows_partial_matches(&self) -> bool {
    !self.kind.is_anchored()
  }

  /// Count of non-wildcard characters, used by statistics compatibility checks.
  #[must_use]
  pub fn effective_length(&self) -> usize {
    self.aligner.effective_length()
  }

  pub fn enable_debug_matrix(&self) {
    self.aligner.enable_debug();
  }

  #[must_use]
  pub fn dp_matrix(&self) -> Option<Vec<Vec<(usize, usize)>>> {
    self.aligner.dp_matrix()
  }

  /// Locates the adapter in `read` and wraps the alignment in the polarity-appropriate match
  /// variant.
  #[must_use]
  pub fn match_to<'a>(&'a self, read: &'a str) -> Option<SingleMatch<'a>> {
    let located = match &self.anchored {
      Some(AnchoredComparator::Prefix(c)) => c.locate(read),
      Some(AnchoredComparator::Suffix(c)) => c.locate(read),
      None => self.aligner.locate(read),
    }?;
    let (astart, astop, rstart, rstop, matches, errors) = located;

    let before = |adapter: &'a Self| RemoveBeforeMatch { adapter, read, astart, astop, rstart, rstop, matches, errors };
    let after = |adapter: &'a Self| RemoveAfterMatch { adapter, read, astart, astop, rstart, rstop, matches, errors };

    Some(match self.kind {
      SingleAdapterKind::Front | SingleAdapterKind::NonInternalFront | SingleAdapterKind::Prefix => {
        SingleMatch::Before(before(self))
      }
      SingleAdapterKind::Back | SingleAdapterKind::NonInternalBack | SingleAdapterKind::Suffix => {
        SingleMatch::After(after(self))
      }
      SingleAdapterKind::Anywhere => {
        if rstart == 0 { SingleMatch::Before(before(self)) } else { SingleMatch::After(after(self)) }
      }
    })
  }

  /// The stable user-facing spec string for this adapter's polarity.
  #[must_use]
  pub fn spec(&self) -> String {
    let seq = &self.sequence;
    match self.kind {
      SingleAdapterKind::Front => format!("{seq}..."),
      SingleAdapterKind::Back => seq.clone(),
      SingleAdapterKind::Anywhere => format!("...{seq}..."),
      SingleAdapterKind::NonInternalFront => format!("X{seq}..."),
      SingleAdapterKind::NonInternalBack => format!("{seq}X"),
      SingleAdapterKind::Prefix => format!("^{seq}..."),
      SingleAdapterKind::Suffix => format!("{seq}$"),
    }
  }
}

impl fmt::Debug for SingleAdapter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SingleAdapter")
      .field("name", &self.name)
      .field("sequence", &self.sequence)
      .field("kind", &self.kind)
      .field("max_error_rate", &self.max_error_rate)
      .field("min_overlap", &self.min_overlap)
      .finish()
  }
}

impl Matchable for SingleAdapter {
  fn name(&self) -> &str {
    self.name()
  }

  fn enable_debug(&self) {
    self.enable_debug_matrix();
  }

  fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    SingleAdapter::match_to(self, read).map(MatchResult::Single)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  fn config(max_error_rate: f64, min_overlap: usize) -> SingleAdapterConfig {
    SingleAdapterConfig { max_error_rate, min_overlap, ..SingleAdapterConfig::default() }
  }

  #[rstest]
  fn back_adapter_scenario() {
    let adapter = SingleAdapter::new(SingleAdapterKind::Back, "ACGTACG", config(0.1, 3), None).unwrap();
    let SingleMatch::After(m) = adapter.match_to("AAAAACGTACG").unwrap() else { panic!("expected RemoveAfterMatch") };
    assert_eq!((m.rstart, m.rstop, m.errors, m.matches), (4, 11, 0, 7));
    assert_eq!(m.trimmed(), "AAAA");
  }

  #[rstest]
  fn front_adapter_scenario() {
    let adapter = SingleAdapter::new(SingleAdapterKind::Front, "ACGTACG", config(0.1, 3), None).unwrap();
    let SingleMatch::Before(m) = adapter.match_to("ACGTACGTAIL").unwrap() else { panic!("expected RemoveBeforeMatch") };
    assert_eq!((m.rstart, m.rstop, m.errors), (0, 7, 0));
    assert_eq!(m.trimmed(), "TAIL");
  }

  #[rstest]
  fn prefix_adapter_requires_read_start() {
    let adapter = SingleAdapter::new(SingleAdapterKind::Prefix, "ACGT", config(0.0, 1), None).unwrap();
    let SingleMatch::Before(m) = adapter.match_to("ACGTXXXX").unwrap() else { panic!("expected RemoveBeforeMatch") };
    assert_eq!((m.rstart, m.rstop, m.errors, m.matches), (0, 4, 0, 4));
    assert!(adapter.match_to("TACGTXXX").is_none());
  }

  #[rstest]
  fn anywhere_adapter_chooses_polarity_from_alignment() {
    let adapter = SingleAdapter::new(SingleAdapterKind::Anywhere, "ACG", config(0.0, 3), None).unwrap();
    assert!(matches!(adapter.match_to("ACGBAR").unwrap(), SingleMatch::Before(_)));
    assert!(matches!(adapter.match_to("BARACG").unwrap(), SingleMatch::After(_)));
  }

  #[rstest]
  fn spec_strings_match_polarity() {
    let a = SingleAdapter::new(SingleAdapterKind::Front, "SEQ", SingleAdapterConfig::default(), None).unwrap();
    assert_eq!(a.spec(), "SEQ...");
    let b = SingleAdapter::new(SingleAdapterKind::Back, "SEQ", SingleAdapterConfig::default(), None).unwrap();
    assert_eq!(b.spec(), "SEQ");
    let c = SingleAdapter::new(SingleAdapterKind::Prefix, "SEQ", SingleAdapterConfig::default(), None).unwrap();
    assert_eq!(c.spec(), "^SEQ...");
    let d = SingleAdapter::new(SingleAdapterKind::Suffix, "SEQ", SingleAdapterConfig::default(), None).unwrap();
    assert_eq!(d.spec(), "SEQ$");
  }

  #[rstest]
  fn pure_acgt_sequence_disables_adapter_wildcards() {
    let adapter = SingleAdapter::new(SingleAdapterKind::Back, "ACGT", SingleAdapterConfig::default(), None).unwrap();
    assert!(!adapter.adapter_wildcards());
    let adapter = SingleAdapter::new(SingleAdapterKind::Back, "ACGTN", SingleAdapterConfig::default(), None).unwrap();
    assert!(adapter.adapter_wildcards());
  }

  #[rstest]
  fn absolute_error_count_is_divided_by_length() {
    let config = config(2.0, 1);
    let adapter = SingleAdapter::new(SingleAdapterKind::Back, "ACGTACGT", config, None).unwrap();
    assert!((adapter.max_error_rate() - 0.25).abs() < f64::EPSILON);
  }
}
