//! Statistics accumulators: per-adapter counters of (length, errors) histograms and adjacent-base
//! frequencies, mergeable across shards.
//!
//! [`AdapterStatistics`] is a sum type over the polarities that can produce a match, so that
//! `add_match` is rejected statically wherever Rust's type system can rule out a mismatched
//! pairing, and with a returned [`AdapterError`] at the one seam (`Anywhere`) where it cannot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};
use crate::matches::{LinkedMatch, MatchResult, RemoveAfterMatch, RemoveBeforeMatch, SingleMatch};

const ADJACENT_BASE_KEYS: [&str; 5] = ["A", "C", "G", "T", ""];

/// GC-equivalent alphabet used by [`EndStatistics::random_match_probabilities`]: bases (or, with
/// wildcards enabled, ambiguity codes) that are "GC-like" for the purpose of estimating random
/// match probability at a given GC content.
const GC_EQUIVALENT_WILDCARDS: &str = "CGRYSKMBDHVN";
const GC_EQUIVALENT_PLAIN: &str = "GC";

/// Per-adapter-end counters: an `errors[removed_length][error_count] -> frequency` histogram and,
/// for 3'-type ends, an adjacent-base histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct EndStatistics {
  pub name: String,
  pub sequence: String,
  pub max_error_rate: f64,
  pub effective_length: usize,
  pub has_wildcards: bool,
  pub allows_partial_matches: bool,
  errors: IndexMap<usize, IndexMap<usize, usize>>,
  adjacent_bases: IndexMap<String, usize>,
}

impl EndStatistics {
  #[must_use]
  pub fn new(
    name: impl Into<String>,
    sequence: impl Into<String>,
    max_error_rate: f64,
    effective_length: usize,
    has_wildcards: bool,
    allows_partial_matches: bool,
  ) -> Self {
    Self {
      name: name.into(),
      sequence: sequence.into(),
      max_error_rate,
      effective_length,
      has_wildcards,
      allows_partial_matches,
      errors: IndexMap::new(),
      adjacent_bases: ADJACENT_BASE_KEYS.iter().map(|&k| (k.to_owned(), 0)).collect(),
    }
  }

  /// `errors[removed_length][error_count] += 1`.
  pub fn record(&mut self, removed_length: usize, errors: usize) {
    *self.errors.entry(removed_length).or_default().entry(errors).or_insert(0) += 1;
  }

  /// As [`Self::record`], plus crediting `adjacent_bases`. Unknown or empty bases fall into the
  /// `""` bucket.
  pub fn record_with_adjacent_base(&mut self, removed_length: usize, errors: usize, adjacent_base: &str) {
    self.record(removed_length, errors);
    let key = if ADJACENT_BASE_KEYS.contains(&adjacent_base) { adjacent_base } else { "" };
    *self.adjacent_bases.entry(key.to_owned()).or_insert(0) += 1;
  }

  #[must_use]
  pub fn error_histogram(&self) -> &IndexMap<usize, IndexMap<usize, usize>> {
    &self.errors
  }

  #[must_use]
  pub fn adjacent_bases(&self) -> &IndexMap<String, usize> {
    &self.adjacent_bases
  }

  fn compatible_with(&self, other: &Self) -> bool {
    (self.max_error_rate - other.max_error_rate).abs() < f64::EPSILON
      && self.sequence == other.sequence
      && self.effective_length == other.effective_length
  }

  /// Sums the nested counters and the adjacent-base histogram into `self`. Fails if `max_error_rate`,
  /// `sequence`, or `effective_length` disagree.
  pub fn merge(&mut self, other: &Self) -> Result<()> {
    if !self.compatible_with(other) {
      return Err(AdapterError::StatisticsMismatch {
        left: self.name.clone(),
        right: other.name.clone(),
        reason: "max_error_rate, sequence, or effective_length differ".to_owned(),
      });
    }
    for (&length, by_errors) in &other.errors {
      let entry = self.errors.entry(length).or_default();
      for (&error_count, &count) in by_errors {
        *entry.entry(error_count).or_insert(0) += count;
      }
    }
    for (base, &count) in &other.adjacent_bases {
      *self.adjacent_bases.entry(base.clone()).or_insert(0) += count;
    }
    Ok(())
  }

  /// `p[0..=len]` where `p[i]` is the probability that a random `i`-base prefix of the adapter (or
  /// suffix, with `reverse = true`, for front-style ends). The caller decides when to reverse; this
  /// is deliberately exact even for `Anywhere` adapters, where neither direction is fully correct.
  #[must_use]
  pub fn random_match_probabilities(&self, gc_content: f64, reverse: bool) -> Vec<f64> {
    let bytes: Vec<u8> =
      if reverse { self.sequence.bytes().rev().collect() } else { self.sequence.bytes().collect() };
    let gc_equivalent = if self.has_wildcards { GC_EQUIVALENT_WILDCARDS } else { GC_EQUIVALENT_PLAIN };

    let mut probabilities = Vec::with_capacity(bytes.len() + 1);
    let mut cumulative = 1.0;
    probabilities.push(cumulative);
    for base in bytes {
      let contribution = if gc_equivalent.contains(base as char) { gc_content / 2.0 } else { (1.0 - gc_content) / 2.0 };
      cumulative *= contribution;
      probabilities.push(cumulative);
    }
    probabilities
  }
}

/// Statistics for a [`crate::linked::LinkedAdapter`]: one [`EndStatistics`] per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LinkedAdapterStatistics {
  pub front: EndStatistics,
  pub back: EndStatistics,
}

impl LinkedAdapterStatistics {
  /// Records a linked match. Both the front and the back bucket are keyed by the match's
  /// *aggregate* error count (`match.errors()`), not by each component's own error count: this
  /// looks duplicated but is intentional, kept exactly this way rather than "fixed".
  pub fn record(&mut self, linked_match: &LinkedMatch<'_>) {
    let aggregate_errors = linked_match.errors();
    if let Some(front) = linked_match.front() {
      self.front.record(front.removed_sequence_length(), aggregate_errors);
    }
    if let Some(back) = linked_match.back() {
      self.back.record_with_adjacent_base(back.removed_sequence_length(), aggregate_errors, back.adjacent_base());
    }
  }

  pub fn merge(&mut self, other: &Self) -> Result<()> {
    self.front.merge(&other.front)?;
    self.back.merge(&other.back)
  }
}

/// The closed sum type over adapter polarities that produce matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum AdapterStatistics {
  Front(EndStatistics),
  Back(EndStatistics),
  /// Either polarity is legal for an `Anywhere` adapter's match, so this variant alone dispatches
  /// on the incoming match's polarity at runtime rather than being ruled out by the match arm.
  Anywhere(EndStatistics),
  Linked(LinkedAdapterStatistics),
}

impl AdapterStatistics {
  /// Records `result` into the matching bucket. Returns [`AdapterError::MismatchedMatchKind`] if
  /// `result`'s variant cannot be recorded by `self`'s variant (e.g. a linked match delivered to
  /// `Front`/`Back`/`Anywhere` statistics).
  pub fn add_match(&mut self, result: &MatchResult<'_>) -> Result<()> {
    match (self, result) {
      (Self::Front(stats), MatchResult::Single(SingleMatch::Before(m))) => {
        record_front(stats, m);
        Ok(())
      }
      (Self::Back(stats), MatchResult::Single(SingleMatch::After(m))) => {
        record_back(stats, m);
        Ok(())
      }
      (Self::Anywhere(stats), MatchResult::Single(SingleMatch::Before(m))) => {
        record_front(stats, m);
        Ok(())
      }
      (Self::Anywhere(stats), MatchResult::Single(SingleMatch::After(m))) => {
        record_back(stats, m);
        Ok(())
      }
      (Self::Linked(stats), MatchResult::Linked(m)) => {
        stats.record(m);
        Ok(())
      }
      (stats, result) => Err(AdapterError::MismatchedMatchKind {
        stats_kind: stats.kind_name().to_owned(),
        match_kind: result.kind_name().to_owned(),
      }),
    }
  }

  fn kind_name(&self) -> &'static str {
    match self {
      Self::Front(_) => "Front",
      Self::Back(_) => "Back",
      Self::Anywhere(_) => "Anywhere",
      Self::Linked(_) => "Linked",
    }
  }

  /// Sums the underlying counters. Both sides must be the same variant with compatible
  /// configuration.
  pub fn merge(&mut self, other: &Self) -> Result<()> {
    match (self, other) {
      (Self::Front(a), Self::Front(b))
      | (Self::Back(a), Self::Back(b))
      | (Self::Anywhere(a), Self::Anywhere(b)) => a.merge(b),
      (Self::Linked(a), Self::Linked(b)) => a.merge(b),
      (a, b) => Err(AdapterError::StatisticsMismatch {
        left: a.kind_name().to_owned(),
        right: b.kind_name().to_owned(),
        reason: "statistics variants differ".to_owned(),
      }),
    }
  }
}

fn record_front(stats: &mut EndStatistics, m: &RemoveBeforeMatch<'_>) {
  stats.record(m.removed_sequence_length(), m.errors);
}

fn record_back(stats: &mut EndStatistics, m: &RemoveAfterMatch<'_>) {
  stats.record_with_adjacent_base(m.removed_sequence_length(), m.errors, m.adjacent_base());
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn stats() -> EndStatistics {
    EndStatistics::new("adapter", "ACGT", 0.1, 4, false, true)
  }

  #[test]
  fn merge_is_commutative() {
    let mut a = stats();
    a.record(10, 0);
    a.record(10, 1);
    let mut b = stats();
    b.record(10, 0);
    b.record_with_adjacent_base(5, 0, "A");

    let mut a_plus_b = a.clone();
    a_plus_b.merge(&b).unwrap();
    let mut b_plus_a = b.clone();
    b_plus_a.merge(&a).unwrap();

    assert_eq!(a_plus_b.error_histogram(), b_plus_a.error_histogram());
    assert_eq!(a_plus_b.adjacent_bases(), b_plus_a.adjacent_bases());
  }

  #[test]
  fn merge_is_associative() {
    let mut a = stats();
    a.record(10, 0);
    let mut b = stats();
    b.record(10, 1);
    let mut c = stats();
    c.record(5, 0);

    let mut ab_c = a.clone();
    ab_c.merge(&b).unwrap();
    ab_c.merge(&c).unwrap();

    let mut bc = b.clone();
    bc.merge(&c).unwrap();
    let mut a_bc = a.clone();
    a_bc.merge(&bc).unwrap();

    assert_eq!(ab_c.error_histogram(), a_bc.error_histogram());
  }

  #[test]
  fn merge_rejects_incompatible_configuration() {
    let mut a = stats();
    let b = EndStatistics::new("other", "TTTT", 0.1, 4, false, true);
    assert!(a.merge(&b).is_err());
  }

  #[test]
  fn random_match_probabilities_starts_at_one_and_is_nonincreasing() {
    let stats = stats();
    let probabilities = stats.random_match_probabilities(0.5, false);
    assert_eq!(probabilities.len(), 5);
    assert!((probabilities[0] - 1.0).abs() < f64::EPSILON);
    for window in probabilities.windows(2) {
      assert!(window[1] <= window[0] + f64::EPSILON);
      assert!(window[1] >= 0.0);
    }
  }

  #[test]
  fn adjacent_base_falls_back_to_empty_bucket() {
    let mut stats = stats();
    stats.record_with_adjacent_base(3, 0, "Z");
    assert_eq!(stats.adjacent_bases()[""], 1);
  }
}
