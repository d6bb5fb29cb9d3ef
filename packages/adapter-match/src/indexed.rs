//! The indexed fast path: precomputes the edit-neighborhood of each adapter's anchored end into a
//! `variant string -> (adapter, errors, matches)` mapping, replacing per-read alignment with a
//! lookup.
//!
//! Two concrete subtypes, [`IndexedPrefixAdapters`] and [`IndexedSuffixAdapters`], wrap the shared
//! [`IndexedAdapterSet`] machinery so each only ever accepts its own expected polarity, rather than
//! one set accepting either polarity silently.

use std::collections::HashMap;

use itertools::Itertools;

use crate::adapter::{Matchable, SingleAdapter, SingleAdapterKind};
use crate::align::{edit_environment, hamming_environment};
use crate::error::{AdapterError, Result};
use crate::matches::{MatchResult, RemoveAfterMatch, RemoveBeforeMatch, SingleMatch};
use crate::multi::MultipleAdapters;

/// Which end of the read an indexed set is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Polarity {
  Prefix,
  Suffix,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
  adapter_index: usize,
  errors: usize,
  matches: usize,
}

/// `true` iff `adapter` may be a member of an indexed set of the given `polarity`: it must have
/// the expected polarity, no wildcards on either side, and `k = floor(len * max_error_rate) <= 2`.
#[must_use]
pub fn is_acceptable(adapter: &SingleAdapter, polarity: Polarity) -> bool {
  expected_kind(polarity) == adapter.kind()
    && !adapter.read_wildcards()
    && !adapter.adapter_wildcards()
    && neighborhood_radius(adapter) <= 2
}

fn expected_kind(polarity: Polarity) -> SingleAdapterKind {
  match polarity {
    Polarity::Prefix => SingleAdapterKind::Prefix,
    Polarity::Suffix => SingleAdapterKind::Suffix,
  }
}

#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn neighborhood_radius(adapter: &SingleAdapter) -> usize {
  (adapter.sequence().len() as f64 * adapter.max_error_rate()).floor() as usize
}

fn rejection_reason(adapter: &SingleAdapter, polarity: Polarity) -> String {
  let expected = expected_kind(polarity);
  if adapter.kind() != expected {
    return format!("expected a {expected} adapter, found {}", adapter.kind());
  }
  if adapter.read_wildcards() || adapter.adapter_wildcards() {
    return "indexed sets do not support read or adapter wildcards".to_owned();
  }
  format!(
    "k = floor(len * max_error_rate) = {} exceeds the indexed-set limit of 2",
    neighborhood_radius(adapter)
  )
}

/// Shared machinery behind [`IndexedPrefixAdapters`] and [`IndexedSuffixAdapters`].
struct IndexedAdapterSet {
  polarity: Polarity,
  adapters: Vec<SingleAdapter>,
  /// Distinct neighborhood-string lengths, sorted descending.
  lengths: Vec<usize>,
  table: HashMap<String, Entry>,
}

impl IndexedAdapterSet {
  fn new(polarity: Polarity, adapters: Vec<SingleAdapter>) -> Result<Self> {
    if adapters.is_empty() {
      return Err(AdapterError::EmptyAdapterList);
    }
    for adapter in &adapters {
      if !is_acceptable(adapter, polarity) {
        return Err(AdapterError::IndexRejection {
          name: adapter.name().to_owned(),
          reason: rejection_reason(adapter, polarity),
        });
      }
    }

    let mut table: HashMap<String, Entry> = HashMap::new();
    let mut lengths = std::collections::HashSet::new();
    let mut warned_ambiguous = false;

    for (adapter_index, adapter) in adapters.iter().enumerate() {
      let k = neighborhood_radius(adapter);
      let variants = if adapter.indels() {
        edit_environment(adapter.sequence(), k)
      } else {
        hamming_environment(adapter.sequence(), k)
      };

      for (variant, errors, matches) in variants {
        lengths.insert(variant.len());
        match table.get(&variant).copied() {
          None => {
            table.insert(variant, Entry { adapter_index, errors, matches });
          }
          Some(existing) if matches > existing.matches => {
            table.insert(variant, Entry { adapter_index, errors, matches });
          }
          Some(existing) if matches == existing.matches => {
            if !warned_ambiguous {
              log::warn!(
                "ambiguous index entry: '{}' and '{}' both produce the variant '{variant}' with {matches} matches; keeping '{}'",
                adapters[existing.adapter_index].name(),
                adapter.name(),
                adapters[existing.adapter_index].name(),
              );
              warned_ambiguous = true;
            }
          }
          Some(_) => {}
        }
      }
    }

    let lengths = lengths.into_iter().sorted_by(|a, b| b.cmp(a)).collect();

    Ok(Self { polarity, adapters, lengths, table })
  }

  fn fallback(&self) -> MultipleAdapters<'_> {
    MultipleAdapters::new(self.adapters.iter().map(|a| a as &dyn Matchable).collect())
  }

  fn affix(&self, read: &str, length: usize) -> Option<String> {
    if read.len() < length {
      return None;
    }
    let slice = match self.polarity {
      Polarity::Prefix => &read[..length],
      Polarity::Suffix => &read[read.len() - length..],
    };
    Some(slice.to_ascii_uppercase())
  }

  fn synthesize<'a>(&'a self, read: &'a str, length: usize, entry: Entry) -> MatchResult<'a> {
    let adapter = &self.adapters[entry.adapter_index];
    let astop = adapter.sequence().len();
    match self.polarity {
      Polarity::Prefix => MatchResult::Single(SingleMatch::Before(RemoveBeforeMatch {
        adapter,
        read,
        astart: 0,
        astop,
        rstart: 0,
        rstop: length,
        matches: entry.matches,
        errors: entry.errors,
      })),
      Polarity::Suffix => MatchResult::Single(SingleMatch::After(RemoveAfterMatch {
        adapter,
        read,
        astart: 0,
        astop,
        rstart: read.len() - length,
        rstop: read.len(),
        matches: entry.matches,
        errors: entry.errors,
      })),
    }
  }

  fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    if self.lengths.len() == 1 {
      self.match_single_length(read, self.lengths[0])
    } else {
      self.match_multi_length(read)
    }
  }

  fn match_single_length<'a>(&'a self, read: &'a str, length: usize) -> Option<MatchResult<'a>> {
    let affix = self.affix(read, length)?;
    if affix.contains('N') {
      return self.fallback().match_to(read);
    }
    let entry = *self.table.get(&affix)?;
    Some(self.synthesize(read, length, entry))
  }

  fn match_multi_length<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    let mut best: Option<(usize, Entry)> = None;
    let mut is_first_affix = true;

    for &length in &self.lengths {
      if let Some((_, best_entry)) = &best {
        if length < best_entry.matches {
          break;
        }
      }

      let Some(affix) = self.affix(read, length) else { continue };

      if affix.contains('N') {
        if is_first_affix {
          return self.fallback().match_to(read);
        }
        is_first_affix = false;
        continue;
      }
      is_first_affix = false;

      if let Some(entry) = self.table.get(&affix).copied() {
        let better = best.is_none_or(|(_, current)| {
          entry.matches > current.matches || (entry.matches == current.matches && entry.errors < current.errors)
        });
        if better {
          best = Some((length, entry));
        }
      }
    }

    best.map(|(length, entry)| self.synthesize(read, length, entry))
  }
}

/// An indexed set of `Prefix`-polarity adapters.
pub struct IndexedPrefixAdapters(IndexedAdapterSet);

impl IndexedPrefixAdapters {
  pub fn new(adapters: Vec<SingleAdapter>) -> Result<Self> {
    Ok(Self(IndexedAdapterSet::new(Polarity::Prefix, adapters)?))
  }

  #[must_use]
  pub fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    self.0.match_to(read)
  }
}

/// An indexed set of `Suffix`-polarity adapters.
pub struct IndexedSuffixAdapters(IndexedAdapterSet);

impl IndexedSuffixAdapters {
  pub fn new(adapters: Vec<SingleAdapter>) -> Result<Self> {
    Ok(Self(IndexedAdapterSet::new(Polarity::Suffix, adapters)?))
  }

  #[must_use]
  pub fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    self.0.match_to(read)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapter::SingleAdapterKind;
  use crate::config::SingleAdapterConfig;
  use pretty_assertions::assert_eq;

  fn prefix_adapter(sequence: &str, max_error_rate: f64, indels: bool) -> SingleAdapter {
    let config = SingleAdapterConfig {
      max_error_rate,
      indels,
      read_wildcards: false,
      ..SingleAdapterConfig::default()
    };
    SingleAdapter::new(SingleAdapterKind::Prefix, sequence, config, None).unwrap()
  }

  #[test]
  fn indexed_prefix_matches_like_unindexed() {
    let set = IndexedPrefixAdapters::new(vec![prefix_adapter("ACGT", 0.25, false)]).unwrap();
    let result = set.match_to("AXGTREST").unwrap();
    assert_eq!(result.matches(), 3);
    assert_eq!(result.errors(), 1);
    assert_eq!(result.trimmed(), "REST");
  }

  #[test]
  fn affix_containing_n_falls_back_to_unindexed_path() {
    let set = IndexedPrefixAdapters::new(vec![prefix_adapter("ACGT", 0.25, false)]).unwrap();
    let indexed = set.match_to("NCGTREST").unwrap();

    let fallback_adapter = prefix_adapter("ACGT", 0.25, false);
    let fallback = MultipleAdapters::new(vec![&fallback_adapter as &dyn Matchable]);
    let direct = fallback.match_to("NCGTREST").unwrap();

    assert_eq!(indexed.matches(), direct.matches());
    assert_eq!(indexed.errors(), direct.errors());
  }

  #[test]
  fn rejects_non_prefix_adapters() {
    let config = SingleAdapterConfig::default();
    let back = SingleAdapter::new(SingleAdapterKind::Back, "ACGT", config, None).unwrap();
    let err = IndexedPrefixAdapters::new(vec![back]).unwrap_err();
    assert!(matches!(err, AdapterError::IndexRejection { .. }));
  }

  #[test]
  fn rejects_empty_adapter_list() {
    let err = IndexedPrefixAdapters::new(Vec::<SingleAdapter>::new()).unwrap_err();
    assert_eq!(err, AdapterError::EmptyAdapterList);
  }

  #[test]
  fn rejects_wildcard_adapters() {
    let config = SingleAdapterConfig::default();
    let adapter = SingleAdapter::new(SingleAdapterKind::Prefix, "ACGN", config, None).unwrap();
    assert!(!is_acceptable(&adapter, Polarity::Prefix));
  }

  #[test]
  fn n_in_first_extracted_affix_falls_back_even_when_longer_lengths_are_skipped() {
    // The longest stored length (8) never yields an affix because the read is too short; the
    // first affix actually extracted is the one at length 4, and it contains an `N`. The fallback
    // must trigger there, not be skipped because it isn't the first stored length.
    let long = prefix_adapter("ACGTACGT", 0.25, false);
    let short = prefix_adapter("ACGT", 0.25, false);
    let set = IndexedPrefixAdapters::new(vec![long, short]).unwrap();

    let read = "NCGTRE";
    let indexed = set.match_to(read).unwrap();

    let fallback_long = prefix_adapter("ACGTACGT", 0.25, false);
    let fallback_short = prefix_adapter("ACGT", 0.25, false);
    let fallback = MultipleAdapters::new(vec![&fallback_long as &dyn Matchable, &fallback_short as &dyn Matchable]);
    let direct = fallback.match_to(read).unwrap();

    assert_eq!(indexed.matches(), direct.matches());
    assert_eq!(indexed.errors(), direct.errors());
  }

  #[test]
  fn ambiguous_variants_keep_the_earlier_adapter_and_warn_once() {
    let _ = env_logger::builder().is_test(true).try_init();
    let a = prefix_adapter("ACGT", 0.0, false);
    let b = prefix_adapter("ACGT", 0.0, false);
    let set = IndexedPrefixAdapters::new(vec![a, b]).unwrap();
    let result = set.match_to("ACGTREST").unwrap();
    assert_eq!(result.matches(), 4);
  }
}
