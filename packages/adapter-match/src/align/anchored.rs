//! Direct anchored comparators used in place of the DP aligner when indels are forbidden.
//!
//! `PrefixComparer` and `SuffixComparer` compare the adapter against the read's leading or
//! trailing `len(adapter)` characters position-by-position, counting IUPAC-wildcard-aware
//! substitutions, with no dynamic programming involved. [`crate::adapter::SingleAdapter`] uses
//! these instead of [`super::aligner::Aligner`] for `Prefix`/`Suffix` adapters whenever
//! `indels = false`.

use super::aligner::Located;
use crate::iupac::bases_equal;

/// Matches the adapter against the read's first `len(sequence)` characters.
pub struct PrefixComparer {
  sequence: Vec<u8>,
  max_errors: usize,
  wildcard_ref: bool,
  wildcard_query: bool,
}

impl PrefixComparer {
  #[must_use]
  pub fn new(sequence: &str, max_error_rate: f64, wildcard_ref: bool, wildcard_query: bool) -> Self {
    let sequence = sequence.as_bytes().to_vec();
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let max_errors = (sequence.len() as f64 * max_error_rate).floor() as usize;
    Self { sequence, max_errors, wildcard_ref, wildcard_query }
  }

  /// Succeeds only when the read is at least as long as the adapter and the leading affix
  /// matches within `max_errors` substitutions.
  #[must_use]
  pub fn locate(&self, read: &str) -> Option<Located> {
    let read = read.as_bytes();
    let len = self.sequence.len();
    if read.len() < len {
      return None;
    }
    let (matches, errors) = count_substitutions(&self.sequence, &read[..len], self.wildcard_ref, self.wildcard_query);
    if errors > self.max_errors {
      return None;
    }
    Some((0, len, 0, len, matches, errors))
  }
}

/// Matches the adapter against the read's last `len(sequence)` characters.
pub struct SuffixComparer {
  sequence: Vec<u8>,
  max_errors: usize,
  wildcard_ref: bool,
  wildcard_query: bool,
}

impl SuffixComparer {
  #[must_use]
  pub fn new(sequence: &str, max_error_rate: f64, wildcard_ref: bool, wildcard_query: bool) -> Self {
    let sequence = sequence.as_bytes().to_vec();
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let max_errors = (sequence.len() as f64 * max_error_rate).floor() as usize;
    Self { sequence, max_errors, wildcard_ref, wildcard_query }
  }

  #[must_use]
  pub fn locate(&self, read: &str) -> Option<Located> {
    let read = read.as_bytes();
    let len = self.sequence.len();
    if read.len() < len {
      return None;
    }
    let rstart = read.len() - len;
    let (matches, errors) =
      count_substitutions(&self.sequence, &read[rstart..], self.wildcard_ref, self.wildcard_query);
    if errors > self.max_errors {
      return None;
    }
    Some((0, len, rstart, read.len(), matches, errors))
  }
}

fn count_substitutions(reference: &[u8], query: &[u8], wildcard_ref: bool, wildcard_query: bool) -> (usize, usize) {
  let mut matches = 0;
  let mut errors = 0;
  for (&r, &q) in reference.iter().zip(query.iter()) {
    if bases_equal(r, q, wildcard_ref, wildcard_query) {
      matches += 1;
    } else {
      errors += 1;
    }
  }
  (matches, errors)
}
