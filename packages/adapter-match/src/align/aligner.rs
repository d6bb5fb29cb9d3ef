//! The semi-global alignment primitive: a dynamic-programming edit-distance table with four
//! independently free ends, shared by every adapter polarity and by the indexed neighborhood
//! generators in [`super::neighborhood`], so that the indexed fast path and the unindexed
//! fallback are guaranteed to agree (see `DESIGN.md`).

use std::cell::RefCell;

use super::flags::EndAnchoring;
use crate::iupac::bases_equal;

/// Cost of a single insertion or deletion when indels are forbidden: large enough that no
/// alignment respecting any realistic `max_error_rate` would ever choose one.
pub const FORBID_INDEL: usize = 1_000_000;

/// `(astart, astop, rstart, rstop, matches, errors)`.
pub type Located = (usize, usize, usize, usize, usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
  errors: usize,
  matches: usize,
}

impl Cell {
  const ZERO: Self = Self { errors: 0, matches: 0 };

  /// Tie-break order used throughout this module: fewer errors wins; among equal errors, more
  /// matches wins. This is the same order [`crate::multi::MultipleAdapters`] applies one level up,
  /// across whole adapters rather than DP cells.
  fn is_better_than(self, other: Self) -> bool {
    self.errors < other.errors || (self.errors == other.errors && self.matches > other.matches)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
  Root,
  Diag,
  Up,
  Left,
}

/// Parameters governing one adapter's alignment behaviour, compiled once at adapter construction
/// and reused across every read.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentParams {
  pub flags: EndAnchoring,
  pub max_error_rate: f64,
  pub wildcard_ref: bool,
  pub wildcard_query: bool,
  pub indels: bool,
  pub min_overlap: usize,
}

/// A reusable semi-global aligner bound to one adapter sequence.
///
/// Not `Sync`: the debug-matrix snapshot is held behind a [`RefCell`], so an `Aligner` is not safe
/// for concurrent use from multiple threads at once.
pub struct Aligner {
  reference: Vec<u8>,
  params: AlignmentParams,
  debug: RefCell<bool>,
  last_matrix: RefCell<Option<Vec<Vec<(usize, usize)>>>>,
}

impl Aligner {
  #[must_use]
  pub fn new(reference: &str, params: AlignmentParams) -> Self {
    Self {
      reference: reference.as_bytes().to_vec(),
      params,
      debug: RefCell::new(false),
      last_matrix: RefCell::new(None),
    }
  }

  /// Turns on retention of the last DP cell table, inspectable via [`Self::dp_matrix`].
  pub fn enable_debug(&self) {
    *self.debug.borrow_mut() = true;
  }

  /// The last computed `(errors, matches)` table, if debug mode was enabled before the call.
  #[must_use]
  pub fn dp_matrix(&self) -> Option<Vec<Vec<(usize, usize)>>> {
    self.last_matrix.borrow().clone()
  }

  /// Non-wildcard character count in the adapter sequence, or the full length when adapter
  /// wildcards are disabled. Used by statistics compatibility checks.
  #[must_use]
  pub fn effective_length(&self) -> usize {
    if self.params.wildcard_ref {
      self.reference.iter().filter(|&&b| matches!(b, b'A' | b'C' | b'G' | b'T')).count()
    } else {
      self.reference.len()
    }
  }

  /// Locates the best alignment of the bound adapter within `query`, subject to the configured
  /// end-anchoring flags, `min_overlap`, and `max_error_rate`. Returns `None` if no alignment
  /// satisfies the constraints.
  #[must_use]
  pub fn locate(&self, query: &str) -> Option<Located> {
    locate_in(&self.reference, query.as_bytes(), &self.params, Some(&self.debug), Some(&self.last_matrix))
  }
}

/// Shared DP core. Used directly by [`Aligner::locate`] and, anchored with empty flags, by the
/// neighborhood generators in [`super::neighborhood`]: the single place edit distance is computed.
pub(crate) fn locate_in(
  reference: &[u8],
  query: &[u8],
  params: &AlignmentParams,
  debug: Option<&RefCell<bool>>,
  last_matrix: Option<&RefCell<Option<Vec<Vec<(usize, usize)>>>>>,
) -> Option<Located> {
  let n = reference.len();
  let m = query.len();
  let indel_cost = if params.indels { 1 } else { FORBID_INDEL };

  let mut dp = vec![vec![Cell::ZERO; m + 1]; n + 1];
  let mut parent = vec![vec![Parent::Root; m + 1]; n + 1];

  let free_start1 = params.flags.contains(EndAnchoring::START_WITHIN_SEQ1);
  let free_start2 = params.flags.contains(EndAnchoring::START_WITHIN_SEQ2);

  for i in 1..=n {
    if free_start1 {
      dp[i][0] = Cell::ZERO;
      parent[i][0] = Parent::Root;
    } else {
      dp[i][0] = Cell { errors: dp[i - 1][0].errors + indel_cost, matches: dp[i - 1][0].matches };
      parent[i][0] = Parent::Up;
    }
  }
  for j in 1..=m {
    if free_start2 {
      dp[0][j] = Cell::ZERO;
      parent[0][j] = Parent::Root;
    } else {
      dp[0][j] = Cell { errors: dp[0][j - 1].errors + indel_cost, matches: dp[0][j - 1].matches };
      parent[0][j] = Parent::Left;
    }
  }

  for i in 1..=n {
    for j in 1..=m {
      let is_match = bases_equal(reference[i - 1], query[j - 1], params.wildcard_ref, params.wildcard_query);
      let diag = Cell {
        errors: dp[i - 1][j - 1].errors + usize::from(!is_match),
        matches: dp[i - 1][j - 1].matches + usize::from(is_match),
      };
      let up = Cell { errors: dp[i - 1][j].errors + indel_cost, matches: dp[i - 1][j].matches };
      let left = Cell { errors: dp[i][j - 1].errors + indel_cost, matches: dp[i][j - 1].matches };

      let (mut best, mut best_parent) = (diag, Parent::Diag);
      if up.is_better_than(best) {
        best = up;
        best_parent = Parent::Up;
      }
      if left.is_better_than(best) {
        best = left;
        best_parent = Parent::Left;
      }

      dp[i][j] = best;
      parent[i][j] = best_parent;
    }
  }

  if let (Some(debug), Some(last_matrix)) = (debug, last_matrix) {
    if *debug.borrow() {
      let snapshot = dp.iter().map(|row| row.iter().map(|c| (c.errors, c.matches)).collect()).collect();
      *last_matrix.borrow_mut() = Some(snapshot);
    }
  }

  let stop1_free = params.flags.contains(EndAnchoring::STOP_WITHIN_SEQ1);
  let stop2_free = params.flags.contains(EndAnchoring::STOP_WITHIN_SEQ2);

  let i_range: Vec<usize> = if stop1_free { (0..=n).collect() } else { vec![n] };
  let j_range: Vec<usize> = if stop2_free { (0..=m).collect() } else { vec![m] };

  let mut best_end: Option<(usize, usize, Cell)> = None;
  for &i in &i_range {
    for &j in &j_range {
      let cell = dp[i][j];
      let is_better = best_end.is_none_or(|(_, _, best_cell)| cell.is_better_than(best_cell));
      if is_better {
        best_end = Some((i, j, cell));
      }
    }
  }

  let (i_end, j_end, cell) = best_end?;

  let (mut i, mut j) = (i_end, j_end);
  while parent[i][j] != Parent::Root {
    match parent[i][j] {
      Parent::Root => unreachable!(),
      Parent::Diag => {
        i -= 1;
        j -= 1;
      }
      Parent::Up => i -= 1,
      Parent::Left => j -= 1,
    }
  }
  let (astart, rstart) = (i, j);
  let (astop, rstop) = (i_end, j_end);

  let aligned_len = astop - astart;
  if aligned_len == 0 || aligned_len < params.min_overlap {
    return None;
  }
  #[allow(clippy::cast_precision_loss)]
  let error_rate = cell.errors as f64 / aligned_len as f64;
  if error_rate > params.max_error_rate + f64::EPSILON {
    return None;
  }

  Some((astart, astop, rstart, rstop, cell.matches, cell.errors))
}

/// Fully-anchored alignment of `reference` against `candidate` (both ends forced), used by the
/// neighborhood generators to score enumerated variants with exactly the DP core `locate` uses.
pub(crate) fn align_anchored(
  reference: &[u8],
  candidate: &[u8],
  wildcard_ref: bool,
  wildcard_query: bool,
  indels: bool,
) -> Option<(usize, usize)> {
  let params = AlignmentParams {
    flags: EndAnchoring::empty(),
    max_error_rate: 1.0,
    wildcard_ref,
    wildcard_query,
    indels,
    min_overlap: reference.len().max(1),
  };
  locate_in(reference, candidate, &params, None, None).map(|(_, _, _, _, matches, errors)| (matches, errors))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  fn params(flags: EndAnchoring, max_error_rate: f64, min_overlap: usize) -> AlignmentParams {
    AlignmentParams { flags, max_error_rate, wildcard_ref: false, wildcard_query: false, indels: true, min_overlap }
  }

  #[rstest]
  fn back_adapter_scenario() {
    let aligner = Aligner::new("ADAPTER", params(EndAnchoring::BACK, 0.1, 3));
    let (astart, astop, rstart, rstop, matches, errors) = aligner.locate("AAAAADAPTER").unwrap();
    assert_eq!((astart, astop, rstart, rstop, matches, errors), (0, 7, 4, 11, 7, 0));
  }

  #[rstest]
  fn front_adapter_scenario() {
    let aligner = Aligner::new("ADAPTER", params(EndAnchoring::FRONT, 0.1, 3));
    let (astart, astop, rstart, rstop, matches, errors) = aligner.locate("ADAPTERTAIL").unwrap();
    assert_eq!((astart, astop, rstart, rstop, matches, errors), (0, 7, 0, 7, 7, 0));
  }

  #[rstest]
  fn prefix_requires_read_start_at_zero() {
    let aligner = Aligner::new("ACGT", params(EndAnchoring::PREFIX, 0.0, 4));
    assert!(aligner.locate("ACGTXXXX").is_some());
    assert!(aligner.locate("TACGTXXX").is_none());
  }

  #[rstest]
  fn anywhere_scans_whole_table() {
    let aligner = Aligner::new("FOO", params(EndAnchoring::ANYWHERE, 0.0, 3));
    let (_, _, rstart, _, _, _) = aligner.locate("FOOBAR").unwrap();
    assert_eq!(rstart, 0);
    let (_, _, rstart, _, _, _) = aligner.locate("BARFOO").unwrap();
    assert_eq!(rstart, 3);
  }

  #[rstest]
  fn indels_forbidden_rejects_shift() {
    let mut p = params(EndAnchoring::BACK, 0.5, 3);
    p.indels = false;
    let aligner = Aligner::new("AAAA", p);
    // one inserted base in the middle cannot be absorbed cheaply without indels
    let result = aligner.locate("AAXAA");
    assert!(result.is_none_or(|(_, _, _, _, _, errors)| errors >= 1));
  }
}
