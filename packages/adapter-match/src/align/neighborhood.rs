//! Edit- and Hamming-neighborhood enumeration for the indexed fast path ([`crate::indexed`]).
//!
//! Every enumerated variant is scored by [`super::aligner::align_anchored`], the same fully
//! anchored instance of the DP core that the fallback aligner's cells are built from, so that an
//! indexed set's build-time `(errors, matches)` agrees with what `Aligner::locate` would have
//! reported for that exact variant. This is what makes the indexed fast path agree with the
//! unindexed fallback by construction rather than by two independently-written distance routines
//! staying in sync.

use std::collections::HashSet;

use super::aligner::align_anchored;

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Every string within `k` substitutions of `seq`, each tagged with `(errors, matches)` as scored
/// by the anchored DP core (`indels = false`).
#[must_use]
pub fn hamming_environment(seq: &str, k: usize) -> Vec<(String, usize, usize)> {
  let reference = seq.as_bytes();
  let mut variants: HashSet<Vec<u8>> = HashSet::new();
  variants.insert(reference.to_vec());
  substitution_subsets(reference, k, &mut variants);
  score_variants(reference, variants, false)
}

/// Every string within `k` edits (substitutions, insertions, or deletions) of `seq`, tagged with
/// `(errors, matches)` as scored by the anchored DP core (`indels = true`).
#[must_use]
pub fn edit_environment(seq: &str, k: usize) -> Vec<(String, usize, usize)> {
  let reference = seq.as_bytes().to_vec();
  let mut visited: HashSet<Vec<u8>> = HashSet::new();
  visited.insert(reference.clone());
  let mut frontier: HashSet<Vec<u8>> = HashSet::new();
  frontier.insert(reference.clone());

  for _ in 0..k {
    let mut next = HashSet::new();
    for variant in &frontier {
      for edited in one_edit_away(variant) {
        if visited.insert(edited.clone()) {
          next.insert(edited);
        }
      }
    }
    frontier = next;
  }

  score_variants(&reference, visited, true)
}

/// Substitutes every subset of up to `k` positions (each to a different base), writing results
/// into `out`. Positions are visited in increasing order so that no subset of positions is
/// enumerated twice.
fn substitution_subsets(reference: &[u8], k: usize, out: &mut HashSet<Vec<u8>>) {
  fn recurse(current: &mut Vec<u8>, start: usize, remaining: usize, out: &mut HashSet<Vec<u8>>) {
    if remaining == 0 {
      return;
    }
    for pos in start..current.len() {
      let original = current[pos];
      for &base in &BASES {
        if base == original {
          continue;
        }
        current[pos] = base;
        out.insert(current.clone());
        recurse(current, pos + 1, remaining - 1, out);
      }
      current[pos] = original;
    }
  }

  let mut current = reference.to_vec();
  recurse(&mut current, 0, k, out);
}

/// Every string reachable from `seq` by exactly one substitution, insertion, or deletion.
fn one_edit_away(seq: &[u8]) -> Vec<Vec<u8>> {
  let mut out = Vec::new();

  for i in 0..seq.len() {
    for &base in &BASES {
      if base != seq[i] {
        let mut variant = seq.to_vec();
        variant[i] = base;
        out.push(variant);
      }
    }
  }

  for i in 0..seq.len() {
    let mut variant = seq.to_vec();
    variant.remove(i);
    out.push(variant);
  }

  for i in 0..=seq.len() {
    for &base in &BASES {
      let mut variant = seq.to_vec();
      variant.insert(i, base);
      out.push(variant);
    }
  }

  out
}

fn score_variants(reference: &[u8], variants: HashSet<Vec<u8>>, indels: bool) -> Vec<(String, usize, usize)> {
  variants
    .into_iter()
    .filter_map(|variant| {
      let (matches, errors) = align_anchored(reference, &variant, false, false, indels)?;
      let variant = String::from_utf8(variant).ok()?;
      Some((variant, errors, matches))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::collections::HashMap;

  fn as_map(entries: Vec<(String, usize, usize)>) -> HashMap<String, (usize, usize)> {
    entries.into_iter().map(|(v, e, m)| (v, (e, m))).collect()
  }

  #[test]
  fn hamming_environment_includes_self_with_zero_errors() {
    let env = as_map(hamming_environment("ACGT", 1));
    assert_eq!(env["ACGT"], (0, 4));
  }

  #[test]
  fn hamming_environment_k1_covers_every_single_substitution() {
    let env = as_map(hamming_environment("AC", 1));
    // 2 positions * 3 alternative bases = 6 single-substitution variants, plus the original.
    assert_eq!(env.len(), 7);
    assert_eq!(env["GC"], (1, 1));
    assert_eq!(env["AG"], (1, 1));
  }

  #[test]
  fn hamming_environment_never_reports_indels() {
    for (variant, errors, _matches) in hamming_environment("ACGT", 2) {
      assert_eq!(variant.len(), 4, "hamming neighborhood must preserve length");
      assert!(errors <= 2);
    }
  }

  #[test]
  fn edit_environment_includes_deletions_and_insertions() {
    let env = as_map(edit_environment("AC", 1));
    assert_eq!(env["A"], (1, 1));
    assert_eq!(env["C"], (1, 1));
    assert!(env.contains_key("AAC") || env.contains_key("ACA") || env.contains_key("AGC"));
  }

  #[test]
  fn edit_environment_bounds_errors_by_k() {
    for (_, errors, _) in edit_environment("ACGTACGT", 2) {
      assert!(errors <= 2);
    }
  }
}
