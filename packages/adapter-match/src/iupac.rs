//! IUPAC nucleotide alphabet handling: sequence normalisation, validation, and
//! wildcard-aware equality used throughout alignment and the indexed neighborhood builders.

use crate::error::{AdapterError, Result};

/// Every character accepted in a normalised sequence: `ACGT` plus the IUPAC wildcard codes.
const IUPAC_ALPHABET: &str = "ABCDGHKMNRSTUVWXY";

/// Uppercases a raw adapter sequence and rewrites `U` to `T`, then validates every character
/// against the IUPAC alphabet.
pub fn normalize_sequence(raw: &str) -> Result<String> {
  if raw.is_empty() {
    return Err(AdapterError::EmptySequence);
  }

  let normalized: String = raw
    .chars()
    .map(|c| if c == 'u' || c == 'U' { 'T' } else { c.to_ascii_uppercase() })
    .collect();

  for (position, character) in normalized.chars().enumerate() {
    if !IUPAC_ALPHABET.contains(character) {
      let hint = if character == 'I' {
        " (did you mean 'N'? 'I' (inosine) is not supported as a wildcard)".to_owned()
      } else {
        String::new()
      };
      return Err(AdapterError::InvalidCharacter { character, position, hint });
    }
  }

  Ok(normalized)
}

/// True if every character in `sequence` is one of the four unambiguous nucleotides.
pub fn is_pure_acgt(sequence: &str) -> bool {
  sequence.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

/// True if `c` is a wildcard character that may stand for any nucleotide (used when the
/// relevant wildcard flag, adapter-side or read-side, is enabled).
#[inline]
fn is_wildcard(c: u8) -> bool {
  c != b'A' && c != b'C' && c != b'G' && c != b'T'
}

/// Compares one adapter-sequence byte to one read-sequence byte under the given wildcard policy.
/// `N`/IUPAC ambiguity codes match anything on the side(s) where wildcards are enabled.
#[inline]
#[must_use]
pub fn bases_equal(reference: u8, query: u8, wildcard_ref: bool, wildcard_query: bool) -> bool {
  if reference == query {
    return true;
  }
  (wildcard_ref && is_wildcard(reference)) || (wildcard_query && is_wildcard(query))
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  #[case::lowercase("acgt", "ACGT")]
  #[case::uracil("ACGU", "ACGT")]
  #[case::wildcard("acgtn", "ACGTN")]
  fn normalizes(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_sequence(input).unwrap(), expected);
  }

  #[test]
  fn rejects_empty() {
    assert_eq!(normalize_sequence(""), Err(AdapterError::EmptySequence));
  }

  #[test]
  fn rejects_invalid_character() {
    let err = normalize_sequence("ACGTZ").unwrap_err();
    assert!(matches!(err, AdapterError::InvalidCharacter { character: 'Z', position: 4, .. }));
  }

  #[test]
  fn hints_on_inosine() {
    let err = normalize_sequence("ACIGT").unwrap_err();
    let AdapterError::InvalidCharacter { hint, .. } = err else { panic!("wrong error variant") };
    assert!(hint.contains('N'));
  }

  #[test]
  fn pure_acgt_detection() {
    assert!(is_pure_acgt("ACGTACGT"));
    assert!(!is_pure_acgt("ACGTN"));
  }

  #[rstest]
  #[case::exact(b'A', b'A', false, false, true)]
  #[case::mismatch(b'A', b'C', false, false, false)]
  #[case::adapter_wildcard(b'N', b'C', true, false, true)]
  #[case::read_wildcard(b'A', b'N', false, true, true)]
  #[case::wildcard_disabled(b'N', b'C', false, false, false)]
  fn wildcard_equality(
    #[case] reference: u8,
    #[case] query: u8,
    #[case] wildcard_ref: bool,
    #[case] wildcard_query: bool,
    #[case] expected: bool,
  ) {
    assert_eq!(bases_equal(reference, query, wildcard_ref, wildcard_query), expected);
  }
}
