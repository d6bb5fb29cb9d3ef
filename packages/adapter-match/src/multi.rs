//! The "best of many" selector over heterogeneous adapters.

use crate::adapter::Matchable;
use crate::matches::MatchResult;

/// Tries every adapter against a read and keeps the winner under `(matches desc, errors asc)`,
/// with ties broken in favour of whichever adapter was tried first.
pub struct MultipleAdapters<'a> {
  adapters: Vec<&'a dyn Matchable>,
}

impl<'a> MultipleAdapters<'a> {
  #[must_use]
  pub fn new(adapters: Vec<&'a dyn Matchable>) -> Self {
    Self { adapters }
  }

  #[must_use]
  pub fn adapters(&self) -> &[&'a dyn Matchable] {
    &self.adapters
  }

  /// Calls `match_to` on every adapter in order and returns the best candidate, or `None` if
  /// every adapter missed.
  #[must_use]
  pub fn match_to(&self, read: &'a str) -> Option<MatchResult<'a>> {
    let mut best: Option<MatchResult<'a>> = None;
    for adapter in &self.adapters {
      let Some(candidate) = adapter.match_to(read) else { continue };
      best = Some(match best {
        Some(current) if !is_strictly_better(&candidate, &current) => current,
        _ => candidate,
      });
    }
    best
  }
}

/// A candidate with strictly more matches always wins; among equal matches, fewer errors wins.
/// Anything else (including a full tie) leaves the incumbent in place.
fn is_strictly_better(candidate: &MatchResult<'_>, incumbent: &MatchResult<'_>) -> bool {
  candidate.matches() > incumbent.matches()
    || (candidate.matches() == incumbent.matches() && candidate.errors() < incumbent.errors())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapter::{SingleAdapter, SingleAdapterKind};
  use crate::config::SingleAdapterConfig;
  use pretty_assertions::assert_eq;

  fn adapter(sequence: &str, name: &str) -> SingleAdapter {
    let config = SingleAdapterConfig {
      max_error_rate: 0.3,
      min_overlap: 2,
      read_wildcards: false,
      ..SingleAdapterConfig::default()
    };
    SingleAdapter::new(SingleAdapterKind::Back, sequence, config, Some(name.to_owned())).unwrap()
  }

  #[test]
  fn picks_adapter_with_more_matches() {
    let short = adapter("AT", "short");
    let long = adapter("ATCG", "long");
    let multi = MultipleAdapters::new(vec![&short, &long]);
    let best = multi.match_to("XXXXATCG").unwrap();
    assert_eq!(best.matches(), 4);
  }

  #[test]
  fn ties_keep_the_earlier_adapter() {
    let first = adapter("ATCG", "first");
    let second = adapter("ATCG", "second");
    let multi = MultipleAdapters::new(vec![&first, &second]);
    let best = multi.match_to("XXXXATCG").unwrap();
    assert_eq!(best.matches(), 4);
    assert_eq!(best.errors(), 0);
  }

  #[test]
  fn absent_when_nothing_matches() {
    let only = adapter("ATCGATCG", "only");
    let multi = MultipleAdapters::new(vec![&only]);
    assert!(multi.match_to("XXXXXXXX").is_none());
  }
}
