//! Linked adapters: a front adapter followed by a back adapter, each independently required or
//! optional.

use crate::adapter::{Matchable, SingleAdapter, SingleAdapterKind};
use crate::error::Result;
use crate::matches::{LinkedMatch, MatchResult, RemoveAfterMatch, RemoveBeforeMatch, SingleMatch};

/// Sequential composition of a front and a back adapter.
///
/// `match_to` attempts the front adapter on the whole read first. If it matches, the back adapter
/// is tried on the residual read (from the front match's `rstop` onward); if the front adapter
/// does not match, the back adapter is tried on the original read unchanged. The combined match
/// is reported only if at least one component matched, and only if every *required* component
/// matched.
pub struct LinkedAdapter {
  front: SingleAdapter,
  back: SingleAdapter,
  front_required: bool,
  back_required: bool,
  name: String,
}

impl LinkedAdapter {
  /// `name` is propagated to the front adapter so that front-adapter statistics are keyed under
  /// the linked adapter's own name.
  pub fn new(
    front_sequence: &str,
    back_sequence: &str,
    front_config: crate::config::SingleAdapterConfig,
    back_config: crate::config::SingleAdapterConfig,
    front_required: bool,
    back_required: bool,
    name: Option<String>,
  ) -> Result<Self> {
    let name = name.unwrap_or_else(|| crate::name::global_name_generator().next_name());
    let front =
      SingleAdapter::new(SingleAdapterKind::Front, front_sequence, front_config, Some(name.clone()))?;
    let back = SingleAdapter::new(SingleAdapterKind::Back, back_sequence, back_config, None)?;
    Ok(Self { front, back, front_required, back_required, name })
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub fn front(&self) -> &SingleAdapter {
    &self.front
  }

  #[must_use]
  pub fn back(&self) -> &SingleAdapter {
    &self.back
  }

  pub fn enable_debug(&self) {
    self.front.enable_debug_matrix();
    self.back.enable_debug_matrix();
  }

  /// See the struct-level documentation for the control flow.
  #[must_use]
  pub fn match_to<'a>(&'a self, read: &'a str) -> Option<LinkedMatch<'a>> {
    let front_match: Option<RemoveBeforeMatch<'a>> = match self.front.match_to(read) {
      Some(SingleMatch::Before(m)) => Some(m),
      Some(SingleMatch::After(_)) => unreachable!("a Front-kind adapter only ever produces RemoveBeforeMatch"),
      None => None,
    };
    if front_match.is_none() && self.front_required {
      return None;
    }

    let residual = front_match.as_ref().map_or(read, RemoveBeforeMatch::trimmed);
    let back_match: Option<RemoveAfterMatch<'a>> = match self.back.match_to(residual) {
      Some(SingleMatch::After(m)) => Some(m),
      Some(SingleMatch::Before(_)) => unreachable!("a Back-kind adapter only ever produces RemoveAfterMatch"),
      None => None,
    };
    if back_match.is_none() && self.back_required {
      return None;
    }

    LinkedMatch::new(front_match, back_match)
  }
}

impl Matchable for LinkedAdapter {
  fn name(&self) -> &str {
    self.name()
  }

  fn enable_debug(&self) {
    LinkedAdapter::enable_debug(self);
  }

  fn match_to<'a>(&'a self, read: &'a str) -> Option<MatchResult<'a>> {
    LinkedAdapter::match_to(self, read).map(MatchResult::Linked)
  }
}
