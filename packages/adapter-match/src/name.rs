//! Stable adapter naming: unnamed adapters receive monotonically increasing decimal integer
//! strings, assigned in construction order.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A counter that hands out strictly increasing integer names, starting at `1`.
///
/// An explicit value a caller can own (for deterministic naming across test runs) or reach through
/// [`global_name_generator`] for the common case of "just give every unnamed adapter a unique
/// name across the process".
pub struct AdapterNameGenerator(AtomicUsize);

impl AdapterNameGenerator {
  #[must_use]
  pub const fn new() -> Self {
    Self(AtomicUsize::new(0))
  }

  /// Returns the next name and advances the counter.
  pub fn next_name(&self) -> String {
    let id = self.0.fetch_add(1, Ordering::Relaxed) + 1;
    id.to_string()
  }
}

impl Default for AdapterNameGenerator {
  fn default() -> Self {
    Self::new()
  }
}

static GLOBAL: OnceLock<AdapterNameGenerator> = OnceLock::new();

/// The process-wide default name generator, lazily initialised on first use.
pub fn global_name_generator() -> &'static AdapterNameGenerator {
  GLOBAL.get_or_init(AdapterNameGenerator::new)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn names_increase_strictly() {
    let generator = AdapterNameGenerator::new();
    assert_eq!(generator.next_name(), "1");
    assert_eq!(generator.next_name(), "2");
    assert_eq!(generator.next_name(), "3");
  }
}
