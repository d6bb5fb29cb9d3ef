//! End-anchoring flags: which ends of the adapter (`seq1`) and the read (`seq2`) may remain
//! unaligned without penalty. The seven canonical combinations below parametrise the aligner
//! for every adapter polarity; see [`crate::adapter::SingleAdapterKind`].

bitflags::bitflags! {
  /// A bit set over the four independently-toggleable free ends of a semi-global alignment.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct EndAnchoring: u8 {
    /// The adapter's leading characters may be skipped without penalty.
    const START_WITHIN_SEQ1 = 0b0001;
    /// The adapter's trailing characters may be skipped without penalty.
    const STOP_WITHIN_SEQ1  = 0b0010;
    /// The read's leading characters may be skipped without penalty.
    const START_WITHIN_SEQ2 = 0b0100;
    /// The read's trailing characters may be skipped without penalty.
    const STOP_WITHIN_SEQ2  = 0b1000;
  }
}

impl EndAnchoring {
  /// 3' adapter: may start anywhere in the read; both the adapter tail and the read tail may dangle.
  pub const BACK: Self = Self::START_WITHIN_SEQ2.union(Self::STOP_WITHIN_SEQ2).union(Self::STOP_WITHIN_SEQ1);

  /// 5' adapter: mirror image of [`Self::BACK`].
  pub const FRONT: Self = Self::START_WITHIN_SEQ2.union(Self::STOP_WITHIN_SEQ2).union(Self::START_WITHIN_SEQ1);

  /// Adapter must start at read position zero; the read tail may dangle.
  pub const PREFIX: Self = Self::STOP_WITHIN_SEQ2;

  /// Adapter must end at the read's last position; the read head may dangle.
  pub const SUFFIX: Self = Self::START_WITHIN_SEQ2;

  /// Like [`Self::FRONT`] but never fully internal: the read must start at position zero.
  pub const FRONT_NOT_INTERNAL: Self = Self::START_WITHIN_SEQ1.union(Self::STOP_WITHIN_SEQ2);

  /// Like [`Self::BACK`] but never fully internal: the read must end at its last position.
  pub const BACK_NOT_INTERNAL: Self = Self::START_WITHIN_SEQ2.union(Self::STOP_WITHIN_SEQ1);

  /// Fully semiglobal: every end may dangle.
  pub const ANYWHERE: Self = Self::all();
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn back_excludes_start_within_seq1() {
    assert!(!EndAnchoring::BACK.contains(EndAnchoring::START_WITHIN_SEQ1));
    assert!(EndAnchoring::BACK.contains(EndAnchoring::STOP_WITHIN_SEQ1));
  }

  #[test]
  fn front_excludes_stop_within_seq1() {
    assert!(EndAnchoring::FRONT.contains(EndAnchoring::START_WITHIN_SEQ1));
    assert!(!EndAnchoring::FRONT.contains(EndAnchoring::STOP_WITHIN_SEQ1));
  }

  #[test]
  fn anywhere_is_all_flags() {
    assert_eq!(EndAnchoring::ANYWHERE, EndAnchoring::all());
  }

  #[test]
  fn prefix_forces_read_start_at_zero() {
    assert!(!EndAnchoring::PREFIX.contains(EndAnchoring::START_WITHIN_SEQ2));
    assert!(EndAnchoring::PREFIX.contains(EndAnchoring::STOP_WITHIN_SEQ2));
  }

  #[test]
  fn suffix_forces_read_end_at_last_position() {
    assert!(EndAnchoring::SUFFIX.contains(EndAnchoring::START_WITHIN_SEQ2));
    assert!(!EndAnchoring::SUFFIX.contains(EndAnchoring::STOP_WITHIN_SEQ2));
  }
}
