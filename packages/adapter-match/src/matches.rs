//! Match records: typed results describing *where* an adapter sat in a read and *what* a trimmer
//! should discard.
//!
//! A match borrows the [`SingleAdapter`] it came from and the read it was found in, scoped to the
//! lifetime of the caller that produced it. A trimmer that needs a value to outlive that borrow
//! copies out the few fields it needs (name, sequence) rather than holding onto the `Match` itself.

use serde::{Deserialize, Serialize};

use crate::adapter::SingleAdapter;

/// A located alignment that removes the read *before and including* the matched span: the 5'
/// (front) trimming polarity.
#[derive(Debug, Clone, Copy)]
pub struct RemoveBeforeMatch<'a> {
  pub adapter: &'a SingleAdapter,
  pub read: &'a str,
  pub astart: usize,
  pub astop: usize,
  pub rstart: usize,
  pub rstop: usize,
  pub matches: usize,
  pub errors: usize,
}

impl<'a> RemoveBeforeMatch<'a> {
  /// The read with everything up to and including the match discarded.
  #[must_use]
  pub fn trimmed(&self) -> &'a str {
    &self.read[self.rstop..]
  }

  /// `[rstop, len(read))`, the span kept after trimming.
  #[must_use]
  pub fn remainder_interval(&self) -> (usize, usize) {
    (self.rstop, self.read.len())
  }

  /// `[rstart, len(read))`. Despite the name, this interval lives in *read* coordinates: the
  /// matched span together with everything after it, i.e. the remainder interval with the
  /// matched region re-included, rather than excluded.
  #[must_use]
  pub fn retained_adapter_interval(&self) -> (usize, usize) {
    (self.rstart, self.read.len())
  }

  /// Number of read bases discarded by this match: `rstop`.
  #[must_use]
  pub fn removed_sequence_length(&self) -> usize {
    self.rstop
  }

  fn info_record(&self, qualities: Option<&str>) -> InfoRecord {
    build_info_record(
      self.read,
      qualities,
      self.rstart,
      self.rstop,
      self.errors,
      self.adapter.name().to_owned(),
    )
  }
}

/// A located alignment that removes the read *from the start of the match onward*: the 3' (back)
/// trimming polarity.
#[derive(Debug, Clone, Copy)]
pub struct RemoveAfterMatch<'a> {
  pub adapter: &'a SingleAdapter,
  pub read: &'a str,
  pub astart: usize,
  pub astop: usize,
  pub rstart: usize,
  pub rstop: usize,
  pub matches: usize,
  pub errors: usize,
}

impl<'a> RemoveAfterMatch<'a> {
  /// The read with everything from the match onward discarded.
  #[must_use]
  pub fn trimmed(&self) -> &'a str {
    &self.read[..self.rstart]
  }

  /// `[0, rstart)`, the span kept after trimming.
  #[must_use]
  pub fn remainder_interval(&self) -> (usize, usize) {
    (0, self.rstart)
  }

  /// `[0, rstop)`: the remainder interval with the matched region re-included (see the note on
  /// [`RemoveBeforeMatch::retained_adapter_interval`]).
  #[must_use]
  pub fn retained_adapter_interval(&self) -> (usize, usize) {
    (0, self.rstop)
  }

  /// Number of read bases discarded by this match: `len(read) - rstart`.
  #[must_use]
  pub fn removed_sequence_length(&self) -> usize {
    self.read.len() - self.rstart
  }

  /// The single base immediately before the match, or `""` if the match starts at position 0.
  #[must_use]
  pub fn adjacent_base(&self) -> &'a str {
    if self.rstart == 0 { "" } else { &self.read[self.rstart - 1..self.rstart] }
  }

  fn info_record(&self, qualities: Option<&str>) -> InfoRecord {
    build_info_record(
      self.read,
      qualities,
      self.rstart,
      self.rstop,
      self.errors,
      self.adapter.name().to_owned(),
    )
  }
}

/// Either trimming polarity produced by a single (non-linked) adapter.
#[derive(Debug, Clone, Copy)]
pub enum SingleMatch<'a> {
  Before(RemoveBeforeMatch<'a>),
  After(RemoveAfterMatch<'a>),
}

impl<'a> SingleMatch<'a> {
  #[must_use]
  pub fn matches(&self) -> usize {
    match self {
      Self::Before(m) => m.matches,
      Self::After(m) => m.matches,
    }
  }

  #[must_use]
  pub fn errors(&self) -> usize {
    match self {
      Self::Before(m) => m.errors,
      Self::After(m) => m.errors,
    }
  }

  #[must_use]
  pub fn trimmed(&self) -> &'a str {
    match self {
      Self::Before(m) => m.trimmed(),
      Self::After(m) => m.trimmed(),
    }
  }

  #[must_use]
  pub fn remainder_interval(&self) -> (usize, usize) {
    match self {
      Self::Before(m) => m.remainder_interval(),
      Self::After(m) => m.remainder_interval(),
    }
  }

  #[must_use]
  pub fn retained_adapter_interval(&self) -> (usize, usize) {
    match self {
      Self::Before(m) => m.retained_adapter_interval(),
      Self::After(m) => m.retained_adapter_interval(),
    }
  }

  #[must_use]
  pub fn adapter(&self) -> &'a SingleAdapter {
    match self {
      Self::Before(m) => m.adapter,
      Self::After(m) => m.adapter,
    }
  }

  #[must_use]
  pub fn info_records(&self, qualities: Option<&str>) -> Vec<InfoRecord> {
    vec![match self {
      Self::Before(m) => m.info_record(qualities),
      Self::After(m) => m.info_record(qualities),
    }]
  }
}

/// The composition of an optional front match and an optional back match produced by a
/// [`crate::linked::LinkedAdapter`]. At least one component is always present, enforced by
/// [`LinkedMatch::new`].
#[derive(Debug, Clone, Copy)]
pub struct LinkedMatch<'a> {
  front: Option<RemoveBeforeMatch<'a>>,
  back: Option<RemoveAfterMatch<'a>>,
}

impl<'a> LinkedMatch<'a> {
  /// Returns `None` if both components are absent, the one precondition this type enforces.
  #[must_use]
  pub fn new(front: Option<RemoveBeforeMatch<'a>>, back: Option<RemoveAfterMatch<'a>>) -> Option<Self> {
    if front.is_none() && back.is_none() {
      return None;
    }
    Some(Self { front, back })
  }

  #[must_use]
  pub fn front(&self) -> Option<&RemoveBeforeMatch<'a>> {
    self.front.as_ref()
  }

  #[must_use]
  pub fn back(&self) -> Option<&RemoveAfterMatch<'a>> {
    self.back.as_ref()
  }

  #[must_use]
  pub fn matches(&self) -> usize {
    self.front.map_or(0, |m| m.matches) + self.back.map_or(0, |m| m.matches)
  }

  #[must_use]
  pub fn errors(&self) -> usize {
    self.front.map_or(0, |m| m.errors) + self.back.map_or(0, |m| m.errors)
  }

  /// Applies the front match then the back match to the residual, in that order.
  #[must_use]
  pub fn trimmed(&self) -> &'a str {
    match (&self.front, &self.back) {
      (Some(_), Some(back)) => back.trimmed(),
      (Some(front), None) => front.trimmed(),
      (None, Some(back)) => back.trimmed(),
      (None, None) => unreachable!("LinkedMatch::new enforces at least one component"),
    }
  }

  #[must_use]
  pub fn remainder_interval(&self) -> (usize, usize) {
    match (&self.front, &self.back) {
      (_, Some(back)) => back.remainder_interval(),
      (Some(front), None) => front.remainder_interval(),
      (None, None) => unreachable!("LinkedMatch::new enforces at least one component"),
    }
  }

  /// When `back` is absent the upper bound is `len(front_match.sequence)`, the *full read*, not
  /// the front match's own `retained_adapter_interval`.
  #[must_use]
  pub fn retained_adapter_interval(&self) -> (usize, usize) {
    let start = match &self.front {
      Some(front) => front.retained_adapter_interval().0,
      None => self.back.map_or(0, |back| back.retained_adapter_interval().0),
    };
    let stop = match &self.back {
      Some(back) => back.retained_adapter_interval().1,
      None => self.front.expect("LinkedMatch::new enforces at least one component").read.len(),
    };
    (start, stop)
  }

  /// Walks the read through each present sub-match in order, updating the read between steps, and
  /// suffixes the adapter name with `;1` (front) / `;2` (back).
  #[must_use]
  pub fn info_records(&self, qualities: Option<&str>) -> Vec<InfoRecord> {
    let mut records = Vec::with_capacity(2);
    let mut quality_offset = 0usize;

    if let Some(front) = &self.front {
      let front_qualities = qualities.map(|q| &q[quality_offset..quality_offset + front.read.len()]);
      let mut record = front.info_record(front_qualities);
      record.adapter_name = format!("{};1", record.adapter_name);
      records.push(record);
      quality_offset += front.rstop;
    }

    if let Some(back) = &self.back {
      let back_qualities = qualities.map(|q| &q[quality_offset..quality_offset + back.read.len()]);
      let mut record = back.info_record(back_qualities);
      record.adapter_name = format!("{};2", record.adapter_name);
      records.push(record);
    }

    records
  }
}

/// One row of the fixed 11-field reporting format. The leading blank field carries no information
/// and is only materialised by [`InfoRecord::to_fields`], not stored as a struct field.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct InfoRecord {
  pub errors: usize,
  pub rstart: usize,
  pub rstop: usize,
  pub read_before: String,
  pub read_match: String,
  pub read_after: String,
  pub adapter_name: String,
  pub qual_before: String,
  pub qual_match: String,
  pub qual_after: String,
}

impl InfoRecord {
  /// The 11 fixed-order report fields, including the leading blank field.
  #[must_use]
  pub fn to_fields(&self) -> [String; 11] {
    [
      String::new(),
      self.errors.to_string(),
      self.rstart.to_string(),
      self.rstop.to_string(),
      self.read_before.clone(),
      self.read_match.clone(),
      self.read_after.clone(),
      self.adapter_name.clone(),
      self.qual_before.clone(),
      self.qual_match.clone(),
      self.qual_after.clone(),
    ]
  }
}

fn build_info_record(
  read: &str,
  qualities: Option<&str>,
  rstart: usize,
  rstop: usize,
  errors: usize,
  adapter_name: String,
) -> InfoRecord {
  let (qual_before, qual_match, qual_after) = match qualities {
    Some(q) => (q[..rstart].to_owned(), q[rstart..rstop].to_owned(), q[rstop..].to_owned()),
    None => (String::new(), String::new(), String::new()),
  };
  InfoRecord {
    errors,
    rstart,
    rstop,
    read_before: read[..rstart].to_owned(),
    read_match: read[rstart..rstop].to_owned(),
    read_after: read[rstop..].to_owned(),
    adapter_name,
    qual_before,
    qual_match,
    qual_after,
  }
}

/// Either a single-adapter match or a linked match, returned uniformly by
/// [`crate::adapter::Matchable::match_to`] so that [`crate::multi::MultipleAdapters`] can compare
/// heterogeneous adapters.
#[derive(Debug, Clone, Copy)]
pub enum MatchResult<'a> {
  Single(SingleMatch<'a>),
  Linked(LinkedMatch<'a>),
}

impl<'a> MatchResult<'a> {
  #[must_use]
  pub fn matches(&self) -> usize {
    match self {
      Self::Single(m) => m.matches(),
      Self::Linked(m) => m.matches(),
    }
  }

  #[must_use]
  pub fn errors(&self) -> usize {
    match self {
      Self::Single(m) => m.errors(),
      Self::Linked(m) => m.errors(),
    }
  }

  #[must_use]
  pub fn trimmed(&self) -> &'a str {
    match self {
      Self::Single(m) => m.trimmed(),
      Self::Linked(m) => m.trimmed(),
    }
  }

  #[must_use]
  pub fn remainder_interval(&self) -> (usize, usize) {
    match self {
      Self::Single(m) => m.remainder_interval(),
      Self::Linked(m) => m.remainder_interval(),
    }
  }

  #[must_use]
  pub fn retained_adapter_interval(&self) -> (usize, usize) {
    match self {
      Self::Single(m) => m.retained_adapter_interval(),
      Self::Linked(m) => m.retained_adapter_interval(),
    }
  }

  #[must_use]
  pub fn info_records(&self, qualities: Option<&str>) -> Vec<InfoRecord> {
    match self {
      Self::Single(m) => m.info_records(qualities),
      Self::Linked(m) => m.info_records(qualities),
    }
  }

  /// Human-readable variant name, used in [`crate::error::AdapterError::MismatchedMatchKind`].
  pub(crate) fn kind_name(&self) -> &'static str {
    match self {
      Self::Single(SingleMatch::Before(_)) => "RemoveBeforeMatch",
      Self::Single(SingleMatch::After(_)) => "RemoveAfterMatch",
      Self::Linked(_) => "LinkedMatch",
    }
  }
}
