//! # Element History
//!
//! A cursor over a parsed element sequence that remembers what it has handed
//! out, plus a small query language for looking backwards:
//!
//! ```rust
//! use songtext::history::{is, SongElementHistory};
//! use songtext::{SongElement, SongElementKind::*};
//!
//! let elements = vec![
//!     SongElement::new(Chords, "G   C"),
//!     SongElement::new_line(),
//!     SongElement::new(Lyrics, "la la"),
//! ];
//! let mut history = SongElementHistory::new(&elements);
//! while let Some(element) = history.advance() {
//!     if element.is(Lyrics) {
//!         let result = history.query().without(&[NewLine]).last_seen(&[is(Chords)]).end();
//!         assert!(result.is_matched());
//!         assert_eq!(result.matched_elements()[0].text(), "G   C");
//!     }
//! }
//! ```
//!
//! ## Matching
//! The scan point is the element before the current one (`query`) or the
//! current one itself (`query_including_current`). Reading backwards from
//! there and skipping every kind passed to `without`, the nearest element
//! must satisfy the last matcher of a `last_seen` list, the one before it the
//! second-to-last matcher, and so on. Each `last_seen` call adds an
//! alternative; the first alternative that matches wins.

use crate::element::{SongElement, SongElementKind};

/// Tests a single element by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    Is(SongElementKind),
    IsNot(SongElementKind),
    IsOneOf(Vec<SongElementKind>),
}

impl Matcher {
    pub fn matches(&self, element: &SongElement) -> bool {
        match self {
            Matcher::Is(kind) => element.kind() == *kind,
            Matcher::IsNot(kind) => element.kind() != *kind,
            Matcher::IsOneOf(kinds) => kinds.contains(&element.kind()),
        }
    }
}

/// Matches elements of exactly this kind.
pub fn is(kind: SongElementKind) -> Matcher {
    Matcher::Is(kind)
}

/// Matches elements of any other kind.
pub fn is_not(kind: SongElementKind) -> Matcher {
    Matcher::IsNot(kind)
}

/// Matches elements of any of the given kinds. An empty list matches nothing.
pub fn is_one_of(kinds: &[SongElementKind]) -> Matcher {
    Matcher::IsOneOf(kinds.to_vec())
}

/// Cursor over an element sequence. Not meant to be shared between threads;
/// create one per render pass.
#[derive(Debug, Clone)]
pub struct SongElementHistory<'a> {
    elements: &'a [SongElement],
    handed_out: usize,
}

impl<'a> SongElementHistory<'a> {
    pub fn new(elements: &'a [SongElement]) -> Self {
        Self {
            elements,
            handed_out: 0,
        }
    }

    /// Hand out the next element. Returns `None` once the sequence is
    /// exhausted, and keeps doing so.
    pub fn advance(&mut self) -> Option<&'a SongElement> {
        let next = self.elements.get(self.handed_out)?;
        self.handed_out += 1;
        Some(next)
    }

    /// Number of elements handed out so far.
    pub fn position(&self) -> usize {
        self.handed_out
    }

    pub fn is_exhausted(&self) -> bool {
        self.handed_out >= self.elements.len()
    }

    /// The element handed out `steps` calls ago; `back(0)` is the current one.
    pub fn back(&self, steps: usize) -> Option<&'a SongElement> {
        let index = self.handed_out.checked_sub(steps + 1)?;
        self.elements.get(index)
    }

    pub fn current(&self) -> Option<&'a SongElement> {
        self.back(0)
    }

    pub fn previous(&self) -> Option<&'a SongElement> {
        self.back(1)
    }

    /// Query the elements handed out before the current one.
    pub fn query(&self) -> Query<'a> {
        let seen = &self.elements[..self.handed_out];
        Query::new(seen.split_last().map(|(_, before)| before))
    }

    /// Query the elements handed out so far, the current one included.
    pub fn query_including_current(&self) -> Query<'a> {
        let seen = &self.elements[..self.handed_out];
        Query::new((!seen.is_empty()).then_some(seen))
    }
}

/// A lookback query under construction. See the module documentation.
#[derive(Debug, Clone)]
#[must_use = "a query does nothing until `end` is called"]
pub struct Query<'a> {
    /// `None` before anything has been handed out: nothing can match.
    history: Option<&'a [SongElement]>,
    without: Vec<SongElementKind>,
    alternatives: Vec<Vec<Matcher>>,
}

impl<'a> Query<'a> {
    fn new(history: Option<&'a [SongElement]>) -> Self {
        Self {
            history,
            without: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Ignore these kinds completely. Aggregates over repeated calls.
    pub fn without(mut self, kinds: &[SongElementKind]) -> Self {
        for kind in kinds {
            if !self.without.contains(kind) {
                self.without.push(*kind);
            }
        }
        self
    }

    /// Add an alternative: these matchers, oldest first, must describe the
    /// most recent (filtered) elements.
    pub fn last_seen(mut self, matchers: &[Matcher]) -> Self {
        self.alternatives.push(matchers.to_vec());
        self
    }

    /// Run the query.
    pub fn end(&self) -> QueryResult<'a> {
        let Some(history) = self.history else {
            return QueryResult::no_match();
        };
        self.alternatives
            .iter()
            .find_map(|matchers| self.match_alternative(history, matchers))
            .map(QueryResult::matched)
            .unwrap_or_else(QueryResult::no_match)
    }

    fn match_alternative(
        &self,
        history: &'a [SongElement],
        matchers: &[Matcher],
    ) -> Option<Vec<&'a SongElement>> {
        let mut candidates = history
            .iter()
            .rev()
            .filter(|element| !self.without.contains(&element.kind()));

        let mut matched = Vec::with_capacity(matchers.len());
        for matcher in matchers.iter().rev() {
            let element = candidates.next()?;
            if !matcher.matches(element) {
                return None;
            }
            matched.push(element);
        }
        matched.reverse();
        Some(matched)
    }
}

/// Outcome of [`Query::end`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'a> {
    matched: Option<Vec<&'a SongElement>>,
}

impl<'a> QueryResult<'a> {
    fn no_match() -> Self {
        Self { matched: None }
    }

    fn matched(elements: Vec<&'a SongElement>) -> Self {
        Self {
            matched: Some(elements),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }

    /// The matched elements, oldest first. Empty if nothing matched.
    pub fn matched_elements(&self) -> &[&'a SongElement] {
        self.matched.as_deref().unwrap_or(&[])
    }

    /// The oldest matched element.
    pub fn first(&self) -> Option<&'a SongElement> {
        self.matched_elements().first().copied()
    }
}
