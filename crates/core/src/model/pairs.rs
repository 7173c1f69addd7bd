use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairError {
    #[error("matching board cannot be empty")]
    Empty,

    #[error("left column has {left} items but right column has {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("duplicate {side} item id {id}")]
    DuplicateItem { side: Side, id: ItemId },

    #[error("{side} item {id} has a blank label")]
    BlankLabel { side: Side, id: ItemId },

    #[error("correct match references unknown {side} item {id}")]
    UnknownItem { side: Side, id: ItemId },

    #[error("{side} item {id} appears in more than one correct match")]
    ReusedItem { side: Side, id: ItemId },

    #[error("{side} item {id} has no correct match")]
    Unmatched { side: Side, id: ItemId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayOrderError {
    #[error("display order is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },

    #[error("display order covers {found} items but the column has {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

//
// ─── PAIR TYPES ────────────────────────────────────────────────────────────────
//

/// Which column of a matching board an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub id: ItemId,
    pub label: String,
}

impl MatchItem {
    #[must_use]
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: ItemId,
    pub right: ItemId,
}

impl MatchPair {
    #[must_use]
    pub fn new(left: u64, right: u64) -> Self {
        Self {
            left: ItemId::new(left),
            right: ItemId::new(right),
        }
    }
}

//
// ─── PAIR BANK ─────────────────────────────────────────────────────────────────
//

/// Two columns of items plus the single correct one-to-one mapping between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairBank {
    left: Vec<MatchItem>,
    right: Vec<MatchItem>,
    correct: HashMap<ItemId, ItemId>,
}

impl PairBank {
    /// Validate a matching board.
    ///
    /// # Errors
    ///
    /// Returns `PairError` unless `correct` is a perfect matching between the
    /// `left` and `right` columns.
    pub fn new(
        left: Vec<MatchItem>,
        right: Vec<MatchItem>,
        correct: Vec<MatchPair>,
    ) -> Result<Self, PairError> {
        if left.is_empty() || right.is_empty() {
            return Err(PairError::Empty);
        }
        if left.len() != right.len() {
            return Err(PairError::SizeMismatch {
                left: left.len(),
                right: right.len(),
            });
        }
        let left_ids = column_ids(&left, Side::Left)?;
        let right_ids = column_ids(&right, Side::Right)?;

        let mut mapping = HashMap::with_capacity(correct.len());
        let mut used_right = HashSet::with_capacity(correct.len());
        for pair in &correct {
            if !left_ids.contains(&pair.left) {
                return Err(PairError::UnknownItem {
                    side: Side::Left,
                    id: pair.left,
                });
            }
            if !right_ids.contains(&pair.right) {
                return Err(PairError::UnknownItem {
                    side: Side::Right,
                    id: pair.right,
                });
            }
            if mapping.insert(pair.left, pair.right).is_some() {
                return Err(PairError::ReusedItem {
                    side: Side::Left,
                    id: pair.left,
                });
            }
            if !used_right.insert(pair.right) {
                return Err(PairError::ReusedItem {
                    side: Side::Right,
                    id: pair.right,
                });
            }
        }

        if let Some(item) = left.iter().find(|item| !mapping.contains_key(&item.id)) {
            return Err(PairError::Unmatched {
                side: Side::Left,
                id: item.id,
            });
        }
        if let Some(item) = right.iter().find(|item| !used_right.contains(&item.id)) {
            return Err(PairError::Unmatched {
                side: Side::Right,
                id: item.id,
            });
        }

        Ok(Self {
            left,
            right,
            correct: mapping,
        })
    }

    #[must_use]
    pub fn left(&self) -> &[MatchItem] {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &[MatchItem] {
        &self.right
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    #[must_use]
    pub fn contains(&self, side: Side, id: ItemId) -> bool {
        let column = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        column.iter().any(|item| item.id == id)
    }

    #[must_use]
    pub fn is_correct(&self, left: ItemId, right: ItemId) -> bool {
        self.correct.get(&left) == Some(&right)
    }

    #[must_use]
    pub fn partner_of(&self, left: ItemId) -> Option<ItemId> {
        self.correct.get(&left).copied()
    }
}

fn column_ids(items: &[MatchItem], side: Side) -> Result<HashSet<ItemId>, PairError> {
    let mut ids = HashSet::with_capacity(items.len());
    for item in items {
        if !ids.insert(item.id) {
            return Err(PairError::DuplicateItem { side, id: item.id });
        }
        if item.label.trim().is_empty() {
            return Err(PairError::BlankLabel { side, id: item.id });
        }
    }
    Ok(ids)
}

//
// ─── DISPLAY ORDER ─────────────────────────────────────────────────────────────
//

/// Presentation-only permutation of the right column.
///
/// `positions()[k]` is the canonical index of the item shown in slot `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOrder(Vec<usize>);

impl DisplayOrder {
    #[must_use]
    pub fn canonical(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// # Errors
    ///
    /// Returns `DisplayOrderError::NotAPermutation` if `positions` is not a
    /// permutation of `0..positions.len()`.
    pub fn from_permutation(positions: Vec<usize>) -> Result<Self, DisplayOrderError> {
        let len = positions.len();
        let mut seen = vec![false; len];
        for &pos in &positions {
            match seen.get_mut(pos) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(DisplayOrderError::NotAPermutation { len }),
            }
        }
        Ok(Self(positions))
    }

    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items of `column` in display order.
    pub fn apply<'a, T>(&'a self, column: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.0.iter().filter_map(move |&pos| column.get(pos))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
