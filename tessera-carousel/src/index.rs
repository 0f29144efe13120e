//! Section/item addressing with wraparound.
//!
//! ## Usage
//!
//! Resolve the page before or after a given item so that the carousel can
//! scroll forever in both directions.
use std::fmt;

use smallvec::SmallVec;

/// Address of one item in a sectioned data set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemPosition {
    /// Section index.
    pub section: usize,
    /// Item index inside the section.
    pub item: usize,
}

impl ItemPosition {
    /// Creates a new item position.
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for ItemPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

/// Relative step through the data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the previous item, wrapping to the last item of the last
    /// section.
    Prev,
    /// Toward the next item, wrapping to the first item of the first section.
    Next,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }
}

/// Item counts for every section, as reported by the data source.
///
/// # Examples
///
/// ```
/// use tessera_carousel::index::{Direction, ItemCounts, ItemPosition};
///
/// let counts = ItemCounts::new([2, 3]);
/// let last = ItemPosition::new(1, 2);
/// assert_eq!(counts.neighbor(last, Direction::Next), ItemPosition::new(0, 0));
/// assert_eq!(
///     counts.neighbor(ItemPosition::new(0, 0), Direction::Prev),
///     last
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCounts {
    sections: SmallVec<[usize; 4]>,
    total: usize,
}

impl ItemCounts {
    /// Builds a counts table from per-section item counts.
    pub fn new(sections: impl IntoIterator<Item = usize>) -> Self {
        let sections: SmallVec<[usize; 4]> = sections.into_iter().collect();
        let total = sections.iter().sum();
        Self { sections, total }
    }

    /// Number of sections, including empty ones.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of items in `section`, zero when the section does not exist.
    pub fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    /// Number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.total
    }

    /// Whether `position` addresses an existing item.
    pub fn contains(&self, position: ItemPosition) -> bool {
        position.item < self.item_count(position.section)
    }

    /// The first item of the first non-empty section.
    pub fn first_position(&self) -> Option<ItemPosition> {
        self.sections
            .iter()
            .position(|&count| count > 0)
            .map(|section| ItemPosition::new(section, 0))
    }

    /// Whether there is enough content to page through.
    ///
    /// A single section needs at least one item (which then pages onto
    /// itself); more sections need at least two items in total.
    pub fn is_pageable(&self) -> bool {
        match self.sections.len() {
            0 => false,
            1 => self.total >= 1,
            _ => self.total >= 2,
        }
    }

    /// Returns the item one step away from `of` in `direction`, wrapping
    /// across section boundaries and around the ends of the data set.
    ///
    /// Empty sections are skipped. With a single item in total the result is
    /// `of` itself. `of` must address an existing item; with no items at all
    /// `of` is returned unchanged.
    pub fn neighbor(&self, of: ItemPosition, direction: Direction) -> ItemPosition {
        debug_assert!(
            self.total == 0 || self.contains(of),
            "neighbor requested for out-of-range position {of}"
        );
        if self.total == 0 {
            return of;
        }

        let section_count = self.sections.len();
        match direction {
            Direction::Next => {
                if of.item + 1 < self.item_count(of.section) {
                    return ItemPosition::new(of.section, of.item + 1);
                }
                let mut section = of.section;
                loop {
                    section = (section + 1) % section_count;
                    if self.item_count(section) > 0 {
                        return ItemPosition::new(section, 0);
                    }
                }
            }
            Direction::Prev => {
                if of.item > 0 {
                    return ItemPosition::new(of.section, of.item - 1);
                }
                let mut section = of.section;
                loop {
                    section = match section.checked_sub(1) {
                        Some(previous) => previous.min(section_count - 1),
                        None => section_count - 1,
                    };
                    let count = self.item_count(section);
                    if count > 0 {
                        return ItemPosition::new(section, count - 1);
                    }
                }
            }
        }
    }
}
