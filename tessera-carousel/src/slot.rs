//! The three fixed content slots of the carousel.
//!
//! ## Usage
//!
//! Slots are created once by the pager and never reallocated. Paging moves
//! cells between them instead of rebuilding content.
use std::ops::{Index, IndexMut};

use crate::{
    index::{Direction, ItemPosition},
    px::{PxRect, PxSize},
};

/// Capabilities the carousel needs from a cell.
///
/// Both hooks default to no-ops so plain data types can be used as cells.
pub trait PagerCell {
    /// Called when the cell is installed in a slot of the given size.
    fn resize(&mut self, _size: PxSize) {}

    /// Called when the cell is shown or hidden by the carousel.
    fn set_hidden(&mut self, _hidden: bool) {}
}

/// Physical slot in the scroll content, ordered leading to trailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    /// Slot holding the previous page.
    Left = 0,
    /// Slot holding the current page.
    Center = 1,
    /// Slot holding the next page.
    Right = 2,
}

impl SlotPosition {
    /// All positions in layout order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    /// Index of the slot in the layout, 0 being the leading slot.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction from the center toward this slot, `None` for the center.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Left => Some(Direction::Prev),
            Self::Center => None,
            Self::Right => Some(Direction::Next),
        }
    }
}

/// A cell installed in a slot, tagged with the item it renders.
#[derive(Debug)]
pub struct MountedCell<C> {
    cell: C,
    item: ItemPosition,
    reported: bool,
}

impl<C: PagerCell> MountedCell<C> {
    /// The cell itself.
    pub fn cell(&self) -> &C {
        &self.cell
    }

    /// The item the cell renders.
    pub fn item(&self) -> ItemPosition {
        self.item
    }

    /// Whether the cell has been announced as displayed and not yet
    /// announced as ended.
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Unwraps the cell, dropping the tag.
    pub fn into_cell(self) -> C {
        self.cell
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut C, ItemPosition) {
        (&mut self.cell, self.item)
    }

    pub(crate) fn set_reported(&mut self, reported: bool) {
        self.reported = reported;
        self.cell.set_hidden(!reported);
    }
}

/// A fixed viewport holding at most one cell.
#[derive(Debug)]
pub struct Slot<C> {
    frame: PxRect,
    mounted: Option<MountedCell<C>>,
}

impl<C: PagerCell> Slot<C> {
    /// Creates an empty slot with the given frame.
    pub fn new(frame: PxRect) -> Self {
        Self {
            frame,
            mounted: None,
        }
    }

    /// Frame of the slot in scroll content coordinates.
    pub fn frame(&self) -> PxRect {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: PxRect) {
        self.frame = frame;
        if let Some(mounted) = &mut self.mounted {
            mounted.cell.resize(frame.size());
        }
    }

    /// Whether the slot frame overlaps `query`.
    pub fn is_visible(&self, query: &PxRect) -> bool {
        self.frame.intersects(query)
    }

    /// The mounted cell, if any.
    pub fn cell(&self) -> Option<&C> {
        self.mounted.as_ref().map(|mounted| &mounted.cell)
    }

    /// Mutable access to the mounted cell, if any.
    pub fn cell_mut(&mut self) -> Option<&mut C> {
        self.mounted.as_mut().map(|mounted| &mut mounted.cell)
    }

    /// The item the mounted cell renders.
    pub fn item(&self) -> Option<ItemPosition> {
        self.mounted.as_ref().map(|mounted| mounted.item)
    }

    /// Whether a cell is mounted.
    pub fn is_occupied(&self) -> bool {
        self.mounted.is_some()
    }

    /// Whether a cell is mounted and currently reported as displayed.
    pub fn is_reported(&self) -> bool {
        self.mounted.as_ref().is_some_and(|mounted| mounted.reported)
    }

    pub(crate) fn mounted_mut(&mut self) -> Option<&mut MountedCell<C>> {
        self.mounted.as_mut()
    }

    /// Installs `cell` for `item`, sized to the slot and shown.
    ///
    /// Returns the previously mounted cell, if any.
    pub fn set_cell(&mut self, mut cell: C, item: ItemPosition) -> Option<MountedCell<C>> {
        let displaced = self.clear();
        cell.resize(self.frame.size());
        cell.set_hidden(false);
        self.mounted = Some(MountedCell {
            cell,
            item,
            reported: false,
        });
        displaced
    }

    /// Detaches the mounted cell and hands it back to the caller.
    pub fn clear(&mut self) -> Option<MountedCell<C>> {
        self.mounted.take()
    }

    /// Takes over the cell mounted in `other`, leaving `other` empty.
    ///
    /// The cell keeps its tag and is not resized. Returns the cell this slot
    /// held before.
    pub fn move_from(&mut self, other: &mut Slot<C>) -> Option<MountedCell<C>> {
        std::mem::replace(&mut self.mounted, other.mounted.take())
    }
}

/// The left, center and right slots, indexed by [`SlotPosition`].
#[derive(Debug)]
pub struct Slots<C> {
    slots: [Slot<C>; 3],
}

impl<C: PagerCell> Slots<C> {
    /// Creates three empty slots with zero frames.
    pub fn new() -> Self {
        Self {
            slots: [
                Slot::new(PxRect::ZERO),
                Slot::new(PxRect::ZERO),
                Slot::new(PxRect::ZERO),
            ],
        }
    }

    /// Moves the cell in `from` into `to`, returning what `to` held.
    pub fn transfer(&mut self, from: SlotPosition, to: SlotPosition) -> Option<MountedCell<C>> {
        let (source, target) = self.pair_mut(from, to);
        target.move_from(source)
    }

    /// Iterates slots in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotPosition, &Slot<C>)> {
        SlotPosition::ALL.into_iter().zip(self.slots.iter())
    }

    fn pair_mut(&mut self, a: SlotPosition, b: SlotPosition) -> (&mut Slot<C>, &mut Slot<C>) {
        let (a, b) = (a.index(), b.index());
        assert_ne!(a, b, "a slot cannot transfer into itself");
        if a < b {
            let (head, tail) = self.slots.split_at_mut(b);
            (&mut head[a], &mut tail[0])
        } else {
            let (head, tail) = self.slots.split_at_mut(a);
            (&mut tail[0], &mut head[b])
        }
    }
}

impl<C: PagerCell> Default for Slots<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Index<SlotPosition> for Slots<C> {
    type Output = Slot<C>;

    fn index(&self, position: SlotPosition) -> &Slot<C> {
        &self.slots[position.index()]
    }
}

impl<C> IndexMut<SlotPosition> for Slots<C> {
    fn index_mut(&mut self, position: SlotPosition) -> &mut Slot<C> {
        &mut self.slots[position.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{px::Px, testing::TestCell};

    fn slot_at(x: i32) -> Slot<TestCell> {
        Slot::new(PxRect::new(Px(x), Px(0), Px(60), Px(100)))
    }

    #[test]
    fn set_cell_sizes_shows_and_tags() {
        let mut slot = slot_at(90);
        let mut cell = TestCell::new(7);
        cell.hidden = true;
        assert!(slot.set_cell(cell, ItemPosition::new(0, 3)).is_none());

        let cell = slot.cell().expect("cell mounted");
        assert_eq!(cell.size, PxSize::new(Px(60), Px(100)));
        assert!(!cell.hidden);
        assert_eq!(slot.item(), Some(ItemPosition::new(0, 3)));
        assert!(!slot.is_reported());
    }

    #[test]
    fn set_cell_returns_displaced_cell() {
        let mut slot = slot_at(0);
        slot.set_cell(TestCell::new(1), ItemPosition::new(0, 0));
        let displaced = slot
            .set_cell(TestCell::new(2), ItemPosition::new(0, 1))
            .expect("previous cell");
        assert_eq!(displaced.cell().id, 1);
        assert_eq!(displaced.item(), ItemPosition::new(0, 0));
        assert_eq!(slot.cell().map(|cell| cell.id), Some(2));
    }

    #[test]
    fn move_from_preserves_identity_and_tag() {
        let mut left = slot_at(0);
        let mut center = Slot::new(PxRect::new(Px(100), Px(0), Px(80), Px(100)));
        center.set_cell(TestCell::new(5), ItemPosition::new(1, 2));
        center.mounted_mut().expect("mounted").set_reported(true);

        assert!(left.move_from(&mut center).is_none());
        assert!(!center.is_occupied());
        assert_eq!(left.cell().map(|cell| cell.id), Some(5));
        assert_eq!(left.item(), Some(ItemPosition::new(1, 2)));
        assert!(left.is_reported());
        // No resize on transfer.
        assert_eq!(
            left.cell().map(|cell| cell.size),
            Some(PxSize::new(Px(80), Px(100)))
        );
    }

    #[test]
    fn visibility_uses_half_open_intersection() {
        let slot = slot_at(20);
        let viewport = |x| PxRect::new(Px(x), Px(0), Px(100), Px(100));
        assert!(slot.is_visible(&viewport(70)));
        assert!(!slot.is_visible(&viewport(80)));
        assert!(!slot.is_visible(&viewport(-80)));
        assert!(slot.is_visible(&viewport(-79)));
    }

    #[test]
    fn arena_transfer_both_directions() {
        let mut slots: Slots<TestCell> = Slots::new();
        slots[SlotPosition::Left].set_cell(TestCell::new(1), ItemPosition::new(0, 0));
        slots[SlotPosition::Right].set_cell(TestCell::new(3), ItemPosition::new(0, 2));

        let displaced = slots.transfer(SlotPosition::Right, SlotPosition::Left);
        assert_eq!(displaced.map(|mounted| mounted.into_cell().id), Some(1));
        assert!(!slots[SlotPosition::Right].is_occupied());

        assert!(
            slots
                .transfer(SlotPosition::Left, SlotPosition::Center)
                .is_none()
        );
        let occupied: Vec<_> = slots
            .iter()
            .filter_map(|(position, slot)| slot.cell().map(|cell| (position, cell.id)))
            .collect();
        assert_eq!(occupied, vec![(SlotPosition::Center, 3)]);
    }

    #[test]
    fn directions_from_center() {
        assert_eq!(SlotPosition::Left.direction(), Some(Direction::Prev));
        assert_eq!(SlotPosition::Center.direction(), None);
        assert_eq!(SlotPosition::Right.direction(), Some(Direction::Next));
        assert_eq!(SlotPosition::Right.index(), 2);
    }
}
