//! Display notifications for cells scrolling in and out of view.
//!
//! ## Usage
//!
//! Implement [`PagerObserver`] to start and stop work (media playback,
//! analytics, image loading) exactly when a page becomes visible or leaves
//! the screen.
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    index::ItemPosition,
    px::PxRect,
    slot::{MountedCell, PagerCell, Slot, SlotPosition, Slots},
};

/// Receives display transitions of carousel cells.
///
/// Every `will_display` for a cell is followed by exactly one
/// `did_end_displaying` before the cell is displayed again.
pub trait PagerObserver<C> {
    /// The cell is about to become visible.
    fn will_display(&mut self, _cell: &mut C, _item: ItemPosition) {}

    /// The cell left the screen, or was removed while visible.
    fn did_end_displaying(&mut self, _cell: &mut C, _item: ItemPosition) {}
}

impl<C> PagerObserver<C> for () {}

/// Neighbor slots whose visibility is tracked by layout passes.
pub(crate) const TRACKED: [SlotPosition; 2] = [SlotPosition::Left, SlotPosition::Right];

/// Hides reported neighbor cells that no longer intersect `viewport`.
pub(crate) fn notify_exits<C, O>(slots: &mut Slots<C>, viewport: &PxRect, observer: &mut O)
where
    C: PagerCell,
    O: PagerObserver<C>,
{
    for position in TRACKED {
        let slot = &mut slots[position];
        if !slot.is_reported() || slot.is_visible(viewport) {
            continue;
        }
        if let Some(mounted) = slot.mounted_mut() {
            end_display(mounted, observer);
        }
    }
}

/// Neighbor slots that intersect `viewport` but hold no reported cell.
pub(crate) fn pending_enters<C: PagerCell>(
    slots: &Slots<C>,
    viewport: &PxRect,
) -> SmallVec<[SlotPosition; 2]> {
    TRACKED
        .into_iter()
        .filter(|&position| {
            let slot = &slots[position];
            slot.is_visible(viewport) && !slot.is_reported()
        })
        .collect()
}

/// Reports the cell in `slot` as displayed, unless it already is.
pub(crate) fn notify_enter<C, O>(slot: &mut Slot<C>, observer: &mut O)
where
    C: PagerCell,
    O: PagerObserver<C>,
{
    let Some(mounted) = slot.mounted_mut() else {
        return;
    };
    if mounted.is_reported() {
        return;
    }
    mounted.set_reported(true);
    let (cell, item) = mounted.parts_mut();
    trace!(%item, "cell will display");
    observer.will_display(cell, item);
}

/// Reports a displayed cell as ended and hides it.
pub(crate) fn end_display<C, O>(mounted: &mut MountedCell<C>, observer: &mut O)
where
    C: PagerCell,
    O: PagerObserver<C>,
{
    if !mounted.is_reported() {
        return;
    }
    mounted.set_reported(false);
    let (cell, item) = mounted.parts_mut();
    trace!(%item, "cell did end displaying");
    observer.did_end_displaying(cell, item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        px::Px,
        testing::{Event, Recorder, TestCell},
    };

    fn laid_out() -> Slots<TestCell> {
        let mut slots = Slots::new();
        for (index, position) in SlotPosition::ALL.into_iter().enumerate() {
            let x = Px(20 + 70 * index as i32);
            slots[position].set_frame(PxRect::new(x, Px(0), Px(60), Px(100)));
            slots[position].set_cell(TestCell::new(index), ItemPosition::new(0, index));
        }
        slots
    }

    fn viewport(x: i32) -> PxRect {
        PxRect::new(Px(x), Px(0), Px(100), Px(100))
    }

    #[test]
    fn enter_then_exit_once() {
        let mut slots = laid_out();
        let mut recorder = Recorder::default();

        for position in pending_enters(&slots, &viewport(70)) {
            notify_enter(&mut slots[position], &mut recorder);
        }
        assert!(pending_enters(&slots, &viewport(70)).is_empty());

        // Left is [20, 80), gone at offset 80.
        notify_exits(&mut slots, &viewport(80), &mut recorder);
        notify_exits(&mut slots, &viewport(80), &mut recorder);

        assert_eq!(
            recorder.drain(),
            vec![
                Event::Enter(0, ItemPosition::new(0, 0)),
                Event::Enter(2, ItemPosition::new(0, 2)),
                Event::Exit(0, ItemPosition::new(0, 0)),
            ]
        );
        let left = slots[SlotPosition::Left].cell().expect("left cell");
        assert!(left.hidden);
        assert!(!slots[SlotPosition::Right].cell().expect("right cell").hidden);
    }

    #[test]
    fn unreported_cells_never_exit() {
        let mut slots = laid_out();
        let mut recorder = Recorder::default();
        notify_exits(&mut slots, &viewport(1000), &mut recorder);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn center_is_not_tracked() {
        let slots = laid_out();
        let pending = pending_enters(&slots, &viewport(70));
        assert_eq!(
            pending.as_slice(),
            &[SlotPosition::Left, SlotPosition::Right]
        );
    }

    #[test]
    fn empty_slot_is_pending_but_enter_is_noop() {
        let mut slots = laid_out();
        slots[SlotPosition::Right].clear();
        let mut recorder = Recorder::default();
        assert!(pending_enters(&slots, &viewport(140)).contains(&SlotPosition::Right));
        notify_enter(&mut slots[SlotPosition::Right], &mut recorder);
        assert!(recorder.events.is_empty());
    }
}
