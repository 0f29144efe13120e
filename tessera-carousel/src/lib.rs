//! Infinite paged carousel engine for tessera-ui.
//!
//! The carousel presents an endless, wraparound sectioned data set with only
//! three content slots. Scrolling one page forward or backward rotates the
//! cells between the slots and shifts the scroll offset back by one page, so
//! the content never runs out and no cell is rebuilt for a page that is
//! already on screen.
//!
//! # Usage
//!
//! Implement [`PagerDataSource`] for your data, register a cell factory, then
//! feed the pager the viewport size, scroll offsets and layout passes of your
//! host view.
//!
//! ```
//! use tessera_carousel::{
//!     InfinitePager, ItemPosition, PagerArgs, PagerCell, PagerDataSource, CellPool, Px, PxSize,
//!     SlotPosition,
//! };
//!
//! struct Banner {
//!     title: String,
//! }
//!
//! impl PagerCell for Banner {}
//!
//! struct Promotions {
//!     titles: Vec<&'static str>,
//! }
//!
//! impl PagerDataSource for Promotions {
//!     type Cell = Banner;
//!
//!     fn number_of_items(&self, _section: usize) -> usize {
//!         self.titles.len()
//!     }
//!
//!     fn cell_for(&mut self, cells: &mut CellPool<Banner>, item: ItemPosition) -> Banner {
//!         let mut banner = cells.dequeue_reusable_cell("banner");
//!         banner.title = self.titles[item.item].to_owned();
//!         banner
//!     }
//! }
//!
//! let source = Promotions {
//!     titles: vec!["spring", "summer", "autumn"],
//! };
//! let mut pager = InfinitePager::new(
//!     PagerArgs::default().page_spacing(Px(8)).content_inset(Px(24)),
//!     source,
//! );
//! pager.register_factory("banner", || Banner {
//!     title: String::new(),
//! });
//! pager.set_viewport(PxSize::new(Px(360), Px(180)));
//! pager.layout();
//!
//! // Both neighbors peek into view, so all three slots are populated.
//! let titles: Vec<_> = pager
//!     .visible_cells()
//!     .into_iter()
//!     .map(|banner| banner.title.as_str())
//!     .collect();
//! assert_eq!(titles, ["autumn", "spring", "summer"]);
//!
//! // Scroll a full page forward; the host applies the returned offset.
//! let offset = pager.on_scroll_offset_changed(pager.baseline(SlotPosition::Right));
//! pager.layout();
//! assert_eq!(offset, pager.baseline(SlotPosition::Center));
//! assert_eq!(
//!     pager.visible_center_cell().map(|banner| banner.title.as_str()),
//!     Some("summer")
//! );
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod error;
pub mod index;
pub mod pager;
pub mod pool;
pub mod px;
pub mod slot;
pub mod visibility;

#[cfg(test)]
mod testing;

pub use crate::{
    error::PagerError,
    index::{Direction, ItemCounts, ItemPosition},
    pager::{InfinitePager, PagerArgs, PagerDataSource, ScrollRequest},
    pool::{CellFactory, CellPool},
    px::{Px, PxRect, PxSize},
    slot::{PagerCell, Slot, SlotPosition},
    visibility::PagerObserver,
};
