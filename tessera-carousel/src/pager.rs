//! Infinite horizontal pager that recycles three content slots.
//!
//! ## Usage
//!
//! Show an endless carousel over a sectioned data set: photo galleries,
//! onboarding loops, or banners that wrap from the last page to the first.
//!
//! The host drives the pager: it reports the viewport size and every scroll
//! offset, applies the normalized offset the pager hands back, and calls
//! [`InfinitePager::layout`] on each layout pass.
use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    index::{Direction, ItemCounts, ItemPosition},
    pool::CellPool,
    px::{Px, PxRect, PxSize},
    slot::{MountedCell, PagerCell, SlotPosition, Slots},
    visibility::{self, PagerObserver, TRACKED},
};

/// Supplies content to an [`InfinitePager`].
pub trait PagerDataSource {
    /// Cell type rendered by the pager.
    type Cell: PagerCell;

    /// Number of sections in the data set.
    fn number_of_sections(&self) -> usize {
        1
    }

    /// Number of items in `section`.
    fn number_of_items(&self, section: usize) -> usize;

    /// Produces a cell for `item`, typically dequeued from `cells`.
    fn cell_for(&mut self, cells: &mut CellPool<Self::Cell>, item: ItemPosition) -> Self::Cell;

    /// Item shown after the first reload. Defaults to the first item.
    fn starting_position(&self) -> Option<ItemPosition> {
        None
    }
}

/// Geometry and retention settings of a pager.
#[derive(Clone, Debug, PartialEq, Eq, Setters)]
pub struct PagerArgs {
    /// Gap between adjacent pages.
    pub page_spacing: Px,
    /// Inset on both sides of the current page. Neighbors peek into view when
    /// the inset is larger than the spacing.
    pub content_inset: Px,
    /// Populate neighbor slots ahead of time, even while they are off screen.
    pub keep_neighbors_alive: bool,
}

impl Default for PagerArgs {
    fn default() -> Self {
        Self {
            page_spacing: Px::ZERO,
            content_inset: Px::ZERO,
            keep_neighbors_alive: false,
        }
    }
}

impl PagerArgs {
    fn sanitized(mut self) -> Self {
        self.page_spacing = sanitize_spacing(self.page_spacing);
        self.content_inset = sanitize_spacing(self.content_inset);
        self
    }
}

/// Scroll offset the host should move its viewport to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Target content offset along the scroll axis.
    pub offset: Px,
    /// Whether the host should animate toward `offset`, feeding intermediate
    /// offsets back through [`InfinitePager::on_scroll_offset_changed`].
    pub animated: bool,
}

/// Carousel engine presenting an endless, wraparound data set with three
/// recycled slots.
///
/// # Examples
///
/// ```
/// use tessera_carousel::{
///     index::ItemPosition,
///     pager::{InfinitePager, PagerArgs, PagerDataSource},
///     pool::CellPool,
///     px::{Px, PxSize},
///     slot::{PagerCell, SlotPosition},
/// };
///
/// #[derive(Clone, Default)]
/// struct Label(String);
///
/// impl PagerCell for Label {}
///
/// struct Weekdays;
///
/// impl PagerDataSource for Weekdays {
///     type Cell = Label;
///
///     fn number_of_items(&self, _section: usize) -> usize {
///         7
///     }
///
///     fn cell_for(&mut self, cells: &mut CellPool<Label>, item: ItemPosition) -> Label {
///         let mut label = cells.dequeue_reusable_cell("day");
///         label.0 = format!("day {}", item.item);
///         label
///     }
/// }
///
/// let mut pager = InfinitePager::new(PagerArgs::default(), Weekdays);
/// pager.register_template("day", Label::default());
/// pager.set_viewport(PxSize::new(Px(320), Px(200)));
/// pager.layout();
/// assert_eq!(pager.current_item(), Some(ItemPosition::new(0, 0)));
///
/// // Swipe one page back: Sunday wraps around to Saturday.
/// let offset = pager.on_scroll_offset_changed(pager.baseline(SlotPosition::Left));
/// assert_eq!(offset, pager.baseline(SlotPosition::Center));
/// assert_eq!(pager.current_item(), Some(ItemPosition::new(0, 6)));
/// ```
pub struct InfinitePager<D: PagerDataSource, O = ()> {
    args: PagerArgs,
    data_source: D,
    observer: O,
    cells: CellPool<D::Cell>,
    slots: Slots<D::Cell>,
    counts: Option<ItemCounts>,
    viewport: PxSize,
    content_offset: Px,
    reload_position: Option<ItemPosition>,
    needs_reload: bool,
}

impl<D: PagerDataSource> InfinitePager<D> {
    /// Creates a pager without a display observer.
    pub fn new(args: PagerArgs, data_source: D) -> Self {
        Self::with_observer(args, data_source, ())
    }
}

impl<D, O> InfinitePager<D, O>
where
    D: PagerDataSource,
    O: PagerObserver<D::Cell>,
{
    /// Creates a pager reporting display transitions to `observer`.
    ///
    /// Nothing is populated until the first [`layout`](Self::layout) pass.
    pub fn with_observer(args: PagerArgs, data_source: D, observer: O) -> Self {
        Self {
            args: args.sanitized(),
            data_source,
            observer,
            cells: CellPool::new(),
            slots: Slots::new(),
            counts: None,
            viewport: PxSize::ZERO,
            content_offset: Px::ZERO,
            reload_position: None,
            needs_reload: true,
        }
    }

    /// Current settings.
    pub fn args(&self) -> &PagerArgs {
        &self.args
    }

    /// Replaces the settings, reconfiguring when the geometry changes.
    pub fn set_args(&mut self, args: PagerArgs) {
        let args = args.sanitized();
        let geometry_changed = args.page_spacing != self.args.page_spacing
            || args.content_inset != self.args.content_inset;
        self.args = args;
        if geometry_changed {
            self.reload_data();
        }
    }

    /// Sets the gap between pages.
    pub fn set_page_spacing(&mut self, spacing: Px) {
        let args = self.args.clone().page_spacing(spacing);
        self.set_args(args);
    }

    /// Sets the inset around the current page.
    pub fn set_content_inset(&mut self, inset: Px) {
        let args = self.args.clone().content_inset(inset);
        self.set_args(args);
    }

    /// Sets the size of the host viewport, reconfiguring when it changes.
    pub fn set_viewport(&mut self, viewport: PxSize) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.reload_data();
        }
    }

    /// The data source.
    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    /// Mutable access to the data source. Call
    /// [`reload_data`](Self::reload_data) after changing its contents.
    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    /// The display observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the display observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Registers a cell constructor for `identifier`.
    pub fn register_factory(
        &mut self,
        identifier: impl Into<String>,
        factory: impl Fn() -> D::Cell + 'static,
    ) {
        self.cells.register_factory(identifier, factory);
    }

    /// Registers a template cell for `identifier`.
    pub fn register_template(&mut self, identifier: impl Into<String>, template: D::Cell)
    where
        D::Cell: Clone + 'static,
    {
        self.cells.register_template(identifier, template);
    }

    /// Dequeues a cell for `identifier`.
    ///
    /// # Panics
    ///
    /// Panics when nothing was registered for `identifier` and no idle cell
    /// is available.
    pub fn dequeue_reusable_cell(&mut self, identifier: &str) -> D::Cell {
        self.cells.dequeue_reusable_cell(identifier)
    }

    /// The cell pool owned by this pager.
    pub fn cells_mut(&mut self) -> &mut CellPool<D::Cell> {
        &mut self.cells
    }

    /// Discards every slot and schedules a full reconfiguration for the next
    /// layout pass. The current item is restored if it still exists.
    pub fn reload_data(&mut self) {
        if let Some(current) = self.slots[SlotPosition::Center].item() {
            self.reload_position = Some(current);
        }
        for position in SlotPosition::ALL {
            let displaced = self.slots[position].clear();
            self.retire(displaced);
        }
        self.counts = None;
        self.needs_reload = true;
    }

    /// Runs one layout pass: a pending reconfiguration, then display
    /// notifications for the neighbor slots.
    pub fn layout(&mut self) {
        if self.needs_reload {
            self.reconfigure();
        }
        if self.is_paging() {
            self.update_visibility();
        }
    }

    /// Feeds a new scroll offset from the host.
    ///
    /// When the offset reaches the left or right baseline the slots rotate by
    /// one page and the offset is shifted back by one page step, so the
    /// current page stays put on screen. Returns the offset the host should
    /// apply.
    pub fn on_scroll_offset_changed(&mut self, offset: Px) -> Px {
        self.content_offset = offset;
        if self.needs_reload || !self.is_paging() || self.page_step() <= Px::ZERO {
            return offset;
        }

        let left = self.baseline(SlotPosition::Left);
        let right = self.baseline(SlotPosition::Right);
        let direction = if offset <= left {
            Direction::Prev
        } else if offset >= right {
            Direction::Next
        } else {
            trace!(offset = offset.raw(), "scroll offset within current page");
            return offset;
        };

        self.rotate(direction);
        let normalized = if offset == left || offset == right {
            self.baseline(SlotPosition::Center)
        } else {
            match direction {
                Direction::Prev => offset + self.page_step(),
                Direction::Next => offset - self.page_step(),
            }
        };
        trace!(
            offset = offset.raw(),
            normalized = normalized.raw(),
            "normalized scroll offset"
        );
        self.content_offset = normalized;
        normalized
    }

    /// Shows `item` (or the natural neighbor when `None`) in the slot at
    /// `position` and scrolls to it.
    ///
    /// Without animation the scroll is applied immediately and the returned
    /// request carries the normalized offset. With animation the request
    /// carries the target baseline for the host to animate toward.
    ///
    /// `item` must address an existing item.
    pub fn set_position(
        &mut self,
        position: SlotPosition,
        item: Option<ItemPosition>,
        animated: bool,
    ) -> ScrollRequest {
        if self.needs_reload {
            self.reconfigure();
        }
        if !self.is_paging() {
            return ScrollRequest {
                offset: self.content_offset,
                animated: false,
            };
        }
        debug_assert!(
            item.is_none_or(|item| self.counts.as_ref().is_some_and(|c| c.contains(item))),
            "set_position called with out-of-range item {item:?}"
        );

        self.configure_at(position, item);
        if position == SlotPosition::Center {
            self.discard_stale_neighbors();
        }

        let target = self.baseline(position);
        if animated {
            return ScrollRequest {
                offset: target,
                animated: true,
            };
        }
        let offset = self.on_scroll_offset_changed(target);
        self.update_visibility();
        ScrollRequest {
            offset,
            animated: false,
        }
    }

    /// Number of sections, from the counts table or the data source while a
    /// reload is pending.
    pub fn number_of_sections(&self) -> usize {
        match &self.counts {
            Some(counts) => counts.section_count(),
            None => self.data_source.number_of_sections(),
        }
    }

    /// Number of items in `section`.
    pub fn number_of_items(&self, section: usize) -> usize {
        match &self.counts {
            Some(counts) => counts.item_count(section),
            None if section < self.data_source.number_of_sections() => {
                self.data_source.number_of_items(section)
            }
            None => 0,
        }
    }

    /// Cells currently reported as displayed, in layout order.
    pub fn visible_cells(&self) -> SmallVec<[&D::Cell; 3]> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.is_reported())
            .filter_map(|(_, slot)| slot.cell())
            .collect()
    }

    /// The cell of the current page.
    pub fn visible_center_cell(&self) -> Option<&D::Cell> {
        self.slots[SlotPosition::Center].cell()
    }

    /// The cell mounted in the slot at `position`.
    pub fn cell_at(&self, position: SlotPosition) -> Option<&D::Cell> {
        self.slots[position].cell()
    }

    /// The item shown by the slot at `position`.
    pub fn item_at(&self, position: SlotPosition) -> Option<ItemPosition> {
        self.slots[position].item()
    }

    /// The item of the current page.
    pub fn current_item(&self) -> Option<ItemPosition> {
        self.item_at(SlotPosition::Center)
    }

    /// Whether there is content to page through.
    pub fn is_paging(&self) -> bool {
        self.counts.as_ref().is_some_and(ItemCounts::is_pageable)
    }

    /// Width of one page.
    pub fn page_width(&self) -> Px {
        (self.viewport.width - self.args.content_inset - self.args.content_inset).max(Px::ZERO)
    }

    /// Distance between the leading edges of adjacent pages.
    pub fn page_step(&self) -> Px {
        self.page_width() + self.args.page_spacing
    }

    /// Total scrollable content size.
    pub fn content_size(&self) -> PxSize {
        let inset = self.args.content_inset;
        PxSize::new(
            inset * 2 + self.page_width() * 3 + self.args.page_spacing * 2,
            self.viewport.height,
        )
    }

    /// Last offset applied through the pager.
    pub fn content_offset(&self) -> Px {
        self.content_offset
    }

    /// The on-screen rectangle in content coordinates.
    pub fn visible_rect(&self) -> PxRect {
        PxRect::new(
            self.content_offset,
            Px::ZERO,
            self.viewport.width,
            self.viewport.height,
        )
    }

    /// Frame of the slot at `position`.
    pub fn slot_frame(&self, position: SlotPosition) -> PxRect {
        self.slots[position].frame()
    }

    /// Offset at which the slot at `position` is the current page.
    pub fn baseline(&self, position: SlotPosition) -> Px {
        self.slot_frame(position).x - self.args.content_inset
    }

    fn reconfigure(&mut self) {
        self.needs_reload = false;
        let counts = ItemCounts::new(
            (0..self.data_source.number_of_sections())
                .map(|section| self.data_source.number_of_items(section)),
        );
        self.layout_slots();
        self.content_offset = self.baseline(SlotPosition::Center);

        if !counts.is_pageable() {
            debug!(
                sections = counts.section_count(),
                items = counts.total_items(),
                "not enough items to page, carousel left empty"
            );
            self.counts = Some(counts);
            return;
        }

        let start = self
            .reload_position
            .take()
            .filter(|&item| counts.contains(item))
            .or_else(|| {
                self.data_source
                    .starting_position()
                    .filter(|&item| counts.contains(item))
            })
            .or_else(|| counts.first_position());
        debug!(
            sections = counts.section_count(),
            items = counts.total_items(),
            start = ?start,
            "reconfigured carousel"
        );
        self.counts = Some(counts);

        if let Some(start) = start {
            self.configure_at(SlotPosition::Center, Some(start));
            visibility::notify_enter(&mut self.slots[SlotPosition::Center], &mut self.observer);
        }
    }

    fn layout_slots(&mut self) {
        let inset = self.args.content_inset;
        let width = self.page_width();
        let step = self.page_step();
        let mut x = inset;
        for position in SlotPosition::ALL {
            self.slots[position].set_frame(PxRect::new(x, Px::ZERO, width, self.viewport.height));
            x += step;
        }
    }

    /// Shows `item`, or the neighbor of the center item toward `position`, in
    /// that slot. Does nothing when the slot already shows the target.
    fn configure_at(&mut self, position: SlotPosition, item: Option<ItemPosition>) {
        let Some(counts) = self.counts.as_ref().filter(|counts| counts.is_pageable()) else {
            return;
        };
        let target = match (item, position.direction()) {
            (Some(item), _) => item,
            (None, None) => return,
            (None, Some(direction)) => match self.slots[SlotPosition::Center].item() {
                Some(center) => counts.neighbor(center, direction),
                None => return,
            },
        };
        if self.slots[position].item() == Some(target) {
            return;
        }

        let displaced = self.slots[position].clear();
        self.retire(displaced);
        let cell = self.data_source.cell_for(&mut self.cells, target);
        self.slots[position].set_cell(cell, target);
    }

    fn rotate(&mut self, direction: Direction) {
        let (outgoing, incoming) = match direction {
            Direction::Next => (SlotPosition::Left, SlotPosition::Right),
            Direction::Prev => (SlotPosition::Right, SlotPosition::Left),
        };
        // A jump can skip the layout pass that would have filled the page.
        if !self.slots[incoming].is_occupied() {
            self.configure_at(incoming, None);
        }
        let displaced = self.slots.transfer(SlotPosition::Center, outgoing);
        self.retire(displaced);
        self.slots.transfer(incoming, SlotPosition::Center);
        self.discard_stale_neighbors();
        debug!(
            ?direction,
            current = ?self.current_item(),
            "rotated carousel slots"
        );
    }

    /// Drops neighbor cells that do not show the neighbors of the center.
    fn discard_stale_neighbors(&mut self) {
        let (Some(counts), Some(center)) = (self.counts.as_ref(), self.current_item()) else {
            return;
        };
        let expected = [
            counts.neighbor(center, Direction::Prev),
            counts.neighbor(center, Direction::Next),
        ];
        for (position, expected) in TRACKED.into_iter().zip(expected) {
            if self.slots[position]
                .item()
                .is_some_and(|item| item != expected)
            {
                let displaced = self.slots[position].clear();
                self.retire(displaced);
            }
        }
    }

    fn update_visibility(&mut self) {
        let viewport = self.visible_rect();
        visibility::notify_exits(&mut self.slots, &viewport, &mut self.observer);
        visibility::notify_enter(&mut self.slots[SlotPosition::Center], &mut self.observer);

        for position in visibility::pending_enters(&self.slots, &viewport) {
            if !self.slots[position].is_occupied() {
                self.configure_at(position, None);
            }
            visibility::notify_enter(&mut self.slots[position], &mut self.observer);
        }

        if self.args.keep_neighbors_alive {
            for position in TRACKED {
                if !self.slots[position].is_occupied() {
                    self.configure_at(position, None);
                    if let Some(cell) = self.slots[position].cell_mut() {
                        cell.set_hidden(true);
                    }
                }
            }
        }
    }

    /// Drops a cell removed from a slot, ending its display first.
    fn retire(&mut self, displaced: Option<MountedCell<D::Cell>>) {
        if let Some(mut mounted) = displaced {
            visibility::end_display(&mut mounted, &mut self.observer);
        }
    }
}

impl<D, O> std::fmt::Debug for InfinitePager<D, O>
where
    D: PagerDataSource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = SlotPosition::ALL.map(|position| self.slots[position].item());
        f.debug_struct("InfinitePager")
            .field("args", &self.args)
            .field("viewport", &self.viewport)
            .field("content_offset", &self.content_offset)
            .field("items", &items)
            .field("counts", &self.counts)
            .field("cells", &self.cells)
            .finish_non_exhaustive()
    }
}

fn sanitize_spacing(px: Px) -> Px {
    if px < Px::ZERO { Px::ZERO } else { px }
}
