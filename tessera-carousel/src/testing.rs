//! Fixtures shared by the unit tests.
use std::{cell::Cell, rc::Rc};

use crate::{
    index::ItemPosition,
    pager::{InfinitePager, PagerArgs, PagerDataSource},
    pool::CellPool,
    px::{Px, PxSize},
    slot::{PagerCell, SlotPosition},
    visibility::PagerObserver,
};

pub(crate) const PAGE: &str = "page";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestCell {
    pub id: usize,
    pub item: Option<ItemPosition>,
    pub size: PxSize,
    pub hidden: bool,
}

impl TestCell {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            item: None,
            size: PxSize::ZERO,
            hidden: false,
        }
    }
}

impl PagerCell for TestCell {
    fn resize(&mut self, size: PxSize) {
        self.size = size;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

/// Sectioned data source that dequeues every page from [`PAGE`].
#[derive(Debug, Default)]
pub(crate) struct Sections {
    pub counts: Vec<usize>,
    pub start: Option<ItemPosition>,
    pub requested: Vec<ItemPosition>,
}

impl Sections {
    pub fn new(counts: &[usize]) -> Self {
        Self {
            counts: counts.to_vec(),
            ..Self::default()
        }
    }

    pub fn starting_at(mut self, start: ItemPosition) -> Self {
        self.start = Some(start);
        self
    }
}

impl PagerDataSource for Sections {
    type Cell = TestCell;

    fn number_of_sections(&self) -> usize {
        self.counts.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.counts[section]
    }

    fn cell_for(&mut self, cells: &mut CellPool<TestCell>, item: ItemPosition) -> TestCell {
        self.requested.push(item);
        let mut cell = cells.dequeue_reusable_cell(PAGE);
        cell.item = Some(item);
        cell
    }

    fn starting_position(&self) -> Option<ItemPosition> {
        self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Enter(usize, ItemPosition),
    Exit(usize, ItemPosition),
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl PagerObserver<TestCell> for Recorder {
    fn will_display(&mut self, cell: &mut TestCell, item: ItemPosition) {
        self.events.push(Event::Enter(cell.id, item));
    }

    fn did_end_displaying(&mut self, cell: &mut TestCell, item: ItemPosition) {
        self.events.push(Event::Exit(cell.id, item));
    }
}

pub(crate) type TestPager = InfinitePager<Sections, Recorder>;

/// Viewport 100x100 with a 20px inset and 10px spacing: pages are 60px wide,
/// one step is 70px and both neighbors peek into view at rest.
pub(crate) fn peeking_args() -> PagerArgs {
    PagerArgs::default()
        .page_spacing(Px(10))
        .content_inset(Px(20))
}

/// Viewport 100x100 with no inset or spacing: only the center is visible at
/// rest.
pub(crate) fn full_page_args() -> PagerArgs {
    PagerArgs::default()
}

pub(crate) fn pager(args: PagerArgs, source: Sections) -> (TestPager, Rc<Cell<usize>>) {
    let built = Rc::new(Cell::new(0));
    let counter = Rc::clone(&built);
    let mut pager = InfinitePager::with_observer(args, source, Recorder::default());
    pager.register_factory(PAGE, move || {
        let id = counter.get();
        counter.set(id + 1);
        TestCell::new(id)
    });
    pager.set_viewport(PxSize::new(Px(100), Px(100)));
    (pager, built)
}

pub(crate) fn items(pager: &TestPager) -> [Option<ItemPosition>; 3] {
    SlotPosition::ALL.map(|position| pager.item_at(position))
}

pub(crate) fn ids(pager: &TestPager) -> [Option<usize>; 3] {
    SlotPosition::ALL.map(|position| pager.cell_at(position).map(|cell| cell.id))
}

pub(crate) fn at(item: usize) -> Option<ItemPosition> {
    Some(ItemPosition::new(0, item))
}
