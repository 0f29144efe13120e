//! Reuse pool for carousel cells.
//!
//! ## Usage
//!
//! Register a factory or template per reuse identifier, then dequeue cells
//! from the data source when the carousel asks for a page.
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::PagerError;

/// Constructs a fresh cell for one reuse identifier.
pub type CellFactory<C> = Box<dyn Fn() -> C>;

/// Idle cells and factories keyed by reuse identifier.
///
/// Each carousel owns its own pool, so registrations never leak between
/// carousel instances.
///
/// # Examples
///
/// ```
/// use tessera_carousel::pool::CellPool;
///
/// let mut pool = CellPool::new();
/// pool.register_factory("label", || String::from("fresh"));
/// pool.append(String::from("recycled"), "label");
///
/// assert_eq!(pool.dequeue_reusable_cell("label"), "recycled");
/// assert_eq!(pool.dequeue_reusable_cell("label"), "fresh");
/// ```
pub struct CellPool<C> {
    factories: FxHashMap<String, CellFactory<C>>,
    idle: FxHashMap<String, Vec<C>>,
}

impl<C> CellPool<C> {
    /// Creates an empty pool with no registrations.
    pub fn new() -> Self {
        Self {
            factories: FxHashMap::default(),
            idle: FxHashMap::default(),
        }
    }

    /// Registers a constructor for `identifier`, replacing any earlier
    /// registration.
    pub fn register_factory(
        &mut self,
        identifier: impl Into<String>,
        factory: impl Fn() -> C + 'static,
    ) {
        self.factories.insert(identifier.into(), Box::new(factory));
    }

    /// Registers a template cell for `identifier`; every fresh cell is a clone
    /// of it. Replaces any earlier registration.
    pub fn register_template(&mut self, identifier: impl Into<String>, template: C)
    where
        C: Clone + 'static,
    {
        self.register_factory(identifier, move || template.clone());
    }

    /// Whether a factory or template is registered for `identifier`.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Number of idle cells held for `identifier`.
    pub fn idle_count(&self, identifier: &str) -> usize {
        self.idle.get(identifier).map_or(0, Vec::len)
    }

    /// Removes and returns an idle cell for `identifier`, if any.
    pub fn dequeue(&mut self, identifier: &str) -> Option<C> {
        self.idle.get_mut(identifier)?.pop()
    }

    /// Adds a cell to the idle set of `identifier`.
    pub fn append(&mut self, cell: C, identifier: impl Into<String>) {
        self.idle.entry(identifier.into()).or_default().push(cell);
    }

    /// Returns an idle cell, or constructs one from the registered factory.
    pub fn try_dequeue_reusable_cell(&mut self, identifier: &str) -> Result<C, PagerError> {
        if let Some(cell) = self.dequeue(identifier) {
            return Ok(cell);
        }
        let factory =
            self.factories
                .get(identifier)
                .ok_or_else(|| PagerError::UnregisteredIdentifier {
                    identifier: identifier.to_owned(),
                })?;
        debug!(identifier, "no idle cell, constructing a new one");
        Ok(factory())
    }

    /// Returns an idle cell, or constructs one from the registered factory.
    ///
    /// # Panics
    ///
    /// Panics when nothing was ever registered for `identifier` and no idle
    /// cell is available. This is a setup mistake, not a runtime condition.
    pub fn dequeue_reusable_cell(&mut self, identifier: &str) -> C {
        match self.try_dequeue_reusable_cell(identifier) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<C> Default for CellPool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for CellPool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<_> = self.factories.keys().collect();
        registered.sort();
        let idle: usize = self.idle.values().map(Vec::len).sum();
        f.debug_struct("CellPool")
            .field("registered", &registered)
            .field("idle", &idle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    fn counting_pool(identifier: &str) -> (CellPool<usize>, Rc<Cell<usize>>) {
        let built = Rc::new(Cell::new(0));
        let counter = Rc::clone(&built);
        let mut pool = CellPool::new();
        pool.register_factory(identifier, move || {
            let id = counter.get();
            counter.set(id + 1);
            id
        });
        (pool, built)
    }

    #[test]
    fn dequeue_without_append_always_constructs() {
        let (mut pool, built) = counting_pool("X");
        let cells: Vec<_> = (0..5).map(|_| pool.dequeue_reusable_cell("X")).collect();
        assert_eq!(cells, vec![0, 1, 2, 3, 4]);
        assert_eq!(built.get(), 5);
        assert_eq!(pool.idle_count("X"), 0);
    }

    #[test]
    fn appended_cells_are_reused_first() {
        let (mut pool, built) = counting_pool("X");
        pool.append(42, "X");
        assert_eq!(pool.dequeue_reusable_cell("X"), 42);
        assert_eq!(built.get(), 0);
        assert_eq!(pool.dequeue_reusable_cell("X"), 0);
    }

    #[test]
    fn idle_cells_are_scoped_by_identifier() {
        let (mut pool, _) = counting_pool("X");
        pool.append(7, "Y");
        assert_eq!(pool.dequeue("X"), None);
        assert_eq!(pool.dequeue("Y"), Some(7));
        assert_eq!(pool.dequeue("Y"), None);
    }

    #[test]
    fn idle_cell_served_even_without_registration() {
        let mut pool = CellPool::new();
        pool.append("idle", "unregistered");
        assert_eq!(pool.try_dequeue_reusable_cell("unregistered"), Ok("idle"));
    }

    #[test]
    fn last_registration_wins() {
        let mut pool = CellPool::new();
        pool.register_template("page", 1);
        pool.register_template("page", 2);
        assert!(pool.is_registered("page"));
        assert_eq!(pool.dequeue_reusable_cell("page"), 2);
    }

    #[test]
    fn unregistered_identifier_is_an_error() {
        let mut pool: CellPool<u8> = CellPool::new();
        assert_eq!(
            pool.try_dequeue_reusable_cell("missing"),
            Err(PagerError::UnregisteredIdentifier {
                identifier: "missing".to_owned()
            })
        );
    }

    #[test]
    #[should_panic(expected = "no cell factory registered for reuse identifier `missing`")]
    fn unregistered_identifier_panics() {
        let mut pool: CellPool<u8> = CellPool::new();
        pool.dequeue_reusable_cell("missing");
    }
}
