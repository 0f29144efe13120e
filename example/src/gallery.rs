//! A photo gallery data source with one section per album.
use tessera_carousel::{CellPool, ItemPosition, PagerCell, PagerDataSource, PagerObserver, PxSize};
use tracing::info;

pub const PHOTO: &str = "photo";

pub struct Album {
    pub title: &'static str,
    pub photos: Vec<&'static str>,
}

pub struct Gallery {
    albums: Vec<Album>,
    cover: Option<ItemPosition>,
}

impl Gallery {
    pub fn new(albums: Vec<Album>) -> Self {
        Self {
            albums,
            cover: None,
        }
    }

    /// Opens the gallery on `cover` instead of the first photo.
    pub fn with_cover(mut self, cover: ItemPosition) -> Self {
        self.cover = Some(cover);
        self
    }

    pub fn add_album(&mut self, album: Album) {
        self.albums.push(album);
    }
}

impl PagerDataSource for Gallery {
    type Cell = PhotoCell;

    fn number_of_sections(&self) -> usize {
        self.albums.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.albums[section].photos.len()
    }

    fn cell_for(&mut self, cells: &mut CellPool<PhotoCell>, item: ItemPosition) -> PhotoCell {
        let album = &self.albums[item.section];
        let mut cell = cells.dequeue_reusable_cell(PHOTO);
        cell.caption = format!("{} / {}", album.title, album.photos[item.item]);
        cell
    }

    fn starting_position(&self) -> Option<ItemPosition> {
        self.cover
    }
}

#[derive(Clone, Debug, Default)]
pub struct PhotoCell {
    pub caption: String,
    pub size: PxSize,
    pub hidden: bool,
}

impl PagerCell for PhotoCell {
    fn resize(&mut self, size: PxSize) {
        self.size = size;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

/// Logs display transitions and counts how often photos were shown.
#[derive(Debug, Default)]
pub struct Slideshow {
    pub impressions: usize,
}

impl PagerObserver<PhotoCell> for Slideshow {
    fn will_display(&mut self, cell: &mut PhotoCell, item: ItemPosition) {
        self.impressions += 1;
        info!(%item, caption = %cell.caption, width = cell.size.width.raw(), "photo shown");
    }

    fn did_end_displaying(&mut self, cell: &mut PhotoCell, item: ItemPosition) {
        info!(%item, caption = %cell.caption, "photo hidden");
    }
}
