//! Drives an infinite photo carousel with a simulated host view.
mod gallery;

use tessera_carousel::{
    InfinitePager, ItemPosition, PagerArgs, Px, PxSize, ScrollRequest, SlotPosition,
};
use tracing::{info, info_span};

use crate::gallery::{Album, Gallery, PHOTO, PhotoCell, Slideshow};

/// Frames used by the simulated host for one scroll animation.
const FRAMES: i32 = 6;

type Carousel = InfinitePager<Gallery, Slideshow>;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(
            "error,example=info,tessera_carousel=info",
        ) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

/// Moves the host viewport by `distance` over a few frames, feeding every
/// intermediate offset back to the carousel like a scroll view would.
fn scroll_by(carousel: &mut Carousel, distance: Px) {
    let _span = info_span!("scroll", distance = distance.raw()).entered();
    let per_frame = distance.raw() / FRAMES;
    let mut travelled = 0;
    for frame in 1..=FRAMES {
        let delta = if frame == FRAMES {
            distance.raw() - travelled
        } else {
            per_frame
        };
        travelled += delta;
        let offset = carousel.content_offset() + Px(delta);
        carousel.on_scroll_offset_changed(offset);
        carousel.layout();
    }
}

fn swipe(carousel: &mut Carousel, pages: i32) {
    let step = carousel.page_step();
    let distance = if pages < 0 { -step } else { step };
    for _ in 0..pages.abs() {
        scroll_by(carousel, distance);
        log_current(carousel);
    }
}

fn apply(carousel: &mut Carousel, request: ScrollRequest) {
    if request.animated {
        let distance = request.offset - carousel.content_offset();
        scroll_by(carousel, distance);
    } else {
        carousel.layout();
    }
    log_current(carousel);
}

fn log_current(carousel: &Carousel) {
    let caption = carousel
        .visible_center_cell()
        .map(|cell| cell.caption.as_str())
        .unwrap_or("<empty>");
    info!(
        offset = carousel.content_offset().raw(),
        visible = carousel.visible_cells().len(),
        caption,
        "current page"
    );
}

fn main() {
    init_tracing();

    let gallery = Gallery::new(vec![
        Album {
            title: "Lisbon",
            photos: vec!["tram", "alfama", "sunset"],
        },
        Album {
            title: "Empty roll",
            photos: Vec::new(),
        },
        Album {
            title: "Kyoto",
            photos: vec!["torii", "bamboo"],
        },
    ])
    .with_cover(ItemPosition::new(2, 1));

    let args = PagerArgs::default()
        .page_spacing(Px(12))
        .content_inset(Px(32));
    let mut carousel = InfinitePager::with_observer(args, gallery, Slideshow::default());
    carousel.register_template(PHOTO, PhotoCell::default());
    carousel.set_viewport(PxSize::new(Px(390), Px(240)));
    carousel.layout();
    log_current(&carousel);

    // Wrap from the last Kyoto photo to Lisbon, then back past the empty album.
    swipe(&mut carousel, 2);
    swipe(&mut carousel, -3);

    let request = carousel.set_position(SlotPosition::Right, Some(ItemPosition::new(0, 2)), true);
    apply(&mut carousel, request);

    let request = carousel.set_position(SlotPosition::Center, Some(ItemPosition::new(2, 0)), false);
    apply(&mut carousel, request);

    carousel.data_source_mut().add_album(Album {
        title: "Oslo",
        photos: vec!["fjord", "opera"],
    });
    carousel.reload_data();
    carousel.layout();
    swipe(&mut carousel, 4);

    carousel.set_viewport(PxSize::new(Px(844), Px(390)));
    carousel.layout();
    log_current(&carousel);

    info!(
        impressions = carousel.observer().impressions,
        "carousel demo finished"
    );
}
