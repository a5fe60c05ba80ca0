//! Headless Carousel Demo
//!
//! Drives a primary slider and its thumbs strip against in-memory markup:
//! - Arrow navigation with infinite wrap-around
//! - Thumbs following the primary over the message bus
//! - A thumb click steering the primary
//! - Autoplay advancing on a virtual clock, paused while hovered
//!
//! Run with: RUST_LOG=coral_scroll=debug cargo run -p coral_scroll --example headless_carousel

use std::time::{Duration, Instant};

use anyhow::Result;
use coral_core::bus::{BusEvent, MessageBus, ScrolledToSlide};
use coral_core::ids::SlideId;
use coral_core::layout::Axis;
use coral_scroll::dom::DomSurface;
use coral_scroll::{MemoryDom, Slider};

const SLIDE_COUNT: usize = 5;
const SLIDE_WIDTH: f32 = 400.0;
const THUMB_WIDTH: f32 = 80.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let bus = MessageBus::new();
    let _log = bus.subscribe::<ScrolledToSlide>(|msg, _| {
        let event = BusEvent::ScrolledToSlide(msg.clone());
        match event.to_detail_json() {
            Ok(detail) => tracing::info!(event = event.name(), %detail, "bus"),
            Err(err) => tracing::warn!(%err, "bus: detail not serializable"),
        }
    });

    let t0 = Instant::now();

    let primary = Slider::mount(
        MemoryDom::new(SLIDE_WIDTH)
            .with_slides(SLIDE_COUNT, SLIDE_WIDTH)
            .with_arrows()
            .with_indicator()
            .with_grab_overlay()
            .with_root_class("gallery")
            .with_root_data("infiniteScroll", "true")
            .with_root_data("thumbs", "gallery-thumbs")
            .with_root_data("autoScroll", "3000"),
        &bus,
        t0,
    )?;

    let thumbs = Slider::mount(
        MemoryDom::new(THUMB_WIDTH * 3.0)
            .with_slides(SLIDE_COUNT, THUMB_WIDTH)
            .with_root_class("gallery-thumbs")
            .with_root_data("isThumbsSlider", "true")
            .with_root_data("thumbsParentClass", "gallery"),
        &bus,
        t0,
    )?;

    report("mounted", &primary, &thumbs);

    primary.previous(t0);
    report("previous (wraps to the end)", &primary, &thumbs);

    primary.next(t0);
    report("next (wraps to the start)", &primary, &thumbs);

    thumbs.on_slide_click(&SlideId::from("slide-3"), t0);
    report("thumb 3 clicked", &primary, &thumbs);

    // Autoplay on a virtual clock
    let mut now = t0;
    let step = Duration::from_millis(50);
    while now < t0 + Duration::from_secs(7) {
        now += step;
        primary.tick(now);
        thumbs.tick(now);
    }
    report("after 7s of autoplay", &primary, &thumbs);

    primary.on_pointer_enter(now);
    for _ in 0..100 {
        now += step;
        primary.tick(now);
    }
    report("hovered for 5s", &primary, &thumbs);
    primary.on_pointer_leave(now);

    Ok(())
}

fn report(label: &str, primary: &Slider<MemoryDom>, thumbs: &Slider<MemoryDom>) {
    let state = primary.state();
    let scroll = primary.with_dom(|dom| dom.scroll_offset(Axis::Horizontal));
    let dots = primary.with_dom(MemoryDom::active_dots);
    tracing::info!(
        active = ?state.active_slide_id,
        scroll,
        ?dots,
        paused = state.is_autoplay_paused,
        thumb = thumbs.state().shadow_active_index,
        "{label}"
    );
}
