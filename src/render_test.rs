#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::{Size, Vector};
use crate::drop::Payload;
use crate::engine::EngineCore;
use crate::input::TapTarget;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Background { url: String, origin: Point, zoom: f64 },
    Item { text: String, center: Point, font_size: f64 },
    Outline { center: Point, side: f64, line_width: f64 },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Renderer for Recorder {
    type Error = String;

    fn draw_background(&mut self, url: &str, origin: Point, zoom: f64) -> Result<(), String> {
        self.calls.push(Call::Background { url: url.into(), origin, zoom });
        Ok(())
    }

    fn draw_item(&mut self, text: &str, center: Point, font_size: f64) -> Result<(), String> {
        self.calls.push(Call::Item { text: text.into(), center, font_size });
        Ok(())
    }

    fn draw_selection_outline(&mut self, center: Point, side: f64, line_width: f64) -> Result<(), String> {
        self.calls.push(Call::Outline { center, side, line_width });
        Ok(())
    }
}

/// Fails on the first item it is asked to draw.
struct Failing;

impl Renderer for Failing {
    type Error = &'static str;

    fn draw_background(&mut self, _: &str, _: Point, _: f64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn draw_item(&mut self, _: &str, _: Point, _: f64) -> Result<(), Self::Error> {
        Err("out of ink")
    }

    fn draw_selection_outline(&mut self, _: Point, _: f64, _: f64) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn engine() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_view_size(Size::new(400.0, 400.0));
    core
}

fn drop_text(core: &mut EngineCore, x: f64, y: f64, text: &str) -> uuid::Uuid {
    core.on_drop(Point::new(x, y), &[Payload::Text(text.into())]);
    core.doc().items().last().map(|i| i.id).unwrap()
}

#[test]
fn empty_document_draws_nothing() {
    let mut rec = Recorder::default();
    engine().render(&mut rec).unwrap();
    assert!(rec.calls.is_empty());
}

#[test]
fn background_is_drawn_first_at_document_origin() {
    let mut core = engine();
    drop_text(&mut core, 100.0, 100.0, "🙂");
    core.on_drop(Point::zero(), &[Payload::Image("bg.png".into())]);
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert_eq!(
        rec.calls[0],
        Call::Background { url: "bg.png".into(), origin: Point::new(200.0, 200.0), zoom: 1.0 }
    );
    assert!(matches!(rec.calls[1], Call::Item { .. }));
}

#[test]
fn items_are_drawn_in_document_order_at_screen_positions() {
    let mut core = engine();
    drop_text(&mut core, 100.0, 100.0, "🙂");
    drop_text(&mut core, 300.0, 250.0, "🐶");
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert_eq!(
        rec.calls,
        vec![
            Call::Item { text: "🙂".into(), center: Point::new(100.0, 100.0), font_size: 40.0 },
            Call::Item { text: "🐶".into(), center: Point::new(300.0, 250.0), font_size: 40.0 },
        ]
    );
}

#[test]
fn selected_item_gets_outline_after_glyph() {
    let mut core = engine();
    let id = drop_text(&mut core, 200.0, 200.0, "🙂");
    core.on_tap(1, TapTarget::Item(id));
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert_eq!(rec.calls.len(), 2);
    let Call::Outline { center, side, line_width } = rec.calls[1].clone() else {
        panic!("expected outline, got {:?}", rec.calls[1]);
    };
    assert_eq!(center, Point::new(200.0, 200.0));
    assert!((side - 48.0).abs() < 1e-9);
    assert_eq!(line_width, 3.0);
}

#[test]
fn zoom_scales_font_and_outline_width() {
    let mut core = engine();
    let id = drop_text(&mut core, 250.0, 200.0, "🙂");
    core.on_tap(1, TapTarget::Item(id));
    core.on_tap(1, TapTarget::Item(id));
    core.begin_pinch();
    core.end_pinch(2.0);
    core.on_tap(1, TapTarget::Item(id));
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert_eq!(
        rec.calls[0],
        Call::Item { text: "🙂".into(), center: Point::new(300.0, 200.0), font_size: 80.0 }
    );
    assert!(matches!(rec.calls[1], Call::Outline { line_width, .. } if line_width == 6.0));
}

#[test]
fn live_drag_offsets_selected_items_only() {
    let mut core = engine();
    let moving = drop_text(&mut core, 100.0, 100.0, "🙂");
    drop_text(&mut core, 300.0, 300.0, "🐶");
    core.on_tap(1, TapTarget::Item(moving));
    core.begin_drag();
    core.update_drag(Vector::new(10.0, -5.0));
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert!(rec.calls.contains(&Call::Item { text: "🙂".into(), center: Point::new(110.0, 95.0), font_size: 40.0 }));
    assert!(rec.calls.contains(&Call::Item { text: "🐶".into(), center: Point::new(300.0, 300.0), font_size: 40.0 }));
}

#[test]
fn live_pinch_scales_selected_items_and_outline() {
    let mut core = engine();
    let id = drop_text(&mut core, 200.0, 200.0, "🙂");
    core.on_tap(1, TapTarget::Item(id));
    core.begin_pinch();
    core.update_pinch(1.5);
    let mut rec = Recorder::default();
    core.render(&mut rec).unwrap();
    assert_eq!(rec.calls[0], Call::Item { text: "🙂".into(), center: Point::new(200.0, 200.0), font_size: 60.0 });
    let Call::Outline { side, line_width, .. } = rec.calls[1].clone() else {
        panic!("expected outline");
    };
    assert!((side - 72.0).abs() < 1e-9);
    assert_eq!(line_width, 3.0);
}

#[test]
fn renderer_error_propagates() {
    let mut core = engine();
    drop_text(&mut core, 0.0, 0.0, "🙂");
    assert_eq!(core.render(&mut Failing), Err("out of ink"));
}
