//! Leptos Pointer Utilities
//!
//! Drag and resize for absolutely positioned boxes using pointer events.
//! Uses a movement threshold to distinguish click from drag, and locks
//! page scrolling while a gesture is active.

pub mod geometry;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub use geometry::{apply_drag, apply_resize, hit_test, snap, Bounds, Constraints, Edges, Hit, Interaction, Rect};

/// Movement threshold in pixels to start a gesture
const DRAG_THRESHOLD_PX: f64 = 4.0;

/// A pointer sequence that started on a box
#[derive(Clone, Debug, PartialEq)]
pub struct Gesture {
    pub id: String,
    pub interaction: Interaction,
    pub start_x: f64,
    pub start_y: f64,
    pub start_rect: Rect,
}

impl Gesture {
    /// Rect for the current pointer position, before constraints
    pub fn rect_at(&self, client_x: f64, client_y: f64, bounds: &Bounds) -> Rect {
        let dx = client_x - self.start_x;
        let dy = client_y - self.start_y;
        match self.interaction {
            Interaction::Move => apply_drag(self.start_rect, dx, dy, bounds),
            Interaction::Resize(edges) => apply_resize(self.start_rect, edges, dx, dy, bounds),
        }
    }

    /// Whether the pointer moved far enough to count as a drag
    pub fn passed_threshold(&self, client_x: f64, client_y: f64) -> bool {
        (client_x - self.start_x).abs() > DRAG_THRESHOLD_PX
            || (client_y - self.start_y).abs() > DRAG_THRESHOLD_PX
    }
}

/// How a pointer sequence ended
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEnd {
    /// Never passed the threshold
    Click(String),
    /// Final rect after a drag or resize
    Commit(String, Rect),
}

/// Pointer state signals
#[derive(Clone, Copy)]
pub struct PointerSignals {
    /// Pending or active gesture (pointerdown seen, pointerup not yet)
    pub gesture_read: ReadSignal<Option<Gesture>>,
    pub gesture_write: WriteSignal<Option<Gesture>>,
    /// Gesture passed the threshold
    pub active_read: ReadSignal<bool>,
    pub active_write: WriteSignal<bool>,
    /// Last rect produced while active
    pub live_rect_read: ReadSignal<Option<Rect>>,
    pub live_rect_write: WriteSignal<Option<Rect>>,
}

pub fn create_pointer_signals() -> PointerSignals {
    let (gesture_read, gesture_write) = signal(None::<Gesture>);
    let (active_read, active_write) = signal(false);
    let (live_rect_read, live_rect_write) = signal(None::<Rect>);
    PointerSignals {
        gesture_read,
        gesture_write,
        active_read,
        active_write,
        live_rect_read,
        live_rect_write,
    }
}

impl PointerSignals {
    /// Id of the box being dragged or resized, if active
    pub fn active_id(&self) -> Option<String> {
        if self.active_read.get() {
            self.gesture_read.get().map(|g| g.id)
        } else {
            None
        }
    }
}

/// Presses inside these never start a gesture
const IGNORE_SELECTOR: &str = "input, textarea, button, select, [data-no-gesture]";

/// Create pointerdown handler for a box
///
/// `rect` returns the box's current rect. Presses on form controls,
/// buttons and `data-no-gesture` elements are ignored so editing inside a
/// box keeps working.
pub fn make_on_pointerdown<F>(ptr: PointerSignals, id: String, rect: F) -> impl Fn(web_sys::PointerEvent) + 'static
where
    F: Fn() -> Rect + 'static,
{
    move |ev: web_sys::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
            if matches!(el.closest(IGNORE_SELECTOR), Ok(Some(_))) {
                return;
            }
        }

        let start_rect = rect();
        let Some(local) = local_point(&ev) else { return };
        let interaction = match hit_test(start_rect.w, start_rect.h, local.0, local.1, geometry::HANDLE_PX) {
            Hit::None => return,
            Hit::Move => Interaction::Move,
            Hit::Resize(edges) => Interaction::Resize(edges),
        };

        ev.prevent_default();
        ptr.gesture_write.set(Some(Gesture {
            id: id.clone(),
            interaction,
            start_x: ev.client_x() as f64,
            start_y: ev.client_y() as f64,
            start_rect,
        }));
    }
}

/// Cursor for a pointer hovering over a box
pub fn make_on_pointermove_cursor(rect: impl Fn() -> Rect + 'static) -> impl Fn(web_sys::PointerEvent) + 'static {
    move |ev: web_sys::PointerEvent| {
        let Some((px, py)) = local_point(&ev) else { return };
        let r = rect();
        let cursor = match hit_test(r.w, r.h, px, py, geometry::HANDLE_PX) {
            Hit::Resize(edges) => edges.cursor(),
            Hit::Move => "grab",
            Hit::None => "default",
        };
        if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
            let _ = el.style().set_property("cursor", cursor);
        }
    }
}

/// Pointer position relative to the element the handler is bound on
fn local_point(ev: &web_sys::PointerEvent) -> Option<(f64, f64)> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let bounds = el.get_bounding_client_rect();
    Some((ev.client_x() as f64 - bounds.left(), ev.client_y() as f64 - bounds.top()))
}

/// Bind global pointermove/pointerup/pointercancel handlers
///
/// `constraints` is read on every move so settings changes apply live.
/// `on_update` fires for each move while active, `on_end` once per sequence.
pub fn bind_global_pointer<C, U, E>(ptr: PointerSignals, constraints: C, on_update: U, on_end: E)
where
    C: Fn() -> Constraints + 'static,
    U: Fn(&str, Rect) + 'static,
    E: Fn(GestureEnd) + 'static,
{
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;

    let on_pointermove = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |ev: web_sys::PointerEvent| {
        let Some(gesture) = ptr.gesture_read.get_untracked() else { return };
        let (cx, cy) = (ev.client_x() as f64, ev.client_y() as f64);

        if !ptr.active_read.get_untracked() {
            if !gesture.passed_threshold(cx, cy) {
                return;
            }
            ptr.active_write.set(true);
            lock_scroll();
        }

        let c = constraints();
        let rect = c.apply(gesture.rect_at(cx, cy, &c.bounds), gesture.interaction);
        ptr.live_rect_write.set(Some(rect));
        on_update(&gesture.id, rect);
    });

    let finish = move || {
        let gesture = ptr.gesture_read.get_untracked();
        let was_active = ptr.active_read.get_untracked();
        let live = ptr.live_rect_read.get_untracked();

        ptr.gesture_write.set(None);
        ptr.active_write.set(false);
        ptr.live_rect_write.set(None);

        if let Some(gesture) = gesture {
            if was_active {
                unlock_scroll();
                let rect = live.unwrap_or(gesture.start_rect);
                on_end(GestureEnd::Commit(gesture.id, rect));
            } else {
                on_end(GestureEnd::Click(gesture.id));
            }
        }
    };
    let finish = Rc::new(finish);

    let up_finish = finish.clone();
    let on_pointerup = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
        up_finish();
    });

    // A cancelled sequence is never a click
    let on_pointercancel = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
        if ptr.active_read.get_untracked() {
            finish();
        } else {
            ptr.gesture_write.set(None);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("pointermove", on_pointermove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("pointerup", on_pointerup.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("pointercancel", on_pointercancel.as_ref().unchecked_ref());
    }
    on_pointermove.forget();
    on_pointerup.forget();
    on_pointercancel.forget();
}

/// Stop the page from scrolling under an active gesture
pub fn lock_scroll() {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", "hidden");
        let _ = body.style().set_property("user-select", "none");
    }
}

pub fn unlock_scroll() {
    if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.style().remove_property("overflow");
        let _ = body.style().remove_property("user-select");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(interaction: Interaction) -> Gesture {
        Gesture {
            id: "b1".to_string(),
            interaction,
            start_x: 500.0,
            start_y: 300.0,
            start_rect: Rect::new(100.0, 100.0, 200.0, 100.0),
        }
    }

    #[test]
    fn test_threshold() {
        let g = gesture(Interaction::Move);
        assert!(!g.passed_threshold(503.0, 297.0));
        assert!(g.passed_threshold(505.0, 300.0));
        assert!(g.passed_threshold(500.0, 290.0));
    }

    #[test]
    fn test_rect_at_move_and_resize() {
        let bounds = Bounds::default();
        let moved = gesture(Interaction::Move).rect_at(550.0, 320.0, &bounds);
        assert_eq!(moved, Rect::new(150.0, 120.0, 200.0, 100.0));

        let resized = gesture(Interaction::Resize(Edges::BOTTOM_RIGHT)).rect_at(550.0, 320.0, &bounds);
        assert_eq!(resized, Rect::new(100.0, 100.0, 250.0, 120.0));
    }
}
