//! Box Geometry
//!
//! Pure rectangle math for drag, resize, edge hit-testing and grid snapping.
//! Nothing here touches the DOM, so it is tested natively.

use serde::{Deserialize, Serialize};

/// Smallest box width in pixels
pub const MIN_W: f64 = 120.0;
/// Smallest box height in pixels
pub const MIN_H: f64 = 60.0;
pub const MAX_W: f64 = 1200.0;
pub const MAX_H: f64 = 900.0;
/// Canvas extent
pub const EXTENT_W: f64 = 4000.0;
pub const EXTENT_H: f64 = 3000.0;
/// Thickness of the resize handle band along each edge
pub const HANDLE_PX: f64 = 8.0;

/// Position and size of a box in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Clamp size into the limits, then position into the extent
    pub fn clamped(self, bounds: &Bounds) -> Self {
        let w = bound(finite_or(self.w, bounds.min_w), bounds.min_w, bounds.max_w.min(bounds.extent_w));
        let h = bound(finite_or(self.h, bounds.min_h), bounds.min_h, bounds.max_h.min(bounds.extent_h));
        let x = bound(finite_or(self.x, 0.0), 0.0, bounds.extent_w - w);
        let y = bound(finite_or(self.y, 0.0), 0.0, bounds.extent_h - h);
        Self { x, y, w, h }
    }

    /// Snap the position to the grid and keep the size
    pub fn snapped_position(self, grid: f64, bounds: &Bounds) -> Self {
        Self {
            x: snap(self.x, grid),
            y: snap(self.y, grid),
            ..self
        }
        .clamped(bounds)
    }

    /// Snap only the moving edges; the opposite edges stay where they are
    pub fn snapped_edges(self, edges: Edges, grid: f64, bounds: &Bounds) -> Self {
        let (x, w) = snap_axis(
            self.x,
            self.w,
            edges.left,
            edges.right,
            grid,
            bounds.min_w,
            bounds.max_w,
            bounds.extent_w,
        );
        let (y, h) = snap_axis(
            self.y,
            self.h,
            edges.top,
            edges.bottom,
            grid,
            bounds.min_h,
            bounds.max_h,
            bounds.extent_h,
        );
        Self { x, y, w, h }
    }
}

/// Size limits and canvas extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_w: f64,
    pub min_h: f64,
    pub max_w: f64,
    pub max_h: f64,
    pub extent_w: f64,
    pub extent_h: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_w: MIN_W,
            min_h: MIN_H,
            max_w: MAX_W,
            max_h: MAX_H,
            extent_w: EXTENT_W,
            extent_h: EXTENT_H,
        }
    }
}

/// Bounds plus optional snapping, applied after every pointer move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub bounds: Bounds,
    pub grid: Option<f64>,
}

impl Constraints {
    pub fn apply(&self, rect: Rect, interaction: Interaction) -> Rect {
        match (self.grid, interaction) {
            (Some(grid), Interaction::Move) => rect.snapped_position(grid, &self.bounds),
            (Some(grid), Interaction::Resize(edges)) => rect.snapped_edges(edges, grid, &self.bounds),
            (None, _) => rect.clamped(&self.bounds),
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            grid: None,
        }
    }
}

/// What a gesture does to the box
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Move,
    Resize(Edges),
}

/// Which edges a resize gesture moves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Edges {
    pub const RIGHT: Edges = Edges { left: false, right: true, top: false, bottom: false };
    pub const BOTTOM: Edges = Edges { left: false, right: false, top: false, bottom: true };
    pub const BOTTOM_RIGHT: Edges = Edges { left: false, right: true, top: false, bottom: true };
    pub const TOP_LEFT: Edges = Edges { left: true, right: false, top: true, bottom: false };

    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    /// CSS cursor for hovering this edge combination
    pub fn cursor(&self) -> &'static str {
        match (self.left, self.right, self.top, self.bottom) {
            (true, _, true, _) | (_, true, _, true) => "nwse-resize",
            (true, _, _, true) | (_, true, true, _) => "nesw-resize",
            (true, _, _, _) | (_, true, _, _) => "ew-resize",
            (_, _, true, _) | (_, _, _, true) => "ns-resize",
            _ => "default",
        }
    }
}

/// Result of hit-testing a point against a box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    None,
    Move,
    Resize(Edges),
}

/// Classify a point given in the box's own coordinates
///
/// When a box is thinner than two handles, right/bottom win.
pub fn hit_test(w: f64, h: f64, px: f64, py: f64, handle: f64) -> Hit {
    if px < 0.0 || py < 0.0 || px > w || py > h {
        return Hit::None;
    }
    let right = w - px <= handle;
    let bottom = h - py <= handle;
    let edges = Edges {
        left: px <= handle && !right,
        right,
        top: py <= handle && !bottom,
        bottom,
    };
    if edges.any() {
        Hit::Resize(edges)
    } else {
        Hit::Move
    }
}

/// Round to the nearest grid multiple; a non-positive grid is identity
pub fn snap(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !grid.is_finite() {
        return value;
    }
    (value / grid).round() * grid
}

/// Translate the starting rect by the pointer delta
pub fn apply_drag(start: Rect, dx: f64, dy: f64, bounds: &Bounds) -> Rect {
    Rect {
        x: start.x + dx,
        y: start.y + dy,
        ..start
    }
    .clamped(bounds)
}

/// Move the selected edges by the pointer delta
///
/// The opposite edge stays put, including when a size limit is hit.
pub fn apply_resize(start: Rect, edges: Edges, dx: f64, dy: f64, bounds: &Bounds) -> Rect {
    let (x, w) = resize_axis(
        start.x,
        start.w,
        dx,
        edges.left,
        edges.right,
        bounds.min_w,
        bounds.max_w,
        bounds.extent_w,
    );
    let (y, h) = resize_axis(
        start.y,
        start.h,
        dy,
        edges.top,
        edges.bottom,
        bounds.min_h,
        bounds.max_h,
        bounds.extent_h,
    );
    Rect { x, y, w, h }
}

#[allow(clippy::too_many_arguments)]
fn resize_axis(
    pos: f64,
    len: f64,
    delta: f64,
    low: bool,
    high: bool,
    min: f64,
    max: f64,
    extent: f64,
) -> (f64, f64) {
    if high {
        let len = bound(len + delta, min, max.min(extent - pos));
        (pos, len)
    } else if low {
        let far = pos + len;
        let new_len = bound(len - delta, min, max);
        let new_pos = far - new_len;
        if new_pos < 0.0 {
            (0.0, far)
        } else {
            (new_pos, new_len)
        }
    } else {
        (pos, len)
    }
}

#[allow(clippy::too_many_arguments)]
fn snap_axis(
    pos: f64,
    len: f64,
    low: bool,
    high: bool,
    grid: f64,
    min: f64,
    max: f64,
    extent: f64,
) -> (f64, f64) {
    if high {
        let far = snap(pos + len, grid);
        (pos, bound(far - pos, min, max.min(extent - pos)))
    } else if low {
        let far = pos + len;
        let new_len = bound(far - snap(pos, grid), min, max);
        let new_pos = far - new_len;
        if new_pos < 0.0 {
            (0.0, far)
        } else {
            (new_pos, new_len)
        }
    } else {
        (pos, len)
    }
}

fn bound(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi.max(lo))
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(13.0, 10.0), 10.0);
        assert_eq!(snap(15.0, 10.0), 20.0);
        assert_eq!(snap(-4.0, 10.0), -0.0);
        assert_eq!(snap(13.0, 0.0), 13.0);
    }

    #[test]
    fn test_clamped_limits_size_and_position() {
        let bounds = Bounds::default();
        let r = Rect::new(-50.0, 5000.0, 10.0, 5000.0).clamped(&bounds);
        assert_eq!(r.w, MIN_W);
        assert_eq!(r.h, MAX_H);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, EXTENT_H - MAX_H);
    }

    #[test]
    fn test_clamped_replaces_nan() {
        let r = Rect::new(f64::NAN, 10.0, f64::INFINITY, 100.0).clamped(&Bounds::default());
        assert_eq!(r.x, 0.0);
        assert_eq!(r.w, MIN_W);
    }

    #[test]
    fn test_hit_test_regions() {
        assert_eq!(hit_test(200.0, 100.0, 100.0, 50.0, 8.0), Hit::Move);
        assert_eq!(hit_test(200.0, 100.0, 250.0, 50.0, 8.0), Hit::None);
        assert_eq!(hit_test(200.0, 100.0, 196.0, 50.0, 8.0), Hit::Resize(Edges::RIGHT));
        assert_eq!(hit_test(200.0, 100.0, 198.0, 97.0, 8.0), Hit::Resize(Edges::BOTTOM_RIGHT));
        assert_eq!(hit_test(200.0, 100.0, 2.0, 3.0, 8.0), Hit::Resize(Edges::TOP_LEFT));
    }

    #[test]
    fn test_hit_test_thin_box_prefers_right() {
        match hit_test(10.0, 100.0, 5.0, 50.0, 8.0) {
            Hit::Resize(e) => {
                assert!(e.right);
                assert!(!e.left);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_drag_stays_in_extent() {
        let bounds = Bounds::default();
        let start = Rect::new(100.0, 100.0, 200.0, 100.0);
        let moved = apply_drag(start, 30.0, -20.0, &bounds);
        assert_eq!(moved, Rect::new(130.0, 80.0, 200.0, 100.0));

        let far = apply_drag(start, 10_000.0, -10_000.0, &bounds);
        assert_eq!(far.x, EXTENT_W - 200.0);
        assert_eq!(far.y, 0.0);
    }

    #[test]
    fn test_resize_right_respects_limits() {
        let bounds = Bounds::default();
        let start = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(apply_resize(start, Edges::RIGHT, 50.0, 0.0, &bounds).w, 250.0);
        assert_eq!(apply_resize(start, Edges::RIGHT, -500.0, 0.0, &bounds).w, MIN_W);
        assert_eq!(apply_resize(start, Edges::RIGHT, 5000.0, 0.0, &bounds).w, MAX_W);
    }

    #[test]
    fn test_resize_left_keeps_right_edge_fixed() {
        let bounds = Bounds::default();
        let start = Rect::new(100.0, 100.0, 200.0, 100.0);

        let grown = apply_resize(start, Edges::TOP_LEFT, -40.0, -10.0, &bounds);
        assert_eq!(grown.right(), start.right());
        assert_eq!(grown.bottom(), start.bottom());
        assert_eq!(grown.w, 240.0);
        assert_eq!(grown.h, 110.0);

        let shrunk = apply_resize(start, Edges::TOP_LEFT, 500.0, 500.0, &bounds);
        assert_eq!(shrunk.w, MIN_W);
        assert_eq!(shrunk.right(), start.right());
        assert_eq!(shrunk.h, MIN_H);
        assert_eq!(shrunk.bottom(), start.bottom());
    }

    #[test]
    fn test_resize_left_stops_at_origin() {
        let bounds = Bounds::default();
        let start = Rect::new(20.0, 0.0, 200.0, 100.0);
        let r = apply_resize(start, Edges::TOP_LEFT, -100.0, 0.0, &bounds);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.w, 220.0);
    }

    fn snapping() -> Constraints {
        Constraints {
            bounds: Bounds::default(),
            grid: Some(20.0),
        }
    }

    #[test]
    fn test_snapped_drag_keeps_size() {
        let start = Rect::new(107.0, 100.0, 250.0, 130.0);
        let dragged = apply_drag(start, 33.0, 0.0, &Bounds::default());
        let r = snapping().apply(dragged, Interaction::Move);
        assert_eq!(r, Rect::new(140.0, 100.0, 250.0, 130.0));
    }

    #[test]
    fn test_snapped_left_resize_keeps_right_edge() {
        let bounds = Bounds::default();
        let start = Rect::new(110.0, 100.0, 200.0, 100.0);
        let resized = apply_resize(start, Edges::TOP_LEFT, -33.0, 7.0, &bounds);
        let r = snapping().apply(resized, Interaction::Resize(Edges::TOP_LEFT));
        assert_eq!(r.x, 80.0);
        assert_eq!(r.right(), start.right());
        assert_eq!(r.y, 100.0);
        assert_eq!(r.bottom(), start.bottom());
    }

    #[test]
    fn test_snapped_right_resize_keeps_left_edge() {
        let bounds = Bounds::default();
        let start = Rect::new(105.0, 100.0, 200.0, 100.0);
        let resized = apply_resize(start, Edges::BOTTOM_RIGHT, 27.0, 13.0, &bounds);
        let r = snapping().apply(resized, Interaction::Resize(Edges::BOTTOM_RIGHT));
        assert_eq!(r.x, 105.0);
        assert_eq!(r.right(), 340.0);
        assert_eq!(r.bottom(), 220.0);
    }

    #[test]
    fn test_edges_cursor() {
        assert_eq!(Edges::BOTTOM_RIGHT.cursor(), "nwse-resize");
        assert_eq!(Edges::RIGHT.cursor(), "ew-resize");
        assert_eq!(Edges::BOTTOM.cursor(), "ns-resize");
    }
}
