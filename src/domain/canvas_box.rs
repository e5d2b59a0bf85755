//! Canvas Box Entity
//!
//! A positioned, resizable snippet on the free-form canvas.
//! Vector order is z-order: the last box is drawn on top.

use leptos_pointer::{Bounds, Rect};
use serde::{Deserialize, Serialize};

use super::entity::{position_of, DomainResult, Entity};
use super::naming::fresh_id;

pub const DEFAULT_W: f64 = 240.0;
pub const DEFAULT_H: f64 = 140.0;
/// Offset between consecutively added boxes
const CASCADE_PX: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasBox {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
}

impl Entity for CanvasBox {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CanvasBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }
}

/// Add a box offset from the last one, wrapping back when it would leave the canvas
pub fn add_box(boxes: &mut Vec<CanvasBox>, text: &str, now: i64, bounds: &Bounds) -> CanvasBox {
    let (mut x, mut y) = match boxes.last() {
        Some(last) => (last.x + CASCADE_PX, last.y + CASCADE_PX),
        None => (CASCADE_PX, CASCADE_PX),
    };
    if x + DEFAULT_W > bounds.extent_w || y + DEFAULT_H > bounds.extent_h {
        x = CASCADE_PX;
        y = CASCADE_PX;
    }
    let rect = Rect::new(x, y, DEFAULT_W, DEFAULT_H).clamped(bounds);
    let mut new_box = CanvasBox {
        id: fresh_id("box", now, boxes.iter().map(|b| b.id.as_str())),
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
        text: text.to_string(),
    };
    new_box.set_rect(rect);
    boxes.push(new_box.clone());
    new_box
}

pub fn update_box_text(boxes: &mut [CanvasBox], id: &str, text: &str) -> DomainResult<()> {
    let idx = position_of(boxes, id)?;
    boxes[idx].text = text.to_string();
    Ok(())
}

pub fn delete_box(boxes: &mut Vec<CanvasBox>, id: &str) -> DomainResult<CanvasBox> {
    let idx = position_of(boxes, id)?;
    Ok(boxes.remove(idx))
}

/// Move a box to the top of the z-order
pub fn raise_box(boxes: &mut Vec<CanvasBox>, id: &str) -> DomainResult<()> {
    let idx = position_of(boxes, id)?;
    if idx + 1 != boxes.len() {
        let b = boxes.remove(idx);
        boxes.push(b);
    }
    Ok(())
}

/// Store a new rect, clamped into bounds
pub fn set_box_rect(boxes: &mut [CanvasBox], id: &str, rect: Rect, bounds: &Bounds) -> DomainResult<Rect> {
    let idx = position_of(boxes, id)?;
    let rect = rect.clamped(bounds);
    boxes[idx].set_rect(rect);
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_pointer::geometry::{MIN_W, EXTENT_W};

    #[test]
    fn test_add_box_cascades() {
        let bounds = Bounds::default();
        let mut boxes = Vec::new();
        let a = add_box(&mut boxes, "a", 1, &bounds);
        let b = add_box(&mut boxes, "b", 1, &bounds);
        assert_eq!((a.x, a.y), (24.0, 24.0));
        assert_eq!((b.x, b.y), (48.0, 48.0));
        assert_eq!(b.w, DEFAULT_W);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_box_wraps_at_extent() {
        let bounds = Bounds::default();
        let mut boxes = vec![CanvasBox {
            id: "edge".into(),
            x: EXTENT_W - 100.0,
            y: 10.0,
            w: 120.0,
            h: 60.0,
            text: String::new(),
        }];
        let added = add_box(&mut boxes, "next", 2, &bounds);
        assert_eq!((added.x, added.y), (24.0, 24.0));
    }

    #[test]
    fn test_raise_moves_to_end() {
        let bounds = Bounds::default();
        let mut boxes = Vec::new();
        let a = add_box(&mut boxes, "a", 1, &bounds);
        add_box(&mut boxes, "b", 2, &bounds);
        raise_box(&mut boxes, &a.id).unwrap();
        assert_eq!(boxes.last().unwrap().id, a.id);
        assert_eq!(boxes.len(), 2);
    }

    #[test]
    fn test_set_rect_clamps() {
        let bounds = Bounds::default();
        let mut boxes = Vec::new();
        let a = add_box(&mut boxes, "a", 1, &bounds);
        let stored = set_box_rect(&mut boxes, &a.id, Rect::new(-10.0, 5.0, 20.0, 100.0), &bounds).unwrap();
        assert_eq!(stored.x, 0.0);
        assert_eq!(stored.w, MIN_W);
        assert_eq!(boxes[0].rect(), stored);
    }

    #[test]
    fn test_text_and_delete() {
        let bounds = Bounds::default();
        let mut boxes = Vec::new();
        let a = add_box(&mut boxes, "a", 1, &bounds);
        update_box_text(&mut boxes, &a.id, "changed").unwrap();
        assert_eq!(boxes[0].text, "changed");
        assert!(update_box_text(&mut boxes, "nope", "x").is_err());
        delete_box(&mut boxes, &a.id).unwrap();
        assert!(boxes.is_empty());
    }
}
