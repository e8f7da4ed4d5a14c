use kurbo::{Circle, RoundedRect, Shape};

use crate::foundation::core::{BezPath, Point, Rect};

const TOLERANCE: f64 = 0.1;

/// Circle of `radius + offset` around `center`.
///
/// A negative offset deflates the circle; clipping twice with different offsets leaves a ring.
pub fn circle_path(center: Point, radius: f64, offset: f64) -> BezPath {
    let r = (radius + offset).max(0.0);
    Circle::new(center, r).to_path(TOLERANCE)
}

/// Rounded rectangle grown by `offset` on every side.
///
/// `corner_radius` is in pixels; callers derive it as a fraction of the avatar radius.
pub fn rounded_rect_path(rect: Rect, corner_radius: f64, offset: f64) -> BezPath {
    let grown = Rect::new(
        rect.x0 - offset,
        rect.y0 - offset,
        rect.x1 + offset,
        rect.y1 + offset,
    );
    let grown = if grown.width() < 0.0 || grown.height() < 0.0 {
        Rect::from_center_size(rect.center(), (0.0, 0.0))
    } else {
        grown
    };
    let max_corner = grown.width().min(grown.height()) / 2.0;
    RoundedRect::from_rect(grown, corner_radius.clamp(0.0, max_corner)).to_path(TOLERANCE)
}

/// Avatar clip: rounded when `border_radius` is set and positive, circular otherwise.
///
/// `origin` is the top-left of the avatar's bounding square of side `2 * radius`.
pub fn avatar_clip_path(
    origin: Point,
    radius: f64,
    border_radius: Option<f64>,
    offset: f64,
) -> BezPath {
    let square = Rect::new(
        origin.x,
        origin.y,
        origin.x + radius * 2.0,
        origin.y + radius * 2.0,
    );
    match border_radius {
        Some(fraction) if fraction > 0.0 => {
            rounded_rect_path(square, fraction * radius, offset)
        }
        _ => circle_path(square.center(), radius, offset),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
