//! Alpha-blended drawing primitives on top of [`Framebuffer`].
//!
//! Everything here composites through [`Framebuffer::blend_pixel`], so
//! shapes clip silently at the buffer edge. Angles for arcs and wedges are
//! always [`CompassAngle`]s (0° = up, clockwise); conversion to math
//! convention happens inside this module only.

use osd_common::angle::normalize_degrees;
use osd_common::{Color, CompassAngle};

use crate::framebuffer::Framebuffer;

/// Segment count used by [`draw_ellipse_outline`].
pub const ELLIPSE_SEGMENTS: i32 = 64;

const MIN_AUTO_SEGMENTS: i32 = 4;
const MAX_AUTO_SEGMENTS: i32 = 120;

/// Blend a single pixel.
#[inline]
pub fn draw_pixel(fb: &mut Framebuffer, x: i32, y: i32, color: Color) {
    fb.blend_pixel(x, y, color);
}

/// Bresenham line with a square stamp of half-extent `thickness / 2` at
/// every step.
pub fn draw_line(
    fb: &mut Framebuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
    thickness: f32,
) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let half = (thickness / 2.0) as i32;

    let (mut x, mut y) = (x0, y0);
    let mut err = dx - dy;
    loop {
        for ty in -half..=half {
            for tx in -half..=half {
                fb.blend_pixel(x + tx, y + ty, color);
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled disc of integer radius `(int)radius`.
pub fn draw_filled_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: f32, color: Color) {
    let r = radius as i32;
    let r_sq = r * r;
    for y in -r..=r {
        for x in -r..=r {
            if x * x + y * y <= r_sq {
                fb.blend_pixel(cx + x, cy + y, color);
            }
        }
    }
}

/// Ring between `radius - thickness/2` and `radius + thickness/2`.
pub fn draw_circle_outline(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius: f32,
    color: Color,
    thickness: f32,
) {
    let r_outer = (radius + thickness / 2.0) as i32;
    let r_inner = ((radius - thickness / 2.0) as i32).max(0);
    let (outer_sq, inner_sq) = (r_outer * r_outer, r_inner * r_inner);

    for y in -r_outer..=r_outer {
        for x in -r_outer..=r_outer {
            let d = x * x + y * y;
            if d >= inner_sq && d <= outer_sq {
                fb.blend_pixel(cx + x, cy + y, color);
            }
        }
    }
}

pub fn draw_rect_filled(fb: &mut Framebuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    for py in y..y + h {
        for px in x..x + w {
            fb.blend_pixel(px, py, color);
        }
    }
}

/// Rectangle border built from four filled bands of width `(int)thickness`.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    color: Color,
    thickness: f32,
) {
    let t = thickness as i32;
    draw_rect_filled(fb, x, y, w, t, color);
    draw_rect_filled(fb, x, y + h - t, w, t, color);
    draw_rect_filled(fb, x, y + t, t, h - 2 * t, color);
    draw_rect_filled(fb, x + w - t, y + t, t, h - 2 * t, color);
}

/// Closed ellipse approximated by [`ELLIPSE_SEGMENTS`] line segments.
pub fn draw_ellipse_outline(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius_x: f32,
    radius_y: f32,
    color: Color,
    thickness: f32,
) {
    let step = std::f32::consts::TAU / ELLIPSE_SEGMENTS as f32;
    for i in 0..ELLIPSE_SEGMENTS {
        let t1 = i as f32 * step;
        let t2 = (i + 1) as f32 * step;
        let x1 = cx + (radius_x * t1.cos()) as i32;
        let y1 = cy + (radius_y * t1.sin()) as i32;
        let x2 = cx + (radius_x * t2.cos()) as i32;
        let y2 = cy + (radius_y * t2.sin()) as i32;
        draw_line(fb, x1, y1, x2, y2, color, thickness);
    }
}

/// Segment count for an arc spanning `span_degrees` in auto mode.
pub fn auto_segments(span_degrees: f32) -> i32 {
    ((span_degrees.abs() / 3.0) as i32).clamp(MIN_AUTO_SEGMENTS, MAX_AUTO_SEGMENTS)
}

/// Screen point at compass bearing `angle` on an ellipse around (cx, cy).
#[inline]
pub fn compass_point(cx: i32, cy: i32, radius_x: f32, radius_y: f32, angle: CompassAngle) -> (i32, i32) {
    let rad = angle.to_math().radians();
    (
        cx + (radius_x * rad.cos()) as i32,
        cy - (radius_y * rad.sin()) as i32,
    )
}

/// Compass bearing of a pixel offset from a center (screen y grows down).
#[inline]
pub fn offset_bearing(dx: f32, dy: f32) -> CompassAngle {
    // atan2(east, north) is already clockwise-from-up
    CompassAngle(normalize_degrees(dx.atan2(-dy).to_degrees()))
}

/// Clockwise span from `start` to `end`, unwrapping through 360°.
fn clockwise_end(start: CompassAngle, end: CompassAngle) -> f32 {
    if end.0 < start.0 {
        end.0 + 360.0
    } else {
        end.0
    }
}

/// Whether `angle` lies in the clockwise sector from `start` to `end`.
///
/// A sector whose normalized start is past its end crosses North, and the
/// test becomes `angle >= start || angle <= end`.
pub fn wedge_contains(start: CompassAngle, end: CompassAngle, angle: CompassAngle) -> bool {
    if (end.0 - start.0).abs() >= 360.0 {
        return true;
    }
    let s = normalize_degrees(start.0);
    let e = normalize_degrees(end.0);
    let a = normalize_degrees(angle.0);
    if s <= e {
        a >= s && a <= e
    } else {
        a >= s || a <= e
    }
}

/// Circular arc from `start` clockwise to `end`.
///
/// `segments <= 0` picks a count from the span (see [`auto_segments`]).
#[allow(clippy::too_many_arguments)]
pub fn draw_arc(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
    thickness: f32,
    segments: i32,
) {
    draw_ellipse_arc(fb, cx, cy, radius, radius, start, end, color, thickness, segments);
}

/// Elliptical arc from `start` clockwise to `end`.
#[allow(clippy::too_many_arguments)]
pub fn draw_ellipse_arc(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius_x: f32,
    radius_y: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
    thickness: f32,
    segments: i32,
) {
    let end_deg = clockwise_end(start, end);
    let span = end_deg - start.0;
    let segments = if segments <= 0 {
        auto_segments(span)
    } else {
        segments
    };
    let step = span / segments as f32;

    for i in 0..segments {
        let a1 = CompassAngle(start.0 + i as f32 * step);
        let a2 = CompassAngle(start.0 + (i + 1) as f32 * step);
        let (x1, y1) = compass_point(cx, cy, radius_x, radius_y, a1);
        let (x2, y2) = compass_point(cx, cy, radius_x, radius_y, a2);
        draw_line(fb, x1, y1, x2, y2, color, thickness);
    }
}

/// Filled circular sector.
pub fn draw_wedge_filled(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
) {
    let r = radius as i32;
    let r_sq = radius * radius;
    for y in -r..=r {
        for x in -r..=r {
            if (x * x + y * y) as f32 > r_sq {
                continue;
            }
            if wedge_contains(start, end, offset_bearing(x as f32, y as f32)) {
                fb.blend_pixel(cx + x, cy + y, color);
            }
        }
    }
}

/// Sector outline: two radii plus the connecting arc.
#[allow(clippy::too_many_arguments)]
pub fn draw_wedge_outline(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
    thickness: f32,
) {
    draw_ellipse_wedge_outline(fb, cx, cy, radius, radius, start, end, color, thickness);
}

/// Filled elliptical sector.
///
/// Bearings are measured in the ellipse's own normalized frame, so the
/// fill edges line up with [`draw_ellipse_wedge_outline`].
#[allow(clippy::too_many_arguments)]
pub fn draw_ellipse_wedge_filled(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius_x: f32,
    radius_y: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
) {
    if radius_x <= 0.0 || radius_y <= 0.0 {
        return;
    }
    let rx = radius_x as i32;
    let ry = radius_y as i32;
    for y in -ry..=ry {
        for x in -rx..=rx {
            let nx = x as f32 / radius_x;
            let ny = y as f32 / radius_y;
            if nx * nx + ny * ny > 1.0 {
                continue;
            }
            if wedge_contains(start, end, offset_bearing(nx, ny)) {
                fb.blend_pixel(cx + x, cy + y, color);
            }
        }
    }
}

/// Elliptical sector outline.
#[allow(clippy::too_many_arguments)]
pub fn draw_ellipse_wedge_outline(
    fb: &mut Framebuffer,
    cx: i32,
    cy: i32,
    radius_x: f32,
    radius_y: f32,
    start: CompassAngle,
    end: CompassAngle,
    color: Color,
    thickness: f32,
) {
    let (x1, y1) = compass_point(cx, cy, radius_x, radius_y, start);
    let (x2, y2) = compass_point(cx, cy, radius_x, radius_y, end);
    draw_line(fb, cx, cy, x1, y1, color, thickness);
    draw_line(fb, cx, cy, x2, y2, color, thickness);
    draw_ellipse_arc(fb, cx, cy, radius_x, radius_y, start, end, color, thickness, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(size: u32) -> Framebuffer {
        Framebuffer::new(size, size).unwrap()
    }

    #[test]
    fn test_auto_segments_clamped() {
        assert_eq!(auto_segments(0.0), 4);
        assert_eq!(auto_segments(9.0), 4);
        assert_eq!(auto_segments(45.0), 15);
        assert_eq!(auto_segments(360.0), 120);
        assert_eq!(auto_segments(-90.0), 30);
    }

    #[test]
    fn test_offset_bearing_cardinals() {
        assert_eq!(offset_bearing(0.0, -1.0), CompassAngle(0.0));
        assert_eq!(offset_bearing(1.0, 0.0), CompassAngle(90.0));
        assert_eq!(offset_bearing(0.0, 1.0), CompassAngle(180.0));
        assert_eq!(offset_bearing(-1.0, 0.0), CompassAngle(270.0));
    }

    #[test]
    fn test_wedge_wraparound() {
        let (start, end) = (CompassAngle(350.0), CompassAngle(10.0));
        assert!(wedge_contains(start, end, CompassAngle(0.0)));
        assert!(wedge_contains(start, end, CompassAngle(355.0)));
        assert!(wedge_contains(start, end, CompassAngle(10.0)));
        assert!(!wedge_contains(start, end, CompassAngle(180.0)));
        assert!(!wedge_contains(start, end, CompassAngle(20.0)));
    }

    #[test]
    fn test_wedge_negative_start_wraps() {
        assert!(wedge_contains(CompassAngle(-22.5), CompassAngle(22.5), CompassAngle(0.0)));
        assert!(!wedge_contains(CompassAngle(-22.5), CompassAngle(22.5), CompassAngle(90.0)));
        assert!(wedge_contains(CompassAngle(0.0), CompassAngle(360.0), CompassAngle(200.0)));
    }

    #[test]
    fn test_line_thickness_stamp() {
        let mut thin = fb(20);
        draw_line(&mut thin, 2, 10, 17, 10, Color::WHITE, 1.0);
        assert_eq!(thin.count_drawn(), 16);

        let mut thick = fb(20);
        draw_line(&mut thick, 2, 10, 17, 10, Color::WHITE, 3.0);
        // half = 1: rows 9..=11 over columns 1..=18
        assert_eq!(thick.count_drawn(), 3 * 18);
    }

    #[test]
    fn test_line_reaches_both_endpoints() {
        let mut f = fb(20);
        draw_line(&mut f, 17, 3, 2, 14, Color::WHITE, 1.0);
        assert_eq!(f.pixel(17, 3), Some(Color::WHITE));
        assert_eq!(f.pixel(2, 14), Some(Color::WHITE));
    }

    #[test]
    fn test_filled_circle_membership() {
        let mut f = fb(21);
        draw_filled_circle(&mut f, 10, 10, 5.9, Color::WHITE);
        // Radius truncates to 5
        assert_eq!(f.pixel(15, 10), Some(Color::WHITE));
        assert_eq!(f.pixel(16, 10), Some(Color::TRANSPARENT));
        assert_eq!(f.pixel(14, 14), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_circle_outline_is_hollow() {
        let mut f = fb(41);
        draw_circle_outline(&mut f, 20, 20, 10.0, Color::WHITE, 2.0);
        assert_eq!(f.pixel(20, 20), Some(Color::TRANSPARENT));
        assert_eq!(f.pixel(30, 20), Some(Color::WHITE));
        assert_eq!(f.pixel(20, 9), Some(Color::WHITE));
        assert_eq!(f.pixel(20, 8), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut f = fb(20);
        draw_rect_outline(&mut f, 2, 2, 10, 8, Color::WHITE, 2.0);
        assert_eq!(f.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(f.pixel(11, 9), Some(Color::WHITE));
        assert_eq!(f.pixel(6, 5), Some(Color::TRANSPARENT));
        assert_eq!(f.count_drawn(), 10 * 8 - 6 * 4);
    }

    #[test]
    fn test_shapes_clip_at_edges() {
        let mut f = fb(10);
        draw_filled_circle(&mut f, 0, 0, 30.0, Color::WHITE);
        draw_line(&mut f, -50, -50, 50, 50, Color::RED, 5.0);
        draw_ellipse_outline(&mut f, 5, 5, 100.0, 40.0, Color::GREEN, 3.0);
        draw_wedge_filled(&mut f, -3, 12, 20.0, CompassAngle(0.0), CompassAngle(90.0), Color::BLUE);
        assert_eq!(f.count_drawn(), 100);
    }

    #[test]
    fn test_wedge_filled_quadrant() {
        let mut f = fb(41);
        draw_wedge_filled(&mut f, 20, 20, 15.0, CompassAngle(0.0), CompassAngle(90.0), Color::WHITE);
        // Up-right quadrant is filled, down-left is not
        assert_eq!(f.pixel(25, 15), Some(Color::WHITE));
        assert_eq!(f.pixel(15, 25), Some(Color::TRANSPARENT));
        assert_eq!(f.pixel(15, 15), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_wedge_filled_across_north() {
        let mut f = fb(41);
        draw_wedge_filled(&mut f, 20, 20, 15.0, CompassAngle(350.0), CompassAngle(10.0), Color::WHITE);
        assert_eq!(f.pixel(20, 8), Some(Color::WHITE));
        assert_eq!(f.pixel(20, 32), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_ellipse_wedge_respects_vertical_squash() {
        let mut f = fb(61);
        draw_ellipse_wedge_filled(
            &mut f,
            30,
            30,
            20.0,
            10.0,
            CompassAngle(-30.0),
            CompassAngle(30.0),
            Color::WHITE,
        );
        assert_eq!(f.pixel(30, 22), Some(Color::WHITE));
        assert_eq!(f.pixel(30, 18), Some(Color::TRANSPARENT));
        assert_eq!(f.pixel(30, 38), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_arc_endpoints_follow_compass_convention() {
        let mut f = fb(41);
        draw_arc(&mut f, 20, 20, 10.0, CompassAngle(0.0), CompassAngle(90.0), Color::WHITE, 1.0, 0);
        assert_eq!(f.pixel(20, 10), Some(Color::WHITE));
        assert_eq!(f.pixel(30, 20), Some(Color::WHITE));
        // Nothing on the left half
        for y in 0..41 {
            for x in 0..19 {
                assert_eq!(f.pixel(x, y), Some(Color::TRANSPARENT));
            }
        }
    }

    #[test]
    fn test_wedge_outline_draws_radii() {
        let mut f = fb(41);
        draw_wedge_outline(&mut f, 20, 20, 10.0, CompassAngle(90.0), CompassAngle(180.0), Color::WHITE, 1.0);
        assert_eq!(f.pixel(25, 20), Some(Color::WHITE));
        assert_eq!(f.pixel(20, 25), Some(Color::WHITE));
        assert_eq!(f.pixel(15, 15), Some(Color::TRANSPARENT));
    }
}
