//! Notepane window icon.
//!
//! Drawn procedurally: a rounded note page with a folded top-right corner
//! and a few text lines, the first one in the accent colour as a heading.

const PAGE: [u8; 3] = [0xfa, 0xfa, 0xfa];
const FOLD: [u8; 3] = [0xd1, 0xe4, 0xf4];
const HEADING: [u8; 3] = [0x39, 0x9e, 0xe6];
const TEXT: [u8; 3] = [0x8a, 0x91, 0x99];

/// Generate the icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    egui::IconData {
        rgba: render_icon(size),
        width: size,
        height: size,
    }
}

/// Render the icon into an RGBA buffer, rows top to bottom.
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    let left = s * 0.16;
    let right = s * 0.84;
    let top = s * 0.08;
    let bottom = s * 0.92;
    let corner = s * 0.08;
    let fold = s * 0.22;

    // (y centre, right end as a fraction of the page width, colour)
    let lines: [(f32, f32, [u8; 3]); 5] = [
        (0.26, 0.55, HEADING),
        (0.42, 0.85, TEXT),
        (0.54, 0.85, TEXT),
        (0.66, 0.70, TEXT),
        (0.78, 0.80, TEXT),
    ];
    let line_half = s * 0.028;
    let margin = s * 0.10;

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let mut alpha = rounded_rect_coverage(px, py, left, top, right, bottom, corner);

            // Cut the folded corner off the page outline.
            let fold_d = (px - (right - fold)) + (top + fold - py) - fold;
            alpha *= smooth_edge(fold_d / std::f32::consts::SQRT_2, 0.0);
            if alpha <= 0.0 {
                continue;
            }

            let mut color = PAGE;

            // Folded flap: the triangle below the cut.
            let in_flap = px > right - fold && py < top + fold;
            if in_flap && fold_d <= 0.0 && fold_d > -fold {
                color = FOLD;
            }

            for &(cy, end, line_color) in &lines {
                let x0 = left + margin;
                let x1 = left + (right - left) * end - margin * 0.5;
                let d = point_to_seg_dist(px, py, x0, s * cy, x1, s * cy);
                let cover = smooth_edge(d, line_half);
                if cover > 0.0 {
                    color = lerp_rgb(color, line_color, cover);
                }
            }

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = color[0];
            pixels[idx + 1] = color[1];
            pixels[idx + 2] = color[2];
            pixels[idx + 3] = (alpha * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pixels
}

/// Anti-aliased coverage of a rounded rectangle.
fn rounded_rect_coverage(
    px: f32,
    py: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    radius: f32,
) -> f32 {
    let cx = px.clamp(left + radius, right - radius);
    let cy = py.clamp(top + radius, bottom - radius);
    let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
    smooth_edge(d, radius)
}

/// 1 inside `edge`, 0 outside, linear over one pixel either side.
fn smooth_edge(dist: f32, edge: f32) -> f32 {
    (0.5 - (dist - edge) * 0.5).clamp(0.0, 1.0)
}

/// Distance from a point to a line segment.
fn point_to_seg_dist(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let abx = bx - ax;
    let aby = by - ay;
    let len_sq = abx * abx + aby * aby;
    if len_sq < 0.0001 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
    ((px - (ax + t * abx)).powi(2) + (py - (ay + t * aby)).powi(2)).sqrt()
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_dimensions() {
        let icon = generate_icon(32);
        assert_eq!(icon.width, 32);
        assert_eq!(icon.rgba.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_icon_corners_transparent() {
        let size = 64;
        let rgba = render_icon(size);
        let alpha = |x: u32, y: u32| rgba[((y * size + x) * 4 + 3) as usize];
        assert_eq!(alpha(0, 0), 0);
        assert_eq!(alpha(size - 1, size - 1), 0);
        // Folded corner is cut away.
        assert_eq!(alpha(52, 6), 0);
        // Middle of the page is opaque.
        assert_eq!(alpha(32, 40), 255);
    }
}
