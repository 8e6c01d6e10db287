use image::Rgb;

use crate::core::image_utils::Canvas;

/**
 * Maps a real-valued coordinate onto the nearest pixel index.
 *
 * Rounds half-way values toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
 * The result is clamped to the `i32` range (far off any canvas), which keeps the
 * line-drawing arithmetic below free of overflow. NaN maps to zero.
 */
pub fn nearest_pixel(value: f64) -> i64 {
    let pixel = (value + 0.5).floor() as i64;
    pixel.clamp(i32::MIN as i64, i32::MAX as i64)
}

/**
 * Draws a straight line between two pixels (inclusive of both endpoints),
 * using a DDA-style parametric stepping algorithm:
 *
 *   steps = max(|dx|, |dy|)
 *
 * and then `steps + 1` samples, each advancing by `(dx, dy) / steps` and
 * rounded to the nearest pixel. Pixels that fall outside the canvas are skipped.
 *
 * @return: the number of pixel writes that landed on the canvas.
 */
pub fn draw_line(canvas: &mut Canvas, start: (i64, i64), end: (i64, i64), color: Rgb<u8>) -> usize {
    let (x1, y1) = start;
    let (x2, y2) = end;
    let dx = x2 - x1;
    let dy = y2 - y1;

    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return canvas.set_pixel(x1, y1, color) as usize;
    }

    let x_increment = dx as f64 / steps as f64;
    let y_increment = dy as f64 / steps as f64;

    let mut written = 0;
    for step in 0..=steps {
        // Compute from the start point each time so that rounding error does not accumulate.
        let x = x1 as f64 + x_increment * step as f64;
        let y = y1 as f64 + y_increment * step as f64;
        if canvas.set_pixel(nearest_pixel(x), nearest_pixel(y), color) {
            written += 1;
        }
    }
    written
}
