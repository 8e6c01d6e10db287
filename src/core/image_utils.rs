use image::{
    codecs::{
        gif::{GifEncoder, Repeat},
        png::PngEncoder,
    },
    ColorType, Delay, Frame, ImageEncoder, ImageResult, Rgb, RgbImage,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// GIF delays are stored in hundredths of a second.
pub const ANIMATION_FRAME_DELAY_CENTISECONDS: u32 = 100;

/**
 * Resolution and colors of the rendered image. Only a single stroke color is
 * supported; everything that is not stroke is background.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageOptions {
    pub resolution: nalgebra::Vector2<u32>,
    pub background_color_rgb: [u8; 3],
    pub stroke_color_rgb: [u8; 3],
}

impl Default for ImageOptions {
    fn default() -> ImageOptions {
        ImageOptions {
            resolution: nalgebra::Vector2::new(800, 800),
            background_color_rgb: [255, 255, 255],
            stroke_color_rgb: [0, 0, 255],
        }
    }
}

/**
 * Fixed-size pixel grid that the turtle draws into. Pixels are stored
 * row-major in an `RgbImage`, and every write is bounds-checked: writes that
 * land outside the grid are dropped.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    imgbuf: RgbImage,
    background: Rgb<u8>,
}

impl Canvas {
    pub fn new(resolution: &nalgebra::Vector2<u32>, background: Rgb<u8>) -> Canvas {
        Canvas {
            imgbuf: RgbImage::from_pixel(resolution[0], resolution[1], background),
            background,
        }
    }

    pub fn from_options(options: &ImageOptions) -> Canvas {
        Canvas::new(&options.resolution, Rgb(options.background_color_rgb))
    }

    pub fn width(&self) -> u32 {
        self.imgbuf.width()
    }

    pub fn height(&self) -> u32 {
        self.imgbuf.height()
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    /// Sets a single pixel. Returns `false` (and does nothing) if out of bounds.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>) -> bool {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return false;
        }
        match self.imgbuf.get_pixel_mut_checked(x as u32, y as u32) {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return None;
        }
        self.imgbuf.get_pixel_checked(x as u32, y as u32).copied()
    }

    pub fn count_non_background_pixels(&self) -> usize {
        self.imgbuf
            .pixels()
            .filter(|&&pixel| pixel != self.background)
            .count()
    }

    pub fn image(&self) -> &RgbImage {
        &self.imgbuf
    }

    fn to_frame(&self, delay: Delay) -> Frame {
        let rgba = image::DynamicImage::ImageRgb8(self.imgbuf.clone()).into_rgba8();
        Frame::from_parts(rgba, 0, 0, delay)
    }
}

pub fn animation_frame_delay() -> Delay {
    Delay::from_numer_denom_ms(ANIMATION_FRAME_DELAY_CENTISECONDS * 10, 1)
}

/// Encodes a single canvas as an RGB PNG, in memory.
pub fn encode_png(canvas: &Canvas) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        canvas.image().as_raw(),
        canvas.width(),
        canvas.height(),
        ColorType::Rgb8,
    )?;
    Ok(bytes)
}

/**
 * Encodes the frames, in order, as a looping GIF animation with a uniform
 * delay between frames. A two-color canvas produces a two-entry palette:
 * the GIF encoder uses the exact colors when there are at most 256 of them.
 */
pub fn encode_gif(frames: &[Canvas], delay: Delay) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames.iter().map(|canvas| canvas.to_frame(delay)))?;
    }
    Ok(bytes)
}

/**
 * Runs the `save_lambda` to write an image (or animation) artifact to disk.
 * Success is reported on the console; a failure is returned to the caller,
 * with the artifact and path in the error message, and not printed here.
 */
pub fn write_image_to_file<F, T, E>(
    filename: PathBuf,
    artifact: &str,
    save_lambda: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&PathBuf) -> Result<T, E>,
    E: std::error::Error + 'static,
{
    match save_lambda(&filename) {
        Ok(_) => {
            println!("INFO:  {} saved to {}", artifact, filename.display());
            Ok(())
        }
        Err(err) => Err(format!(
            "Unable to write {} to {}: {}",
            artifact,
            filename.display(),
            err
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{codecs::gif::GifDecoder, AnimationDecoder};

    fn white() -> Rgb<u8> {
        Rgb([255, 255, 255])
    }

    fn blue() -> Rgb<u8> {
        Rgb([0, 0, 255])
    }

    #[test]
    fn test_canvas_starts_with_background() {
        let canvas = Canvas::new(&nalgebra::Vector2::new(4, 3), white());
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.count_non_background_pixels(), 0);
        assert_eq!(canvas.get_pixel(3, 2), Some(white()));
    }

    #[test]
    fn test_canvas_out_of_bounds_is_noop() {
        let mut canvas = Canvas::new(&nalgebra::Vector2::new(4, 3), white());
        assert!(!canvas.set_pixel(-1, 0, blue()));
        assert!(!canvas.set_pixel(0, -1, blue()));
        assert!(!canvas.set_pixel(4, 0, blue()));
        assert!(!canvas.set_pixel(0, 3, blue()));
        assert!(!canvas.set_pixel(i64::MAX, i64::MIN, blue()));
        assert_eq!(canvas.count_non_background_pixels(), 0);
        assert_eq!(canvas.get_pixel(4, 0), None);

        assert!(canvas.set_pixel(3, 2, blue()));
        assert_eq!(canvas.get_pixel(3, 2), Some(blue()));
        assert_eq!(canvas.count_non_background_pixels(), 1);
    }

    #[test]
    fn test_default_image_options() {
        let options = ImageOptions::default();
        assert_eq!(options.resolution, nalgebra::Vector2::new(800, 800));
        assert_eq!(options.background_color_rgb, [255, 255, 255]);
        assert_eq!(options.stroke_color_rgb, [0, 0, 255]);
    }

    #[test]
    fn test_encode_png_has_signature() {
        let canvas = Canvas::new(&nalgebra::Vector2::new(8, 8), white());
        let bytes = encode_png(&canvas).unwrap();
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_gif_frame_count_and_delay() {
        let mut frames = Vec::new();
        for i in 0..3 {
            let mut canvas = Canvas::new(&nalgebra::Vector2::new(6, 5), white());
            canvas.set_pixel(i, i, blue());
            frames.push(canvas);
        }
        let bytes = encode_gif(&frames, animation_frame_delay()).unwrap();
        assert_eq!(&bytes[0..6], b"GIF89a");

        let decoded = GifDecoder::new(std::io::Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 3);
        for frame in decoded.iter() {
            assert_eq!(frame.buffer().dimensions(), (6, 5));
            let (numer, denom) = frame.delay().numer_denom_ms();
            assert_eq!(numer / denom, 1000);
        }
    }

    #[test]
    fn test_write_image_to_file_error_names_the_path() {
        let filename = PathBuf::from("missing-directory/image.png");
        let result = write_image_to_file(filename, "L-system image", |_| {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"))
        });
        let message = result.unwrap_err().to_string();
        assert_eq!(
            message,
            "Unable to write L-system image to missing-directory/image.png: no such directory"
        );
    }
}
