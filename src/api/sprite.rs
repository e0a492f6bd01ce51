//! Sprite decoding for the terminal.
//!
//! A terminal cell is roughly twice as tall as it is wide, so every cell
//! carries two vertically stacked pixels drawn with the upper half block
//! (`▀`): the glyph takes the top pixel's color, the cell background takes
//! the bottom one.

use super::LookupError;
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Widest sprite we draw, in terminal columns (one pixel per column).
pub const MAX_SPRITE_COLUMNS: u32 = 40;

/// Pixels with less alpha than this are treated as transparent.
const ALPHA_CUTOFF: u8 = 128;

pub type Rgb = [u8; 3];

/// One terminal cell: the pixel in the upper half and the one below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfBlock {
    pub top: Option<Rgb>,
    pub bottom: Option<Rgb>,
}

/// A decoded sprite ready to be turned into styled spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteArt {
    pub width: u32,
    pub rows: Vec<Vec<HalfBlock>>,
}

impl SpriteArt {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Nearest-neighbour downscale to at most `max_rows` cells tall, keeping
    /// the aspect ratio. Art that already fits is returned as is.
    pub fn fit_rows(&self, max_rows: usize) -> SpriteArt {
        if self.height() <= max_rows {
            return self.clone();
        }
        if max_rows == 0 || self.width == 0 {
            return SpriteArt::default();
        }

        let src_h = self.height() * 2;
        let dst_h = max_rows * 2;
        let src_w = self.width as usize;
        let dst_w = (src_w * dst_h / src_h).max(1);

        let pixel = |x: usize, y: usize| -> Option<Rgb> {
            let cell = self.rows.get(y / 2)?.get(x)?;
            if y % 2 == 0 {
                cell.top
            } else {
                cell.bottom
            }
        };
        let sample = |x: usize, y: usize| pixel(x * src_w / dst_w, y * src_h / dst_h);

        let rows = (0..max_rows)
            .map(|row| {
                (0..dst_w)
                    .map(|x| HalfBlock {
                        top: sample(x, row * 2),
                        bottom: sample(x, row * 2 + 1),
                    })
                    .collect()
            })
            .collect();

        SpriteArt {
            width: u32::try_from(dst_w).unwrap_or(self.width),
            rows,
        }
    }
}

/// Decode PNG bytes, crop away the transparent margin and scale down to at
/// most `max_columns` wide.
pub fn decode(bytes: &[u8], max_columns: u32) -> Result<SpriteArt, LookupError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();

    let Some((x, y, w, h)) = opaque_bounds(&image) else {
        return Ok(SpriteArt::default());
    };
    let mut cropped = imageops::crop_imm(&image, x, y, w, h).to_image();

    if max_columns > 0 && cropped.width() > max_columns {
        let scaled_height =
            ((u64::from(cropped.height()) * u64::from(max_columns)) / u64::from(cropped.width()))
                .max(1) as u32;
        cropped = imageops::resize(&cropped, max_columns, scaled_height, FilterType::Nearest);
    }

    Ok(to_half_blocks(&cropped))
}

/// Bounding box `(x, y, width, height)` of the non-transparent pixels.
fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] >= ALPHA_CUTOFF {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

fn to_half_blocks(image: &RgbaImage) -> SpriteArt {
    let pixel_at = |x: u32, y: u32| -> Option<Rgb> {
        if y >= image.height() {
            return None;
        }
        let [r, g, b, a] = image.get_pixel(x, y).0;
        (a >= ALPHA_CUTOFF).then_some([r, g, b])
    };

    let rows = (0..image.height())
        .step_by(2)
        .map(|y| {
            (0..image.width())
                .map(|x| HalfBlock {
                    top: pixel_at(x, y),
                    bottom: pixel_at(x, y + 1),
                })
                .collect()
        })
        .collect();

    SpriteArt {
        width: image.width(),
        rows,
    }
}
