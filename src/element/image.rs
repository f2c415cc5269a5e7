//! Image leaves: an RGBA bitmap rendered as colored half-block cells.
//!
//! Terminal cells are roughly twice as tall as they are wide, so one pixel
//! maps to a pair of horizontally adjacent cells and the natural footprint of
//! a bitmap is `2 x width` columns by `height` rows. Rendering fits that
//! footprint into the offered space preserving aspect ratio, and never scales
//! up past it.

use std::path::Path;

use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::geometry::{Dimension, Rect, Size};
use crate::layout::{content_avail, resolve_box, BoxSpec, ElementLayout, Phase};
use crate::style::Style;
use crate::types::{Attr, Rgba};

use super::merge_clip;

/// An owned RGBA pixel buffer, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u16,
    height: u16,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// Wrap a pixel buffer, checking that its length matches the dimensions.
    pub fn new(width: u16, height: u16, pixels: Vec<Rgba>) -> Result<Self, LayoutError> {
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(LayoutError::PixelBufferMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from raw `RGBA` bytes, four per pixel.
    pub fn from_rgba8(width: u16, height: u16, data: &[u8]) -> Result<Self, LayoutError> {
        let expected = usize::from(width) * usize::from(height);
        if data.len() != expected * 4 {
            return Err(LayoutError::PixelBufferMismatch {
                width,
                height,
                expected,
                actual: data.len().div_ceil(4),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file. Anything the `image` crate reads works;
    /// oversized images are cropped to the addressable `u16` range.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let img = image::open(path)?.to_rgba8();
        let width = img.width().min(u32::from(u16::MAX)) as u16;
        let height = img.height().min(u32::from(u16::MAX)) as u16;
        let mut pixels = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..u32::from(height) {
            for x in 0..u32::from(width) {
                let px = img.get_pixel(x, y).0;
                pixels.push(Rgba::new(px[0], px[1], px[2], px[3]));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel at `(x, y)`. Both coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Rgba {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Cell footprint at one pixel per cell pair.
    pub fn natural_size(&self) -> Size {
        Size::new(self.width.saturating_mul(2), self.height)
    }
}

#[derive(Debug)]
pub(crate) struct ImageBlock {
    pub(crate) bitmap: Bitmap,
}

impl ImageBlock {
    pub(crate) fn new(bitmap: Bitmap) -> Self {
        Self { bitmap }
    }

    pub(crate) fn compute(&self, style: &Style, phase: Phase, parent: Size) -> ElementLayout {
        let spec = BoxSpec::from_style(style);
        let avail = content_avail(&spec, parent);

        let natural = self.bitmap.natural_size();
        let smallest = Size::new(natural.width.min(2), natural.height.min(1));
        let desired = match (style.width, phase) {
            (Dimension::MinContent, _) => smallest,
            (Dimension::MaxContent, _) => natural,
            (_, Phase::Min) => smallest,
            (_, Phase::Max) => natural,
            (_, Phase::Render) => fit(natural, avail),
        };

        resolve_box(&spec, desired, parent)
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas, layout: &ElementLayout, outer: Rect, clip: Option<&Rect>) {
        let content = layout.content_in(outer);
        let Some(visible) = merge_clip(content, clip) else {
            return;
        };
        let px_w = u32::from(self.bitmap.width());
        let px_h = u32::from(self.bitmap.height());
        if px_w == 0 || px_h == 0 || content.is_empty() {
            return;
        }

        for y in visible.y..visible.bottom() {
            let src_y = u32::from(y - content.y) * px_h / u32::from(content.height);
            for x in visible.x..visible.right() {
                let src_x = u32::from(x - content.x) * px_w / u32::from(content.width);
                let pixel = self.bitmap.get(src_x as u16, src_y as u16);
                if pixel.is_transparent() {
                    continue;
                }
                canvas.set_cell(x, y, ' ', Rgba::TERMINAL_DEFAULT, pixel, Attr::NONE, None);
            }
        }
    }
}

/// Largest size with `natural`'s aspect ratio that fits `avail`, but never
/// larger than `natural` itself.
fn fit(natural: Size, avail: Size) -> Size {
    if natural.is_empty() || avail.is_empty() {
        return Size::ZERO;
    }
    if natural.width <= avail.width && natural.height <= avail.height {
        return natural;
    }
    let scale = (f32::from(avail.width) / f32::from(natural.width))
        .min(f32::from(avail.height) / f32::from(natural.height));
    Size::new(
        ((f32::from(natural.width) * scale) as u16).max(1),
        ((f32::from(natural.height) * scale) as u16).max(1),
    )
}

// =============================================================================
// Tests
// =============================================================================
