//! Sixel encoding for bitmaps.
//!
//! Sixel trades a palette declaration up front for a very compact body: each
//! band covers six pixel rows, and within a band every used color register
//! replays the full width once, setting the rows it owns via a printable
//! character (`0x3F` plus a six-bit column mask). We quantize into a fixed
//! 6x6x6 color cube, so register numbers are a pure function of the color
//! and no palette search is needed.
//!
//! Output format, in order: DCS introducer with transparent background
//! (`ESC P 0;1;0 q`), raster attributes (`"1;1;<w>;<h>`), one `#n;2;r;g;b`
//! definition per used register (RGB percentages), then the bands separated
//! by `-`, with `$` rewinding between registers inside a band, and the
//! string terminator. Runs longer than three columns use the `!<count><ch>`
//! repeat introducer.
//!
//! Pixels that are fully transparent (alpha below half) or carry one of the
//! terminal-special colors set no register at all; with the transparent
//! background flag the terminal leaves those cells untouched.

use std::fmt::Write;

use crate::element::Bitmap;
use crate::types::Rgba;

/// Quantized registers per channel level.
const LEVELS: u16 = 6;

/// Encode a bitmap as a complete sixel sequence, introducer through string
/// terminator. Empty bitmaps produce an empty string.
pub fn encode(bitmap: &Bitmap) -> String {
    let width = bitmap.width();
    let height = bitmap.height();
    let mut out = String::new();
    if width == 0 || height == 0 {
        return out;
    }

    // one register (or none) per pixel, row-major like the bitmap
    let regs: Vec<Option<u16>> = bitmap
        .pixels()
        .iter()
        .map(|px| visible(px).then(|| register(*px)))
        .collect();
    let reg_at = |x: u16, y: u16| regs[usize::from(y) * usize::from(width) + usize::from(x)];

    let _ = write!(out, "\x1bP0;1;0q\"1;1;{width};{height}");

    let mut used = [false; (LEVELS * LEVELS * LEVELS) as usize];
    for reg in regs.iter().flatten() {
        used[usize::from(*reg)] = true;
    }
    for (reg, _) in used.iter().enumerate().filter(|(_, used)| **used) {
        let (r, g, b) = register_percentages(reg as u16);
        let _ = write!(out, "#{reg};2;{r};{g};{b}");
    }

    for band_start in (0..height).step_by(6) {
        if band_start > 0 {
            out.push('-');
        }
        let rows = (height - band_start).min(6);

        let mut band_used = [false; (LEVELS * LEVELS * LEVELS) as usize];
        for y in band_start..band_start + rows {
            for x in 0..width {
                if let Some(reg) = reg_at(x, y) {
                    band_used[usize::from(reg)] = true;
                }
            }
        }

        let mut first = true;
        for reg in 0..band_used.len() as u16 {
            if !band_used[usize::from(reg)] {
                continue;
            }
            if !first {
                out.push('$');
            }
            first = false;
            let _ = write!(out, "#{reg}");

            let mut run: Option<(char, u16)> = None;
            for x in 0..width {
                let mut mask = 0u8;
                for (bit, y) in (band_start..band_start + rows).enumerate() {
                    if reg_at(x, y) == Some(reg) {
                        mask |= 1 << bit;
                    }
                }
                let ch = char::from(0x3F + mask);
                run = match run {
                    Some((prev, len)) if prev == ch => Some((prev, len + 1)),
                    Some((prev, len)) => {
                        emit_run(&mut out, prev, len);
                        Some((ch, 1))
                    }
                    None => Some((ch, 1)),
                };
            }
            if let Some((ch, len)) = run {
                emit_run(&mut out, ch, len);
            }
        }
    }

    out.push_str("\x1b\\");
    out
}

/// Does this pixel paint anything at all?
fn visible(px: &Rgba) -> bool {
    px.a >= 128 && !px.is_terminal_default() && !px.is_ansi()
}

/// Register index in the 6x6x6 cube for a concrete color.
fn register(px: Rgba) -> u16 {
    let level = |channel: i16| (channel as u16 * (LEVELS - 1) + 127) / 255;
    level(px.r) * LEVELS * LEVELS + level(px.g) * LEVELS + level(px.b)
}

/// The palette entry for a register, as sixel RGB percentages.
fn register_percentages(reg: u16) -> (u16, u16, u16) {
    let step = 100 / (LEVELS - 1);
    (
        (reg / (LEVELS * LEVELS)) * step,
        ((reg / LEVELS) % LEVELS) * step,
        (reg % LEVELS) * step,
    )
}

fn emit_run(out: &mut String, ch: char, count: u16) {
    if count > 3 {
        let _ = write!(out, "!{count}{ch}");
    } else {
        for _ in 0..count {
            out.push(ch);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u16, height: u16, color: Rgba) -> Bitmap {
        Bitmap::new(
            width,
            height,
            vec![color; usize::from(width) * usize::from(height)],
        )
        .unwrap()
    }

    #[test]
    fn test_register_is_a_pure_function_of_color() {
        assert_eq!(register(Rgba::RED), 180);
        assert_eq!(register(Rgba::BLUE), 5);
        assert_eq!(register(Rgba::WHITE), 215);
        assert_eq!(register(Rgba::BLACK), 0);
        assert_eq!(register_percentages(180), (100, 0, 0));
        assert_eq!(register_percentages(5), (0, 0, 100));
    }

    #[test]
    fn test_solid_square_encodes_exactly() {
        let sequence = encode(&solid(2, 2, Rgba::RED));
        assert_eq!(
            sequence,
            "\x1bP0;1;0q\"1;1;2;2#180;2;100;0;0#180BB\x1b\\"
        );
    }

    #[test]
    fn test_long_runs_are_compressed() {
        let sequence = encode(&solid(10, 1, Rgba::RED));
        assert!(sequence.contains("!10@"));
    }

    #[test]
    fn test_transparent_pixels_define_no_register() {
        let sequence = encode(&solid(1, 1, Rgba::TRANSPARENT));
        assert_eq!(sequence, "\x1bP0;1;0q\"1;1;1;1\x1b\\");
    }

    #[test]
    fn test_registers_within_a_band_are_separated() {
        let bitmap = Bitmap::new(2, 1, vec![Rgba::RED, Rgba::BLUE]).unwrap();
        let sequence = encode(&bitmap);
        assert_eq!(
            sequence,
            "\x1bP0;1;0q\"1;1;2;1#5;2;0;0;100#180;2;100;0;0#5?@$#180@?\x1b\\"
        );
    }

    #[test]
    fn test_bands_are_six_rows() {
        let sequence = encode(&solid(1, 7, Rgba::RED));
        // rows 0-5 fill one band (~), row 6 starts another (@)
        assert_eq!(sequence.matches('-').count(), 1);
        assert!(sequence.contains('~'));
        assert!(sequence.contains('@'));
    }

    #[test]
    fn test_empty_bitmap_encodes_to_nothing() {
        let bitmap = Bitmap::new(0, 0, Vec::new()).unwrap();
        assert_eq!(encode(&bitmap), "");
    }
}
