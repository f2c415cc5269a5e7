//! Shared cell-level types.
//!
//! Everything the renderer understands lives here: colors, attribute flags,
//! the [`Cell`] itself and the border glyph tables. Layout never looks at
//! these; the canvas and the output path deal in nothing else.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Channels are stored as `i16` so two marker values fit alongside real
/// colors and comparison stays exact:
/// - `r == -1`: terminal default (let the terminal pick)
/// - `r == -2`: ANSI palette color, index in `g`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let the terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    ///
    /// - 0-7: standard colors
    /// - 8-15: bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: grayscale ramp
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// ANSI palette index (only meaningful when `is_ansi()`).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend src over dst (Porter-Duff "over").
    ///
    /// Terminal-default and palette colors have no channel data to mix, so
    /// they act as opaque: as src they win outright, as dst they count as
    /// opaque black.
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() || src.is_ansi() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let (dr, dg, db, da) = if dst.is_terminal_default() || dst.is_ansi() {
            (0i16, 0i16, 0i16, 255i16)
        } else {
            (dst.r, dst.g, dst.b, dst.a)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;

        // out_a = src_a + dst_a * (1 - src_a)
        let out_a = sa + (da as i32 * inv_sa) / 255;

        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        // out_rgb = (src_rgb * src_a + dst_rgb * dst_a * (1 - src_a)) / out_a
        let out_r = ((src.r as i32 * sa) + (dr as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_g = ((src.g as i32 * sa) + (dg as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_b = ((src.b as i32 * sa) + (db as i32 * da as i32 * inv_sa / 255)) / out_a;

        Self {
            r: out_r.clamp(0, 255) as i16,
            g: out_g.clamp(0, 255) as i16,
            b: out_b.clamp(0, 255) as i16,
            a: out_a.clamp(0, 255) as i16,
        }
    }

    /// Build a color from a packed RGB integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_tui::types::Rgba;
    ///
    /// let red = Rgba::from_rgb_int(0xff0000);
    /// assert_eq!(red, Rgba::rgb(255, 0, 0));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse a hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid input.
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_tui::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::rgb(255, 255, 255)));
    /// assert_eq!(Rgba::from_hex("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert_eq!(Rgba::from_hex("0000ff"), Some(Rgba::rgb(0, 0, 255)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                let a = hex_byte(bytes, 6)?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse a color from a string: hex or the keywords "transparent" and
    /// "default".
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "transparent" => Some(Self::TRANSPARENT),
            "default" | "terminal" => Some(Self::TERMINAL_DEFAULT),
            _ => Self::from_hex(input),
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// This is what the output layer deals with. The whole pipeline exists to
/// compute grids of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space). [`Cell::CONTINUATION`] marks the
    /// trailing half of a double-width glyph.
    pub ch: u32,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags (bold, italic, etc.).
    pub attrs: Attr,
}

impl Cell {
    /// Marker codepoint for the second column of a wide glyph.
    pub const CONTINUATION: u32 = 0;

    /// A cell showing `ch` with default colors.
    pub fn new(ch: char) -> Self {
        Self {
            ch: ch as u32,
            ..Self::default()
        }
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// The standard terminal border glyph sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Single = 0,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 1,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 2,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 3,
    /// ┄ ┆ ┌ ┐ └ ┘
    Dashed = 4,
    /// · · · · · ·
    Dotted = 5,
    /// - | + + + +
    Ascii = 6,
    /// █ █ █ █ █ █
    Block = 7,
    /// ═ │ ╒ ╕ ╘ ╛ (double horizontal, single vertical)
    DoubleHorz = 8,
    /// ─ ║ ╓ ╖ ╙ ╜ (single horizontal, double vertical)
    DoubleVert = 9,
}

impl BorderStyle {
    /// The glyphs for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(
        &self,
    ) -> (
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
        &'static str,
    ) {
        match self {
            Self::Single => ("─", "│", "┌", "┐", "┘", "└"),
            Self::Double => ("═", "║", "╔", "╗", "╝", "╚"),
            Self::Rounded => ("─", "│", "╭", "╮", "╯", "╰"),
            Self::Bold => ("━", "┃", "┏", "┓", "┛", "┗"),
            Self::Dashed => ("┄", "┆", "┌", "┐", "┘", "└"),
            Self::Dotted => ("·", "·", "·", "·", "·", "·"),
            Self::Ascii => ("-", "|", "+", "+", "+", "+"),
            Self::Block => ("█", "█", "█", "█", "█", "█"),
            Self::DoubleHorz => ("═", "│", "╒", "╕", "╛", "╘"),
            Self::DoubleVert => ("─", "║", "╓", "╖", "╜", "╙"),
        }
    }
}

// =============================================================================
// Layout Enums
// =============================================================================

/// Stacking axis for flow containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Vertical = 0,
    Horizontal = 1,
}

impl Direction {
    pub const fn is_horizontal(&self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// How an element is positioned within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Position {
    /// Takes part in the parent's flow.
    #[default]
    Relative = 0,
    /// Removed from the flow, placed at an offset from the parent's content
    /// origin.
    Absolute = 1,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum HAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum VAlign {
    #[default]
    Top = 0,
    Middle = 1,
    Bottom = 2,
}

// =============================================================================
// Tests
// =============================================================================
