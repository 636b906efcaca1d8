use crate::{PcbError, Result};

// CP437 bitmap data, 256 glyphs, one byte per row, MSB = leftmost pixel
static VGA_8X16: &[u8] = include_bytes!("fonts/vga_8x16.bin");
static VGA_8X8: &[u8] = include_bytes!("fonts/vga_8x8.bin");

/// A fixed-cell bitmap font with one glyph per CP437 code point.
///
/// Fonts are selected by the names the original renderer uses: `80x25` is
/// the classic 8x16 VGA text mode font, `80x50` the 8x8 variant. Name
/// matching is case-insensitive.
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Glyph bitmap width in pixels (always 8; the 9th column of 9-bit
    /// rendering is synthesized by the rasterizer)
    pub width: usize,
    /// Glyph height in pixels
    pub height: usize,
    data: &'static [u8],
}

impl Font {
    /// Looks up a font by name.
    ///
    /// # Errors
    ///
    /// Returns [`PcbError::UnknownFont`] for unrecognized names. Callers
    /// resolve the font before any decoding work so a typo fails fast.
    pub fn select(name: &str) -> Result<Font> {
        match name.to_ascii_lowercase().as_str() {
            "80x25" | "8x16" => Ok(Font {
                width: 8,
                height: 16,
                data: VGA_8X16,
            }),
            "80x50" | "8x8" => Ok(Font {
                width: 8,
                height: 8,
                data: VGA_8X8,
            }),
            _ => Err(PcbError::UnknownFont(name.to_string())),
        }
    }

    /// Returns the bitmap rows of one glyph, `height` bytes.
    #[inline]
    pub fn glyph(&self, code: u8) -> &'static [u8] {
        let start = code as usize * self.height;
        &self.data[start..start + self.height]
    }
}
