use std::path::Path;

use crate::decoder::{pcb_decode, Cell, PcbArt};
use crate::font::Font;
use crate::{PcbError, Result, MAX_PIXELS, PALETTE_LEN};

/// The standard 16-color DOS palette of the reference renderer, RGBA.
const DOS_PALETTE: [[u8; 4]; PALETTE_LEN] = [
    [0, 0, 0, 255],       // black
    [0, 0, 170, 255],     // blue
    [0, 170, 0, 255],     // green
    [0, 170, 170, 255],   // cyan
    [170, 0, 0, 255],     // red
    [170, 0, 170, 255],   // magenta
    [170, 85, 0, 255],    // brown
    [170, 170, 170, 255], // light gray
    [85, 85, 85, 255],    // dark gray
    [85, 85, 255, 255],   // light blue
    [85, 255, 85, 255],   // light green
    [85, 255, 255, 255],  // light cyan
    [255, 85, 85, 255],   // light red
    [255, 85, 255, 255],  // light magenta
    [255, 255, 85, 255],  // yellow
    [255, 255, 255, 255], // white
];

/// Glyph cell width: VGA text modes render characters 8 or 9 pixels wide.
///
/// In 9-bit mode the extra column repeats the 8th column for the line
/// graphic codes 0xC0-0xDF, so box drawing stays connected, and is
/// background everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bits {
    #[default]
    Eight,
    Nine,
}

impl Bits {
    /// Cell width in pixels.
    #[inline]
    pub fn width(self) -> usize {
        match self {
            Bits::Eight => 8,
            Bits::Nine => 9,
        }
    }
}

impl TryFrom<u8> for Bits {
    type Error = PcbError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            8 => Ok(Bits::Eight),
            9 => Ok(Bits::Nine),
            other => Err(PcbError::InvalidBits(other)),
        }
    }
}

/// A rendered canvas.
#[derive(Debug, Clone)]
pub struct ArtImage {
    /// RGBA pixel data (4 bytes per pixel: R, G, B, A; alpha always 255)
    pub pixels: Vec<u8>,
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
}

impl ArtImage {
    /// Returns the double-resolution variant of this canvas for high-DPI
    /// display, scaled with nearest-neighbor so cell edges stay crisp.
    pub fn retina(&self) -> ArtImage {
        let width = self.width * 2;
        let height = self.height * 2;
        let mut pixels = vec![0u8; width * height * 4];
        for y in 0..height {
            let src_row = (y / 2) * self.width;
            for x in 0..width {
                let src = (src_row + x / 2) * 4;
                let dst = (y * width + x) * 4;
                pixels[dst..dst + 4].copy_from_slice(&self.pixels[src..src + 4]);
            }
        }
        ArtImage {
            pixels,
            width,
            height,
        }
    }

    /// Writes the canvas to `path` as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Rasterizes a decoded cell buffer onto a black RGBA canvas.
///
/// The canvas is `columns * bits` pixels wide — the configured width, not
/// the observed one, so short trailing lines do not shrink the image — and
/// `(row_max + 1) * font.height` pixels tall. Cells are composited in
/// append order; a later cell at the same position overpaints an earlier
/// one, which is also how cells surviving a `@CLS@` resolve visually.
///
/// # Errors
///
/// Returns [`PcbError::CanvasTooLarge`] if the implied canvas exceeds the
/// pixel budget, which bounds memory on hostile input.
#[must_use = "this returns the rendered ArtImage"]
pub fn pcb_render(art: &PcbArt, font: &Font, bits: Bits) -> Result<ArtImage> {
    let width = art.columns * bits.width();
    let height = (art.row_max + 1) * font.height;
    if width.saturating_mul(height) > MAX_PIXELS {
        return Err(PcbError::CanvasTooLarge { width, height });
    }

    // solid black, fully opaque
    let mut pixels = vec![0u8; width * height * 4];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }

    for cell in &art.cells {
        draw_glyph(&mut pixels, width, height, font, bits, cell);
    }

    Ok(ArtImage {
        pixels,
        width,
        height,
    })
}

/// Paints one cell's glyph box, background included, clipped to the canvas.
/// Clipping matters: cells emitted before a `@CLS@` can lie below the
/// extent the canvas was sized from.
fn draw_glyph(pixels: &mut [u8], width: usize, height: usize, font: &Font, bits: Bits, cell: &Cell) {
    let glyph = font.glyph(cell.code);
    let fg = DOS_PALETTE[(cell.foreground as usize) % PALETTE_LEN];
    let bg = DOS_PALETTE[(cell.background as usize) % PALETTE_LEN];
    let x0 = cell.column * bits.width();
    let y0 = cell.row * font.height;

    for (row, &row_bits) in glyph.iter().enumerate() {
        let y = y0 + row;
        if y >= height {
            return;
        }
        for col in 0..8 {
            let x = x0 + col;
            if x >= width {
                break;
            }
            let lit = (row_bits >> (7 - col)) & 1 != 0;
            let color = if lit { fg } else { bg };
            let at = (y * width + x) * 4;
            pixels[at..at + 4].copy_from_slice(&color);
        }
        if bits == Bits::Nine {
            let x = x0 + 8;
            if x < width {
                // VGA duplicates the 8th column for the box drawing range
                let lit = (0xC0..=0xDF).contains(&cell.code) && (row_bits & 1) != 0;
                let color = if lit { fg } else { bg };
                let at = (y * width + x) * 4;
                pixels[at..at + 4].copy_from_slice(&color);
            }
        }
    }
}

/// Conversion settings for [`pcb_convert`].
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Font name passed to [`Font::select`]
    pub font: String,
    /// Glyph cell width
    pub bits: Bits,
    /// Text width to wrap at
    pub columns: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            font: "80x25".to_string(),
            bits: Bits::Eight,
            columns: 80,
        }
    }
}

/// Decodes a PCBoard stream and writes it out as one PNG file, plus an
/// optional `@2x` retina variant.
///
/// `input` must already be stripped of any trailing SAUCE record. The font
/// is resolved first, so an unknown name fails before any decoding work and
/// no partial output is written.
///
/// # Example
///
/// ```rust,no_run
/// use icy_pcb::{pcb_convert, ConvertOptions};
/// use std::path::Path;
///
/// let data = std::fs::read("artwork.pcb")?;
/// pcb_convert(
///     &data,
///     &ConvertOptions::default(),
///     Path::new("artwork.pcb.png"),
///     None,
/// )?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pcb_convert(
    input: &[u8],
    options: &ConvertOptions,
    output: &Path,
    retina_output: Option<&Path>,
) -> Result<()> {
    let font = Font::select(&options.font)?;
    let art = pcb_decode(input, options.columns)?;
    let image = pcb_render(&art, &font, options.bits)?;
    image.save_png(output)?;
    if let Some(path) = retina_output {
        image.retina().save_png(path)?;
    }
    Ok(())
}
