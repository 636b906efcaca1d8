//! # icy_pcb
//!
//! A 100% Rust decoder and renderer for PCBoard `@`-sequence art files.
//!
//! PCBoard BBS art is a flat 8-bit text stream with in-band control
//! sequences: `@Xbf` sets the background/foreground colors, `@CLS@` clears
//! the screen and `@POS:n@` moves the cursor to a column. This crate
//! interprets the stream into a grid of colored glyph cells and rasterizes
//! the grid onto an RGBA canvas using an embedded CP437 bitmap font.
//!
//! ## Quick Start
//!
//! ### Decoding a PCBoard stream
//!
//! ```rust
//! use icy_pcb::pcb_decode;
//!
//! let art = pcb_decode(b"@X0FHello!", 80)?;
//! assert_eq!(art.cells.len(), 6);
//! assert_eq!(art.cells[0].foreground, 15);
//! # Ok::<(), icy_pcb::PcbError>(())
//! ```
//!
//! ### Rendering to pixels
//!
//! ```rust
//! use icy_pcb::{pcb_decode, pcb_render, Bits, Font};
//!
//! let art = pcb_decode(b"@X1EText on blue", 80)?;
//! let font = Font::select("80x25")?;
//! let image = pcb_render(&art, &font, Bits::Eight)?;
//! // image.pixels contains RGBA pixel data (4 bytes per pixel)
//! println!("{}x{}", image.width, image.height);
//! # Ok::<(), icy_pcb::PcbError>(())
//! ```

use thiserror::Error;

pub mod decoder;
pub mod font;
pub mod render;
pub mod sauce;

pub use decoder::{pcb_decode, Cell, PcbArt};
pub use font::Font;
pub use render::{pcb_convert, pcb_render, ArtImage, Bits, ConvertOptions};
pub use sauce::{sauce_strip, SauceRecord};

/// Errors that can occur while decoding or rendering PCBoard art.
#[derive(Debug, Error)]
pub enum PcbError {
    /// The requested font name is not known
    #[error("unknown font: {0}")]
    UnknownFont(String),

    /// The configured text width is unusable (zero)
    #[error("invalid column count: {0}")]
    InvalidColumns(usize),

    /// Glyph cell width outside the VGA text-mode range
    #[error("bits must be 8 or 9, got {0}")]
    InvalidBits(u8),

    /// The canvas implied by the input would be too large
    #[error("canvas dimensions too large: {width}x{height}")]
    CanvasTooLarge { width: usize, height: usize },

    /// Reading input or writing output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for PCBoard operations.
pub type Result<T> = core::result::Result<T, PcbError>;

// Internal constants shared by the decoder and rasterizer
pub(crate) const PALETTE_LEN: usize = 16;
pub(crate) const MAX_PIXELS: usize = 64 * 1024 * 1024;
