use crate::{PcbError, Result};

/// One resolved, positioned character, ready to render.
///
/// Cells are immutable once appended; rendering order equals append order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// 0-based column, always below the configured text width
    pub column: usize,
    /// 0-based row
    pub row: usize,
    /// DOS palette index 0-15
    pub background: u8,
    /// DOS palette index 0-15
    pub foreground: u8,
    /// CP437 glyph identity
    pub code: u8,
}

/// A fully decoded PCBoard stream: the ordered cell buffer plus the
/// observed extent used to size the output canvas.
#[derive(Debug, Clone)]
pub struct PcbArt {
    /// Cell records in append order
    pub cells: Vec<Cell>,
    /// Configured text width the stream was decoded against
    pub columns: usize,
    /// Largest column index any cell was written to
    pub column_max: usize,
    /// Largest row index any cell was written to
    pub row_max: usize,
}

/// Decodes a PCBoard `@`-sequence byte stream into a cell buffer.
///
/// # PCBoard Format
///
/// The stream is flat 8-bit text with no framing. Interleaved control
/// sequences change interpreter state instead of producing glyphs:
///
/// ```text
/// @Xbf      set colors; b/f are the palette entries '0'-'9', 'A'-'F'
/// @CLS@     clear screen: cursor and extent back to (0,0)
/// @POS:n@   move the cursor to 1-based column n (one or two digits)
/// ```
///
/// Plain bytes become cells at the cursor with the current colors. CR+LF or
/// a lone LF advance the row, a tab advances the column by 8, and byte 26
/// (the DOS EOF sentinel) truncates the stream. Lines longer than `columns`
/// wrap.
///
/// `@CLS@` resets only the cursor and the extent bookkeeping; cells emitted
/// before it stay in the buffer and still render at their original
/// coordinates, where later cells overpaint them. This mirrors the
/// reference loader.
///
/// A sequence introducer truncated by the end of the buffer is not an
/// error: the lookahead is bounds checked and the `@` falls through to
/// plain-character handling.
///
/// # Parameters
///
/// * `data` - raw stream, already stripped of any trailing SAUCE record
///   (see [`crate::sauce_strip`])
/// * `columns` - text width to wrap at, 80 for virtually all PCBoard art
///
/// # Errors
///
/// Returns [`PcbError::InvalidColumns`] if `columns` is zero. Arbitrary
/// byte content never fails.
///
/// # Example
///
/// ```rust
/// use icy_pcb::pcb_decode;
///
/// let art = pcb_decode(b"@X4Falert@CLS@ok", 80)?;
/// // "alert" stays in the buffer, "ok" restarts at the origin
/// assert_eq!(art.cells.len(), 7);
/// assert_eq!(art.cells[5].column, 0);
/// assert_eq!(art.row_max, 0);
/// # Ok::<(), icy_pcb::PcbError>(())
/// ```
#[must_use = "this returns the decoded PcbArt"]
pub fn pcb_decode(data: &[u8], columns: usize) -> Result<PcbArt> {
    if columns == 0 {
        return Err(PcbError::InvalidColumns(columns));
    }
    let mut decoder = PcbDecoder::new(columns);
    decoder.process(data);
    Ok(decoder.finish())
}

struct PcbDecoder {
    columns: usize,
    column: usize,
    row: usize,
    background: u8,
    foreground: u8,
    column_max: usize,
    row_max: usize,
    cells: Vec<Cell>,
}

impl PcbDecoder {
    fn new(columns: usize) -> Self {
        Self {
            columns,
            column: 0,
            row: 0,
            background: 0,
            foreground: 7,
            column_max: 0,
            row_max: 0,
            cells: Vec::new(),
        }
    }

    fn process(&mut self, data: &[u8]) {
        let mut idx = 0usize;
        while idx < data.len() {
            // Wrap before interpreting the byte, so a tab or @POS: that
            // pushed the cursor past the width lands on the next row.
            if self.column >= self.columns {
                self.row += 1;
                self.column = 0;
            }

            match data[idx] {
                13 if data.get(idx + 1) == Some(&10) => {
                    self.newline();
                    idx += 2;
                }
                // a CR without LF moves nothing and prints nothing
                13 => idx += 1,
                10 => {
                    self.newline();
                    idx += 1;
                }
                9 => {
                    self.column += 8;
                    idx += 1;
                }
                // DOS EOF sentinel: everything after is ignored
                26 => break,
                b'@' => {
                    if let Some(consumed) = self.try_sequence(data, idx) {
                        idx += consumed;
                    } else {
                        self.emit(b'@');
                        idx += 1;
                    }
                }
                byte => {
                    self.emit(byte);
                    idx += 1;
                }
            }
        }
    }

    /// Attempts to match a control sequence at `idx` (which holds `@`).
    /// Returns the number of bytes consumed, or `None` when the tail is not
    /// a sequence, including every truncated-at-end-of-buffer case.
    fn try_sequence(&mut self, data: &[u8], idx: usize) -> Option<usize> {
        match *data.get(idx + 1)? {
            b'X' => {
                let background = hex_color(*data.get(idx + 2)?)?;
                let foreground = hex_color(*data.get(idx + 3)?)?;
                self.background = background;
                self.foreground = foreground;
                Some(4)
            }
            b'C' if data.get(idx + 2) == Some(&b'L') && data.get(idx + 3) == Some(&b'S') => {
                self.column = 0;
                self.row = 0;
                self.column_max = 0;
                self.row_max = 0;
                // the reference loader steps over the closing '@' of
                // "@CLS@" as well; cells stay in the buffer
                Some(5)
            }
            b'P' if data.len() - idx >= 7
                && data[idx + 2] == b'O'
                && data[idx + 3] == b'S'
                && data[idx + 4] == b':' =>
            {
                let first = data[idx + 5];
                if !first.is_ascii_digit() {
                    return None;
                }
                let second = data[idx + 6];
                if second.is_ascii_digit() {
                    let value = 10 * (first - b'0') as usize + (second - b'0') as usize;
                    self.column = value.saturating_sub(1);
                    Some(7)
                } else {
                    // single digit: the byte after it is the next
                    // sequence's introducer and is left in the stream
                    self.column = ((first - b'0') as usize).saturating_sub(1);
                    Some(6)
                }
            }
            _ => None,
        }
    }

    fn newline(&mut self) {
        self.row += 1;
        self.column = 0;
    }

    fn emit(&mut self, code: u8) {
        if self.column > self.column_max {
            self.column_max = self.column;
        }
        if self.row > self.row_max {
            self.row_max = self.row;
        }
        self.cells.push(Cell {
            column: self.column,
            row: self.row,
            background: self.background,
            foreground: self.foreground,
            code,
        });
        self.column += 1;
    }

    fn finish(self) -> PcbArt {
        PcbArt {
            cells: self.cells,
            columns: self.columns,
            column_max: self.column_max,
            row_max: self.row_max,
        }
    }
}

/// Maps the color code characters `0`-`9`, `A`-`F` of an `@X` sequence to
/// dense palette indices. Anything else rejects the sequence.
fn hex_color(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
