//! SAUCE trailer handling.
//!
//! Art scene files often carry a SAUCE metadata record in their last 128
//! bytes, optionally preceded by a `COMNT` block and a DOS EOF byte. The
//! record is not part of the art stream and must be stripped before
//! decoding, or its bytes would render as garbage cells.

const RECORD_LEN: usize = 128;
const COMMENT_LINE_LEN: usize = 64;

/// A parsed SAUCE record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SauceRecord {
    pub version: String,
    pub title: String,
    pub author: String,
    pub group: String,
    pub date: String,
    pub file_size: u32,
    pub data_type: u8,
    pub file_type: u8,
    pub tinfo1: u16,
    pub tinfo2: u16,
    pub tinfo3: u16,
    pub tinfo4: u16,
    pub flags: u8,
    pub comments: Vec<String>,
}

/// Splits a file buffer into the art stream and its SAUCE trailer.
///
/// Returns the input with the record, any comment block and a preceding
/// EOF byte removed, plus the parsed record. Buffers without a valid
/// trailer come back untouched.
///
/// # Example
///
/// ```rust
/// use icy_pcb::sauce_strip;
///
/// let (body, record) = sauce_strip(b"just art, no trailer");
/// assert_eq!(body, b"just art, no trailer");
/// assert!(record.is_none());
/// ```
pub fn sauce_strip(data: &[u8]) -> (&[u8], Option<SauceRecord>) {
    let Some(record_start) = data.len().checked_sub(RECORD_LEN) else {
        return (data, None);
    };
    let raw = &data[record_start..];
    if &raw[0..5] != b"SAUCE" {
        return (data, None);
    }

    let comment_count = raw[104] as usize;
    let mut record = SauceRecord {
        version: field_string(&raw[5..7]),
        title: field_string(&raw[7..42]),
        author: field_string(&raw[42..62]),
        group: field_string(&raw[62..82]),
        date: field_string(&raw[82..90]),
        file_size: u32::from_le_bytes([raw[90], raw[91], raw[92], raw[93]]),
        data_type: raw[94],
        file_type: raw[95],
        tinfo1: u16::from_le_bytes([raw[96], raw[97]]),
        tinfo2: u16::from_le_bytes([raw[98], raw[99]]),
        tinfo3: u16::from_le_bytes([raw[100], raw[101]]),
        tinfo4: u16::from_le_bytes([raw[102], raw[103]]),
        flags: raw[105],
        comments: Vec::new(),
    };

    let mut body_end = record_start;

    // optional COMNT block directly before the record
    if comment_count > 0 {
        let block_len = 5 + COMMENT_LINE_LEN * comment_count;
        if let Some(block_start) = body_end.checked_sub(block_len) {
            let block = &data[block_start..body_end];
            if &block[0..5] == b"COMNT" {
                record.comments = block[5..]
                    .chunks_exact(COMMENT_LINE_LEN)
                    .map(field_string)
                    .collect();
                body_end = block_start;
            }
        }
    }

    // the EOF byte separating art from metadata
    if body_end > 0 && data[body_end - 1] == 0x1A {
        body_end -= 1;
    }

    (&data[..body_end], Some(record))
}

/// Space-padded CP437 text field to a trimmed string.
fn field_string(bytes: &[u8]) -> String {
    let text: String = bytes
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { ' ' })
        .collect();
    text.trim_end().to_string()
}
