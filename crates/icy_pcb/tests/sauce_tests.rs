use icy_pcb::*;
use pretty_assertions::assert_eq;

fn sample_record(comments: u8) -> Vec<u8> {
    let mut record = Vec::with_capacity(128);
    record.extend_from_slice(b"SAUCE00");
    record.extend_from_slice(&pad(b"Block Party", 35));
    record.extend_from_slice(&pad(b"lord scarlet", 20));
    record.extend_from_slice(&pad(b"sixteen colors", 20));
    record.extend_from_slice(b"20160229");
    record.extend_from_slice(&1234u32.to_le_bytes());
    record.push(1); // data type: character
    record.push(4); // file type: PCBoard
    record.extend_from_slice(&80u16.to_le_bytes());
    record.extend_from_slice(&25u16.to_le_bytes());
    record.extend_from_slice(&0u16.to_le_bytes());
    record.extend_from_slice(&0u16.to_le_bytes());
    record.push(comments);
    record.push(0); // flags
    record.extend_from_slice(&[0u8; 22]);
    assert_eq!(record.len(), 128);
    record
}

fn pad(text: &[u8], len: usize) -> Vec<u8> {
    let mut field = text.to_vec();
    field.resize(len, b' ');
    field
}

#[test]
fn test_sauce_strip_plain_record() {
    let mut data = b"@X0Fart body".to_vec();
    data.push(0x1A);
    data.extend_from_slice(&sample_record(0));

    let (body, record) = sauce_strip(&data);
    let record = record.unwrap();

    assert_eq!(body, b"@X0Fart body");
    assert_eq!(record.version, "00");
    assert_eq!(record.title, "Block Party");
    assert_eq!(record.author, "lord scarlet");
    assert_eq!(record.group, "sixteen colors");
    assert_eq!(record.date, "20160229");
    assert_eq!(record.file_size, 1234);
    assert_eq!(record.data_type, 1);
    assert_eq!(record.file_type, 4);
    assert_eq!(record.tinfo1, 80);
    assert_eq!(record.tinfo2, 25);
    assert!(record.comments.is_empty());
}

#[test]
fn test_sauce_strip_with_comment_block() {
    let mut data = b"art body".to_vec();
    data.push(0x1A);
    data.extend_from_slice(b"COMNT");
    data.extend_from_slice(&pad(b"first line", 64));
    data.extend_from_slice(&pad(b"second line", 64));
    data.extend_from_slice(&sample_record(2));

    let (body, record) = sauce_strip(&data);
    let record = record.unwrap();

    assert_eq!(body, b"art body");
    assert_eq!(record.comments, vec!["first line", "second line"]);
}

#[test]
fn test_sauce_strip_without_record() {
    let data = b"no trailer here";
    let (body, record) = sauce_strip(data);

    assert_eq!(body, data.as_slice());
    assert!(record.is_none());
}

#[test]
fn test_sauce_strip_short_buffer() {
    let (body, record) = sauce_strip(b"tiny");
    assert_eq!(body, b"tiny");
    assert!(record.is_none());
}

#[test]
fn test_sauce_strip_missing_comment_block_keeps_record() {
    // record claims comments, but no COMNT block precedes it; strip only
    // the record itself
    let mut data = b"art body".to_vec();
    data.extend_from_slice(&sample_record(3));

    let (body, record) = sauce_strip(&data);
    let record = record.unwrap();

    assert_eq!(body, b"art body");
    assert!(record.comments.is_empty());
}

#[test]
fn test_stripped_body_decodes_cleanly() {
    let mut data = b"AB".to_vec();
    data.push(0x1A);
    data.extend_from_slice(&sample_record(0));

    let (body, _) = sauce_strip(&data);
    let art = pcb_decode(body, 80).unwrap();

    assert_eq!(art.cells.len(), 2);
}
