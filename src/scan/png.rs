//! PNG chunk walk searching text chunks for provenance markers
//!
//! PNG lays out chunks after its 8-byte signature: a u32 big-endian data
//! length, a 4-byte type code, the data, then a 4-byte CRC. C2PA-aware
//! encoders record manifest references in textual chunks (iTXt, tEXt,
//! zTXt), so those chunk bodies are lossy-decoded and searched for the
//! strings "jumbf" and "c2pa", case-insensitively. CRCs are not
//! validated.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

use super::{Container, ContainerScanResult, Segment, SegmentKind};

static PROVENANCE_MARKERS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["jumbf", "c2pa"])
        .unwrap()
});

fn text_kind(type_code: &[u8]) -> Option<SegmentKind> {
    match type_code {
        b"iTXt" => Some(SegmentKind::Itxt),
        b"tEXt" => Some(SegmentKind::Text),
        b"zTXt" => Some(SegmentKind::Ztxt),
        _ => None,
    }
}

pub(super) fn scan_png(bytes: &[u8]) -> ContainerScanResult {
    let mut segments = Vec::new();
    let mut p = 8usize;

    // Chunk header is 4 length bytes plus 4 type bytes
    while p + 8 <= bytes.len() {
        let data_len =
            u32::from_be_bytes([bytes[p], bytes[p + 1], bytes[p + 2], bytes[p + 3]]) as usize;
        let type_code = &bytes[p + 4..p + 8];
        let data_start = p + 8;
        let data_end = match data_start.checked_add(data_len) {
            Some(end) => end,
            None => break,
        };
        // The CRC trails the data; a chunk that cannot fit both stops the walk
        if data_end > bytes.len().saturating_sub(4) {
            break;
        }
        if let Some(kind) = text_kind(type_code) {
            let text = String::from_utf8_lossy(&bytes[data_start..data_end]);
            let matched = PROVENANCE_MARKERS.is_match(text.as_ref());
            segments.push(Segment {
                kind,
                byte_offset: p,
                byte_length: data_len,
                matched_signature: matched,
            });
            if matched {
                return ContainerScanResult {
                    present: true,
                    container: Container::Png,
                    segments,
                };
            }
        }
        if type_code == b"IEND" {
            break;
        }
        p = data_end + 4;
    }

    ContainerScanResult {
        present: false,
        container: Container::Png,
        segments,
    }
}
