//! JPEG marker-stream walk for JUMBF-bearing APP11 segments
//!
//! A JPEG file is a sequence of 0xFF-prefixed marker segments. Each
//! tagged segment declares a big-endian u16 length that counts the two
//! length bytes themselves. C2PA embeds its manifest store as a JUMBF
//! superbox split across one or more APP11 segments whose payloads start
//! with the ASCII tag "JUMBF".

use super::{Container, ContainerScanResult, Segment, SegmentKind};

const MARKER_EOI: u8 = 0xD9;
const MARKER_SOS: u8 = 0xDA;
const MARKER_APP11: u8 = 0xEB;

const JUMBF_TAG: &[u8; 5] = b"JUMBF";

pub(super) fn scan_jpeg(bytes: &[u8]) -> ContainerScanResult {
    let mut segments = Vec::new();
    let mut i = 2usize;

    // Need the marker byte, its code, and two length bytes to proceed
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            // Stray byte between segments; resync on the next 0xFF
            i += 1;
            continue;
        }
        let marker = bytes[i + 1];
        if marker == MARKER_EOI || marker == MARKER_SOS {
            // Entropy-coded data follows SOS; manifests never live there
            break;
        }
        let seg_len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        if seg_len < 2 {
            // Length counts its own two bytes; anything smaller is garbage
            break;
        }
        let payload_start = i + 4;
        let payload_end = i + 2 + seg_len;
        if payload_end > bytes.len() {
            // Truncated segment
            break;
        }
        if marker == MARKER_APP11 {
            let matched = bytes[payload_start..payload_end].starts_with(JUMBF_TAG);
            segments.push(Segment {
                kind: SegmentKind::App11,
                byte_offset: i,
                byte_length: seg_len,
                matched_signature: matched,
            });
            if matched {
                return ContainerScanResult {
                    present: true,
                    container: Container::Jpeg,
                    segments,
                };
            }
        }
        i = payload_end;
    }

    ContainerScanResult {
        present: false,
        container: Container::Jpeg,
        segments,
    }
}
