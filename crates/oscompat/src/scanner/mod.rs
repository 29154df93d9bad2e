//! UTF-8 validity scanner.
//!
//! Reports the offsets of bytes that are not part of a well-formed UTF-8
//! encoding, so the decoder can escape them one by one instead of failing
//! the whole input.
//!
//! The scan is a single left-to-right pass. At each position the lead byte
//! selects a candidate length (1 to 4 bytes). A candidate is accepted when
//! all of its continuation bytes are `10xxxxxx`, it is not truncated by the
//! end of input, and the decoded value is neither overlong, nor a surrogate,
//! nor above `U+10FFFF`. Accepted candidates are skipped whole. Anything
//! else reports only the byte at the cursor and moves on by one, so the
//! remaining bytes of a rejected candidate are classified on their own.
//!
//! Invariants
//! - Offsets are strictly increasing.
//! - No reported offset falls inside an accepted multi-byte sequence.
//! - ASCII bytes are never reported.
//!
//! ```
//! use oscompat::scanner::invalid_offsets;
//!
//! assert!(invalid_offsets("héllo".as_bytes()).is_empty());
//! // Overlong three-byte encoding of U+0000.
//! assert_eq!(invalid_offsets(b"\xe0\x80\x80"), [0, 1, 2]);
//! ```

use alloc::vec::Vec;

/// Iterator over the offsets of invalid bytes, in increasing order.
#[derive(Debug, Clone)]
pub struct InvalidBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Scans `bytes` lazily.
#[must_use]
pub fn scan(bytes: &[u8]) -> InvalidBytes<'_> {
    InvalidBytes { bytes, pos: 0 }
}

/// Collects the offsets of every invalid byte in `bytes`.
#[must_use]
pub fn invalid_offsets(bytes: &[u8]) -> Vec<usize> {
    if bytes.is_ascii() {
        return Vec::new();
    }
    scan(bytes).collect()
}

impl Iterator for InvalidBytes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(rest) = self.bytes.get(self.pos..) {
            let &lead = rest.first()?;
            if lead.is_ascii() {
                // Skip the whole ASCII run at once.
                let run = rest.iter().take_while(|b| b.is_ascii()).count();
                self.pos += run;
                continue;
            }
            let start = self.pos;
            match accept(rest) {
                Some(len) => self.pos += len,
                None => {
                    self.pos += 1;
                    return Some(start);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bytes.len().saturating_sub(self.pos)))
    }
}

impl core::iter::FusedIterator for InvalidBytes<'_> {}

/// Length of the well-formed sequence at the start of `bytes`, if any.
///
/// `bytes` must be non-empty.
fn accept(bytes: &[u8]) -> Option<usize> {
    let lead = bytes[0];
    let (len, min, mut value) = match lead {
        0x00..=0x7F => return Some(1),
        0xC0..=0xDF => (2, 0x80, u32::from(lead & 0x1F)),
        0xE0..=0xEF => (3, 0x800, u32::from(lead & 0x0F)),
        0xF0..=0xF7 => (4, 0x1_0000, u32::from(lead & 0x07)),
        // Stray continuation byte, or a lead byte with no valid pattern.
        _ => return None,
    };
    let tail = bytes.get(1..len)?;
    for &b in tail {
        if b & 0xC0 != 0x80 {
            return None;
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }
    let overlong = value < min;
    let surrogate = len == 3 && (0xD800..=0xDFFF).contains(&value);
    let out_of_range = len == 4 && value > 0x10_FFFF;
    if overlong || surrogate || out_of_range {
        return None;
    }
    Some(len)
}
