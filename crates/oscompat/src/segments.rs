/// A piece of a byte sequence, as seen by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run of bytes the encoding can decode strictly.
    Valid { offset: usize, bytes: &'a [u8] },
    /// A single byte that must be escaped.
    Invalid { offset: usize, byte: u8 },
}

/// Splits a byte sequence into alternating valid chunks and single invalid
/// bytes.
///
/// `invalid` must be strictly increasing and in bounds, as produced by
/// [`crate::scanner::invalid_offsets`]. Valid chunks are never empty.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    bytes: &'a [u8],
    invalid: &'a [usize],
    pos: usize,
}

impl<'a> Segments<'a> {
    /// # Panics
    ///
    /// Iteration panics if an offset in `invalid` is out of bounds for
    /// `bytes`. Debug builds check bounds and ordering here instead.
    #[must_use]
    pub fn new(bytes: &'a [u8], invalid: &'a [usize]) -> Self {
        debug_assert!(invalid.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(
            invalid.last().is_none_or(|&i| i < bytes.len()),
            "invalid offset out of range"
        );
        Self {
            bytes,
            invalid,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let offset = self.pos;
        match self.invalid.split_first() {
            Some((&bad, rest)) if bad == offset => {
                self.invalid = rest;
                self.pos += 1;
                Some(Segment::Invalid {
                    offset,
                    byte: self.bytes[offset],
                })
            }
            Some((&bad, _)) => {
                self.pos = bad;
                Some(Segment::Valid {
                    offset,
                    bytes: &self.bytes[offset..bad],
                })
            }
            None => {
                self.pos = self.bytes.len();
                Some(Segment::Valid {
                    offset,
                    bytes: &self.bytes[offset..],
                })
            }
        }
    }
}
