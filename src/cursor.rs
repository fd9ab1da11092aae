/// Read-only view over an input buffer with a forward-only read position.
#[derive(Debug, Clone)]
pub struct ByteStream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Returns the next unread byte and advances, or `None` once exhausted.
    pub fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Looks `offset` bytes past the last byte read without moving.
    /// `peek(1)` is the byte `next()` would return.
    pub fn peek(&self, offset: usize) -> Option<u8> {
        let index = (self.pos + offset).checked_sub(1)?;
        self.bytes.get(index).copied()
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_looks_ahead_without_consuming() {
        let mut s = ByteStream::new(&[0x10, 0x20, 0x30]);
        assert_eq!(s.peek(1), Some(0x10));
        assert_eq!(s.next(), Some(0x10));
        assert_eq!(s.peek(0), Some(0x10));
        assert_eq!(s.peek(1), Some(0x20));
        assert_eq!(s.peek(2), Some(0x30));
        assert_eq!(s.peek(3), None);
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn next_stops_at_end() {
        let mut s = ByteStream::new(&[0xAA]);
        assert!(!s.is_exhausted());
        assert_eq!(s.next(), Some(0xAA));
        assert!(s.is_exhausted());
        assert_eq!(s.next(), None);
        assert_eq!(s.position(), 1);
        assert_eq!(s.len(), 1);
    }
}
