//! Capacity-doubling byte buffer used to read files of unknown size.

/// Capacity a fresh buffer starts with.
pub const INITIAL_CAPACITY: usize = 10;

/// An owned byte store with explicit length and capacity.
///
/// After every [`push`](Self::push) `len < capacity` holds: as soon as the
/// buffer fills up, a buffer of twice the capacity is allocated, the content
/// is copied over and the old allocation is released. There is therefore
/// always room for one more byte, which is where a C-style reader would put
/// its terminator.
#[derive(Debug)]
pub struct GrowableBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero; doubling would never make room.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "GrowableBuffer capacity must be non-zero");
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn push(&mut self, byte: u8) {
        debug_assert!(self.len < self.capacity());
        self.data[self.len] = byte;
        self.len += 1;

        if self.len == self.capacity() {
            self.grow();
        }
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    fn grow(&mut self) {
        let mut bigger = vec![0u8; self.capacity() * 2].into_boxed_slice();
        bigger[..self.len].copy_from_slice(&self.data[..self.len]);
        self.data = bigger;
    }

    /// Consumes the buffer, returning exactly the bytes that were pushed.
    pub fn into_vec(self) -> Vec<u8> {
        let mut v = self.data.into_vec();
        v.truncate(self.len);
        v
    }
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_when_full() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(&[1; 9]);
        assert_eq!(buf.capacity(), 10);

        buf.push(1);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.capacity(), 20);
    }

    #[test]
    fn always_room_for_one_more() {
        let mut buf = GrowableBuffer::with_capacity(1);
        assert!(buf.len() < buf.capacity());
        for i in 0..100u8 {
            buf.push(i);
            assert!(buf.len() < buf.capacity());
        }
        assert_eq!(buf.capacity(), 128);
        assert_eq!(buf.into_vec(), (0..100u8).collect::<Vec<_>>());
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        let buf = GrowableBuffer::new();
        assert!(buf.is_empty());
        assert!(buf.into_vec().is_empty());
    }
}
