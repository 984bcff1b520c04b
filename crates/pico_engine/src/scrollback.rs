//! A byte-oriented ring buffer for scrollback.
//!
//! Capacity is always a power of two so every wrap is a mask, never a
//! division. A buffer created with a contiguous view keeps a mirrored second
//! half so any in-range window can be returned as one straight slice, the
//! safe-std equivalent of mapping the same pages twice.

use thiserror::Error;

/// Contiguous views are limited to this many bytes, and contiguous-view
/// buffers are at least this large.
pub const PAGE_GRANULE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingBufferError {
    #[error("buffer was not created with a contiguous view")]
    Discontiguous,
    #[error("requested {len} bytes, more than the {PAGE_GRANULE} byte view limit")]
    TooLarge { len: usize },
    #[error("window {offset}+{len} exceeds the {size} bytes stored")]
    OutOfBounds { offset: usize, len: usize, size: usize },
}

pub struct ScrollbackBuffer {
    buf: Vec<u8>,
    contiguous: bool,
    cursor: usize,
    size: usize,
    capacity: usize,
}

impl ScrollbackBuffer {
    /// A ring of at least `capacity` bytes, rounded up to a power of two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(2);
        Self {
            buf: vec![0; capacity],
            contiguous: false,
            cursor: 0,
            size: 0,
            capacity,
        }
    }

    /// Like [`ScrollbackBuffer::new`] but with [`ScrollbackBuffer::view`]
    /// enabled. Capacity is additionally rounded up to the page granule.
    pub fn with_contiguous_view(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(PAGE_GRANULE);
        Self {
            // Twice the capacity: the upper half mirrors the lower so a
            // window crossing the wrap point is still one slice.
            buf: vec![0; capacity * 2],
            contiguous: true,
            cursor: 0,
            size: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently stored, saturating at the capacity.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
        self.size = 0;
    }

    fn copy_at(&mut self, position: usize, data: &[u8]) {
        self.buf[position..position + data.len()].copy_from_slice(data);
        if self.contiguous {
            self.buf[self.capacity + position..self.capacity + position + data.len()].copy_from_slice(data);
        }
    }

    /// Appends, overwriting the oldest bytes on wrap. Writing more than the
    /// capacity keeps only the final `capacity` bytes.
    pub fn write(&mut self, data: &[u8]) {
        let data = if data.len() > self.capacity {
            &data[data.len() - self.capacity..]
        } else {
            data
        };

        let tail = (self.capacity - self.cursor).min(data.len());
        self.copy_at(self.cursor, &data[..tail]);
        self.copy_at(0, &data[tail..]);

        self.cursor = (self.cursor + data.len()) & (self.capacity - 1);
        self.size = (self.size + data.len()).min(self.capacity);
    }

    /// The byte `offset` positions back from the most recent one
    /// (`offset == 0` is the newest byte). Offsets wrap modulo the capacity.
    pub fn get(&self, offset: usize) -> u8 {
        self.buf[self.cursor.wrapping_sub(1).wrapping_sub(offset) & (self.capacity - 1)]
    }

    /// A contiguous window of `len` bytes starting `offset` bytes from the
    /// buffer origin. Only available on buffers created with
    /// [`ScrollbackBuffer::with_contiguous_view`]. Once the ring has wrapped
    /// every physical offset holds live data and a window may run past the
    /// physical end into the mirror.
    pub fn view(&self, offset: usize, len: usize) -> Result<&[u8], RingBufferError> {
        if !self.contiguous {
            return Err(RingBufferError::Discontiguous);
        }
        if len > PAGE_GRANULE {
            return Err(RingBufferError::TooLarge { len });
        }
        let wrapped = self.size == self.capacity;
        if (wrapped && offset >= self.capacity) || (!wrapped && offset + len > self.size) {
            return Err(RingBufferError::OutOfBounds {
                offset,
                len,
                size: self.size,
            });
        }
        Ok(&self.buf[offset..offset + len])
    }
}
