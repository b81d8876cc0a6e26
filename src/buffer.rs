use std::fmt;

use crate::error::{Error, Result};

/// Fixed-capacity byte region with a read cursor and a write cursor.
///
/// Bytes between the cursors are *unread*, bytes after the write cursor are *unwritten*. The
/// invariant `0 <= read_position <= write_position <= capacity` holds after every call.
pub struct CodecBuffer {
    data: Box<[u8]>,
    read: usize,
    write: usize,
}

impl CodecBuffer {
    /// Allocates a zeroed buffer of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
        }
    }

    /// Total size of the region.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Offset of the read cursor.
    pub fn read_position(&self) -> usize {
        self.read
    }

    /// Offset of the write cursor.
    pub fn write_position(&self) -> usize {
        self.write
    }

    /// `write_position - read_position`.
    pub fn unread_count(&self) -> usize {
        self.write - self.read
    }

    /// `capacity - write_position`.
    pub fn unwritten_count(&self) -> usize {
        self.data.len() - self.write
    }

    /// Bytes written but not yet consumed.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.read..self.write]
    }

    /// Free space after the write cursor.
    pub fn unwritten_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.write..]
    }

    /// Marks `amount` unread bytes as consumed.
    ///
    /// # Panics
    ///
    /// If `amount` exceeds [`unread_count`](Self::unread_count).
    pub fn advance_read(&mut self, amount: usize) {
        assert!(
            amount <= self.unread_count(),
            "advanced read cursor past write cursor"
        );
        self.read += amount;
    }

    /// Marks `amount` bytes of the unwritten region as written.
    ///
    /// # Panics
    ///
    /// If `amount` exceeds [`unwritten_count`](Self::unwritten_count).
    pub fn advance_write(&mut self, amount: usize) {
        assert!(
            amount <= self.unwritten_count(),
            "advanced write cursor past capacity"
        );
        self.write += amount;
    }

    /// Moves the unread bytes to the start of the region.
    pub fn compact(&mut self) {
        if self.read == 0 {
            return;
        }
        self.data.copy_within(self.read..self.write, 0);
        self.write -= self.read;
        self.read = 0;
    }

    /// Zeroes both cursors. Only legal once every written byte has been read.
    pub fn reset(&mut self) -> Result<()> {
        if self.unread_count() != 0 {
            return Err(Error::UnreadData {
                unread: self.unread_count(),
            });
        }
        self.read = 0;
        self.write = 0;
        Ok(())
    }

    /// Appends all of `bytes`, or nothing at all if they do not fit.
    pub fn next_put_all(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.unwritten_count() {
            return Err(Error::BufferOverflow {
                requested: bytes.len(),
                available: self.unwritten_count(),
            });
        }
        self.put_partial(bytes);
        Ok(())
    }

    /// Appends as much of `bytes` as fits, returning how many were taken.
    pub fn put_partial(&mut self, bytes: &[u8]) -> usize {
        let len = bytes.len().min(self.unwritten_count());
        self.data[self.write..self.write + len].copy_from_slice(&bytes[..len]);
        self.write += len;
        len
    }

    /// Copies unread bytes into `output`, consuming them, and returns how many were copied.
    pub fn drain_into(&mut self, output: &mut [u8]) -> usize {
        let len = output.len().min(self.unread_count());
        output[..len].copy_from_slice(&self.data[self.read..self.read + len]);
        self.read += len;
        len
    }
}

impl From<Vec<u8>> for CodecBuffer {
    /// Wraps `bytes` as a fully written buffer.
    fn from(bytes: Vec<u8>) -> Self {
        let write = bytes.len();
        Self {
            data: bytes.into_boxed_slice(),
            read: 0,
            write,
        }
    }
}

impl fmt::Debug for CodecBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecBuffer")
            .field("read", &self.read)
            .field("write", &self.write)
            .field("capacity", &self.data.len())
            .finish()
    }
}
