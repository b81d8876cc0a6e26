use crate::{
    buffer::CodecBuffer,
    error::{Error, Result},
};

/// Constructs a [`CodecBuffer`] of the requested length.
pub type BufferBuilder = fn(usize) -> CodecBuffer;

/// Caller supplied buffer lengths for a conversion, `None` leaves the choice to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferLengths {
    /// Length of the buffer caller chunks are staged in.
    pub input: Option<usize>,
    /// Length of the buffer the backend writes into.
    pub output: Option<usize>,
}

impl BufferLengths {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.input == Some(0) {
            return Err(Error::invalid_argument(
                "input_buffer_length",
                "must be greater than zero",
            ));
        }
        if self.output == Some(0) {
            return Err(Error::invalid_argument(
                "output_buffer_length",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Owns at most one [`CodecBuffer`] and the length it will be built with.
///
/// The length is negotiated between the caller and the backend while the filter initializes; the
/// buffer itself is only allocated on first use, so a stream that never needs it never pays for
/// it.
#[derive(Debug)]
pub struct BufferHolder {
    buffer: Option<CodecBuffer>,
    length: Option<usize>,
    min_length: usize,
    builder: BufferBuilder,
}

impl Default for BufferHolder {
    fn default() -> Self {
        Self {
            buffer: None,
            length: None,
            min_length: 1,
            builder: CodecBuffer::new,
        }
    }
}

impl BufferHolder {
    /// Length used when neither the caller nor the backend asked for one.
    pub const DEFAULT_LENGTH: usize = 64 * 1024;

    /// A holder with no requested length.
    pub fn new() -> Self {
        Self::default()
    }

    /// A holder requesting `length`, or the default when `None`.
    pub fn with_length(length: Option<usize>) -> Result<Self> {
        let mut holder = Self::new();
        if let Some(length) = length {
            holder.set_length(length)?;
        }
        Ok(holder)
    }

    /// Replaces the function used to construct the buffer.
    pub fn with_builder(mut self, builder: BufferBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Requests a buffer of `length` bytes, never less than the backend's minimum.
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        if length == 0 {
            return Err(Error::invalid_argument(
                "buffer length",
                "must be greater than zero",
            ));
        }
        if self.buffer.is_some() {
            return Err(Error::invalid_argument(
                "buffer length",
                "buffer has already been allocated",
            ));
        }
        self.length = Some(length.max(self.min_length));
        Ok(())
    }

    /// Whether a length was explicitly requested.
    pub fn is_length_set(&self) -> bool {
        self.length.is_some()
    }

    /// The length the buffer is (or will be) built with.
    pub fn length(&self) -> usize {
        self.length
            .unwrap_or(Self::DEFAULT_LENGTH)
            .max(self.min_length)
    }

    /// Raises the length to at least `min`. Requested lengths above `min` are kept.
    pub fn require_min_length(&mut self, min: usize) -> Result<()> {
        let min = min.max(1);
        if let Some(buffer) = &self.buffer {
            if buffer.capacity() < min {
                return Err(Error::BufferOverflow {
                    requested: min,
                    available: buffer.capacity(),
                });
            }
        }
        self.min_length = self.min_length.max(min);
        if let Some(length) = &mut self.length {
            *length = (*length).max(self.min_length);
        }
        Ok(())
    }

    /// The minimum length the backend negotiated.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether the buffer has been built.
    pub fn is_buffer_set(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns the buffer, building it on first use.
    pub fn buffer(&mut self) -> Result<&mut CodecBuffer> {
        let length = self.length();
        let builder = self.builder;
        let buffer = self.buffer.get_or_insert_with(|| builder(length));
        if buffer.capacity() < length {
            return Err(Error::BufferOverflow {
                requested: length,
                available: buffer.capacity(),
            });
        }
        Ok(buffer)
    }

    /// The buffer if it has been built.
    pub fn get(&self) -> Option<&CodecBuffer> {
        self.buffer.as_ref()
    }

    /// The buffer if it has been built, without building it.
    pub fn get_mut(&mut self) -> Option<&mut CodecBuffer> {
        self.buffer.as_mut()
    }

    /// Drops the buffer. A later [`buffer`](Self::buffer) call builds a fresh one.
    pub fn release(&mut self) {
        self.buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_length_until_set() {
        let mut holder = BufferHolder::new();
        assert!(!holder.is_length_set());
        assert_eq!(holder.length(), BufferHolder::DEFAULT_LENGTH);

        holder.set_length(100).unwrap();
        assert!(holder.is_length_set());
        assert_eq!(holder.length(), 100);
    }

    #[test]
    fn zero_length_is_rejected() {
        let mut holder = BufferHolder::new();
        assert!(matches!(
            holder.set_length(0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(BufferHolder::with_length(Some(0)).is_err());
    }

    #[test]
    fn never_shrinks_below_backend_minimum() {
        let mut holder = BufferHolder::with_length(Some(10)).unwrap();
        holder.require_min_length(64).unwrap();
        assert_eq!(holder.length(), 64);

        holder.set_length(8).unwrap();
        assert_eq!(holder.length(), 64);

        holder.require_min_length(16).unwrap();
        assert_eq!(holder.length(), 64);
    }

    #[test]
    fn builds_exactly_once() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        fn counting(length: usize) -> CodecBuffer {
            BUILT.fetch_add(1, Ordering::SeqCst);
            CodecBuffer::new(length)
        }

        let mut holder = BufferHolder::with_length(Some(32))
            .unwrap()
            .with_builder(counting);
        assert!(!holder.is_buffer_set());
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);

        assert_eq!(holder.buffer().unwrap().capacity(), 32);
        holder.buffer().unwrap().next_put_all(&[1]).unwrap();
        assert_eq!(holder.buffer().unwrap().unread(), &[1]);
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);

        holder.release();
        assert!(holder.get().is_none());
        holder.buffer().unwrap();
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn length_is_fixed_once_built() {
        let mut holder = BufferHolder::with_length(Some(4)).unwrap();
        holder.buffer().unwrap();
        assert!(holder.set_length(8).is_err());
        assert!(matches!(
            holder.require_min_length(8),
            Err(Error::BufferOverflow { .. })
        ));
    }
}
