use std::{fmt, marker::PhantomData};

use crate::{
    error::{Error, Result},
    params::{CodecOptions, ParamId},
    Level,
};

/// A codec that can be built from validated [`CodecOptions`].
pub trait Configure: Sized {
    /// The codec's parameter ids.
    type Param: ParamId;

    /// The parameter [`Level`] maps onto, with its fastest and best values.
    fn level_param() -> Option<(Self::Param, i64, i64)> {
        None
    }

    /// Wraps options that already passed validation.
    fn from_options(options: CodecOptions<Self::Param>) -> Self;
}

/// Collects parameters and buffer lengths for a codec, validating them all in
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "zstd")] {
/// use chunked_compression::{zstd::{ZstdEncoder, ZstdParam}, Codec, Level};
///
/// let encoder = ZstdEncoder::builder()
///     .level(Level::Best)
///     .param(ZstdParam::ChecksumFlag, 1)
///     .output_buffer_length(16 * 1024)
///     .build()?;
/// let compressed = encoder.convert(b"example")?;
/// # }
/// # Ok::<(), chunked_compression::Error>(())
/// ```
pub struct CodecBuilder<C: Configure> {
    options: CodecOptions<C::Param>,
    unsupported_level: Option<Level>,
    _codec: PhantomData<fn() -> C>,
}

impl<C: Configure> CodecBuilder<C> {
    pub(crate) fn new() -> Self {
        Self {
            options: CodecOptions::default(),
            unsupported_level: None,
            _codec: PhantomData,
        }
    }

    /// Sets the compression level. Values outside the codec's range fail in
    /// [`build`](Self::build).
    pub fn level(mut self, level: Level) -> Self {
        match C::level_param() {
            Some((id, fastest, best)) => self.options.set_level(id, level, fastest, best),
            None if matches!(level, Level::Default) => self.unsupported_level = None,
            None => self.unsupported_level = Some(level),
        }
        self
    }

    /// Sets a backend parameter.
    pub fn param(mut self, id: C::Param, value: i64) -> Self {
        self.options.params.set(id, value);
        self
    }

    /// Length of the buffer caller chunks are staged in.
    pub fn input_buffer_length(mut self, length: usize) -> Self {
        self.options.lengths.input = Some(length);
        self
    }

    /// Length of the buffer the backend writes into. The backend may raise it to its minimum.
    pub fn output_buffer_length(mut self, length: usize) -> Self {
        self.options.lengths.output = Some(length);
        self
    }

    /// Validates everything and returns the codec.
    pub fn build(self) -> Result<C> {
        if let Some(level) = self.unsupported_level {
            return Err(Error::invalid_argument(
                "level",
                format!("{level:?} is not supported by this codec"),
            ));
        }
        self.options.validate()?;
        Ok(C::from_options(self.options))
    }
}

impl<C: Configure> Clone for CodecBuilder<C> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            unsupported_level: self.unsupported_level,
            _codec: PhantomData,
        }
    }
}

impl<C: Configure> fmt::Debug for CodecBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
