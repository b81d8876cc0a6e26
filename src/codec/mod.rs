//! Adapters between the generic filter and the individual compression crates.
//!
//! Every adapter implements [`Backend`]. The filter drives it through
//! `init → process* → (flush*) → finalize* → close` and owns all buffering, so an adapter only
//! ever sees the slices it is handed.

use crate::{error::Result, holder::BufferHolder};

#[cfg(feature = "brotli")]
mod brotli;
#[cfg(feature = "bzip2")]
mod bzip2;
#[cfg(feature = "deflate64")]
mod deflate64;
#[cfg(feature = "flate2")]
mod flate;
#[cfg(feature = "gzip")]
mod gzip;
#[cfg(feature = "lz4")]
mod lz4;
#[cfg(feature = "lzma")]
mod lzma;
#[cfg(feature = "zstd")]
mod zstd;

#[cfg(feature = "brotli")]
pub use self::brotli::{BrotliDecoder, BrotliDecoderParam, BrotliEncoder, BrotliParam};
#[cfg(feature = "bzip2")]
pub use self::bzip2::{BzDecoder, BzDecoderParam, BzEncoder, BzParam};
#[cfg(feature = "deflate64")]
pub use self::deflate64::Deflate64Decoder;
#[cfg(feature = "flate2")]
pub use self::flate::{FlateDecoder, FlateEncoder, FlateParam};
#[cfg(feature = "gzip")]
pub use self::gzip::{GzipDecoder, GzipDecoderParam, GzipEncoder, GzipHeader};
#[cfg(feature = "lz4")]
pub use self::lz4::{Lz4Decoder, Lz4Encoder, Lz4Param};
#[cfg(feature = "lzma")]
pub(crate) use self::lzma::LzmaFormat;
#[cfg(feature = "lzma")]
pub use self::lzma::{LzmaDecoder, LzmaDecoderParam, LzmaEncoder, LzmaParam};
#[cfg(feature = "zstd")]
pub use self::zstd::{ZstdDecoder, ZstdDecoderParam, ZstdEncoder, ZstdParam};

/// Bytes consumed and produced by one backend step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodecResult {
    read: usize,
    written: usize,
}

impl CodecResult {
    /// A step that consumed `read` input bytes and produced `written` output bytes.
    pub fn new(read: usize, written: usize) -> Self {
        Self { read, written }
    }

    /// Input bytes consumed.
    pub fn read(&self) -> usize {
        self.read
    }

    /// Output bytes produced.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Whether the step made no progress at all.
    pub fn is_empty(&self) -> bool {
        self.read == 0 && self.written == 0
    }
}

/// The contract a compression algorithm implements to be driven by a
/// [`CodecFilter`](crate::CodecFilter).
///
/// Calls are synchronous. Native state is acquired in [`init`](Backend::init) and must be released
/// by [`close`](Backend::close), which the filter calls exactly once.
pub trait Backend {
    /// Builds the holder for one of the filter's buffers.
    fn new_buffer_holder(&self, length: Option<usize>) -> Result<BufferHolder> {
        BufferHolder::with_length(length)
    }

    /// Allocates native state and applies parameters. May adjust either holder's length, and sees
    /// the first chunk of the stream (empty when the stream is empty).
    ///
    /// Returns the minimum free space the output buffer must offer for every later call.
    fn init(
        &mut self,
        input: &mut BufferHolder,
        output: &mut BufferHolder,
        first_chunk: &[u8],
    ) -> Result<usize>;

    /// Converts a prefix of `input` into `output`.
    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult>;

    /// Emits buffered output without ending the stream.
    ///
    /// Returns `(done, written)`, `done` once nothing is left to flush.
    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)>;

    /// Ends the stream, emitting everything that remains.
    ///
    /// Returns `(done, written)`, `done` once the stream is complete.
    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)>;

    /// Releases native state.
    fn close(&mut self);
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn new_buffer_holder(&self, length: Option<usize>) -> Result<BufferHolder> {
        (**self).new_buffer_holder(length)
    }

    fn init(
        &mut self,
        input: &mut BufferHolder,
        output: &mut BufferHolder,
        first_chunk: &[u8],
    ) -> Result<usize> {
        (**self).init(input, output, first_chunk)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        (**self).process(input, output)
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        (**self).flush(output)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        (**self).finalize(output)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
