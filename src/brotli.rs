//! Brotli ([RFC 7932](https://www.rfc-editor.org/rfc/rfc7932)) encoder and decoder.

use crate::{builder::CodecBuilder, error::Result, Level};

pub use crate::codec::{BrotliDecoderParam, BrotliParam};

codec! {
    /// Compresses data into a brotli stream.
    BrotliEncoder<BrotliParam> => crate::codec::BrotliEncoder,
    level: (BrotliParam::Quality, 0, 11),
    backend: |params| crate::codec::BrotliEncoder::new(params.clone()),
}

codec! {
    /// Decompresses a brotli stream.
    BrotliDecoder<BrotliDecoderParam> => crate::codec::BrotliDecoder,
    backend: |params| crate::codec::BrotliDecoder::new(params),
}

impl BrotliEncoder {
    /// An encoder with the given quality.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<BrotliEncoder> {
    /// Compression quality, `0..=11`.
    pub fn quality(self, quality: u32) -> Self {
        self.param(BrotliParam::Quality, quality.into())
    }

    /// Base 2 logarithm of the sliding window size.
    pub fn window_bits(self, bits: u32) -> Self {
        self.param(BrotliParam::WindowBits, bits.into())
    }

    /// Base 2 logarithm of the input block size.
    pub fn block_bits(self, bits: u32) -> Self {
        self.param(BrotliParam::BlockBits, bits.into())
    }

    /// Allows windows beyond the RFC 7932 limit.
    pub fn large_window(self, enable: bool) -> Self {
        self.param(BrotliParam::LargeWindow, enable.into())
    }

    /// Tunes the encoder for the given kind of input: `0` generic, `1` text, `2` fonts.
    pub fn mode(self, mode: u32) -> Self {
        self.param(BrotliParam::Mode, mode.into())
    }

    /// Expected total input size.
    pub fn size_hint(self, size: u32) -> Self {
        self.param(BrotliParam::SizeHint, size.into())
    }
}

impl CodecBuilder<BrotliDecoder> {
    /// Accepts streams written with a large window.
    pub fn large_window(self, enable: bool) -> Self {
        self.param(BrotliDecoderParam::LargeWindow, enable.into())
    }
}
