//! Raw deflate ([RFC 1951](https://www.rfc-editor.org/rfc/rfc1951)) encoder and decoder.

use crate::{builder::CodecBuilder, error::Result, Level, NoParam};

pub use crate::codec::FlateParam;

codec! {
    /// Compresses data into a raw deflate stream.
    DeflateEncoder<FlateParam> => crate::codec::FlateEncoder,
    level: (FlateParam::Level, 1, 9),
    backend: |params| crate::codec::FlateEncoder::new(params.clone(), false),
}

codec! {
    /// Decompresses a raw deflate stream.
    DeflateDecoder<NoParam> => crate::codec::FlateDecoder,
    backend: |_params| crate::codec::FlateDecoder::new(false),
}

impl DeflateEncoder {
    /// An encoder with the given level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<DeflateEncoder> {
    /// Compression level, `0..=9`.
    pub fn compression_level(self, level: u32) -> Self {
        self.param(FlateParam::Level, level.into())
    }
}
