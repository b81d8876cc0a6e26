//! Zlib ([RFC 1950](https://www.rfc-editor.org/rfc/rfc1950)) encoder and decoder.

use crate::{builder::CodecBuilder, error::Result, Level, NoParam};

pub use crate::codec::FlateParam;

codec! {
    /// Compresses data into a zlib stream.
    ZlibEncoder<FlateParam> => crate::codec::FlateEncoder,
    level: (FlateParam::Level, 1, 9),
    backend: |params| crate::codec::FlateEncoder::new(params.clone(), true),
}

codec! {
    /// Decompresses a zlib stream.
    ZlibDecoder<NoParam> => crate::codec::FlateDecoder,
    backend: |_params| crate::codec::FlateDecoder::new(true),
}

impl ZlibEncoder {
    /// An encoder with the given level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<ZlibEncoder> {
    /// Compression level, `0..=9`.
    pub fn compression_level(self, level: u32) -> Self {
        self.param(FlateParam::Level, level.into())
    }
}
