//! Zstandard ([RFC 8878](https://www.rfc-editor.org/rfc/rfc8878)) encoder and decoder.
//!
//! The decoder accepts any number of concatenated frames.

use crate::{builder::CodecBuilder, error::Result, Level};

pub use crate::codec::{ZstdDecoderParam, ZstdParam};

codec! {
    /// Compresses data into a zstd frame.
    ZstdEncoder<ZstdParam> => crate::codec::ZstdEncoder,
    level: (
        ZstdParam::CompressionLevel,
        1,
        i64::from(zstd_safe::max_c_level())
    ),
    backend: |params| crate::codec::ZstdEncoder::new(params.clone()),
}

codec! {
    /// Decompresses zstd frames.
    ZstdDecoder<ZstdDecoderParam> => crate::codec::ZstdDecoder,
    backend: |params| crate::codec::ZstdDecoder::new(params),
}

impl ZstdEncoder {
    /// An encoder with the given level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<ZstdEncoder> {
    /// Compression level. Negative levels trade ratio for speed.
    pub fn compression_level(self, level: i32) -> Self {
        self.param(ZstdParam::CompressionLevel, level.into())
    }

    /// Base 2 logarithm of the maximum back-reference distance.
    pub fn window_log(self, log: u32) -> Self {
        self.param(ZstdParam::WindowLog, log.into())
    }

    /// Enables long distance matching.
    pub fn long_distance_matching(self, enable: bool) -> Self {
        self.param(ZstdParam::EnableLongDistanceMatching, enable.into())
    }

    /// Appends a checksum of the content to the frame.
    pub fn checksum(self, enable: bool) -> Self {
        self.param(ZstdParam::ChecksumFlag, enable.into())
    }
}

impl CodecBuilder<ZstdDecoder> {
    /// Base 2 logarithm of the largest window accepted.
    pub fn window_log_max(self, log: u32) -> Self {
        self.param(ZstdDecoderParam::WindowLogMax, log.into())
    }
}
