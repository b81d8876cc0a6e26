//! LZMA encoders and decoders, in the legacy `.lzma` format and, with the `xz` feature, the `.xz`
//! container.

use crate::{builder::CodecBuilder, codec::LzmaFormat, error::Result, Level};

pub use crate::codec::{LzmaDecoderParam, LzmaParam};

codec! {
    /// Compresses data into an `.lzma` stream.
    LzmaEncoder<LzmaParam> => crate::codec::LzmaEncoder,
    level: (LzmaParam::Preset, 0, 9),
    backend: |params| crate::codec::LzmaEncoder::new(LzmaFormat::Lzma, params),
}

codec! {
    /// Decompresses an `.lzma` stream.
    LzmaDecoder<LzmaDecoderParam> => crate::codec::LzmaDecoder,
    backend: |params| crate::codec::LzmaDecoder::new(LzmaFormat::Lzma, params),
}

#[cfg(feature = "xz")]
codec! {
    /// Compresses data into an `.xz` stream.
    XzEncoder<LzmaParam> => crate::codec::LzmaEncoder,
    level: (LzmaParam::Preset, 0, 9),
    backend: |params| crate::codec::LzmaEncoder::new(LzmaFormat::Xz, params),
}

#[cfg(feature = "xz")]
codec! {
    /// Decompresses `.xz` data, including concatenated streams and stream padding.
    XzDecoder<LzmaDecoderParam> => crate::codec::LzmaDecoder,
    backend: |params| crate::codec::LzmaDecoder::new(LzmaFormat::Xz, params),
}

impl LzmaEncoder {
    /// An encoder with the given preset.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

#[cfg(feature = "xz")]
impl XzEncoder {
    /// An encoder with the given preset.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<LzmaEncoder> {
    /// Compression preset, `0..=9`.
    pub fn preset(self, preset: u32) -> Self {
        self.param(LzmaParam::Preset, preset.into())
    }
}

#[cfg(feature = "xz")]
impl CodecBuilder<XzEncoder> {
    /// Compression preset, `0..=9`.
    pub fn preset(self, preset: u32) -> Self {
        self.param(LzmaParam::Preset, preset.into())
    }

    /// Integrity check: `0` none, `1` CRC32, `2` CRC64, `3` SHA-256.
    pub fn check(self, check: u32) -> Self {
        self.param(LzmaParam::Check, check.into())
    }
}

impl CodecBuilder<LzmaDecoder> {
    /// Largest amount of memory the decoder may use, in bytes.
    pub fn mem_limit(self, limit: u64) -> Self {
        self.param(LzmaDecoderParam::MemLimit, i64::try_from(limit).unwrap_or(i64::MAX))
    }
}

#[cfg(feature = "xz")]
impl CodecBuilder<XzDecoder> {
    /// Largest amount of memory the decoder may use, in bytes.
    pub fn mem_limit(self, limit: u64) -> Self {
        self.param(LzmaDecoderParam::MemLimit, i64::try_from(limit).unwrap_or(i64::MAX))
    }
}
