//! Bzip2 encoder and decoder.

use crate::{builder::CodecBuilder, error::Result, Level};

pub use crate::codec::{BzDecoderParam, BzParam};

codec! {
    /// Compresses data into a bzip2 stream.
    BzEncoder<BzParam> => crate::codec::BzEncoder,
    level: (BzParam::BlockSize, 1, 9),
    backend: |params| crate::codec::BzEncoder::new(params),
}

codec! {
    /// Decompresses a bzip2 stream.
    BzDecoder<BzDecoderParam> => crate::codec::BzDecoder,
    backend: |params| crate::codec::BzDecoder::new(params),
}

impl BzEncoder {
    /// An encoder with the given block size level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<BzEncoder> {
    /// Block size in units of 100 kB, `1..=9`.
    pub fn block_size(self, size: u32) -> Self {
        self.param(BzParam::BlockSize, size.into())
    }

    /// Effort spent on repetitive input before switching sorting algorithms.
    pub fn work_factor(self, factor: u32) -> Self {
        self.param(BzParam::WorkFactor, factor.into())
    }
}

impl CodecBuilder<BzDecoder> {
    /// Uses the decompression algorithm needing less memory.
    pub fn small(self, enable: bool) -> Self {
        self.param(BzDecoderParam::Small, enable.into())
    }
}
