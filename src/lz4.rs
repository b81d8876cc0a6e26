//! LZ4 frame format encoder and decoder.

use crate::{builder::CodecBuilder, error::Result, Level, NoParam};

pub use crate::codec::Lz4Param;

codec! {
    /// Compresses data into an lz4 frame.
    Lz4Encoder<Lz4Param> => crate::codec::Lz4Encoder,
    level: (Lz4Param::CompressionLevel, 0, 12),
    backend: |params| crate::codec::Lz4Encoder::new(params),
}

codec! {
    /// Decompresses lz4 frames.
    Lz4Decoder<NoParam> => crate::codec::Lz4Decoder,
    backend: |_params| crate::codec::Lz4Decoder::new(),
}

impl Lz4Encoder {
    /// An encoder with the given level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

/// Maximum size of the blocks a frame is split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockSize {
    /// 64 KiB, the lz4 default.
    Max64KB,
    /// 256 KiB.
    Max256KB,
    /// 1 MiB.
    Max1MB,
    /// 4 MiB.
    Max4MB,
}

impl CodecBuilder<Lz4Encoder> {
    /// Sets input block size.
    pub fn block_size(self, block_size: BlockSize) -> Self {
        let id = match block_size {
            BlockSize::Max64KB => 4,
            BlockSize::Max256KB => 5,
            BlockSize::Max1MB => 6,
            BlockSize::Max4MB => 7,
        };
        self.param(Lz4Param::BlockSize, id)
    }

    /// Add a 32-bit checksum of frame's decompressed data.
    pub fn content_checksum(self, enable: bool) -> Self {
        self.param(Lz4Param::ContentChecksum, enable.into())
    }

    /// Each block followed by a checksum of block's compressed data.
    pub fn block_checksum(self, enable: bool) -> Self {
        self.param(Lz4Param::BlockChecksum, enable.into())
    }

    /// Lets blocks reference earlier blocks.
    pub fn block_linked(self, enable: bool) -> Self {
        self.param(Lz4Param::BlockLinked, enable.into())
    }
}
