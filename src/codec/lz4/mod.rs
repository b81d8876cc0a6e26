mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use crate::params::{ParamId, ParamTable};

pub use self::{decoder::Lz4Decoder, encoder::Lz4Encoder};

params! {
    /// Parameters of the lz4 frame encoder.
    Lz4Param {
        /// Maximum block size: `4` 64 KiB, `5` 256 KiB, `6` 1 MiB, `7` 4 MiB.
        BlockSize = "block_size",
        /// `1` lets blocks reference data in earlier blocks, `0` makes them independent.
        BlockLinked = "block_linked",
        /// `1` appends a checksum of the decompressed content to the frame.
        ContentChecksum = "content_checksum",
        /// `1` follows every block with a checksum of its compressed data.
        BlockChecksum = "block_checksum",
        /// Compression level, `0..=12`. Levels from `3` on use the high compression mode.
        CompressionLevel = "compression_level",
        /// `1` writes every update out immediately instead of buffering a block.
        AutoFlush = "auto_flush",
        /// `1` tunes the high compression mode towards faster decompression.
        FavorDecSpeed = "favor_dec_speed",
    }
}

impl ParamId for Lz4Param {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::BlockSize => 4..=7,
            Self::CompressionLevel => 0..=12,
            Self::BlockLinked
            | Self::ContentChecksum
            | Self::BlockChecksum
            | Self::AutoFlush
            | Self::FavorDecSpeed => 0..=1,
        }
    }
}
