mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use crate::{
    error::Error,
    params::{ParamId, ParamTable},
};

pub use self::{decoder::ZstdDecoder, encoder::ZstdEncoder};

params! {
    /// Parameters of the zstd encoder.
    ///
    /// Unset parameters keep the value libzstd derives from the compression level.
    ZstdParam {
        /// Compression level, from `zstd_safe::min_c_level()` to `zstd_safe::max_c_level()`.
        CompressionLevel = "compression_level",
        /// Base 2 logarithm of the maximum back-reference distance, `10..=30`.
        WindowLog = "window_log",
        /// Base 2 logarithm of the initial probe table size, `6..=30`.
        HashLog = "hash_log",
        /// Base 2 logarithm of the multi-probe search table size, `6..=30`.
        ChainLog = "chain_log",
        /// Base 2 logarithm of the number of searches, `1..=30`.
        SearchLog = "search_log",
        /// Minimum size of matches searched for, `3..=7`.
        MinMatch = "min_match",
        /// Strategy dependent target match length, `0..=131072`.
        TargetLength = "target_length",
        /// `1` enables long distance matching.
        EnableLongDistanceMatching = "enable_long_distance_matching",
        /// `1` appends a 32-bit checksum of the content to each frame.
        ChecksumFlag = "checksum_flag",
        /// `1` writes the content size into the frame header when it is known.
        ContentSizeFlag = "content_size_flag",
    }
}

impl ParamId for ZstdParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::CompressionLevel => {
                i64::from(zstd_safe::min_c_level())..=i64::from(zstd_safe::max_c_level())
            }
            Self::WindowLog => 10..=30,
            Self::HashLog | Self::ChainLog => 6..=30,
            Self::SearchLog => 1..=30,
            Self::MinMatch => 3..=7,
            Self::TargetLength => 0..=131_072,
            Self::EnableLongDistanceMatching | Self::ChecksumFlag | Self::ContentSizeFlag => 0..=1,
        }
    }
}

params! {
    /// Parameters of the zstd decoder.
    ZstdDecoderParam {
        /// Base 2 logarithm of the largest window the decoder accepts, `10..=31`.
        WindowLogMax = "window_log_max",
    }
}

impl ParamId for ZstdDecoderParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::WindowLogMax => 10..=31,
        }
    }
}

/// libzstd reports errors as `(size_t)-code`, which becomes `-code` here.
fn zstd_error(code: zstd_safe::ErrorCode) -> Error {
    Error::backend(code as i64, zstd_safe::get_error_name(code))
}
