mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use crate::params::{ParamId, ParamTable};

pub use self::{decoder::BrotliDecoder, encoder::BrotliEncoder};

params! {
    /// Parameters of the brotli encoder, in the order they are applied.
    BrotliParam {
        /// `1` allows window sizes beyond the RFC 7932 limit. Streams written this way need a
        /// decoder with [`BrotliDecoderParam::LargeWindow`] set.
        LargeWindow = "large_window",
        /// Input hint: `0` generic, `1` UTF-8 text, `2` WOFF 2.0 fonts.
        Mode = "mode",
        /// Compression quality, `0..=11`.
        Quality = "quality",
        /// Base 2 logarithm of the sliding window size, `10..=24`, or `10..=30` with a large
        /// window.
        WindowBits = "window_bits",
        /// Base 2 logarithm of the input block size, `16..=24`, `0` picks it from the quality.
        BlockBits = "block_bits",
        /// `1` disables literal context modeling, trading ratio for decompression speed.
        DisableLiteralContextModeling = "disable_literal_context_modeling",
        /// Expected total input size, `0` if unknown.
        SizeHint = "size_hint",
        /// Number of distance postfix bits, `0..=3`.
        PostfixBits = "postfix_bits",
        /// Number of direct distance codes, a multiple of `1 << postfix_bits` up to
        /// `15 << postfix_bits`.
        DirectDistanceCodes = "direct_distance_codes",
    }
}

impl ParamId for BrotliParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, table: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::LargeWindow | Self::DisableLiteralContextModeling => 0..=1,
            Self::Mode => 0..=2,
            Self::Quality => 0..=11,
            Self::WindowBits if table.get(Self::LargeWindow) == Some(1) => 10..=30,
            Self::WindowBits => 10..=24,
            Self::BlockBits => 0..=24,
            Self::SizeHint => 0..=i64::from(i32::MAX),
            Self::PostfixBits => 0..=3,
            Self::DirectDistanceCodes => 0..=(15 << postfix_bits(table)),
        }
    }

    fn accepts(self, value: i64, table: &ParamTable<Self>) -> bool {
        let in_range = self.range(table).contains(&value);
        match self {
            Self::BlockBits => in_range && (value == 0 || value >= 16),
            Self::DirectDistanceCodes => in_range && value % (1 << postfix_bits(table)) == 0,
            _ => in_range,
        }
    }
}

fn postfix_bits(table: &ParamTable<BrotliParam>) -> i64 {
    table.get(BrotliParam::PostfixBits).unwrap_or(0)
}

params! {
    /// Parameters of the brotli decoder.
    BrotliDecoderParam {
        /// `1` accepts streams written with [`BrotliParam::LargeWindow`].
        LargeWindow = "large_window",
    }
}

impl ParamId for BrotliDecoderParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::LargeWindow => 0..=1,
        }
    }
}
