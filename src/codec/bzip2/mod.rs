mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use crate::params::{ParamId, ParamTable};

pub use self::{decoder::BzDecoder, encoder::BzEncoder};

params! {
    /// Parameters of the bzip2 encoder.
    BzParam {
        /// Block size in units of 100 kB, `1..=9`. Larger blocks compress better.
        BlockSize = "block_size",
        /// How hard to try the primary sorting algorithm before falling back to a slower one on
        /// repetitive input, `0..=250`. `0` picks the library default.
        WorkFactor = "work_factor",
    }
}

impl ParamId for BzParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::BlockSize => 1..=9,
            Self::WorkFactor => 0..=250,
        }
    }
}

params! {
    /// Parameters of the bzip2 decoder.
    BzDecoderParam {
        /// `1` selects the slower decompression algorithm that needs about half the memory.
        Small = "small",
    }
}

impl ParamId for BzDecoderParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::Small => 0..=1,
        }
    }
}
