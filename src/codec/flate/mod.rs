mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use crate::params::{ParamId, ParamTable};

pub use self::{decoder::FlateDecoder, encoder::FlateEncoder};

params! {
    /// Parameters of the deflate, zlib and gzip encoders.
    FlateParam {
        /// Compression level, `0..=9`.
        Level = "level",
    }
}

impl ParamId for FlateParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::Level => 0..=9,
        }
    }
}
