mod decoder;
mod encoder;

use std::ops::RangeInclusive;

use liblzma::stream::{Check, Error as StreamError};

use crate::{
    error::Error,
    params::{ParamId, ParamTable},
};

pub use self::{decoder::LzmaDecoder, encoder::LzmaEncoder};

/// Container written around the LZMA data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LzmaFormat {
    /// The `.xz` container, with integrity checks and support for concatenated streams.
    Xz,
    /// The legacy `.lzma` ("LZMA alone") format.
    Lzma,
}

impl LzmaFormat {
    fn name(self) -> &'static str {
        match self {
            Self::Xz => "xz",
            Self::Lzma => "lzma",
        }
    }
}

params! {
    /// Parameters of the lzma and xz encoders.
    LzmaParam {
        /// Compression preset, `0..=9`.
        Preset = "preset",
        /// Integrity check stored in xz streams: `0` none, `1` CRC32, `2` CRC64, `3` SHA-256.
        /// Ignored by the lzma format, which has no checks.
        Check = "check",
    }
}

impl ParamId for LzmaParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::Preset => 0..=9,
            Self::Check => 0..=3,
        }
    }
}

params! {
    /// Parameters of the lzma and xz decoders.
    LzmaDecoderParam {
        /// Largest amount of memory in bytes the decoder may allocate.
        MemLimit = "mem_limit",
    }
}

impl ParamId for LzmaDecoderParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::MemLimit => 1..=i64::MAX,
        }
    }
}

fn check(value: Option<i64>) -> Check {
    match value {
        Some(0) => Check::None,
        Some(1) => Check::Crc32,
        Some(3) => Check::Sha256,
        _ => Check::Crc64,
    }
}

fn stream_error(format: LzmaFormat, err: StreamError) -> Error {
    match err {
        StreamError::Mem | StreamError::MemLimit => {
            Error::ResourceExhausted(format!("{} stream: {err}", format.name()))
        }
        StreamError::Data => Error::backend(9, format!("{} stream is corrupt", format.name())),
        StreamError::Format => Error::backend(7, format!("not an {} stream", format.name())),
        err => Error::backend(-1, format!("{} stream: {err}", format.name())),
    }
}
