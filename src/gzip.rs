//! Gzip ([RFC 1952](https://www.rfc-editor.org/rfc/rfc1952)) encoder and decoder.
//!
//! The decoder parses the complete member header. After a conversion the fields of the last
//! member started are available from the backend:
//!
//! ```
//! use chunked_compression::{gzip::{GzipDecoder, GzipEncoder}, Codec};
//!
//! let compressed = GzipEncoder::new().convert(b"example")?;
//!
//! let mut sink = GzipDecoder::new().start_chunked_conversion(Vec::new())?;
//! sink.add(&compressed)?;
//! let header = sink.filter().backend().header().cloned();
//! sink.close()?;
//!
//! assert_eq!(header.map(|header| header.os), Some(255));
//! # Ok::<(), chunked_compression::Error>(())
//! ```

use crate::{builder::CodecBuilder, error::Result, Level};

pub use crate::codec::{FlateParam, GzipDecoderParam, GzipHeader};

codec! {
    /// Compresses data into a single gzip member.
    GzipEncoder<FlateParam> => crate::codec::GzipEncoder,
    level: (FlateParam::Level, 1, 9),
    backend: |params| crate::codec::GzipEncoder::new(params.clone()),
}

codec! {
    /// Decompresses gzip data.
    ///
    /// Data after the first member is rejected unless [`GzipDecoderParam::MultipleMembers`] is
    /// set.
    GzipDecoder<GzipDecoderParam> => crate::codec::GzipDecoder,
    backend: |params| crate::codec::GzipDecoder::new(params),
}

impl GzipEncoder {
    /// An encoder with the given level.
    pub fn with_level(level: Level) -> Result<Self> {
        Self::builder().level(level).build()
    }
}

impl CodecBuilder<GzipEncoder> {
    /// Compression level, `0..=9`.
    pub fn compression_level(self, level: u32) -> Self {
        self.param(FlateParam::Level, level.into())
    }
}

impl CodecBuilder<GzipDecoder> {
    /// Decodes concatenated members as one stream.
    pub fn multiple_members(self, enable: bool) -> Self {
        self.param(GzipDecoderParam::MultipleMembers, enable.into())
    }
}
