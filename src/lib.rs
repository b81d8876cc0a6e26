//! Synchronous, chunk-oriented compression and decompression over several compression crates.
//!
//! Every algorithm is driven through the same pipeline: a [`Codec`] describes the configuration,
//! [`Codec::start_chunked_conversion`] returns a [`CodecSink`] that accepts input chunks of any
//! size, and converted bytes are handed to a [`Downstream`] as soon as a full output buffer is
//! ready. [`Codec::convert`] runs the same pipeline over a single slice, and [`CodecWriter`]
//! exposes it as a [`std::io::Write`].
//!
//! ```
//! # #[cfg(feature = "gzip")] {
//! use chunked_compression::{gzip::{GzipDecoder, GzipEncoder}, Codec};
//!
//! let mut sink = GzipEncoder::new().start_chunked_conversion(Vec::new())?;
//! sink.add(b"hello ")?;
//! sink.add(b"world")?;
//! sink.close()?;
//! let compressed = sink.into_inner();
//!
//! assert_eq!(GzipDecoder::new().convert(&compressed)?, b"hello world");
//! # }
//! # Ok::<(), chunked_compression::Error>(())
//! ```
//!
//! # Feature Organization
//!
//! Each compression algorithm is behind a feature with a matching top-level module. `brotli`,
//! `deflate`, `gzip`, `zlib` and `zstd` are enabled by default; `all-algorithms` pulls in every
//! one of them.
//!

//!  Feature | Types
//! ---------|------
#![cfg_attr(
    feature = "brotli",
    doc = "[`brotli`](crate::brotli) | [`BrotliEncoder`](crate::brotli::BrotliEncoder), [`BrotliDecoder`](crate::brotli::BrotliDecoder)"
)]
#![cfg_attr(
    not(feature = "brotli"),
    doc = "`brotli` (*inactive*) | `BrotliEncoder`, `BrotliDecoder`"
)]
#![cfg_attr(
    feature = "bzip2",
    doc = "[`bzip2`](crate::bzip2) | [`BzEncoder`](crate::bzip2::BzEncoder), [`BzDecoder`](crate::bzip2::BzDecoder)"
)]
#![cfg_attr(
    not(feature = "bzip2"),
    doc = "`bzip2` (*inactive*) | `BzEncoder`, `BzDecoder`"
)]
#![cfg_attr(
    feature = "deflate",
    doc = "[`deflate`](crate::deflate) | [`DeflateEncoder`](crate::deflate::DeflateEncoder), [`DeflateDecoder`](crate::deflate::DeflateDecoder)"
)]
#![cfg_attr(
    not(feature = "deflate"),
    doc = "`deflate` (*inactive*) | `DeflateEncoder`, `DeflateDecoder`"
)]
#![cfg_attr(
    feature = "deflate64",
    doc = "[`deflate64`](crate::deflate64) | [`Deflate64Decoder`](crate::deflate64::Deflate64Decoder)"
)]
#![cfg_attr(
    not(feature = "deflate64"),
    doc = "`deflate64` (*inactive*) | `Deflate64Decoder`"
)]
#![cfg_attr(
    feature = "gzip",
    doc = "[`gzip`](crate::gzip) | [`GzipEncoder`](crate::gzip::GzipEncoder), [`GzipDecoder`](crate::gzip::GzipDecoder)"
)]
#![cfg_attr(
    not(feature = "gzip"),
    doc = "`gzip` (*inactive*) | `GzipEncoder`, `GzipDecoder`"
)]
#![cfg_attr(
    feature = "lz4",
    doc = "[`lz4`](crate::lz4) | [`Lz4Encoder`](crate::lz4::Lz4Encoder), [`Lz4Decoder`](crate::lz4::Lz4Decoder)"
)]
#![cfg_attr(
    not(feature = "lz4"),
    doc = "`lz4` (*inactive*) | `Lz4Encoder`, `Lz4Decoder`"
)]
#![cfg_attr(
    feature = "lzma",
    doc = "[`lzma`](crate::lzma) | [`LzmaEncoder`](crate::lzma::LzmaEncoder), [`LzmaDecoder`](crate::lzma::LzmaDecoder)"
)]
#![cfg_attr(
    not(feature = "lzma"),
    doc = "`lzma` (*inactive*) | `LzmaEncoder`, `LzmaDecoder`"
)]
#![cfg_attr(
    feature = "xz",
    doc = "[`xz`](crate::lzma) | [`XzEncoder`](crate::lzma::XzEncoder), [`XzDecoder`](crate::lzma::XzDecoder)"
)]
#![cfg_attr(
    not(feature = "xz"),
    doc = "`xz` (*inactive*) | `XzEncoder`, `XzDecoder`"
)]
#![cfg_attr(
    feature = "zlib",
    doc = "[`zlib`](crate::zlib) | [`ZlibEncoder`](crate::zlib::ZlibEncoder), [`ZlibDecoder`](crate::zlib::ZlibDecoder)"
)]
#![cfg_attr(
    not(feature = "zlib"),
    doc = "`zlib` (*inactive*) | `ZlibEncoder`, `ZlibDecoder`"
)]
#![cfg_attr(
    feature = "zstd",
    doc = "[`zstd`](crate::zstd) | [`ZstdEncoder`](crate::zstd::ZstdEncoder), [`ZstdDecoder`](crate::zstd::ZstdDecoder)"
)]
#![cfg_attr(
    not(feature = "zstd"),
    doc = "`zstd` (*inactive*) | `ZstdEncoder`, `ZstdDecoder`"
)]
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations
)]
#![cfg_attr(not(all), allow(unused))]

#[macro_use]
mod macros;

mod buffer;
mod builder;
pub mod codec;
mod convert;
mod error;
mod filter;
mod holder;
mod params;
mod sink;
mod write;

#[cfg(feature = "brotli")]
#[cfg_attr(docsrs, doc(cfg(feature = "brotli")))]
pub mod brotli;
#[cfg(feature = "bzip2")]
#[cfg_attr(docsrs, doc(cfg(feature = "bzip2")))]
pub mod bzip2;
#[cfg(feature = "deflate")]
#[cfg_attr(docsrs, doc(cfg(feature = "deflate")))]
pub mod deflate;
#[cfg(feature = "deflate64")]
#[cfg_attr(docsrs, doc(cfg(feature = "deflate64")))]
pub mod deflate64;
#[cfg(feature = "gzip")]
#[cfg_attr(docsrs, doc(cfg(feature = "gzip")))]
pub mod gzip;
#[cfg(feature = "lz4")]
#[cfg_attr(docsrs, doc(cfg(feature = "lz4")))]
pub mod lz4;
#[cfg(feature = "lzma")]
#[cfg_attr(docsrs, doc(cfg(feature = "lzma")))]
pub mod lzma;
#[cfg(feature = "zlib")]
#[cfg_attr(docsrs, doc(cfg(feature = "zlib")))]
pub mod zlib;
#[cfg(feature = "zstd")]
#[cfg_attr(docsrs, doc(cfg(feature = "zstd")))]
pub mod zstd;

pub use crate::{
    buffer::CodecBuffer,
    builder::{CodecBuilder, Configure},
    codec::{Backend, CodecResult},
    convert::Codec,
    error::{Error, Result},
    filter::{CodecFilter, FilterState},
    holder::{BufferBuilder, BufferHolder, BufferLengths},
    params::{CodecOptions, NoParam, ParamId, ParamTable},
    sink::{CodecSink, Downstream, WriteDownstream},
    write::CodecWriter,
};

/// Level of compression data should be compressed with.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Fastest quality of compression, usually produces bigger size.
    Fastest,
    /// Best quality of compression, usually produces the smallest size.
    Best,
    /// Default quality of compression defined by the selected compression algorithm.
    Default,
    /// Precise quality based on the underlying compression algorithms' qualities.
    ///
    /// The value must lie within the algorithm's documented range; building a codec with a value
    /// outside of it fails with [`Error::InvalidArgument`].
    Precise(i32),
}
