use std::io::Read;

pub fn to_vec(mut read: impl Read) -> Vec<u8> {
    let mut output = vec![];
    read.read_to_end(&mut output).unwrap();
    output
}

macro_rules! algos {
    ($(pub mod $name:ident($feat:literal, $module:ident, $encoder:ident, $decoder:ident) { pub mod sync { $($tt:tt)* } })*) => {
        $(
            #[cfg(feature = $feat)]
            pub mod $name {
                pub mod sync { $($tt)* }

                pub mod chunked {
                    pub use chunked_compression::$module::{$decoder as Decoder, $encoder as Encoder};

                    use chunked_compression::{Codec, CodecBuilder, Level, Result};

                    use crate::utils::{convert_chunked, InputStream};

                    pub fn encoder() -> CodecBuilder<Encoder> {
                        Encoder::builder().level(Level::Fastest)
                    }

                    pub fn compress(input: &InputStream) -> Vec<u8> {
                        convert_chunked(&encoder().build().unwrap(), input).unwrap()
                    }

                    pub fn try_decompress(input: &InputStream) -> Result<Vec<u8>> {
                        convert_chunked(&Decoder::new(), input)
                    }

                    pub fn decompress(input: &InputStream) -> Vec<u8> {
                        try_decompress(input).unwrap()
                    }
                }
            }
        )*
    }
}

algos! {
    pub mod brotli("brotli", brotli, BrotliEncoder, BrotliDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use brotli::{enc::backward_references::BrotliEncoderParams, CompressorReader};
                let params = BrotliEncoderParams {
                    quality: 1,
                    ..Default::default()
                };
                to_vec(CompressorReader::with_params(bytes, 0, &params))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use brotli::Decompressor;
                to_vec(Decompressor::new(bytes, 0))
            }
        }
    }

    pub mod bzip2("bzip2", bzip2, BzEncoder, BzDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use bzip2::{bufread::BzEncoder, Compression};
                to_vec(BzEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use bzip2::bufread::BzDecoder;
                to_vec(BzDecoder::new(bytes))
            }
        }
    }

    pub mod deflate("deflate", deflate, DeflateEncoder, DeflateDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use flate2::{bufread::DeflateEncoder, Compression};
                to_vec(DeflateEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use flate2::bufread::DeflateDecoder;
                to_vec(DeflateDecoder::new(bytes))
            }
        }
    }

    pub mod zlib("zlib", zlib, ZlibEncoder, ZlibDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use flate2::{bufread::ZlibEncoder, Compression};
                to_vec(ZlibEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use flate2::bufread::ZlibDecoder;
                to_vec(ZlibDecoder::new(bytes))
            }
        }
    }

    pub mod gzip("gzip", gzip, GzipEncoder, GzipDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use flate2::{bufread::GzEncoder, Compression};
                to_vec(GzEncoder::new(bytes, Compression::fast()))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use flate2::bufread::GzDecoder;
                to_vec(GzDecoder::new(bytes))
            }
        }
    }

    pub mod zstd("zstd", zstd, ZstdEncoder, ZstdDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use libzstd::stream::read::Encoder;
                use libzstd::DEFAULT_COMPRESSION_LEVEL;
                to_vec(Encoder::new(bytes, DEFAULT_COMPRESSION_LEVEL).unwrap())
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use libzstd::stream::read::Decoder;
                to_vec(Decoder::new(bytes).unwrap())
            }
        }
    }

    pub mod xz("xz", lzma, XzEncoder, XzDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use liblzma::bufread::XzEncoder;

                to_vec(XzEncoder::new(bytes, 0))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use liblzma::bufread::XzDecoder;

                to_vec(XzDecoder::new(bytes))
            }
        }
    }

    pub mod lzma("lzma", lzma, LzmaEncoder, LzmaDecoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use liblzma::{
                    bufread::XzEncoder,
                    stream::{LzmaOptions, Stream},
                };

                let stream =
                    Stream::new_lzma_encoder(&LzmaOptions::new_preset(0).unwrap()).unwrap();
                to_vec(XzEncoder::new_stream(bytes, stream))
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                use liblzma::{bufread::XzDecoder, stream::Stream};

                let stream = Stream::new_lzma_decoder(u64::MAX).unwrap();
                to_vec(XzDecoder::new_stream(bytes, stream))
            }
        }
    }

    pub mod lz4("lz4", lz4, Lz4Encoder, Lz4Decoder) {
        pub mod sync {
            pub use crate::utils::algos::to_vec;

            pub fn compress(bytes: &[u8]) -> Vec<u8> {
                use std::io::Write;

                let mut encoder = lz4::EncoderBuilder::new().build(Vec::new()).unwrap();
                encoder.write_all(bytes).unwrap();
                let (output, result) = encoder.finish();
                result.unwrap();
                output
            }

            pub fn decompress(bytes: &[u8]) -> Vec<u8> {
                to_vec(lz4::Decoder::new(bytes).unwrap())
            }
        }
    }
}
