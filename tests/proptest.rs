use proptest::{prelude::any, proptest};

use chunked_compression::Codec;

mod utils;

macro_rules! proptests {
    ($($name:ident),*) => {
        $(
            mod $name {
                use super::*;
                use crate::utils::{
                    algos::$name::{chunked, sync},
                    convert_chunked, InputStream,
                };

                proptest! {
                    #[test]
                    fn chunked_compress(ref input in any::<InputStream>()) {
                        let compressed = chunked::compress(input);
                        let output = sync::decompress(&compressed);
                        assert_eq!(output, input.bytes());
                    }

                    #[test]
                    fn chunked_decompress(
                        ref input in any::<Vec<u8>>(),
                        chunk_size in 1..20usize,
                    ) {
                        let compressed = sync::compress(input);
                        let stream = InputStream::split(&compressed, chunk_size);
                        let output = chunked::decompress(&stream);
                        assert_eq!(&output, input);
                    }

                    #[test]
                    fn small_buffers(
                        ref input in any::<InputStream>(),
                        input_length in 1..64usize,
                        output_length in 1..64usize,
                    ) {
                        let encoder = chunked::encoder()
                            .input_buffer_length(input_length)
                            .output_buffer_length(output_length)
                            .build()
                            .unwrap();
                        let compressed = convert_chunked(&encoder, input).unwrap();
                        assert_eq!(sync::decompress(&compressed), input.bytes());

                        let decoder = chunked::Decoder::builder()
                            .input_buffer_length(input_length)
                            .output_buffer_length(output_length)
                            .build()
                            .unwrap();
                        assert_eq!(decoder.convert(&compressed).unwrap(), input.bytes());
                    }
                }
            }
        )*
    }
}

proptests!(brotli, gzip, zstd);
