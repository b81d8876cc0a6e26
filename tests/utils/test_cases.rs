macro_rules! test_cases {
    ($variant:ident) => {
        mod $variant {
            mod compress {
                use chunked_compression::{Codec, CodecWriter, Error, Level};

                use crate::utils::{
                    algos::$variant::{chunked, sync},
                    convert_chunked, convert_empty, init_tracing, random_text, InputStream,
                    TrackClosed,
                };

                #[test]
                #[ntest::timeout(1000)]
                fn empty() {
                    init_tracing();
                    let compressed = chunked::compress(&InputStream::new(vec![]));
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, &[][..]);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn empty_output_is_repeatable() {
                    let encoder = chunked::encoder().build().unwrap();

                    let first = convert_empty(&encoder);
                    let second = convert_empty(&encoder);

                    assert_eq!(first, second);
                    assert_eq!(sync::decompress(&first), &[][..]);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn empty_chunk() {
                    let input = InputStream::from(vec![vec![]]);

                    let compressed = chunked::compress(&input);
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, input.bytes());
                }

                #[test]
                #[ntest::timeout(1000)]
                fn short() {
                    let input = InputStream::from([[1, 2, 3], [4, 5, 6]]);

                    let compressed = chunked::compress(&input);
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                #[ntest::timeout(10000)]
                fn long() {
                    let input = InputStream::from(vec![
                        (0..32_768).map(|_| rand::random()).collect(),
                        (0..32_768).map(|_| rand::random()).collect(),
                    ]);

                    let compressed = chunked::compress(&input);
                    let output = sync::decompress(&compressed);

                    assert_eq!(output, input.bytes());
                }

                #[test]
                #[ntest::timeout(10000)]
                fn any_chunking_round_trips() {
                    let bytes = random_text(20_000);
                    let encoder = chunked::encoder().build().unwrap();

                    for size in [1, 7, 4096] {
                        let compressed =
                            convert_chunked(&encoder, &InputStream::split(&bytes, size)).unwrap();
                        assert_eq!(sync::decompress(&compressed), bytes, "chunks of {size}");
                    }
                }

                #[test]
                #[ntest::timeout(60000)]
                fn small_buffers() {
                    let bytes = random_text(1024 * 1024);

                    let encoder = chunked::encoder()
                        .input_buffer_length(16 * 1024)
                        .output_buffer_length(32 * 1024)
                        .build()
                        .unwrap();
                    let mut sink = encoder.start_chunked_conversion(TrackClosed::new()).unwrap();
                    for chunk in bytes.chunks(10_000) {
                        sink.add(chunk).unwrap();
                    }
                    sink.close().unwrap();

                    let downstream = sink.into_inner();
                    assert!(downstream.chunks > 1);
                    assert_eq!(downstream.closes, 1);
                    assert_eq!(sync::decompress(&downstream.output), bytes);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn close_is_idempotent() {
                    let encoder = chunked::encoder().build().unwrap();
                    let mut sink = encoder.start_chunked_conversion(TrackClosed::new()).unwrap();
                    sink.add(b"some bytes").unwrap();
                    sink.close().unwrap();
                    let len = sink.get_ref().output.len();

                    sink.close().unwrap();

                    assert_eq!(sink.get_ref().output.len(), len);
                    assert_eq!(sink.get_ref().closes, 1);
                    assert!(matches!(
                        sink.add(b"more"),
                        Err(Error::IllegalState { .. })
                    ));
                }

                #[test]
                #[ntest::timeout(1000)]
                fn writer() {
                    use std::io::Write;

                    let encoder = chunked::encoder().build().unwrap();
                    let mut writer = CodecWriter::new(&encoder, Vec::new()).unwrap();
                    writer.write_all(&[1, 2, 3]).unwrap();
                    writer.write_all(&[4, 5, 6]).unwrap();
                    let compressed = writer.finish().unwrap();

                    assert_eq!(sync::decompress(&compressed), &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                fn with_level_best() {
                    let encoder = chunked::Encoder::with_level(Level::Best).unwrap();
                    let compressed = encoder.convert(&[1, 2, 3, 4, 5, 6]).unwrap();

                    assert_eq!(sync::decompress(&compressed), &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                fn with_level_default() {
                    let encoder = chunked::Encoder::with_level(Level::Default).unwrap();
                    let compressed = encoder.convert(&[1, 2, 3, 4, 5, 6]).unwrap();

                    assert_eq!(sync::decompress(&compressed), &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                fn with_level_out_of_range() {
                    assert!(matches!(
                        chunked::Encoder::with_level(Level::Precise(i32::MAX)),
                        Err(Error::InvalidArgument { .. })
                    ));
                    assert!(matches!(
                        chunked::Encoder::with_level(Level::Precise(i32::MIN)),
                        Err(Error::InvalidArgument { .. })
                    ));
                }

                #[test]
                fn zero_buffer_length() {
                    assert!(matches!(
                        chunked::encoder().output_buffer_length(0).build(),
                        Err(Error::InvalidArgument { .. })
                    ));
                }
            }

            mod decompress {
                use chunked_compression::Codec;

                use crate::utils::{
                    algos::$variant::{chunked, sync},
                    init_tracing, random_text, InputStream, TrackClosed,
                };

                #[test]
                #[ntest::timeout(1000)]
                fn empty() {
                    init_tracing();
                    let compressed = sync::compress(&[]);

                    let output = chunked::decompress(&InputStream::new(vec![compressed]));

                    assert_eq!(output, &[][..]);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn short() {
                    let compressed = sync::compress(&[1, 2, 3, 4, 5, 6]);

                    let output = chunked::decompress(&InputStream::new(vec![compressed]));

                    assert_eq!(output, &[1, 2, 3, 4, 5, 6][..]);
                }

                #[test]
                #[ntest::timeout(10000)]
                fn long() {
                    let bytes: Vec<u8> = (0..65_536).map(|_| rand::random()).collect();
                    let compressed = sync::compress(&bytes);

                    let output = chunked::decompress(&InputStream::split(&compressed, 1024));

                    assert_eq!(output, bytes);
                }

                #[test]
                #[ntest::timeout(10000)]
                fn one_byte_chunks() {
                    let bytes = random_text(10_000);
                    let compressed = sync::compress(&bytes);

                    let output = chunked::decompress(&InputStream::split(&compressed, 1));

                    assert_eq!(output, bytes);
                }

                #[test]
                #[ntest::timeout(60000)]
                fn small_buffers_match_single_call() {
                    let bytes = random_text(1024 * 1024);
                    let compressed = sync::compress(&bytes);
                    let whole = chunked::Decoder::new().convert(&compressed).unwrap();
                    assert_eq!(whole, bytes);

                    let decoder = chunked::Decoder::builder()
                        .input_buffer_length(16 * 1024)
                        .output_buffer_length(32 * 1024)
                        .build()
                        .unwrap();
                    let mut sink = decoder.start_chunked_conversion(TrackClosed::new()).unwrap();
                    for chunk in compressed.chunks(10_000) {
                        sink.add(chunk).unwrap();
                    }
                    sink.close().unwrap();

                    assert_eq!(sink.get_ref().output, whole);
                    assert_eq!(sink.get_ref().closes, 1);
                }

                #[test]
                #[ntest::timeout(1000)]
                fn round_trip() {
                    let input = InputStream::from(vec![random_text(5000), random_text(3)]);

                    let compressed = chunked::compress(&input);
                    let output = chunked::decompress(&InputStream::split(&compressed, 100));

                    assert_eq!(output, input.bytes());
                }

                #[test]
                #[ntest::timeout(1000)]
                fn truncated() {
                    let compressed = sync::compress(&random_text(20_000));
                    let truncated = &compressed[..compressed.len() / 2];

                    let result = chunked::try_decompress(&InputStream::new(vec![truncated.to_vec()]));

                    assert!(result.is_err(), "{result:?}");
                }

                #[test]
                #[ntest::timeout(1000)]
                fn trailing_garbage() {
                    let mut compressed = sync::compress(&[1, 2, 3, 4, 5, 6]);
                    compressed.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]);

                    let result = chunked::try_decompress(&InputStream::new(vec![compressed]));

                    assert!(result.is_err(), "{result:?}");
                }

                #[test]
                #[ntest::timeout(1000)]
                fn corrupt_input_leaves_sink_errored() {
                    let mut sink = chunked::Decoder::new()
                        .start_chunked_conversion(TrackClosed::new())
                        .unwrap();
                    let garbage = vec![0xff; 1024];

                    let result = sink.add(&garbage).and_then(|()| sink.close());

                    assert!(result.is_err());
                    sink.close().unwrap();
                    assert!(!sink.get_ref().is_closed());
                }
            }
        }
    };
}
