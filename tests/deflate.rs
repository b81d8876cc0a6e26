#[macro_use]
mod utils;

test_cases!(deflate);

use chunked_compression::{
    deflate::{DeflateDecoder, DeflateEncoder},
    Codec, Error,
};

#[test]
#[ntest::timeout(10000)]
fn deflate_flush() {
    utils::assert_flush_emits_everything(&DeflateEncoder::new(), &DeflateDecoder::new());
}

#[test]
fn deflate_compression_level_range() {
    assert!(matches!(
        DeflateEncoder::builder().compression_level(10).build(),
        Err(Error::InvalidArgument { .. })
    ));
    DeflateEncoder::builder().compression_level(0).build().unwrap();
}

#[test]
fn deflate_stored() {
    let encoder = DeflateEncoder::builder().compression_level(0).build().unwrap();
    let compressed = encoder.convert(b"stored").unwrap();
    assert_eq!(utils::algos::deflate::sync::decompress(&compressed), b"stored");
}

#[test]
#[ntest::timeout(1000)]
fn deflate_reserved_block_type() {
    // BFINAL set, BTYPE 0b11
    let result = DeflateDecoder::new().convert(&[0xff; 16]);
    assert!(
        matches!(result, Err(Error::BackendFault { code: -1, .. })),
        "{result:?}"
    );
}

#[test]
#[ntest::timeout(1000)]
fn deflate_empty_matches_reference() {
    let encoder = utils::algos::deflate::chunked::encoder().build().unwrap();
    assert_eq!(
        utils::convert_empty(&encoder),
        utils::algos::deflate::sync::compress(&[])
    );
}
