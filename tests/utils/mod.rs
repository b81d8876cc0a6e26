#![allow(unused)] // Different tests use a different subset of functions

mod input_stream;
mod track_closed;
#[macro_use]
mod test_cases;

pub mod algos;

pub use self::{input_stream::InputStream, track_closed::TrackClosed};
pub use chunked_compression::{Codec, Error, Level};

/// Routes `tracing` events from the crate to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_ansi(false)
        .with_test_writer()
        .with_target(false)
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Random bytes with enough repetition to be compressible.
pub fn random_text(len: usize) -> Vec<u8> {
    const WORDS: &[&[u8]] = &[b"lorem ", b"ipsum ", b"dolor ", b"sit ", b"amet\n"];
    let mut output = Vec::with_capacity(len);
    while output.len() < len {
        if rand::random::<u8>() < 32 {
            output.push(rand::random());
        } else {
            output.extend_from_slice(WORDS[rand::random_range(0..WORDS.len())]);
        }
    }
    output.truncate(len);
    output
}

/// Feeds every chunk of `input` through `codec` into a fresh `Vec`.
pub fn convert_chunked<C: Codec>(codec: &C, input: &InputStream) -> chunked_compression::Result<Vec<u8>> {
    let mut sink = codec.start_chunked_conversion(Vec::new())?;
    for chunk in input.chunks() {
        sink.add(&chunk)?;
    }
    sink.close()?;
    Ok(sink.into_inner())
}

/// Runs a conversion that only ever sees an empty chunk.
pub fn convert_empty<C: Codec>(codec: &C) -> Vec<u8> {
    let mut sink = codec.start_chunked_conversion(Vec::new()).unwrap();
    sink.add(&[]).unwrap();
    sink.close().unwrap();
    sink.into_inner()
}

/// Flushing the encoder mid-stream must make everything added so far decodable, and the stream
/// must still complete normally afterwards.
pub fn assert_flush_emits_everything<E: Codec, D: Codec>(encoder: &E, decoder: &D) {
    let bytes = random_text(10_000);
    let mut encoding = encoder.start_chunked_conversion(TrackClosed::new()).unwrap();
    let mut decoding = decoder.start_chunked_conversion(TrackClosed::new()).unwrap();

    encoding.add(&bytes).unwrap();
    encoding.flush().unwrap();
    assert_eq!(encoding.get_ref().flushes, 1);

    let flushed = encoding.get_ref().output.clone();
    decoding.add(&flushed).unwrap();
    decoding.flush().unwrap();
    assert_eq!(decoding.get_ref().output, bytes);

    encoding.add(b"the end").unwrap();
    encoding.close().unwrap();
    decoding.add(&encoding.get_ref().output[flushed.len()..]).unwrap();
    decoding.close().unwrap();

    let mut expected = bytes;
    expected.extend_from_slice(b"the end");
    assert_eq!(decoding.get_ref().output, expected);
    assert!(decoding.get_ref().is_closed());
}
