//! Deflate64 decoder. Deflate64 is a proprietary extension of deflate found in zip archives, and
//! there is no encoder for it.

use crate::NoParam;

codec! {
    /// Decompresses a raw deflate64 stream.
    Deflate64Decoder<NoParam> => crate::codec::Deflate64Decoder,
    backend: |_params| crate::codec::Deflate64Decoder::new(),
}
