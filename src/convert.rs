use crate::{
    codec::Backend,
    error::Result,
    filter::CodecFilter,
    holder::BufferLengths,
    sink::{CodecSink, Downstream},
};

/// A configured encoder or decoder.
///
/// Implementors only describe how to build a fresh [`Backend`]; streaming and one-shot conversion
/// both drive it through the same [`CodecFilter`].
pub trait Codec {
    /// The adapter this codec drives.
    type Backend: Backend;

    /// A fresh backend holding no native state.
    fn backend(&self) -> Self::Backend;

    /// Requested buffer lengths.
    fn buffer_lengths(&self) -> BufferLengths;

    /// Starts a conversion whose output goes to `downstream`.
    fn start_chunked_conversion<D: Downstream>(
        &self,
        downstream: D,
    ) -> Result<CodecSink<Self::Backend, D>> {
        let filter = CodecFilter::new(self.backend(), self.buffer_lengths())?;
        Ok(CodecSink::new(filter, downstream))
    }

    /// Converts `input` in one call.
    fn convert(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut sink = self.start_chunked_conversion(Vec::new())?;
        sink.add(input)?;
        sink.close()?;
        Ok(sink.into_inner())
    }
}
