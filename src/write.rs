use std::io;

use crate::{
    codec::Backend,
    convert::Codec,
    sink::{CodecSink, WriteDownstream},
};

/// An [`io::Write`] that converts everything written to it before passing it on to `W`.
///
/// The stream is only complete once [`finish`](Self::finish) has been called; dropping the writer
/// releases the codec without writing the end of the stream.
#[derive(Debug)]
pub struct CodecWriter<B: Backend, W: io::Write> {
    sink: CodecSink<B, WriteDownstream<W>>,
}

impl<B: Backend, W: io::Write> CodecWriter<B, W> {
    /// Creates a writer converting with `codec` into `inner`.
    pub fn new<C>(codec: &C, inner: W) -> crate::Result<Self>
    where
        C: Codec<Backend = B> + ?Sized,
    {
        Ok(Self {
            sink: codec.start_chunked_conversion(WriteDownstream::new(inner))?,
        })
    }

    /// Acquires a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.sink.get_ref().get_ref()
    }

    /// Acquires a mutable reference to the underlying writer.
    ///
    /// Note that mutation of the writer may result in surprising results if this writer is
    /// continued to be used.
    pub fn get_mut(&mut self) -> &mut W {
        self.sink.get_mut().get_mut()
    }

    /// Ends the stream and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.close()?;
        Ok(self.sink.into_inner().into_inner())
    }
}

impl<B: Backend, W: io::Write> io::Write for CodecWriter<B, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.add(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(self.sink.flush()?)
    }
}
