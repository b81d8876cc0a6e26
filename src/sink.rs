use std::io;

use tracing::debug;

use crate::{
    codec::Backend,
    error::{Error, Result},
    filter::{CodecFilter, FilterState},
};

/// Consumer of converted bytes.
///
/// A sink calls [`add`](Downstream::add) for every output chunk in order, and
/// [`close`](Downstream::close) at most once after the last one.
pub trait Downstream {
    /// Receives the next chunk of output.
    fn add(&mut self, chunk: &[u8]) -> Result<()>;

    /// Pushes any buffered bytes further along.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Signals the end of the stream.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Downstream for Vec<u8> {
    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        self.extend_from_slice(chunk);
        Ok(())
    }
}

impl<D: Downstream + ?Sized> Downstream for &mut D {
    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        (**self).add(chunk)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<D: Downstream + ?Sized> Downstream for Box<D> {
    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        (**self).add(chunk)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Adapts an [`io::Write`] into a [`Downstream`]. Closing flushes the writer.
#[derive(Debug)]
pub struct WriteDownstream<W> {
    inner: W,
}

impl<W: io::Write> WriteDownstream<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Acquires a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Acquires a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes this adaptor, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Downstream for WriteDownstream<W> {
    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        Ok(self.inner.write_all(chunk)?)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    fn close(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }
}

/// Streaming entry point of a conversion: chunks go in through [`add`](Self::add), converted bytes
/// come out of the wrapped [`Downstream`].
///
/// The filter is initialized with the first chunk added, or with an empty chunk if the sink is
/// closed without any input.
#[derive(Debug)]
pub struct CodecSink<B: Backend, D: Downstream> {
    filter: CodecFilter<B>,
    downstream: D,
    closed: bool,
}

impl<B: Backend, D: Downstream> CodecSink<B, D> {
    /// Connects `filter` to `downstream`.
    pub fn new(filter: CodecFilter<B>, downstream: D) -> Self {
        Self {
            filter,
            downstream,
            closed: false,
        }
    }

    /// Converts `chunk`, forwarding any output that is ready.
    pub fn add(&mut self, chunk: &[u8]) -> Result<()> {
        if self.filter.state() == FilterState::Created {
            self.filter.init(chunk)?;
        }
        self.filter.process(chunk, &mut self.downstream)
    }

    /// Converts `chunk[start..end]`, then closes the sink if `is_last`.
    pub fn add_slice(&mut self, chunk: &[u8], start: usize, end: usize, is_last: bool) -> Result<()> {
        if start > end {
            return Err(Error::invalid_argument(
                "start",
                format!("{start} is past end {end}"),
            ));
        }
        if end > chunk.len() {
            return Err(Error::invalid_argument(
                "end",
                format!("{end} is past the chunk length {}", chunk.len()),
            ));
        }
        self.add(&chunk[start..end])?;
        if is_last {
            self.close()?;
        }
        Ok(())
    }

    /// Forwards everything converted so far, then flushes the downstream.
    pub fn flush(&mut self) -> Result<()> {
        if self.filter.state() == FilterState::Created {
            self.filter.init(&[])?;
        }
        self.filter.flush(&mut self.downstream)?;
        self.downstream.flush()
    }

    /// Ends the stream: finalizes the filter, releases it, and closes the downstream.
    ///
    /// Calling this again is a no-op. If an earlier call already failed, the filter is released
    /// and the downstream is not closed.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        match self.filter.state() {
            FilterState::Errored | FilterState::Closed => {
                debug!("closing sink after an earlier failure");
                self.filter.close();
                return Ok(());
            }
            FilterState::Created => self.filter.init(&[])?,
            _ => {}
        }

        let result = self.filter.finalize(&mut self.downstream);
        self.filter.close();
        result?;
        self.downstream.close()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The filter driving the conversion.
    pub fn filter(&self) -> &CodecFilter<B> {
        &self.filter
    }

    /// Acquires a reference to the downstream.
    pub fn get_ref(&self) -> &D {
        &self.downstream
    }

    /// Acquires a mutable reference to the downstream.
    ///
    /// Adding to it directly interleaves with converted output.
    pub fn get_mut(&mut self) -> &mut D {
        &mut self.downstream
    }

    /// Consumes the sink, returning the downstream. The filter is released if still open.
    pub fn into_inner(self) -> D {
        self.downstream
    }
}
