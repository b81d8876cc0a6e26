use tracing::{debug, trace, warn};

use crate::{
    buffer::CodecBuffer,
    codec::Backend,
    error::{Error, Result},
    holder::{BufferHolder, BufferLengths},
    sink::Downstream,
};

/// Lifecycle state of a [`CodecFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterState {
    /// Constructed, the backend holds no native state yet.
    Created,
    /// The backend is initialized, no chunk processed yet.
    Initialized,
    /// At least one chunk has gone through the backend.
    Processing,
    /// A flush is in progress. Only observed while a flush runs, or as the prior state logged
    /// when a flush fails. A completed flush returns to [`FilterState::Processing`].
    Flushing,
    /// The stream is being ended.
    Finalizing,
    /// The stream ended, all output has been forwarded.
    Finalized,
    /// The backend and buffers were released.
    Closed,
    /// A failure occurred and the backend was released.
    Errored,
}

/// Drives a [`Backend`] through its lifecycle and moves bytes between the caller, the backend and
/// a [`Downstream`].
///
/// Caller chunks are staged in the input buffer. The backend writes into the output buffer, which
/// is forwarded downstream whenever it no longer has the room the backend negotiated at init.
#[derive(Debug)]
pub struct CodecFilter<B: Backend> {
    backend: B,
    input: BufferHolder,
    output: BufferHolder,
    state: FilterState,
    min_output: usize,
    total_in: u64,
    total_out: u64,
}

impl<B: Backend> CodecFilter<B> {
    /// Wraps `backend`. No native state and no buffer is allocated yet.
    pub fn new(backend: B, lengths: BufferLengths) -> Result<Self> {
        lengths.validate()?;
        let input = backend.new_buffer_holder(lengths.input)?;
        let output = backend.new_buffer_holder(lengths.output)?;
        Ok(Self {
            backend,
            input,
            output,
            state: FilterState::Created,
            min_output: 1,
            total_in: 0,
            total_out: 0,
        })
    }

    /// The current lifecycle state.
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// The backend being driven.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The input buffer, if it has been allocated.
    pub fn input_buffer(&self) -> Option<&CodecBuffer> {
        self.input.get()
    }

    /// The output buffer, if it has been allocated.
    pub fn output_buffer(&self) -> Option<&CodecBuffer> {
        self.output.get()
    }

    /// Free space the backend requires in the output buffer for each call.
    pub fn min_output_length(&self) -> usize {
        self.min_output
    }

    /// Bytes accepted from the caller so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Bytes produced by the backend so far.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    fn ensure(&self, operation: &'static str, allowed: &[FilterState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::IllegalState {
                operation,
                state: self.state,
            })
        }
    }

    /// Initializes the backend, passing it the first chunk of the stream.
    pub fn init(&mut self, first_chunk: &[u8]) -> Result<()> {
        self.ensure("init", &[FilterState::Created])?;
        let result = self.do_init(first_chunk);
        self.check(result)
    }

    fn do_init(&mut self, first_chunk: &[u8]) -> Result<()> {
        let min_output = self
            .backend
            .init(&mut self.input, &mut self.output, first_chunk)?;
        self.min_output = min_output.max(1);
        self.output.require_min_length(self.min_output)?;
        self.state = FilterState::Initialized;
        debug!(
            input_length = self.input.length(),
            output_length = self.output.length(),
            min_output = self.min_output,
            "initialized codec filter"
        );
        Ok(())
    }

    /// Feeds `chunk` through the backend, forwarding full output buffers to `downstream`.
    pub fn process<D: Downstream + ?Sized>(&mut self, chunk: &[u8], downstream: &mut D) -> Result<()> {
        self.ensure("process", &[FilterState::Initialized, FilterState::Processing])?;
        let result = self.do_process(chunk, downstream);
        self.check(result)
    }

    fn do_process<D: Downstream + ?Sized>(&mut self, mut chunk: &[u8], downstream: &mut D) -> Result<()> {
        self.state = FilterState::Processing;
        while !chunk.is_empty() {
            let input = self.input.buffer()?;
            if input.unwritten_count() == 0 {
                input.compact();
            }
            let taken = input.put_partial(chunk);
            chunk = &chunk[taken..];
            self.total_in += taken as u64;
            self.drain(downstream)?;
        }
        Ok(())
    }

    /// Runs the backend until the input buffer is empty.
    fn drain<D: Downstream + ?Sized>(&mut self, downstream: &mut D) -> Result<()> {
        let input = match self.input.get_mut() {
            Some(input) => input,
            None => return Ok(()),
        };

        while input.unread_count() > 0 {
            let output = self.output.buffer()?;
            if output.unwritten_count() < self.min_output {
                forward(output, downstream)?;
            }

            let unread = input.unread_count();
            let room = output.unwritten_count();
            let result = self.backend.process(input.unread(), output.unwritten_mut())?;
            if result.read() > unread || result.written() > room {
                return Err(Error::ProtocolViolation(format!(
                    "backend reported {result:?} with {unread} bytes of input and {room} bytes of room"
                )));
            }
            if result.is_empty() {
                return Err(Error::ProtocolViolation(format!(
                    "backend made no progress with {unread} bytes of input and {room} bytes of room"
                )));
            }

            input.advance_read(result.read());
            output.advance_write(result.written());
            self.total_out += result.written() as u64;
            trace!(read = result.read(), written = result.written(), "processed");
        }

        input.reset()
    }

    /// Emits everything the backend buffered so far without ending the stream.
    pub fn flush<D: Downstream + ?Sized>(&mut self, downstream: &mut D) -> Result<()> {
        self.ensure("flush", &[FilterState::Initialized, FilterState::Processing])?;
        let result = self.do_flush(downstream);
        self.check(result)
    }

    fn do_flush<D: Downstream + ?Sized>(&mut self, downstream: &mut D) -> Result<()> {
        self.state = FilterState::Flushing;
        self.drain(downstream)?;
        self.run_to_completion(downstream, "flush", B::flush)?;
        self.state = FilterState::Processing;
        Ok(())
    }

    /// Ends the stream and forwards the remaining output. A no-op once finalized.
    pub fn finalize<D: Downstream + ?Sized>(&mut self, downstream: &mut D) -> Result<()> {
        if self.state == FilterState::Finalized {
            return Ok(());
        }
        self.ensure("finalize", &[FilterState::Initialized, FilterState::Processing])?;
        let result = self.do_finalize(downstream);
        self.check(result)
    }

    fn do_finalize<D: Downstream + ?Sized>(&mut self, downstream: &mut D) -> Result<()> {
        self.state = FilterState::Finalizing;
        self.drain(downstream)?;
        self.run_to_completion(downstream, "finalize", B::finalize)?;
        self.state = FilterState::Finalized;
        debug!(
            total_in = self.total_in,
            total_out = self.total_out,
            "finalized codec filter"
        );
        Ok(())
    }

    /// Repeats `step` until it reports completion, then forwards all buffered output.
    fn run_to_completion<D: Downstream + ?Sized>(
        &mut self,
        downstream: &mut D,
        operation: &str,
        step: fn(&mut B, &mut [u8]) -> Result<(bool, usize)>,
    ) -> Result<()> {
        let output = self.output.buffer()?;
        loop {
            if output.unwritten_count() < self.min_output {
                forward(output, downstream)?;
            }

            let room = output.unwritten_count();
            let (done, written) = step(&mut self.backend, output.unwritten_mut())?;
            if written > room {
                return Err(Error::ProtocolViolation(format!(
                    "backend {operation} wrote {written} bytes into {room} bytes of room"
                )));
            }
            output.advance_write(written);
            self.total_out += written as u64;
            trace!(written, done, "{operation} step");

            if done {
                break;
            }
            if written == 0 {
                return Err(Error::ProtocolViolation(format!(
                    "backend {operation} made no progress with {room} bytes of room"
                )));
            }
        }
        forward(output, downstream)
    }

    /// Releases the backend and both buffers. Safe to call in any state, and more than once.
    pub fn close(&mut self) {
        match self.state {
            FilterState::Closed | FilterState::Errored => return,
            FilterState::Created => {}
            _ => self.backend.close(),
        }
        self.input.release();
        self.output.release();
        self.state = FilterState::Closed;
        debug!(
            total_in = self.total_in,
            total_out = self.total_out,
            "closed codec filter"
        );
    }

    /// Moves to [`FilterState::Errored`] and releases everything if `result` failed.
    fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!(state = ?self.state, error = %err, "aborting codec filter");
            self.backend.close();
            self.input.release();
            self.output.release();
            self.state = FilterState::Errored;
        }
        result
    }
}

impl<B: Backend> Drop for CodecFilter<B> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Hands the unread output to `downstream` and empties the buffer.
fn forward<D: Downstream + ?Sized>(output: &mut CodecBuffer, downstream: &mut D) -> Result<()> {
    if output.unread_count() > 0 {
        downstream.add(output.unread())?;
        output.advance_read(output.unread_count());
    }
    output.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecResult;

    /// Copies input to output, at most `step` bytes per call, and appends `tail` when finalized.
    #[derive(Debug, Default)]
    struct Passthrough {
        step: usize,
        min_output: usize,
        tail: Vec<u8>,
        closed: usize,
        initialized: bool,
        out_of_memory: bool,
    }

    impl Backend for Passthrough {
        fn init(
            &mut self,
            _input: &mut BufferHolder,
            _output: &mut BufferHolder,
            _first_chunk: &[u8],
        ) -> Result<usize> {
            if self.out_of_memory {
                return Err(Error::ResourceExhausted("passthrough state".into()));
            }
            self.initialized = true;
            Ok(self.min_output)
        }

        fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
            let len = input.len().min(output.len()).min(self.step);
            output[..len].copy_from_slice(&input[..len]);
            Ok(CodecResult::new(len, len))
        }

        fn flush(&mut self, _output: &mut [u8]) -> Result<(bool, usize)> {
            Ok((true, 0))
        }

        fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
            let len = self.tail.len().min(output.len());
            output[..len].copy_from_slice(&self.tail[..len]);
            self.tail.drain(..len);
            Ok((self.tail.is_empty(), len))
        }

        fn close(&mut self) {
            self.closed += 1;
        }
    }

    fn copy(step: usize) -> Passthrough {
        Passthrough {
            step,
            min_output: 1,
            ..Passthrough::default()
        }
    }

    fn lengths(input: usize, output: usize) -> BufferLengths {
        BufferLengths {
            input: Some(input),
            output: Some(output),
        }
    }

    #[test]
    fn copies_through_small_buffers() {
        let mut filter = CodecFilter::new(copy(3), lengths(4, 5)).unwrap();
        let mut out = Vec::new();

        filter.init(b"").unwrap();
        filter.process(b"hello world", &mut out).unwrap();
        filter.process(b"!", &mut out).unwrap();
        filter.finalize(&mut out).unwrap();

        assert_eq!(out, b"hello world!");
        assert_eq!(filter.total_in(), 12);
        assert_eq!(filter.total_out(), 12);
        assert_eq!(filter.state(), FilterState::Finalized);
    }

    #[test]
    fn finalize_emits_tail_across_buffers() {
        let backend = Passthrough {
            tail: b"0123456789".to_vec(),
            ..copy(8)
        };
        let mut filter = CodecFilter::new(backend, lengths(8, 3)).unwrap();
        let mut out = Vec::new();

        filter.init(b"ab").unwrap();
        filter.process(b"ab", &mut out).unwrap();
        filter.finalize(&mut out).unwrap();
        filter.finalize(&mut out).unwrap();

        assert_eq!(out, b"ab0123456789");
    }

    #[test]
    fn output_grows_to_backend_minimum() {
        let backend = Passthrough {
            min_output: 16,
            ..copy(usize::MAX)
        };
        let mut filter = CodecFilter::new(backend, lengths(8, 4)).unwrap();
        filter.init(b"").unwrap();
        filter.process(b"x", &mut Vec::new()).unwrap();

        assert_eq!(filter.min_output_length(), 16);
        assert_eq!(filter.output_buffer().unwrap().capacity(), 16);
    }

    #[test]
    fn buffers_are_allocated_lazily() {
        let mut filter = CodecFilter::new(copy(1), BufferLengths::default()).unwrap();
        filter.init(b"").unwrap();
        filter.process(b"", &mut Vec::new()).unwrap();

        assert!(filter.input_buffer().is_none());
        assert!(filter.output_buffer().is_none());
    }

    #[test]
    fn stalled_backend_is_a_protocol_violation() {
        let mut filter = CodecFilter::new(copy(0), lengths(4, 4)).unwrap();
        filter.init(b"").unwrap();

        let err = filter.process(b"abc", &mut Vec::new()).unwrap_err();

        assert!(matches!(err, Error::ProtocolViolation(_)));
        assert_eq!(filter.state(), FilterState::Errored);
        assert_eq!(filter.backend().closed, 1);
        assert!(filter.input_buffer().is_none());
    }

    #[test]
    fn failed_allocation_errors_the_filter() {
        let backend = Passthrough {
            out_of_memory: true,
            ..copy(1)
        };
        let mut filter = CodecFilter::new(backend, lengths(4, 4)).unwrap();

        let err = filter.init(b"abc").unwrap_err();

        assert!(matches!(err, Error::ResourceExhausted(_)));
        assert_eq!(filter.state(), FilterState::Errored);
        assert_eq!(filter.backend().closed, 1);
        assert!(filter.input_buffer().is_none());
        assert!(filter.output_buffer().is_none());

        filter.close();
        assert_eq!(filter.state(), FilterState::Errored);
        assert_eq!(filter.backend().closed, 1);
        assert!(matches!(
            filter.process(b"a", &mut Vec::new()),
            Err(Error::IllegalState {
                state: FilterState::Errored,
                ..
            })
        ));
    }

    #[test]
    fn flush_returns_to_processing() {
        let mut filter = CodecFilter::new(copy(2), lengths(4, 4)).unwrap();
        let mut out = Vec::new();
        filter.init(b"").unwrap();

        filter.flush(&mut out).unwrap();
        assert_eq!(filter.state(), FilterState::Processing);

        filter.process(b"abcde", &mut out).unwrap();
        filter.flush(&mut out).unwrap();
        assert_eq!(filter.state(), FilterState::Processing);
        assert_eq!(out, b"abcde");
    }

    #[test]
    fn operations_check_state() {
        let mut filter = CodecFilter::new(copy(1), lengths(4, 4)).unwrap();
        assert!(matches!(
            filter.process(b"a", &mut Vec::new()),
            Err(Error::IllegalState {
                operation: "process",
                state: FilterState::Created
            })
        ));
        assert_eq!(filter.state(), FilterState::Created);

        filter.init(b"").unwrap();
        assert!(matches!(
            filter.init(b""),
            Err(Error::IllegalState { operation: "init", .. })
        ));
    }

    #[test]
    fn close_releases_once() {
        let mut filter = CodecFilter::new(copy(1), lengths(4, 4)).unwrap();
        filter.init(b"").unwrap();
        filter.process(b"abc", &mut Vec::new()).unwrap();

        filter.close();
        filter.close();

        assert_eq!(filter.backend().closed, 1);
        assert_eq!(filter.state(), FilterState::Closed);
        assert!(filter.output_buffer().is_none());
        assert!(matches!(
            filter.finalize(&mut Vec::new()),
            Err(Error::IllegalState { .. })
        ));
    }

    #[test]
    fn closing_before_init_skips_backend() {
        let mut filter = CodecFilter::new(copy(1), lengths(4, 4)).unwrap();
        filter.close();
        assert_eq!(filter.backend().closed, 0);
        assert!(!filter.backend().initialized);
    }

    #[test]
    fn zero_lengths_are_rejected() {
        assert!(matches!(
            CodecFilter::new(copy(1), lengths(0, 4)),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
