use flate2::{Compress, Compression, FlushCompress, Status};

use crate::{
    codec::{flate::FlateParam, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Deflate compression, with or without the zlib wrapper.
#[derive(Debug)]
pub struct FlateEncoder {
    params: ParamTable<FlateParam>,
    zlib_header: bool,
    compress: Option<Compress>,
    flushing: bool,
}

impl FlateEncoder {
    pub(crate) fn new(params: ParamTable<FlateParam>, zlib_header: bool) -> Self {
        Self {
            params,
            zlib_header,
            compress: None,
            flushing: false,
        }
    }

    pub(crate) fn level(&self) -> Compression {
        self.params
            .get(FlateParam::Level)
            .map_or_else(Compression::default, |level| Compression::new(level as u32))
    }

    fn name(&self) -> &'static str {
        if self.zlib_header {
            "zlib"
        } else {
            "deflate"
        }
    }

    fn do_encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushCompress,
    ) -> Result<(Status, usize, usize)> {
        let name = self.name();
        let compress = self
            .compress
            .as_mut()
            .ok_or_else(|| Error::uninitialized(name))?;

        let prior_in = compress.total_in();
        let prior_out = compress.total_out();

        let status = compress
            .compress(input, output, flush)
            .map_err(|err| Error::backend(-1, err.to_string()))?;

        let in_length = (compress.total_in() - prior_in) as usize;
        let out_length = (compress.total_out() - prior_out) as usize;

        Ok((status, in_length, out_length))
    }
}

impl Backend for FlateEncoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.compress = Some(Compress::new(self.level(), self.zlib_header));
        self.flushing = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (status, in_length, out_length) = self.do_encode(input, output, FlushCompress::None)?;

        match status {
            Status::Ok | Status::StreamEnd => Ok(CodecResult::new(in_length, out_length)),
            Status::BufError => Err(Error::backend(-1, "unexpected BufError")),
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        // Sync once, then keep draining whatever that left pending.
        let flush = if self.flushing {
            FlushCompress::None
        } else {
            FlushCompress::Sync
        };
        self.flushing = true;

        // BufError only means there was nothing left to emit.
        let (_, _, out_length) = self.do_encode(&[], output, flush)?;

        let done = out_length < output.len();
        if done {
            self.flushing = false;
        }
        Ok((done, out_length))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (status, _, out_length) = self.do_encode(&[], output, FlushCompress::Finish)?;

        Ok((status == Status::StreamEnd, out_length))
    }

    fn close(&mut self) {
        self.compress = None;
    }
}
