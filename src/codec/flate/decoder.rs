use flate2::{Decompress, FlushDecompress, Status};

use crate::{
    codec::{Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
};

/// Deflate decompression, with or without the zlib wrapper.
#[derive(Debug)]
pub struct FlateDecoder {
    zlib_header: bool,
    decompress: Option<Decompress>,
    finished: bool,
}

impl FlateDecoder {
    pub(crate) fn new(zlib_header: bool) -> Self {
        Self {
            zlib_header,
            decompress: None,
            finished: false,
        }
    }

    fn name(&self) -> &'static str {
        if self.zlib_header {
            "zlib"
        } else {
            "deflate"
        }
    }

    /// Whether the end of the compressed stream has been decoded.
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Prepares for another stream, keeping the native state.
    pub(crate) fn reset(&mut self) {
        if let Some(decompress) = &mut self.decompress {
            decompress.reset(self.zlib_header);
        }
        self.finished = false;
    }

    fn do_decode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        flush: FlushDecompress,
    ) -> Result<(Status, usize, usize)> {
        let name = self.name();
        let decompress = self
            .decompress
            .as_mut()
            .ok_or_else(|| Error::uninitialized(name))?;

        let prior_in = decompress.total_in();
        let prior_out = decompress.total_out();

        let status = decompress
            .decompress(input, output, flush)
            .map_err(|err| Error::backend(-1, err.to_string()))?;

        let in_length = (decompress.total_in() - prior_in) as usize;
        let out_length = (decompress.total_out() - prior_out) as usize;

        if status == Status::StreamEnd {
            self.finished = true;
        }

        Ok((status, in_length, out_length))
    }
}

impl Backend for FlateDecoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.decompress = Some(Decompress::new(self.zlib_header));
        self.finished = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        if self.finished {
            return Err(Error::trailing(self.name()));
        }

        let (_, in_length, out_length) = self.do_decode(input, output, FlushDecompress::None)?;
        Ok(CodecResult::new(in_length, out_length))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (_, _, out_length) = self.do_decode(&[], output, FlushDecompress::Sync)?;
        Ok((self.finished || out_length < output.len(), out_length))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (status, _, out_length) = self.do_decode(&[], output, FlushDecompress::Finish)?;
        match status {
            Status::StreamEnd => Ok((true, out_length)),
            _ if out_length > 0 => Ok((false, out_length)),
            _ => Err(Error::truncated(self.name())),
        }
    }

    fn close(&mut self) {
        self.decompress = None;
    }
}
