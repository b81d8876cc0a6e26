use std::fmt;

use bzip2::{Decompress, Status};

use crate::{
    codec::{bzip2::BzDecoderParam, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Bzip2 decompression of a single stream.
pub struct BzDecoder {
    small: bool,
    decompress: Option<Decompress>,
    finished: bool,
}

impl BzDecoder {
    pub(crate) fn new(params: &ParamTable<BzDecoderParam>) -> Self {
        Self {
            small: params.get(BzDecoderParam::Small) == Some(1),
            decompress: None,
            finished: false,
        }
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize)> {
        let decompress = self
            .decompress
            .as_mut()
            .ok_or_else(|| Error::uninitialized("bzip2"))?;

        let prior_in = decompress.total_in();
        let prior_out = decompress.total_out();

        let status = decompress
            .decompress(input, output)
            .map_err(|err| Error::backend(-1, err.to_string()))?;

        let read = (decompress.total_in() - prior_in) as usize;
        let written = (decompress.total_out() - prior_out) as usize;

        match status {
            // Decompression went fine, nothing much to report.
            Status::Ok => {}

            // The stream's end has been met, meaning that no more data can be input.
            Status::StreamEnd => self.finished = true,

            Status::MemNeeded => return Err(Error::ResourceExhausted("bzip2 decoder".into())),

            // Only reported by compression.
            Status::RunOk | Status::FlushOk | Status::FinishOk => unreachable!(),
        }

        Ok((read, written))
    }
}

impl Backend for BzDecoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.decompress = Some(Decompress::new(self.small));
        self.finished = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        if self.finished {
            return Err(Error::trailing("bzip2"));
        }

        let (read, written) = self.decode(input, output)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (_, written) = self.decode(&[], output)?;
        Ok((self.finished || written < output.len(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        match self.decode(&[], output)? {
            (_, written) if self.finished => Ok((true, written)),
            (_, 0) => Err(Error::truncated("bzip2")),
            (_, written) => Ok((false, written)),
        }
    }

    fn close(&mut self) {
        self.decompress = None;
    }
}

impl fmt::Debug for BzDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.decompress {
            Some(decompress) => write!(
                f,
                "BzDecoder {{total_in: {}, total_out: {}}}",
                decompress.total_in(),
                decompress.total_out()
            ),
            None => write!(f, "BzDecoder {{small: {}}}", self.small),
        }
    }
}
