use std::fmt;

use liblzma::stream::{Action, Status, Stream, CONCATENATED};

use crate::{
    codec::{
        lzma::{stream_error, LzmaDecoderParam, LzmaFormat},
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// LZMA decompression of the xz or lzma container.
pub struct LzmaDecoder {
    format: LzmaFormat,
    mem_limit: u64,
    stream: Option<Stream>,
    finished: bool,
}

impl LzmaDecoder {
    pub(crate) fn new(format: LzmaFormat, params: &ParamTable<LzmaDecoderParam>) -> Self {
        Self {
            format,
            mem_limit: params
                .get(LzmaDecoderParam::MemLimit)
                .map_or(u64::MAX, |value| value as u64),
            stream: None,
            finished: false,
        }
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<(Status, usize, usize)> {
        let format = self.format;
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| Error::uninitialized(format.name()))?;

        let previous_in = stream.total_in();
        let previous_out = stream.total_out();

        let status = stream
            .process(input, output, action)
            .map_err(|err| stream_error(format, err))?;

        let read = (stream.total_in() - previous_in) as usize;
        let written = (stream.total_out() - previous_out) as usize;

        match status {
            Status::StreamEnd => self.finished = true,
            Status::GetCheck => {
                return Err(Error::backend(-1, "unexpected lzma integrity check"));
            }
            Status::Ok | Status::MemNeeded => {}
        }

        Ok((status, read, written))
    }
}

impl Backend for LzmaDecoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let stream = match self.format {
            // Concatenated xz streams and stream padding decode as one.
            LzmaFormat::Xz => Stream::new_stream_decoder(self.mem_limit, CONCATENATED),
            LzmaFormat::Lzma => Stream::new_lzma_decoder(self.mem_limit),
        };
        self.stream = Some(stream.map_err(|err| stream_error(self.format, err))?);
        self.finished = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        if self.finished {
            return Err(Error::trailing(self.format.name()));
        }

        let (_, read, written) = self.decode(input, output, Action::Run)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (_, _, written) = self.decode(&[], output, Action::Run)?;
        Ok((written < output.len(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        match self.decode(&[], output, Action::Finish)? {
            (Status::StreamEnd, _, written) => Ok((true, written)),
            (_, _, 0) => Err(Error::truncated(self.format.name())),
            (_, _, written) => Ok((false, written)),
        }
    }

    fn close(&mut self) {
        self.stream = None;
    }
}

impl fmt::Debug for LzmaDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LzmaDecoder")
            .field("format", &self.format)
            .field("mem_limit", &self.mem_limit)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
