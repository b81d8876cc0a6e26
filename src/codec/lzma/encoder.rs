use std::fmt;

use liblzma::stream::{Action, Check, LzmaOptions, Status, Stream};

use crate::{
    codec::{
        lzma::{check, stream_error, LzmaFormat, LzmaParam},
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// LZMA compression into the xz or lzma container.
pub struct LzmaEncoder {
    format: LzmaFormat,
    preset: u32,
    check: Check,
    stream: Option<Stream>,
}

impl LzmaEncoder {
    pub(crate) fn new(format: LzmaFormat, params: &ParamTable<LzmaParam>) -> Self {
        Self {
            format,
            preset: params.get(LzmaParam::Preset).map_or(6, |value| value as u32),
            check: check(params.get(LzmaParam::Check)),
            stream: None,
        }
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<(bool, usize, usize)> {
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
            Status::Ok => Ok((false, read, written)),
            Status::StreamEnd => Ok((true, read, written)),
            // Reported when a call can make no progress, which only happens once the action is
            // complete and the output has been drained.
            Status::MemNeeded => Ok((written == 0, read, written)),
            Status::GetCheck => Err(Error::backend(-1, "unexpected lzma integrity check")),
        }
    }
}

impl Backend for LzmaEncoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let stream = match self.format {
            LzmaFormat::Xz => Stream::new_easy_encoder(self.preset, self.check),
            LzmaFormat::Lzma => LzmaOptions::new_preset(self.preset)
                .and_then(|options| Stream::new_lzma_encoder(&options)),
        };
        self.stream = Some(stream.map_err(|err| stream_error(self.format, err))?);
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (_, read, written) = self.encode(input, output, Action::Run)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        match self.format {
            LzmaFormat::Xz => {
                let (done, _, written) = self.encode(&[], output, Action::SyncFlush)?;
                Ok((done, written))
            }
            // The lzma format has no way to flush mid-stream.
            LzmaFormat::Lzma => Ok((true, 0)),
        }
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (done, _, written) = self.encode(&[], output, Action::Finish)?;
        Ok((done, written))
    }

    fn close(&mut self) {
        self.stream = None;
    }
}

impl fmt::Debug for LzmaEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LzmaEncoder")
            .field("format", &self.format)
            .field("preset", &self.preset)
            .finish_non_exhaustive()
    }
}
