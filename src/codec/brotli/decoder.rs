use std::fmt;

use brotli::{enc::StandardAlloc, BrotliDecompressStream, BrotliResult, BrotliState};

use crate::{
    codec::{brotli::BrotliDecoderParam, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Brotli decompression.
pub struct BrotliDecoder {
    large_window: bool,
    // `BrotliState` is very large (over 2kb) which is why we're boxing it.
    state: Option<Box<BrotliState<StandardAlloc, StandardAlloc, StandardAlloc>>>,
    finished: bool,
}

impl BrotliDecoder {
    pub(crate) fn new(params: &ParamTable<BrotliDecoderParam>) -> Self {
        Self {
            large_window: params.get(BrotliDecoderParam::LargeWindow) == Some(1),
            state: None,
            finished: false,
        }
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(BrotliResult, usize, usize)> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| Error::uninitialized("brotli"))?;

        let mut input_len = 0;
        let mut output_len = 0;

        let status = match BrotliDecompressStream(
            &mut input.len(),
            &mut input_len,
            input,
            &mut output.len(),
            &mut output_len,
            output,
            &mut 0,
            state,
        ) {
            BrotliResult::ResultFailure => {
                return Err(Error::backend(-1, "brotli stream is corrupt"));
            }
            status => status,
        };

        if let BrotliResult::ResultSuccess = status {
            self.finished = true;
        }

        Ok((status, input_len, output_len))
    }
}

impl Backend for BrotliDecoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let mut state = Box::new(BrotliState::new(
            StandardAlloc::default(),
            StandardAlloc::default(),
            StandardAlloc::default(),
        ));
        state.large_window = self.large_window;
        self.state = Some(state);
        self.finished = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        if self.finished {
            return Err(Error::trailing("brotli"));
        }

        let (_, read, written) = self.decode(input, output)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (status, _, written) = self.decode(&[], output)?;
        match status {
            BrotliResult::NeedsMoreOutput => Ok((false, written)),
            _ => Ok((true, written)),
        }
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if self.finished {
            return Ok((true, 0));
        }

        let (status, _, written) = self.decode(&[], output)?;
        match status {
            BrotliResult::ResultSuccess => Ok((true, written)),
            BrotliResult::NeedsMoreOutput => Ok((false, written)),
            _ => Err(Error::truncated("brotli")),
        }
    }

    fn close(&mut self) {
        self.state = None;
    }
}

impl fmt::Debug for BrotliDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrotliDecoder")
            .field("large_window", &self.large_window)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
