use std::fmt;

use brotli::enc::{
    backward_references::{BrotliEncoderMode, BrotliEncoderParams},
    encode::{BrotliEncoderOperation, BrotliEncoderStateStruct},
    StandardAlloc,
};

use crate::{
    codec::{brotli::BrotliParam, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Brotli compression.
pub struct BrotliEncoder {
    params: ParamTable<BrotliParam>,
    state: Option<Box<BrotliEncoderStateStruct<StandardAlloc>>>,
}

impl BrotliEncoder {
    pub(crate) fn new(params: ParamTable<BrotliParam>) -> Self {
        Self {
            params,
            state: None,
        }
    }

    fn encoder_params(&self) -> BrotliEncoderParams {
        let mut params = BrotliEncoderParams::default();
        for (id, value) in self.params.iter() {
            match id {
                BrotliParam::LargeWindow => params.large_window = value == 1,
                BrotliParam::Mode => {
                    params.mode = match value {
                        1 => BrotliEncoderMode::BROTLI_MODE_TEXT,
                        2 => BrotliEncoderMode::BROTLI_MODE_FONT,
                        _ => BrotliEncoderMode::BROTLI_MODE_GENERIC,
                    }
                }
                BrotliParam::Quality => params.quality = value as i32,
                BrotliParam::WindowBits => params.lgwin = value as i32,
                BrotliParam::BlockBits => params.lgblock = value as i32,
                BrotliParam::DisableLiteralContextModeling => {
                    params.disable_literal_context_modeling = value as i32
                }
                BrotliParam::SizeHint => params.size_hint = value as usize,
                BrotliParam::PostfixBits => params.dist.distance_postfix_bits = value as u32,
                BrotliParam::DirectDistanceCodes => {
                    params.dist.num_direct_distance_codes = value as u32
                }
            }
        }
        params
    }

    fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        op: BrotliEncoderOperation,
    ) -> Result<(usize, usize)> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| Error::uninitialized("brotli"))?;

        let mut input_len = 0;
        let mut output_len = 0;

        if !state.compress_stream(
            op,
            &mut input.len(),
            input,
            &mut input_len,
            &mut output.len(),
            output,
            &mut output_len,
            &mut None,
            &mut |_, _, _, _| (),
        ) {
            return Err(Error::backend(-1, "brotli encoder failed"));
        }

        Ok((input_len, output_len))
    }

    fn state(&self) -> Result<&BrotliEncoderStateStruct<StandardAlloc>> {
        self.state
            .as_deref()
            .ok_or_else(|| Error::uninitialized("brotli"))
    }
}

impl Backend for BrotliEncoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let mut state = BrotliEncoderStateStruct::new(StandardAlloc::default());
        state.params = self.encoder_params();
        self.state = Some(Box::new(state));
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (read, written) =
            self.encode(input, output, BrotliEncoderOperation::BROTLI_OPERATION_PROCESS)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (_, written) = self.encode(&[], output, BrotliEncoderOperation::BROTLI_OPERATION_FLUSH)?;
        Ok((!self.state()?.has_more_output(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (_, written) =
            self.encode(&[], output, BrotliEncoderOperation::BROTLI_OPERATION_FINISH)?;
        Ok((self.state()?.is_finished(), written))
    }

    fn close(&mut self) {
        self.state = None;
    }
}

impl fmt::Debug for BrotliEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrotliEncoder")
            .field("params", &self.params)
            .field("state", &self.state.as_ref().map(|_| "<no debug>"))
            .finish()
    }
}
