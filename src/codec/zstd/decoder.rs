use std::fmt;

use zstd_safe::{DCtx, DParameter, InBuffer, OutBuffer};

use crate::{
    codec::{
        zstd::{zstd_error, ZstdDecoderParam},
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Zstandard decompression.
pub struct ZstdDecoder {
    window_log_max: Option<u32>,
    context: Option<DCtx<'static>>,
    // Whether a frame has started but not yet ended. Consecutive frames are all decoded.
    in_frame: bool,
}

impl ZstdDecoder {
    pub(crate) fn new(params: &ParamTable<ZstdDecoderParam>) -> Self {
        Self {
            window_log_max: params
                .get(ZstdDecoderParam::WindowLogMax)
                .map(|value| value as u32),
            context: None,
            in_frame: false,
        }
    }

    /// Returns the bytes read, the bytes written and libzstd's hint, which is `0` at a frame end.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, usize)> {
        let context = self
            .context
            .as_mut()
            .ok_or_else(|| Error::uninitialized("zstd"))?;
        let mut in_buf = InBuffer::around(input);
        let mut out_buf = OutBuffer::around(output);
        let remaining = context
            .decompress_stream(&mut out_buf, &mut in_buf)
            .map_err(zstd_error)?;
        Ok((in_buf.pos(), out_buf.pos(), remaining))
    }

    fn drain(&mut self, output: &mut [u8]) -> Result<usize> {
        let (_, written, remaining) = self.decode(&[], output)?;
        if written > 0 {
            self.in_frame = remaining != 0;
        }
        Ok(written)
    }
}

impl Backend for ZstdDecoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let mut context = DCtx::try_create().ok_or_else(|| {
            Error::ResourceExhausted("zstd decompression context could not be allocated".into())
        })?;
        context.init().map_err(zstd_error)?;
        if let Some(log) = self.window_log_max {
            context
                .set_parameter(DParameter::WindowLogMax(log))
                .map_err(zstd_error)?;
        }
        self.context = Some(context);
        self.in_frame = false;

        if !output.is_length_set() {
            output.set_length(zstd_safe::DCtx::out_size())?;
        }
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (read, written, remaining) = self.decode(input, output)?;
        self.in_frame = remaining != 0;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let written = self.drain(output)?;
        Ok((written < output.len(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        if !self.in_frame {
            return Ok((true, 0));
        }

        match self.drain(output)? {
            0 => Err(Error::truncated("zstd")),
            written => Ok((!self.in_frame, written)),
        }
    }

    fn close(&mut self) {
        self.context = None;
    }
}

impl fmt::Debug for ZstdDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZstdDecoder")
            .field("window_log_max", &self.window_log_max)
            .field("in_frame", &self.in_frame)
            .finish_non_exhaustive()
    }
}
