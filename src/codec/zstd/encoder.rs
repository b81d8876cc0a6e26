use std::fmt;

use zstd_safe::{CCtx, CParameter, InBuffer, OutBuffer, SafeResult};

use crate::{
    codec::{
        zstd::{zstd_error, ZstdParam},
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Zstandard compression.
pub struct ZstdEncoder {
    params: ParamTable<ZstdParam>,
    context: Option<CCtx<'static>>,
}

impl ZstdEncoder {
    pub(crate) fn new(params: ParamTable<ZstdParam>) -> Self {
        Self {
            params,
            context: None,
        }
    }

    fn context(&mut self) -> Result<&mut CCtx<'static>> {
        self.context
            .as_mut()
            .ok_or_else(|| Error::uninitialized("zstd"))
    }

    fn call_fn_on_out_buffer(
        &mut self,
        output: &mut [u8],
        f: fn(&mut CCtx<'static>, &mut OutBuffer<'_, [u8]>) -> SafeResult,
    ) -> Result<(bool, usize)> {
        let context = self.context()?;
        let mut out_buf = OutBuffer::around(output);
        let bytes_left = f(context, &mut out_buf).map_err(zstd_error)?;
        Ok((bytes_left == 0, out_buf.pos()))
    }
}

fn to_parameter(id: ZstdParam, value: i64) -> CParameter {
    // Values were range checked when the codec was built.
    let log = value as u32;
    match id {
        ZstdParam::CompressionLevel => CParameter::CompressionLevel(value as i32),
        ZstdParam::WindowLog => CParameter::WindowLog(log),
        ZstdParam::HashLog => CParameter::HashLog(log),
        ZstdParam::ChainLog => CParameter::ChainLog(log),
        ZstdParam::SearchLog => CParameter::SearchLog(log),
        ZstdParam::MinMatch => CParameter::MinMatch(log),
        ZstdParam::TargetLength => CParameter::TargetLength(log),
        ZstdParam::EnableLongDistanceMatching => CParameter::EnableLongDistanceMatching(value == 1),
        ZstdParam::ChecksumFlag => CParameter::ChecksumFlag(value == 1),
        ZstdParam::ContentSizeFlag => CParameter::ContentSizeFlag(value == 1),
    }
}

impl Backend for ZstdEncoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        let mut context = CCtx::try_create().ok_or_else(|| {
            Error::ResourceExhausted("zstd compression context could not be allocated".into())
        })?;
        for (id, value) in self.params.iter() {
            context
                .set_parameter(to_parameter(id, value))
                .map_err(zstd_error)?;
        }
        self.context = Some(context);

        if !output.is_length_set() {
            output.set_length(zstd_safe::CCtx::out_size())?;
        }
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let context = self.context()?;
        let mut in_buf = InBuffer::around(input);
        let mut out_buf = OutBuffer::around(output);
        context
            .compress_stream(&mut out_buf, &mut in_buf)
            .map_err(zstd_error)?;
        Ok(CodecResult::new(in_buf.pos(), out_buf.pos()))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        self.call_fn_on_out_buffer(output, |context, out_buf| context.flush_stream(out_buf))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        self.call_fn_on_out_buffer(output, |context, out_buf| context.end_stream(out_buf))
    }

    fn close(&mut self) {
        self.context = None;
    }
}

impl fmt::Debug for ZstdEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZstdEncoder")
            .field("params", &self.params)
            .field("initialized", &self.context.is_some())
            .finish()
    }
}
