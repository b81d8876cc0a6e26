use lz4::liblz4::{
    check_error, LZ4FDecompressionContext, LZ4F_createDecompressionContext, LZ4F_decompress,
    LZ4F_freeDecompressionContext, LZ4F_VERSION,
};

use crate::{
    codec::{Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
};

#[derive(Debug)]
struct DecoderContext {
    ctx: LZ4FDecompressionContext,
}

impl DecoderContext {
    fn new() -> Result<Self> {
        let mut context = LZ4FDecompressionContext(core::ptr::null_mut());
        check_error(unsafe { LZ4F_createDecompressionContext(&mut context, LZ4F_VERSION) })
            .map_err(|err| {
                Error::ResourceExhausted(format!("lz4 decompression context: {err}"))
            })?;
        Ok(Self { ctx: context })
    }
}

impl Drop for DecoderContext {
    fn drop(&mut self) {
        unsafe { LZ4F_freeDecompressionContext(self.ctx) };
    }
}

/// LZ4 frame decompression.
#[derive(Debug, Default)]
pub struct Lz4Decoder {
    ctx: Option<DecoderContext>,
    stream_ended: bool,
}

impl Lz4Decoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize)> {
        let ctx = self
            .ctx
            .as_ref()
            .map(|context| LZ4FDecompressionContext(context.ctx.0))
            .ok_or_else(|| Error::uninitialized("lz4"))?;

        let mut output_size = output.len();
        let mut input_size = input.len();
        let remaining = check_error(unsafe {
            LZ4F_decompress(
                ctx,
                output.as_mut_ptr(),
                &mut output_size,
                input.as_ptr(),
                &mut input_size,
                core::ptr::null(),
            )
        })
        .map_err(Error::backend_io)?;

        // A call that moved nothing reports a hint for the next frame, not the state of this one.
        if input_size > 0 || output_size > 0 {
            self.stream_ended = remaining == 0;
        }
        Ok((input_size, output_size))
    }
}

impl Backend for Lz4Decoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.ctx = Some(DecoderContext::new()?);
        self.stream_ended = false;
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (read, written) = self.decode(input, output)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (_, written) = self.decode(&[], output)?;
        Ok((written < output.len(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (done, written) = self.flush(output)?;
        if !done {
            Ok((false, written))
        } else if self.stream_ended {
            Ok((true, written))
        } else {
            Err(Error::truncated("lz4"))
        }
    }

    fn close(&mut self) {
        self.ctx = None;
    }
}
