use lz4::liblz4::{
    check_error, BlockChecksum, BlockMode, BlockSize, ContentChecksum, FrameType,
    LZ4FCompressionContext, LZ4FFrameInfo, LZ4FPreferences, LZ4F_compressBegin, LZ4F_compressBound,
    LZ4F_compressEnd, LZ4F_compressUpdate, LZ4F_createCompressionContext, LZ4F_flush,
    LZ4F_freeCompressionContext, LZ4F_VERSION,
};

use crate::{
    codec::{lz4::Lz4Param, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

// https://github.com/lz4/lz4/blob/9d53d8bb6c4120345a0966e5d8b16d7def1f32c5/lib/lz4frame.h#L281
const LZ4F_HEADER_SIZE_MAX: usize = 19;

#[derive(Debug)]
struct EncoderContext {
    ctx: LZ4FCompressionContext,
}

impl EncoderContext {
    fn new() -> Result<Self> {
        let mut context = LZ4FCompressionContext(core::ptr::null_mut());
        check_error(unsafe { LZ4F_createCompressionContext(&mut context, LZ4F_VERSION) })
            .map_err(|err| {
                Error::ResourceExhausted(format!("lz4 compression context: {err}"))
            })?;
        Ok(Self { ctx: context })
    }
}

impl Drop for EncoderContext {
    fn drop(&mut self) {
        unsafe { LZ4F_freeCompressionContext(self.ctx) };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Header,
    Encoding,
    Done,
}

/// LZ4 frame compression.
#[derive(Debug)]
pub struct Lz4Encoder {
    ctx: Option<EncoderContext>,
    state: State,
    preferences: LZ4FPreferences,
    /// Largest input handed to a single update, so one block always fits the output.
    limit: usize,
}

fn preferences(params: &ParamTable<Lz4Param>) -> LZ4FPreferences {
    let flag = |id| params.get(id) == Some(1);

    let block_size_id = match params.get(Lz4Param::BlockSize) {
        Some(4) => BlockSize::Max64KB,
        Some(5) => BlockSize::Max256KB,
        Some(6) => BlockSize::Max1MB,
        Some(7) => BlockSize::Max4MB,
        _ => BlockSize::Default,
    };
    let block_mode = match params.get(Lz4Param::BlockLinked) {
        Some(0) => BlockMode::Independent,
        _ => BlockMode::Linked,
    };
    let content_checksum_flag = if flag(Lz4Param::ContentChecksum) {
        ContentChecksum::ChecksumEnabled
    } else {
        ContentChecksum::NoChecksum
    };
    let block_checksum_flag = if flag(Lz4Param::BlockChecksum) {
        BlockChecksum::BlockChecksumEnabled
    } else {
        BlockChecksum::NoBlockChecksum
    };

    LZ4FPreferences {
        frame_info: LZ4FFrameInfo {
            block_size_id,
            block_mode,
            content_checksum_flag,
            frame_type: FrameType::Frame,
            content_size: 0,
            dict_id: 0,
            block_checksum_flag,
        },
        compression_level: params
            .get(Lz4Param::CompressionLevel)
            .map_or(0, |level| level as u32),
        auto_flush: u32::from(flag(Lz4Param::AutoFlush)),
        favor_dec_speed: u32::from(flag(Lz4Param::FavorDecSpeed)),
        reserved: [0; 3],
    }
}

// minimum size of destination buffer for compressing `src_size` bytes
fn min_dst_size(src_size: usize, preferences: &LZ4FPreferences) -> usize {
    unsafe { LZ4F_compressBound(src_size, preferences) }
}

impl Lz4Encoder {
    pub(crate) fn new(params: &ParamTable<Lz4Param>) -> Self {
        let preferences = preferences(params);
        Self {
            ctx: None,
            state: State::Header,
            limit: preferences.frame_info.block_size_id.get_size(),
            preferences,
        }
    }

    fn ctx(&self) -> Result<LZ4FCompressionContext> {
        self.ctx
            .as_ref()
            .map(|context| LZ4FCompressionContext(context.ctx.0))
            .ok_or_else(|| Error::uninitialized("lz4"))
    }

    fn begin(&mut self, output: &mut [u8]) -> Result<usize> {
        let len = check_error(unsafe {
            LZ4F_compressBegin(
                self.ctx()?,
                output.as_mut_ptr(),
                output.len(),
                &self.preferences,
            )
        })
        .map_err(Error::backend_io)?;
        self.state = State::Encoding;
        Ok(len)
    }
}

impl Backend for Lz4Encoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.ctx = Some(EncoderContext::new()?);
        self.state = State::Header;
        // A full block, its checksums and the frame end all fit in this much space.
        Ok(min_dst_size(self.limit, &self.preferences).max(LZ4F_HEADER_SIZE_MAX))
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        match self.state {
            State::Header => Ok(CodecResult::new(0, self.begin(output)?)),
            State::Encoding => {
                let src_size = input.len().min(self.limit);
                let len = check_error(unsafe {
                    LZ4F_compressUpdate(
                        self.ctx()?,
                        output.as_mut_ptr(),
                        output.len(),
                        input.as_ptr(),
                        src_size,
                        core::ptr::null(),
                    )
                })
                .map_err(Error::backend_io)?;
                Ok(CodecResult::new(src_size, len))
            }
            State::Done => Err(Error::ProtocolViolation(
                "lz4 encode after complete".into(),
            )),
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        match self.state {
            State::Header => Ok((false, self.begin(output)?)),
            State::Encoding => {
                let len = check_error(unsafe {
                    LZ4F_flush(
                        self.ctx()?,
                        output.as_mut_ptr(),
                        output.len(),
                        core::ptr::null(),
                    )
                })
                .map_err(Error::backend_io)?;
                Ok((true, len))
            }
            State::Done => Ok((true, 0)),
        }
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        match self.state {
            State::Header => Ok((false, self.begin(output)?)),
            State::Encoding => {
                let len = check_error(unsafe {
                    LZ4F_compressEnd(
                        self.ctx()?,
                        output.as_mut_ptr(),
                        output.len(),
                        core::ptr::null(),
                    )
                })
                .map_err(Error::backend_io)?;
                self.state = State::Done;
                Ok((true, len))
            }
            State::Done => Ok((true, 0)),
        }
    }

    fn close(&mut self) {
        self.ctx = None;
    }
}
