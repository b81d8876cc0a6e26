use std::fmt;

use bzip2::{Action, Compress, Compression, Status};

use crate::{
    codec::{bzip2::BzParam, Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

/// Bzip2 compression.
pub struct BzEncoder {
    block_size: u32,
    work_factor: u32,
    compress: Option<Compress>,
}

impl BzEncoder {
    pub(crate) fn new(params: &ParamTable<BzParam>) -> Self {
        Self {
            block_size: params.get(BzParam::BlockSize).map_or(9, |value| value as u32),
            work_factor: params.get(BzParam::WorkFactor).map_or(0, |value| value as u32),
            compress: None,
        }
    }

    fn encode(&mut self, input: &[u8], output: &mut [u8], action: Action) -> Result<(Status, usize, usize)> {
        let compress = self
            .compress
            .as_mut()
            .ok_or_else(|| Error::uninitialized("bzip2"))?;

        let prior_in = compress.total_in();
        let prior_out = compress.total_out();

        let status = compress
            .compress(input, output, action)
            .map_err(|err| Error::backend(-1, err.to_string()))?;

        let in_length = (compress.total_in() - prior_in) as usize;
        let out_length = (compress.total_out() - prior_out) as usize;

        match status {
            Status::MemNeeded => Err(Error::ResourceExhausted("bzip2 encoder".into())),
            status => Ok((status, in_length, out_length)),
        }
    }
}

impl Backend for BzEncoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.compress = Some(Compress::new(
            Compression::new(self.block_size),
            self.work_factor,
        ));
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let (_, read, written) = self.encode(input, output, Action::Run)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (status, _, written) = self.encode(&[], output, Action::Flush)?;
        // `FlushOk` while the flushed block is still being written out, `RunOk` once it is done.
        Ok((status == Status::RunOk, written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (status, _, written) = self.encode(&[], output, Action::Finish)?;
        Ok((status == Status::StreamEnd, written))
    }

    fn close(&mut self) {
        self.compress = None;
    }
}

impl fmt::Debug for BzEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.compress {
            Some(compress) => write!(
                f,
                "BzEncoder {{total_in: {}, total_out: {}}}",
                compress.total_in(),
                compress.total_out()
            ),
            None => write!(f, "BzEncoder {{block_size: {}}}", self.block_size),
        }
    }
}
