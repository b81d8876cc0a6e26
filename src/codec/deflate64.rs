use deflate64::InflaterManaged;

use crate::{
    codec::{Backend, CodecResult},
    error::{Error, Result},
    holder::BufferHolder,
};

/// Deflate64 decompression.
#[derive(Debug, Default)]
pub struct Deflate64Decoder {
    // The inflater carries its 256 KiB window inline.
    inflater: Option<Box<InflaterManaged>>,
}

impl Deflate64Decoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn inflater(&mut self) -> Result<&mut InflaterManaged> {
        self.inflater
            .as_deref_mut()
            .ok_or_else(|| Error::uninitialized("deflate64"))
    }

    fn is_done(&mut self) -> Result<bool> {
        let inflater = self.inflater()?;
        Ok(inflater.finished() && inflater.available_output() == 0)
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize)> {
        let result = self.inflater()?.inflate(input, output);

        if result.data_error {
            Err(Error::backend(-1, "invalid deflate64 data"))
        } else {
            Ok((result.bytes_consumed, result.bytes_written))
        }
    }
}

impl Backend for Deflate64Decoder {
    fn init(
        &mut self,
        _input: &mut BufferHolder,
        _output: &mut BufferHolder,
        _first_chunk: &[u8],
    ) -> Result<usize> {
        self.inflater = Some(Box::new(InflaterManaged::new()));
        Ok(1)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        if self.is_done()? {
            return Err(Error::trailing("deflate64"));
        }

        let (read, written) = self.decode(input, output)?;
        Ok(CodecResult::new(read, written))
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (_, written) = self.decode(&[], output)?;
        Ok((written < output.len(), written))
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let (_, written) = self.decode(&[], output)?;
        if self.is_done()? {
            Ok((true, written))
        } else if written > 0 {
            Ok((false, written))
        } else {
            Err(Error::truncated("deflate64"))
        }
    }

    fn close(&mut self) {
        self.inflater = None;
    }
}
