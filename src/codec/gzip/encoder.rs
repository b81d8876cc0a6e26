use flate2::{Compression, Crc};

use crate::{
    buffer::CodecBuffer,
    codec::{
        flate::{FlateEncoder, FlateParam},
        gzip::drain_staged,
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

#[derive(Debug)]
enum State {
    Header(CodecBuffer),
    Encoding,
    Footer(CodecBuffer),
    Done,
}

/// Gzip compression: a deflate stream inside a member header and footer.
#[derive(Debug)]
pub struct GzipEncoder {
    inner: FlateEncoder,
    crc: Crc,
    state: State,
}

impl GzipEncoder {
    pub(crate) fn new(params: ParamTable<FlateParam>) -> Self {
        Self {
            inner: FlateEncoder::new(params, false),
            crc: Crc::new(),
            state: State::Done,
        }
    }

    fn header(level: Compression) -> Vec<u8> {
        let level_byte = if level.level() >= Compression::best().level() {
            0x02
        } else if level.level() <= Compression::fast().level() {
            0x04
        } else {
            0x00
        };

        vec![0x1f, 0x8b, 0x08, 0, 0, 0, 0, 0, level_byte, 0xff]
    }

    fn footer(&self) -> Vec<u8> {
        let mut footer = Vec::with_capacity(8);
        footer.extend_from_slice(&self.crc.sum().to_le_bytes());
        footer.extend_from_slice(&self.crc.amount().to_le_bytes());
        footer
    }

    /// Copies out any pending header. Returns whether encoding may continue into `output`.
    fn write_header(&mut self, output: &mut [u8], written: &mut usize) -> bool {
        if let State::Header(header) = &mut self.state {
            if !drain_staged(header, output, written) {
                return false;
            }
            self.state = State::Encoding;
        }
        *written < output.len()
    }
}

impl Backend for GzipEncoder {
    fn init(
        &mut self,
        input: &mut BufferHolder,
        output: &mut BufferHolder,
        first_chunk: &[u8],
    ) -> Result<usize> {
        let min_output = self.inner.init(input, output, first_chunk)?;
        self.crc = Crc::new();
        self.state = State::Header(Self::header(self.inner.level()).into());
        Ok(min_output)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let mut written = 0;
        if !self.write_header(output, &mut written) {
            return Ok(CodecResult::new(0, written));
        }

        match self.state {
            State::Encoding => {
                let result = self.inner.process(input, &mut output[written..])?;
                self.crc.update(&input[..result.read()]);
                Ok(CodecResult::new(result.read(), written + result.written()))
            }
            _ => Err(Error::ProtocolViolation(
                "gzip encoder received input after the stream ended".into(),
            )),
        }
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let mut written = 0;
        if !self.write_header(output, &mut written) {
            return Ok((false, written));
        }

        match self.state {
            State::Encoding => {
                let (done, flushed) = self.inner.flush(&mut output[written..])?;
                Ok((done, written + flushed))
            }
            _ => Ok((true, written)),
        }
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        let mut written = 0;

        loop {
            match &mut self.state {
                State::Header(_) => {
                    if !self.write_header(output, &mut written) {
                        return Ok((false, written));
                    }
                }
                State::Encoding => {
                    let (done, finished) = self.inner.finalize(&mut output[written..])?;
                    written += finished;
                    if !done {
                        return Ok((false, written));
                    }
                    self.state = State::Footer(self.footer().into());
                }
                State::Footer(footer) => {
                    if !drain_staged(footer, output, &mut written) {
                        return Ok((false, written));
                    }
                    self.state = State::Done;
                }
                State::Done => return Ok((true, written)),
            }
        }
    }

    fn close(&mut self) {
        self.inner.close();
        self.state = State::Done;
    }
}
