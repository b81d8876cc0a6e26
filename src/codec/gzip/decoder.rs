use flate2::Crc;
use tracing::trace;

use crate::{
    buffer::CodecBuffer,
    codec::{
        flate::FlateDecoder,
        gzip::{header::HeaderParser, GzipDecoderParam, GzipHeader},
        Backend, CodecResult,
    },
    error::{Error, Result},
    holder::BufferHolder,
    params::ParamTable,
};

#[derive(Debug)]
enum State {
    Header(HeaderParser),
    Decoding,
    Footer(CodecBuffer),
    Done,
}

/// Gzip decompression.
#[derive(Debug)]
pub struct GzipDecoder {
    inner: FlateDecoder,
    crc: Crc,
    state: State,
    multiple_members: bool,
    header: Option<GzipHeader>,
}

impl GzipDecoder {
    pub(crate) fn new(params: &ParamTable<GzipDecoderParam>) -> Self {
        Self {
            inner: FlateDecoder::new(false),
            crc: Crc::new(),
            state: State::Header(HeaderParser::default()),
            multiple_members: params.get(GzipDecoderParam::MultipleMembers) == Some(1),
            header: None,
        }
    }

    /// Header of the member most recently started.
    pub fn header(&self) -> Option<&GzipHeader> {
        self.header.as_ref()
    }

    fn check_footer(&self, footer: &[u8]) -> Result<()> {
        let crc = self.crc.sum().to_le_bytes();
        let bytes_read = self.crc.amount().to_le_bytes();

        if crc != footer[0..4] {
            return Err(Error::backend(-1, "CRC computed does not match"));
        }
        if bytes_read != footer[4..8] {
            return Err(Error::backend(-1, "amount of bytes read does not match"));
        }
        Ok(())
    }

    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        let mut read = 0;
        let mut written = 0;

        loop {
            match &mut self.state {
                State::Header(parser) => {
                    read += parser.parse(&input[read..])?;
                    if !parser.is_done() {
                        break;
                    }
                    self.header = Some(parser.take());
                    self.state = State::Decoding;
                }

                State::Decoding => {
                    if written == output.len() || read == input.len() {
                        break;
                    }
                    let result = self
                        .inner
                        .process(&input[read..], &mut output[written..])?;
                    self.crc
                        .update(&output[written..written + result.written()]);
                    read += result.read();
                    written += result.written();

                    if self.inner.is_finished() {
                        self.state = State::Footer(CodecBuffer::new(8));
                    } else if result.is_empty() {
                        break;
                    }
                }

                State::Footer(footer) => {
                    read += footer.put_partial(&input[read..]);
                    if footer.unwritten_count() > 0 {
                        break;
                    }
                    let footer = std::mem::replace(footer, CodecBuffer::new(0));
                    self.check_footer(footer.unread())?;
                    self.state = State::Done;
                }

                State::Done => {
                    if read == input.len() {
                        break;
                    }
                    if !self.multiple_members {
                        return Err(Error::trailing("gzip"));
                    }
                    trace!("starting next gzip member");
                    self.inner.reset();
                    self.crc = Crc::new();
                    self.state = State::Header(HeaderParser::default());
                }
            }
        }

        Ok(CodecResult::new(read, written))
    }
}

impl Backend for GzipDecoder {
    fn init(
        &mut self,
        input: &mut BufferHolder,
        output: &mut BufferHolder,
        first_chunk: &[u8],
    ) -> Result<usize> {
        let min_output = self.inner.init(input, output, first_chunk)?;
        self.crc = Crc::new();
        self.state = State::Header(HeaderParser::default());
        self.header = None;
        Ok(min_output)
    }

    fn process(&mut self, input: &[u8], output: &mut [u8]) -> Result<CodecResult> {
        self.decode(input, output)
    }

    fn flush(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        match self.state {
            State::Decoding => {
                let (done, written) = self.inner.flush(output)?;
                self.crc.update(&output[..written]);
                Ok((done, written))
            }
            _ => Ok((true, 0)),
        }
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<(bool, usize)> {
        match &self.state {
            State::Done => Ok((true, 0)),
            State::Decoding => {
                let (done, written) = self.inner.finalize(output)?;
                self.crc.update(&output[..written]);
                if done {
                    // The deflate stream ended, but the footer never arrived.
                    Err(Error::truncated("gzip"))
                } else {
                    Ok((false, written))
                }
            }
            State::Header(_) | State::Footer(_) => Err(Error::truncated("gzip")),
        }
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
