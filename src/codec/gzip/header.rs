use flate2::Crc;

use crate::error::{Error, Result};

const FTEXT: u8 = 1 << 0;
const FHCRC: u8 = 1 << 1;
const FEXTRA: u8 = 1 << 2;
const FNAME: u8 = 1 << 3;
const FCOMMENT: u8 = 1 << 4;
const RESERVED: u8 = 0xe0;

/// Fields of a parsed gzip member header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GzipHeader {
    /// Modification time of the original file, seconds since the epoch, `0` if unknown.
    pub mtime: u32,
    /// Operating system the member was written on.
    pub os: u8,
    /// Extra compression flags.
    pub xfl: u8,
    /// Whether the content is probably text.
    pub text: bool,
    /// Contents of the `FEXTRA` field.
    pub extra: Option<Vec<u8>>,
    /// Original file name, without the terminating zero.
    pub filename: Option<Vec<u8>>,
    /// File comment, without the terminating zero.
    pub comment: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Fixed,
    ExtraLength,
    Extra(usize),
    Filename,
    Comment,
    Crc,
    Done,
}

/// Incremental parser of a gzip member header, fed whatever input is available.
#[derive(Debug)]
pub(super) struct HeaderParser {
    stage: Stage,
    scratch: Vec<u8>,
    flags: u8,
    crc: Crc,
    header: GzipHeader,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self {
            stage: Stage::Fixed,
            scratch: Vec::with_capacity(10),
            flags: 0,
            crc: Crc::new(),
            header: GzipHeader::default(),
        }
    }
}

impl HeaderParser {
    pub(super) fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    pub(super) fn take(&mut self) -> GzipHeader {
        std::mem::take(&mut self.header)
    }

    /// Consumes header bytes from `input`, returning how many were used.
    pub(super) fn parse(&mut self, input: &[u8]) -> Result<usize> {
        let mut consumed = 0;

        while self.stage != Stage::Done {
            let input = &input[consumed..];
            let used = match self.stage {
                Stage::Fixed => self.fill(input, 10),
                Stage::ExtraLength => self.fill(input, 2),
                Stage::Extra(remaining) => {
                    let len = remaining.min(input.len());
                    self.header
                        .extra
                        .get_or_insert_with(Vec::new)
                        .extend_from_slice(&input[..len]);
                    self.stage = Stage::Extra(remaining - len);
                    len
                }
                Stage::Filename | Stage::Comment => self.zero_terminated(input),
                Stage::Crc => {
                    let used = self.fill(input, 2);
                    // The header CRC does not cover itself.
                    consumed += used;
                    if self.scratch.len() < 2 {
                        break;
                    }
                    self.check_crc()?;
                    self.stage = Stage::Done;
                    continue;
                }
                Stage::Done => 0,
            };

            self.crc.update(&input[..used]);
            consumed += used;

            if !self.step()? {
                break;
            }
        }

        Ok(consumed)
    }

    /// Copies up to `len` bytes into the scratch space.
    fn fill(&mut self, input: &[u8], len: usize) -> usize {
        let used = (len - self.scratch.len()).min(input.len());
        self.scratch.extend_from_slice(&input[..used]);
        used
    }

    fn zero_terminated(&mut self, input: &[u8]) -> usize {
        let field = match self.stage {
            Stage::Filename => &mut self.header.filename,
            _ => &mut self.header.comment,
        };
        let field = field.get_or_insert_with(Vec::new);

        match memchr::memchr(0, input) {
            Some(end) => {
                field.extend_from_slice(&input[..end]);
                self.scratch.push(0);
                end + 1
            }
            None => {
                field.extend_from_slice(input);
                input.len()
            }
        }
    }

    /// Completes the current stage if it has all its bytes. Returns whether parsing advanced.
    fn step(&mut self) -> Result<bool> {
        match self.stage {
            Stage::Fixed if self.scratch.len() == 10 => {
                self.parse_fixed()?;
                self.next_stage(Stage::Fixed);
            }
            Stage::ExtraLength if self.scratch.len() == 2 => {
                let len = u16::from_le_bytes([self.scratch[0], self.scratch[1]]);
                self.header.extra = Some(Vec::with_capacity(len.into()));
                self.stage = Stage::Extra(len.into());
                self.scratch.clear();
            }
            Stage::Extra(0) => self.next_stage(Stage::Extra(0)),
            Stage::Filename | Stage::Comment if self.scratch.last() == Some(&0) => {
                self.scratch.clear();
                self.next_stage(self.stage);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn parse_fixed(&mut self) -> Result<()> {
        let fixed = &self.scratch;
        if fixed[0..2] != [0x1f, 0x8b] {
            return Err(Error::backend(-1, "invalid gzip header"));
        }
        if fixed[2] != 0x08 {
            return Err(Error::backend(
                -1,
                format!("unsupported gzip compression method {}", fixed[2]),
            ));
        }

        self.flags = fixed[3];
        if self.flags & RESERVED != 0 {
            return Err(Error::backend(-1, "reserved gzip header flags are set"));
        }

        self.header.text = self.flags & FTEXT != 0;
        self.header.mtime = u32::from_le_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        self.header.xfl = fixed[8];
        self.header.os = fixed[9];
        self.scratch.clear();
        Ok(())
    }

    fn next_stage(&mut self, after: Stage) {
        let order = [
            (Stage::ExtraLength, FEXTRA),
            (Stage::Filename, FNAME),
            (Stage::Comment, FCOMMENT),
            (Stage::Crc, FHCRC),
        ];
        let start = match after {
            Stage::Fixed => 0,
            Stage::ExtraLength | Stage::Extra(_) => 1,
            Stage::Filename => 2,
            Stage::Comment => 3,
            Stage::Crc | Stage::Done => 4,
        };

        self.stage = order[start..]
            .iter()
            .find(|(_, flag)| self.flags & flag != 0)
            .map_or(Stage::Done, |&(stage, _)| stage);
    }

    fn check_crc(&mut self) -> Result<()> {
        let expected = u16::from_le_bytes([self.scratch[0], self.scratch[1]]);
        let actual = (self.crc.sum() & 0xffff) as u16;
        self.scratch.clear();
        if expected != actual {
            return Err(Error::backend(-1, "gzip header CRC does not match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(flags: u8) -> Vec<u8> {
        vec![0x1f, 0x8b, 0x08, flags, 1, 0, 0, 0, 0, 3]
    }

    fn full_header() -> Vec<u8> {
        let mut bytes = header(FEXTRA | FNAME | FCOMMENT | FHCRC);
        bytes.extend_from_slice(&[3, 0, b'a', b'b', b'c']);
        bytes.extend_from_slice(b"name.txt\0");
        bytes.extend_from_slice(b"a comment\0");
        let mut crc = Crc::new();
        crc.update(&bytes);
        bytes.extend_from_slice(&(crc.sum() as u16).to_le_bytes());
        bytes
    }

    #[test]
    fn minimal_header() {
        let mut parser = HeaderParser::default();
        let mut input = header(0);
        input.extend_from_slice(b"rest");

        assert_eq!(parser.parse(&input).unwrap(), 10);
        assert!(parser.is_done());
        let parsed = parser.take();
        assert_eq!(parsed.mtime, 1);
        assert_eq!(parsed.os, 3);
        assert_eq!(parsed.filename, None);
    }

    #[test]
    fn every_optional_field() {
        let input = full_header();
        let mut parser = HeaderParser::default();

        assert_eq!(parser.parse(&input).unwrap(), input.len());
        assert!(parser.is_done());
        let parsed = parser.take();
        assert_eq!(parsed.extra.as_deref(), Some(&b"abc"[..]));
        assert_eq!(parsed.filename.as_deref(), Some(&b"name.txt"[..]));
        assert_eq!(parsed.comment.as_deref(), Some(&b"a comment"[..]));
    }

    #[test]
    fn byte_at_a_time() {
        let input = full_header();
        let mut parser = HeaderParser::default();

        for (i, byte) in input.iter().enumerate() {
            assert!(!parser.is_done(), "finished early at {i}");
            assert_eq!(parser.parse(std::slice::from_ref(byte)).unwrap(), 1);
        }
        assert!(parser.is_done());
        assert_eq!(parser.take().filename.as_deref(), Some(&b"name.txt"[..]));
    }

    #[test]
    fn bad_header_crc() {
        let mut input = full_header();
        let last = input.len() - 1;
        input[last] ^= 0xff;
        assert!(HeaderParser::default().parse(&input).is_err());
    }

    #[test]
    fn bad_magic() {
        let mut input = header(0);
        input[1] = 0;
        assert!(matches!(
            HeaderParser::default().parse(&input),
            Err(Error::BackendFault { .. })
        ));
    }

    #[test]
    fn reserved_flags() {
        assert!(HeaderParser::default().parse(&header(0x20)).is_err());
    }
}
