use chunked_compression::{Downstream, Result};

/// Downstream that records how it is driven, asserting nothing arrives after the end.
#[derive(Debug, Default)]
pub struct TrackClosed {
    pub output: Vec<u8>,
    pub chunks: usize,
    pub flushes: usize,
    pub closes: usize,
}

impl TrackClosed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closes > 0
    }
}

impl Downstream for TrackClosed {
    fn add(&mut self, chunk: &[u8]) -> Result<()> {
        assert!(!self.is_closed(), "chunk added after close");
        self.output.extend_from_slice(chunk);
        self.chunks += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        assert!(!self.is_closed(), "flushed after close");
        self.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}
