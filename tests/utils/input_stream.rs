use proptest_derive::Arbitrary;

#[derive(Arbitrary, Debug, Clone)]
pub struct InputStream(Vec<Vec<u8>>);

impl InputStream {
    pub fn new(input: Vec<Vec<u8>>) -> Self {
        InputStream(input)
    }

    pub fn as_ref(&self) -> &[Vec<u8>] {
        &self.0
    }

    pub fn chunks(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        // Empty chunks are interleaved before and after each chunk, that way we test the handling
        // of them at every point of the stream.
        self.0
            .iter()
            .flat_map(|bytes| vec![vec![], bytes.clone()])
            .chain(Some(vec![]))
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.0.iter().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    /// Splits `bytes` into chunks of `size` bytes.
    pub fn split(bytes: &[u8], size: usize) -> Self {
        InputStream(bytes.chunks(size).map(Vec::from).collect())
    }
}

// This happens to be the only dimension we're using
impl From<[[u8; 3]; 2]> for InputStream {
    fn from(input: [[u8; 3]; 2]) -> InputStream {
        InputStream(vec![Vec::from(&input[0][..]), Vec::from(&input[1][..])])
    }
}

impl From<Vec<Vec<u8>>> for InputStream {
    fn from(input: Vec<Vec<u8>>) -> InputStream {
        InputStream(input)
    }
}
