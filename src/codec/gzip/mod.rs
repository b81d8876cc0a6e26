mod decoder;
mod encoder;
mod header;

use std::ops::RangeInclusive;

use crate::{
    buffer::CodecBuffer,
    params::{ParamId, ParamTable},
};

pub use self::{decoder::GzipDecoder, encoder::GzipEncoder, header::GzipHeader};

params! {
    /// Parameters of the gzip decoder.
    GzipDecoderParam {
        /// Set to `1` to decode concatenated members as one stream instead of rejecting the data
        /// after the first member.
        MultipleMembers = "multiple_members",
    }
}

impl ParamId for GzipDecoderParam {
    const ALL: &'static [Self] = Self::ORDER;

    fn name(self) -> &'static str {
        self.param_name()
    }

    fn range(self, _: &ParamTable<Self>) -> RangeInclusive<i64> {
        match self {
            Self::MultipleMembers => 0..=1,
        }
    }
}

/// Copies staged bytes into `output[*written..]`. Returns whether everything staged was copied.
fn drain_staged(staged: &mut CodecBuffer, output: &mut [u8], written: &mut usize) -> bool {
    *written += staged.drain_into(&mut output[*written..]);
    staged.unread_count() == 0
}
