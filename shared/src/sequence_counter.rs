use crate::types::FetchIndex;

/// Issues strictly increasing sequence numbers and tells whether a
/// previously issued one is still the latest.
///
/// Indices are 64-bit and never wrap, so an index that has been superseded
/// stays superseded no matter how many revisions follow it.
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter {
    latest: FetchIndex,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next sequence number, superseding every earlier one.
    pub fn next(&mut self) -> FetchIndex {
        self.latest += 1;
        self.latest
    }

    pub fn latest(&self) -> FetchIndex {
        self.latest
    }

    pub fn is_latest(&self, index: FetchIndex) -> bool {
        index == self.latest
    }

    /// How many sequence numbers were issued after `index`.
    pub fn revisions_since(&self, index: FetchIndex) -> FetchIndex {
        self.latest.saturating_sub(index)
    }
}
