use serde::{Deserialize, Serialize};

use crate::{constants::BOARD_CAPACITY, score_record::ScoreRecord};

/// Top `BOARD_CAPACITY` scores, highest first.
///
/// Records with equal scores keep the order in which they were inserted, so
/// the earlier submission ranks higher. Every constructor and mutator keeps
/// the board sorted and capped; there is no way to build an unsorted one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoreRecord>", into = "Vec<ScoreRecord>")]
pub struct Leaderboard {
    records: Vec<ScoreRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(BOARD_CAPACITY + 1),
        }
    }

    /// Builds a board from records in arbitrary order.
    /// Sorting is stable, so ties keep their relative order from `records`.
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>) -> Self {
        let mut records: Vec<ScoreRecord> = records.into_iter().collect();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(BOARD_CAPACITY);
        Self { records }
    }

    /// Inserts a record behind every record with an equal or higher score.
    ///
    /// Returns the rank the record landed on, or `None` if it did not make
    /// the board.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let rank = self
            .records
            .partition_point(|existing| existing.score >= record.score);
        if rank >= BOARD_CAPACITY {
            return None;
        }
        self.records.insert(rank, record);
        self.records.truncate(BOARD_CAPACITY);
        Some(rank)
    }

    pub fn get(&self, rank: usize) -> Option<&ScoreRecord> {
        self.records.get(rank)
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoreRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lowest score still on the board, if the board is full.
    pub fn cutoff(&self) -> Option<u32> {
        if self.records.len() < BOARD_CAPACITY {
            return None;
        }
        self.records.last().map(|record| record.score)
    }

    pub fn is_well_formed(&self) -> bool {
        self.records.len() <= BOARD_CAPACITY
            && self.records.windows(2).all(|pair| pair[0].score >= pair[1].score)
    }
}

impl From<Vec<ScoreRecord>> for Leaderboard {
    fn from(records: Vec<ScoreRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<Leaderboard> for Vec<ScoreRecord> {
    fn from(board: Leaderboard) -> Self {
        board.records
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a ScoreRecord;
    type IntoIter = std::slice::Iter<'a, ScoreRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
