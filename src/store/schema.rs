use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::corpus::Difficulty;

pub const SCHEMA_VERSION: u32 = 1;
/// Placeholder until the player names their entry.
pub const DEFAULT_NAME: &str = "AAA";
/// Arcade-style name length cap.
pub const MAX_NAME_LEN: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Millisecond timestamp doubling as a unique id within a table.
    pub id: i64,
    pub name: String,
    pub score: u32,
    pub wpm: u32,
    pub accuracy: u32,
    pub timestamp: DateTime<Utc>,
}

impl HighScoreEntry {
    pub fn new(score: u32, wpm: u32, accuracy: u32) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            name: DEFAULT_NAME.to_string(),
            score,
            wpm,
            accuracy,
            timestamp: now,
        }
    }
}

/// One top-N table per difficulty, always sorted by score descending.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HighScoreData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub easy: Vec<HighScoreEntry>,
    #[serde(default)]
    pub hard: Vec<HighScoreEntry>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl HighScoreData {
    pub fn table(&self, difficulty: Difficulty) -> &[HighScoreEntry] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Hard => &self.hard,
        }
    }

    fn table_mut(&mut self, difficulty: Difficulty) -> &mut Vec<HighScoreEntry> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Insert an entry, keep the table sorted and capped at `max_entries`.
    /// Returns the entry id if it made the table.
    pub fn record(
        &mut self,
        difficulty: Difficulty,
        entry: HighScoreEntry,
        max_entries: usize,
    ) -> Option<i64> {
        let id = entry.id;
        let table = self.table_mut(difficulty);
        table.push(entry);
        table.sort_by(|a, b| b.score.cmp(&a.score));
        table.truncate(max_entries);
        table.iter().any(|e| e.id == id).then_some(id)
    }

    /// Rename an entry by id, searching both difficulty tables.
    pub fn rename(&mut self, id: i64, name: &str) -> bool {
        let name: String = name.chars().take(MAX_NAME_LEN).collect();
        for table in [&mut self.easy, &mut self.hard] {
            if let Some(entry) = table.iter_mut().find(|e| e.id == id) {
                entry.name = name;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, score: u32) -> HighScoreEntry {
        HighScoreEntry {
            id,
            name: DEFAULT_NAME.to_string(),
            score,
            wpm: 40,
            accuracy: 97,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_record_keeps_sorted_top_n() {
        let mut data = HighScoreData::default();
        for (id, score) in [(1, 300), (2, 100), (3, 500), (4, 200), (5, 400), (6, 250)] {
            data.record(Difficulty::Easy, entry(id, score), 5);
        }
        let scores: Vec<u32> = data.easy.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![500, 400, 300, 250, 200]);
        assert!(data.hard.is_empty());
    }

    #[test]
    fn test_record_reports_whether_entry_survived() {
        let mut data = HighScoreData::default();
        for id in 0..5 {
            assert!(data.record(Difficulty::Hard, entry(id, 500), 5).is_some());
        }
        assert!(data.record(Difficulty::Hard, entry(9, 10), 5).is_none());
        assert!(data.record(Difficulty::Hard, entry(10, 900), 5).is_some());
    }

    #[test]
    fn test_rename_finds_entry_across_tables() {
        let mut data = HighScoreData::default();
        data.record(Difficulty::Easy, entry(1, 100), 5);
        data.record(Difficulty::Hard, entry(2, 200), 5);

        assert!(data.rename(2, "ZOE"));
        assert_eq!(data.hard[0].name, "ZOE");
        assert!(!data.rename(99, "NOPE"));
    }

    #[test]
    fn test_rename_caps_length() {
        let mut data = HighScoreData::default();
        data.record(Difficulty::Easy, entry(1, 100), 5);
        data.rename(1, "ABCDEFGHIJ");
        assert_eq!(data.easy[0].name, "ABCDEF");
    }

    #[test]
    fn test_schema_version_defaults_when_missing() {
        let data: HighScoreData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.schema_version, SCHEMA_VERSION);
        assert!(data.easy.is_empty());
    }
}
