//! Arcade-table lifecycle against a real store directory.

use tempfile::TempDir;

use typestorm::corpus::Difficulty;
use typestorm::store::json_store::JsonStore;
use typestorm::store::schema::{DEFAULT_NAME, HighScoreData, HighScoreEntry};

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap()
}

#[test]
fn record_rename_persist_reload() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut data = HighScoreData::default();
    let entry = HighScoreEntry::new(2500, 71, 96);
    let id = data
        .record(Difficulty::Easy, entry, 5)
        .expect("table had room");
    assert_eq!(data.easy[0].name, DEFAULT_NAME);

    assert!(data.rename(id, "MAX"));
    store.save_high_scores(&data).unwrap();

    let reloaded = store.load_high_scores();
    assert_eq!(reloaded.easy.len(), 1);
    assert_eq!(reloaded.easy[0].name, "MAX");
    assert_eq!(reloaded.easy[0].score, 2500);
    assert!(reloaded.hard.is_empty());
}

#[test]
fn tables_stay_capped_across_reloads() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut data = store.load_high_scores();
    for score in [100, 700, 300, 900, 500, 200, 800] {
        data.record(Difficulty::Hard, HighScoreEntry::new(score, 40, 90), 5);
        store.save_high_scores(&data).unwrap();
        data = store.load_high_scores();
    }

    let scores: Vec<u32> = data.hard.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![900, 800, 700, 500, 300]);
}

#[test]
fn difficulty_tables_are_independent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut data = HighScoreData::default();
    data.record(Difficulty::Easy, HighScoreEntry::new(400, 50, 99), 5);
    data.record(Difficulty::Hard, HighScoreEntry::new(300, 45, 92), 5);
    store.save_high_scores(&data).unwrap();

    let reloaded = store.load_high_scores();
    assert_eq!(reloaded.table(Difficulty::Easy).len(), 1);
    assert_eq!(reloaded.table(Difficulty::Hard).len(), 1);
    assert_eq!(reloaded.table(Difficulty::Easy)[0].score, 400);
    assert_eq!(reloaded.table(Difficulty::Hard)[0].score, 300);
}
