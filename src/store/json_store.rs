use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::store::schema::HighScoreData;

const HIGH_SCORES_FILE: &str = "high_scores.json";

/// High-score persistence in the platform data dir. Writes go through a
/// tmp file and rename so a crash never leaves a torn table behind.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typestorm");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(HIGH_SCORES_FILE)
    }

    /// Load the tables; an unreadable or unparsable file yields empty
    /// tables rather than an error (schema mismatch means a fresh start).
    pub fn load_high_scores(&self) -> HighScoreData {
        let path = self.file_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => HighScoreData::default(),
            }
        } else {
            HighScoreData::default()
        }
    }

    pub fn save_high_scores(&self, data: &HighScoreData) -> Result<()> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
