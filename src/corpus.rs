use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/samples/"]
struct SampleAssets;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("missing embedded corpus {0}")]
    Missing(&'static str),
    #[error("corpus {0} is not valid JSON")]
    Parse(&'static str, #[source] serde_json::Error),
    #[error("corpus {0} has no usable samples")]
    Empty(&'static str),
}

#[derive(Deserialize)]
struct SampleEntry {
    text: String,
}

/// Difficulty-keyed pool of sample texts, loaded once from the embedded
/// JSON corpora. The engine treats the texts as opaque character data.
pub struct SampleCorpus {
    easy: Vec<String>,
    hard: Vec<String>,
    rng: SmallRng,
}

impl SampleCorpus {
    pub fn load() -> Result<Self, CorpusError> {
        Ok(Self {
            easy: load_pool("easy.json")?,
            hard: load_pool("hard.json")?,
            rng: SmallRng::from_entropy(),
        })
    }

    #[cfg(test)]
    fn with_seed(seed: u64) -> Result<Self, CorpusError> {
        Ok(Self {
            easy: load_pool("easy.json")?,
            hard: load_pool("hard.json")?,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Random sample for the given difficulty.
    pub fn pick(&mut self, difficulty: Difficulty) -> &str {
        let pool = match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Hard => &self.hard,
        };
        let idx = self.rng.gen_range(0..pool.len());
        &pool[idx]
    }
}

fn load_pool(name: &'static str) -> Result<Vec<String>, CorpusError> {
    let file = SampleAssets::get(name).ok_or(CorpusError::Missing(name))?;
    let entries: Vec<SampleEntry> =
        serde_json::from_slice(&file.data).map_err(|e| CorpusError::Parse(name, e))?;
    let pool: Vec<String> = entries
        .into_iter()
        .map(|e| e.text)
        .filter(|t| !t.is_empty())
        .collect();
    if pool.is_empty() {
        return Err(CorpusError::Empty(name));
    }
    Ok(pool)
}
