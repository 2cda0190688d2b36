pub mod energy;
pub mod game;
pub mod power;
pub mod scoring;

pub use game::{EngineEvent, Game};
