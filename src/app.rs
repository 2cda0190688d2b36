use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::Config;
use crate::corpus::SampleCorpus;
use crate::engine::{EngineEvent, Game};
use crate::session::input::InputAction;
use crate::session::result::RoundResult;
use crate::store::json_store::JsonStore;
use crate::store::schema::{HighScoreData, HighScoreEntry, MAX_NAME_LEN};
use crate::ui::theme::Theme;

/// How long the score panel stays in its error state after a miss.
const ERROR_FLASH_MS: u64 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Game,
    Results,
}

pub struct App {
    pub screen: AppScreen,
    pub game: Game,
    pub config: Config,
    pub theme: &'static Theme,
    pub corpus: SampleCorpus,
    pub store: Option<JsonStore>,
    pub high_scores: HighScoreData,
    pub last_result: Option<RoundResult>,
    /// Id of this round's entry in the high-score table, if it made it.
    pub current_entry_id: Option<i64>,
    /// Name typed on the results screen; empty means keep the default.
    pub name_input: String,
    pub error_flash_until: Option<Instant>,
    pub should_quit: bool,
    last_tick: Instant,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let corpus = SampleCorpus::load()?;
        let store = JsonStore::new().ok();
        let high_scores = store
            .as_ref()
            .map(|s| s.load_high_scores())
            .unwrap_or_default();

        let mut app = Self {
            screen: AppScreen::Game,
            game: Game::new(),
            config,
            theme,
            corpus,
            store,
            high_scores,
            last_result: None,
            current_entry_id: None,
            name_input: String::new(),
            error_flash_until: None,
            should_quit: false,
            last_tick: Instant::now(),
        };
        app.start_round();
        Ok(app)
    }

    /// Begin a fresh round on a newly picked sample. Cancels everything
    /// from the previous round, including any pending power decay.
    pub fn start_round(&mut self) {
        let text = self.corpus.pick(self.config.difficulty()).to_string();
        self.game.reset();
        self.game.load_sample(&text);
        self.screen = AppScreen::Game;
        self.last_result = None;
        self.current_entry_id = None;
        self.name_input.clear();
        self.error_flash_until = None;
    }

    pub fn toggle_difficulty(&mut self) {
        self.commit_name();
        self.config.set_difficulty(self.config.difficulty().toggled());
        let _ = self.config.save();
        self.start_round();
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match self.screen {
            AppScreen::Game => match action {
                InputAction::Type(ch) => {
                    let events = self.game.type_char(ch);
                    self.consume_events(events);
                }
                InputAction::Backspace { whole_word } => {
                    let events = self.game.backspace(whole_word);
                    self.consume_events(events);
                }
                InputAction::Reset => self.start_round(),
                InputAction::ToggleDifficulty => self.toggle_difficulty(),
            },
            AppScreen::Results => match action {
                InputAction::Type(ch) => self.edit_name(ch),
                InputAction::Backspace { .. } => {
                    self.name_input.pop();
                }
                InputAction::Reset => {
                    self.commit_name();
                    self.start_round();
                }
                InputAction::ToggleDifficulty => self.toggle_difficulty(),
            },
        }
    }

    fn consume_events(&mut self, events: Vec<EngineEvent>) {
        for event in events {
            match event {
                EngineEvent::Keystroke { correct: false, .. } => {
                    self.error_flash_until =
                        Some(Instant::now() + Duration::from_millis(ERROR_FLASH_MS));
                    self.chime();
                }
                EngineEvent::Completed(result) => self.finish_round(result),
                _ => {}
            }
        }
    }

    fn finish_round(&mut self, result: RoundResult) {
        let entry = HighScoreEntry::new(
            result.score.round() as u32,
            result.wpm,
            result.accuracy.unwrap_or(0.0).floor() as u32,
        );
        self.current_entry_id = self.high_scores.record(
            self.config.difficulty(),
            entry,
            self.config.high_score_entries,
        );
        self.save_high_scores();

        self.last_result = Some(result);
        self.screen = AppScreen::Results;
    }

    /// Advance the decay clock by measured wall time. Called on every
    /// timer tick from the event loop.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        let delta_ms = now.duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;
        self.game.tick(delta_ms);

        if self.error_flash_until.is_some_and(|t| now >= t) {
            self.error_flash_until = None;
        }
    }

    pub fn error_flash_active(&self) -> bool {
        self.error_flash_until
            .is_some_and(|t| Instant::now() < t)
    }

    /// Name shown for this round's high-score entry while editing.
    pub fn display_name(&self) -> &str {
        if self.name_input.is_empty() {
            crate::store::schema::DEFAULT_NAME
        } else {
            &self.name_input
        }
    }

    /// Leave the app, keeping any name typed on the results screen.
    pub fn quit(&mut self) {
        self.commit_name();
        self.should_quit = true;
    }

    fn edit_name(&mut self, ch: char) {
        if self.current_entry_id.is_none() {
            return;
        }
        if ch.is_alphanumeric() && self.name_input.chars().count() < MAX_NAME_LEN {
            // Uppercasing can expand one char into several ('ß' -> "SS")
            self.name_input.extend(ch.to_uppercase());
            if self.name_input.chars().count() > MAX_NAME_LEN {
                self.name_input = self.name_input.chars().take(MAX_NAME_LEN).collect();
            }
        }
    }

    fn commit_name(&mut self) {
        if let Some(id) = self.current_entry_id
            && !self.name_input.is_empty()
        {
            self.high_scores.rename(id, &self.name_input);
            self.save_high_scores();
        }
    }

    fn save_high_scores(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_high_scores(&self.high_scores);
        }
    }

    /// Terminal bell on a miss, when sound is enabled.
    fn chime(&self) {
        if self.config.sound_enabled {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Difficulty;

    /// A results-screen app with no backing store, so nothing persists.
    fn results_app() -> App {
        let mut app = App {
            screen: AppScreen::Results,
            game: Game::new(),
            config: Config::default(),
            theme: Box::leak(Box::new(Theme::default())),
            corpus: SampleCorpus::load().unwrap(),
            store: None,
            high_scores: HighScoreData::default(),
            last_result: None,
            current_entry_id: None,
            name_input: String::new(),
            error_flash_until: None,
            should_quit: false,
            last_tick: Instant::now(),
        };
        app.current_entry_id =
            app.high_scores
                .record(Difficulty::Easy, HighScoreEntry::new(900, 55, 95), 5);
        app
    }

    #[test]
    fn test_quit_commits_pending_name() {
        let mut app = results_app();
        for ch in "zoe".chars() {
            app.handle_action(InputAction::Type(ch));
        }
        app.quit();

        assert!(app.should_quit);
        assert_eq!(app.high_scores.easy[0].name, "ZOE");
    }

    #[test]
    fn test_quit_without_edits_keeps_default_name() {
        let mut app = results_app();
        app.quit();
        assert_eq!(
            app.high_scores.easy[0].name,
            crate::store::schema::DEFAULT_NAME
        );
    }

    #[test]
    fn test_name_edit_uppercases_and_caps_length() {
        let mut app = results_app();
        for ch in "maxwell9".chars() {
            app.handle_action(InputAction::Type(ch));
        }
        assert_eq!(app.display_name(), "MAXWEL");
    }

    #[test]
    fn test_multi_char_uppercase_cannot_overshoot_cap() {
        let mut app = results_app();
        for ch in "wei\u{df}".chars() {
            app.handle_action(InputAction::Type(ch));
        }
        // 'ß' uppercases to "SS"; the cap still holds
        assert_eq!(app.display_name(), "WEISS");
        app.handle_action(InputAction::Type('\u{df}'));
        assert_eq!(app.display_name(), "WEISSS");
        assert_eq!(app.name_input.chars().count(), MAX_NAME_LEN);
    }
}
