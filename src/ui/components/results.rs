use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::corpus::Difficulty;
use crate::session::result::RoundResult;
use crate::store::schema::HighScoreEntry;
use crate::ui::theme::Theme;

/// Post-round summary: final metrics plus the high-score table for the
/// difficulty just played.
pub struct ResultsScreen<'a> {
    result: &'a RoundResult,
    entries: &'a [HighScoreEntry],
    difficulty: Difficulty,
    /// This round's entry in the table, if it made the cut.
    current_entry_id: Option<i64>,
    /// Live name for the current entry while the player edits it.
    edited_name: &'a str,
    theme: &'a Theme,
}

impl<'a> ResultsScreen<'a> {
    pub fn new(
        result: &'a RoundResult,
        entries: &'a [HighScoreEntry],
        difficulty: Difficulty,
        current_entry_id: Option<i64>,
        edited_name: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            entries,
            difficulty,
            current_entry_id,
            edited_name,
            theme,
        }
    }
}

fn accuracy_text(accuracy: Option<f64>) -> String {
    match accuracy {
        Some(pct) => format!("{pct:.1}%"),
        None => "\u{2014}".to_string(),
    }
}

impl Widget for ResultsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;

        let block = Block::bordered()
            .title(format!(" round complete \u{00b7} {} ", self.difficulty.label()))
            .title_style(Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label = Style::default().fg(colors.text_pending());
        let value = Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  score  ", label),
                Span::styled(
                    format!("{:.0}", result.score),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("    wpm  ", label),
                Span::styled(result.wpm.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("    acc  ", label),
                Span::styled(accuracy_text(result.accuracy), value),
                Span::styled(
                    format!("  (raw {:.1}%)", result.raw_accuracy),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("   time  ", label),
                Span::styled(format!("{:.1}s", result.elapsed_secs), value),
            ]),
        ];

        if result.has_uncorrected_errors() {
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} uncorrected error{} left standing",
                    result.uncorrected_errors,
                    if result.uncorrected_errors == 1 { "" } else { "s" }
                ),
                Style::default().fg(colors.warning()),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  high scores",
            Style::default().fg(colors.header_fg()).add_modifier(Modifier::BOLD),
        )));

        if self.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "  no scores yet",
                Style::default().fg(colors.text_pending()),
            )));
        }

        for (rank, entry) in self.entries.iter().enumerate() {
            let is_current = self.current_entry_id == Some(entry.id);
            let name = if is_current {
                self.edited_name
            } else {
                entry.name.as_str()
            };
            let row = format!(
                "  {:>2}. {:<6} {:>6}  {:>3} wpm  {:>3}%",
                rank + 1,
                name,
                entry.score,
                entry.wpm,
                entry.accuracy,
            );
            let style = if is_current {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(row, style)));
        }

        lines.push(Line::default());
        let hint = if self.current_entry_id.is_some() {
            "  type your name \u{00b7} enter for next round \u{00b7} tab difficulty \u{00b7} ctrl-c quit"
        } else {
            "  enter for next round \u{00b7} tab difficulty \u{00b7} ctrl-c quit"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.text_pending()),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
