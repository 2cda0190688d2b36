use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::state::Session;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

/// Visible stand-in for a whitespace char, so a miss on (or with) one is
/// never an invisible cell.
fn whitespace_marker(ch: char) -> Option<&'static str> {
    match ch {
        ' ' => Some("\u{2423}"),   // ␣
        '\t' => Some("\u{2192}"),  // →
        '\n' => Some("\u{23ce}"),  // ⏎
        _ => None,
    }
}

/// Display string for the sample char at `idx`, given what was typed there.
fn display_for(target: char, typed: Option<char>) -> String {
    match typed {
        // A miss shows what the player actually pressed, except that
        // whitespace on either side gets its marker.
        Some(actual) => {
            if let Some(marker) = whitespace_marker(target) {
                marker.to_string()
            } else if let Some(marker) = whitespace_marker(actual) {
                marker.to_string()
            } else {
                actual.to_string()
            }
        }
        None => {
            if target == '\n' {
                "\u{23ce}".to_string()
            } else {
                target.to_string()
            }
        }
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let cursor = self.session.cursor();
        let typed = self.session.typed();

        // Group spans into lines, splitting on sample newlines
        let mut lines: Vec<Vec<Span>> = vec![Vec::new()];

        for (idx, &target) in self.session.sample().iter().enumerate() {
            let (style, display) = if idx < cursor {
                let tc = typed[idx];
                if tc.correct {
                    (
                        Style::default().fg(colors.text_correct()),
                        display_for(target, None),
                    )
                } else {
                    (
                        Style::default()
                            .fg(colors.text_incorrect())
                            .bg(colors.text_incorrect_bg())
                            .add_modifier(Modifier::UNDERLINED),
                        display_for(target, Some(tc.ch)),
                    )
                }
            } else if idx == cursor {
                (
                    Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                    display_for(target, None),
                )
            } else {
                (
                    Style::default().fg(colors.text_pending()),
                    display_for(target, None),
                )
            };

            if let Some(last) = lines.last_mut() {
                last.push(Span::styled(display, style));
            }
            if target == '\n' {
                lines.push(Vec::new());
            }
        }

        let ratatui_lines: Vec<Line> = lines.into_iter().map(Line::from).collect();

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(ratatui_lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
