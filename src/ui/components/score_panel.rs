use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// In-round readout: score, streak, and the energy gauge.
pub struct ScorePanel<'a> {
    score: f64,
    streak: u32,
    energy: u8,
    error_flash: bool,
    theme: &'a Theme,
}

impl<'a> ScorePanel<'a> {
    pub fn new(score: f64, streak: u32, energy: u8, error_flash: bool, theme: &'a Theme) -> Self {
        Self {
            score,
            streak,
            energy,
            error_flash,
            theme,
        }
    }
}

impl Widget for ScorePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let score_style = if self.error_flash {
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        };

        let line = Line::from(vec![
            Span::styled(format!(" {:>6.0} ", self.score), score_style),
            Span::styled("pts", Style::default().fg(colors.fg())),
            Span::raw("   "),
            Span::styled(
                format!("{} streak", self.streak),
                Style::default().fg(if self.streak > 0 {
                    colors.success()
                } else {
                    colors.text_pending()
                }),
            ),
        ]);
        Paragraph::new(line).render(chunks[0], buf);

        render_energy_gauge(chunks[1], buf, self.energy, self.error_flash, self.theme);
    }
}

/// Hand-painted 0-100 gauge, tinted toward the error color as it drains.
fn render_energy_gauge(area: Rect, buf: &mut Buffer, energy: u8, error_flash: bool, theme: &Theme) {
    let colors = &theme.colors;
    if area.width < 8 || area.height == 0 {
        return;
    }

    let label = format!("energy {energy:>3}");
    let label_width = label.len() as u16 + 1;
    let bar_width = area.width.saturating_sub(label_width);
    let filled_width = (energy as f64 / 100.0 * bar_width as f64).round() as u16;

    let fill_color = if error_flash || energy < 25 {
        colors.error()
    } else if energy < 60 {
        colors.warning()
    } else {
        colors.energy_bar()
    };

    buf.set_string(area.x, area.y, &label, Style::default().fg(colors.fg()));
    for x in 0..bar_width {
        let style = if x < filled_width {
            Style::default().bg(fill_color)
        } else {
            Style::default().bg(colors.bar_empty())
        };
        buf[(area.x + label_width + x, area.y)].set_style(style);
    }
}
