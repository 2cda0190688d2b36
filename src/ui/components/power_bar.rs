use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::engine::power;
use crate::ui::theme::Theme;

/// Four-segment power gauge with the current multiplier in the title.
pub struct PowerBar<'a> {
    progress: f64,
    multiplier: u32,
    theme: &'a Theme,
}

impl<'a> PowerBar<'a> {
    pub fn new(progress: f64, multiplier: u32, theme: &'a Theme) -> Self {
        Self {
            progress,
            multiplier,
            theme,
        }
    }
}

impl Widget for PowerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" power  x{} ", self.multiplier))
            .title_style(
                Style::default()
                    .fg(colors.power_tier((self.multiplier - 1) as usize))
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let segments = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        for (tier_idx, segment) in segments.iter().enumerate() {
            // Leave a one-cell gap between segments
            let width = segment.width.saturating_sub(1);
            if width == 0 {
                continue;
            }
            let fill = power::tier_fill(self.progress, tier_idx) / 100.0;
            let filled_width = (fill * width as f64).round() as u16;

            for x in segment.x..segment.x + width {
                let style = if x < segment.x + filled_width {
                    Style::default().bg(colors.power_tier(tier_idx))
                } else {
                    Style::default().bg(colors.bar_empty())
                };
                buf[(x, segment.y)].set_style(style);
            }
        }
    }
}
