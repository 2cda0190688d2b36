mod app;
mod config;
mod corpus;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use session::input;
use ui::components::power_bar::PowerBar;
use ui::components::results::ResultsScreen;
use ui::components::score_panel::ScorePanel;
use ui::components::typing_area::TypingArea;
use ui::layout::GameLayout;

#[derive(Parser)]
#[command(name = "typestorm", version, about = "Arcade typing game for the terminal")]
struct Cli {
    #[arg(short, long, help = "Difficulty (easy, hard)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Disable the error chime")]
    mute: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new()?;

    if let Some(name) = cli.difficulty
        && let Some(difficulty) = corpus::Difficulty::parse(&name)
    {
        app.config.set_difficulty(difficulty);
        app.start_round();
    }
    if let Some(theme_name) = cli.theme
        && let Some(theme) = ui::theme::Theme::load(&theme_name)
    {
        app.theme = Box::leak(Box::new(theme));
    }
    if cli.mute {
        app.config.sound_enabled = false;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if let Some(action) = input::classify(&key) {
        app.handle_action(action);
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Game => render_game(frame, app),
        AppScreen::Results => render_results(frame, app),
    }
}

fn render_game(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = GameLayout::new(frame.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " typestorm ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.config.difficulty().label()),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let session = app.game.session();
    let panel = ScorePanel::new(
        session.score(),
        session.streak(),
        session.energy(),
        app.error_flash_active(),
        app.theme,
    );
    frame.render_widget(panel, layout.score);

    let typing = TypingArea::new(session, app.theme);
    frame.render_widget(typing, layout.text);

    let power = PowerBar::new(app.game.power().progress(), app.game.multiplier(), app.theme);
    frame.render_widget(power, layout.power);

    let footer = Paragraph::new(Line::from(Span::styled(
        " enter/esc restart \u{00b7} tab difficulty \u{00b7} ctrl-bksp delete word \u{00b7} ctrl-c quit ",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 80, frame.area());
        let screen = ResultsScreen::new(
            result,
            app.high_scores.table(app.config.difficulty()),
            app.config.difficulty(),
            app.current_entry_id,
            app.display_name(),
            app.theme,
        );
        frame.render_widget(screen, centered);
    }
}
