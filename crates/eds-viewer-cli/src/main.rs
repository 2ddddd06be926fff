use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eds_viewer_config::Config;
use eds_viewer_engine::{EdsConfig, Route, extract_path};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::{
    io::{Stdout, stdout},
    path::PathBuf,
};

mod app;
mod render;
mod source;

use app::App;
use render::TextRenderer;
use source::PageSource;

/// Browse an Edge Delivery Services site in the terminal.
#[derive(Debug, Parser)]
#[command(name = "eds-viewer", version)]
struct Cli {
    /// Site path or URL to open (defaults to the home page)
    path: Option<String>,

    /// Read page JSON from a saved file, or a directory of `<path>.json` files
    #[arg(long)]
    file: Option<PathBuf>,

    /// Site origin, overriding the config file
    #[arg(long)]
    site: Option<String>,

    /// HTML-to-JSON service URL, overriding the config file
    #[arg(long)]
    content_url: Option<String>,

    /// Config file to use instead of ~/.config/eds-viewer/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the page as text and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the TUI quiet unless RUST_LOG asks for more
    env_logger::Builder::from_default_env()
        .filter_level(if cli.dump {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = resolve_config(&cli)?;
    let route = cli
        .path
        .as_deref()
        .map(|p| Route::from_path(extract_path(p, &config)))
        .unwrap_or(Route::Home);
    let source = match &cli.file {
        Some(path) => PageSource::local(path),
        None => PageSource::remote()?,
    };

    if cli.dump {
        return dump(&source, &config, &route);
    }

    let mut app = App::new(source, config, route)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EdsConfig> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };

    let config = Config {
        site_url: cli.site.clone().unwrap_or(loaded.site_url),
        content_url: cli.content_url.clone().unwrap_or(loaded.content_url),
    };
    Ok(config.to_eds_config()?)
}

fn dump(source: &PageSource, config: &EdsConfig, route: &Route) -> Result<()> {
    let page = source.load(route, config)?;
    let rendered = TextRenderer::render(&page, config);

    if let Some(title) = page.title() {
        println!("{title}");
        println!("{}", "=".repeat(title.chars().count()));
        println!();
    }
    for line in &rendered.lines {
        println!("{line}");
    }
    if !rendered.links.is_empty() {
        println!();
        println!("Links:");
        for (i, link) in rendered.links.iter().enumerate() {
            println!("  [{}] {} -> {}", i + 1, link.label, link.href);
        }
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_link(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_link(),
                KeyCode::Enter => app.activate_selected_link(),
                KeyCode::Backspace | KeyCode::Char('b') => app.back(),
                KeyCode::Char('r') => app.reload(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(10),
                KeyCode::PageUp => app.scroll_up(10),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[0]);

    // Content panel
    let content_text: Vec<Line> = if app.lines.is_empty() {
        vec![Line::from("This page has no content")]
    } else {
        app.lines
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title.clone()),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[0]);

    // Links panel
    let link_items: Vec<ListItem> = app
        .links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            ListItem::new(vec![
                Line::from(Span::raw(format!("[{}] {}", i + 1, link.label))),
                Line::from(Span::styled(
                    format!("    {}", link.href),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let links = List::new(link_items)
        .block(Block::default().borders(Borders::ALL).title("Links"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(links, chunks[1], &mut app.link_list_state);

    // Status and instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Select link | "),
        Span::raw("Enter: Open | "),
        Span::raw("b: Back | "),
        Span::raw("r: Reload | "),
        Span::raw("PgUp/PgDn: Scroll"),
    ]);
    let status = Line::from(Span::styled(
        app.status.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    f.render_widget(Paragraph::new(vec![status, help_text]), rows[1]);
}
