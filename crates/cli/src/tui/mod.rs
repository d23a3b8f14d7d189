mod input;
mod terminal;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
    Frame, Terminal,
};

use scriptview_config::theme::ThemeColors;
use scriptview_core::{ScriptLine, Theme, Viewer};
use scriptview_io::{BackgroundLoader, LoadOutcome, ScriptLoader, ScriptSource};

use crate::util;
use input::Action;
use terminal::TerminalSession;

/// Heading shown in the title bar.
const TITLE: &str = "Scenariusz";

struct TuiApp {
    viewer: Viewer,
    source: ScriptSource,
    loader: BackgroundLoader,
    /// Load failure waiting to be acknowledged. Blocks all other input.
    alert: Option<String>,
    show_help: bool,
    should_quit: bool,
}

impl TuiApp {
    fn new(viewer: Viewer, source: ScriptSource, loader: ScriptLoader) -> Self {
        Self {
            viewer,
            source,
            loader: BackgroundLoader::new(loader),
            alert: None,
            show_help: false,
            should_quit: false,
        }
    }

    fn start_load(&mut self) {
        self.loader.spawn(self.source.clone());
    }

    /// Apply every load that finished since the last tick.
    fn poll_loads(&mut self) {
        while let Some(outcome) = self.loader.poll() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(script) => {
                let (dialogue, technical, music) = script.kind_counts();
                log::info!(
                    "loaded {} lines from {} ({} dialogue, {} technical, {} music)",
                    script.len(),
                    outcome.source,
                    dialogue,
                    technical,
                    music
                );
                self.viewer.replace_script(script);
            }
            Err(err) => {
                log::error!("load failed ({}) for {}: {}", err.kind(), outcome.source, err);
                self.alert = Some(format!(
                    "Failed to load {}: {}",
                    outcome.source.file_name(),
                    err
                ));
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                if self.alert.is_some() || self.show_help {
                    return;
                }
                if let Some(action) = input::mouse_action(mouse) {
                    self.apply(action);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Any key dismisses the notification, then the help overlay
        if self.alert.take().is_some() {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        if let Some(action) = input::key_action(key) {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Retreat => self.viewer.retreat(),
            Action::Advance => self.viewer.advance(),
            Action::PageUp => self.viewer.page_up(),
            Action::PageDown => self.viewer.page_down(),
            Action::Top => self.viewer.jump_to_start(),
            Action::Bottom => self.viewer.jump_to_end(),
            Action::ToggleTheme => {
                self.viewer.toggle_theme();
                log::debug!("theme: {}", self.viewer.theme().name());
            }
            Action::Reload => self.start_load(),
            Action::Help => self.show_help = true,
            Action::Quit => self.should_quit = true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.viewer.state();
        let colors = ThemeColors::for_theme(state.theme);

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(rgb(colors.background))
                    .fg(rgb(colors.text)),
            ),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0], state.theme, &colors);
        self.draw_window(frame, chunks[2], &colors);
        self.draw_status(frame, chunks[3], &colors);

        if self.show_help {
            self.draw_help(frame, area, &colors);
        }
        if let Some(message) = &self.alert {
            draw_alert(frame, area, message, &colors);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect, theme: Theme, colors: &ThemeColors) {
        let left = if self.viewer.script().is_empty() {
            format!(" {} | {}", TITLE, self.source.file_name())
        } else {
            format!(
                " {} | {} | {} lines",
                TITLE,
                self.source.file_name(),
                self.viewer.script().len()
            )
        };
        let right = match theme {
            Theme::Light => "t: dark mode ",
            Theme::Dark => "t: light mode ",
        };

        let para = Paragraph::new(Line::from(Span::styled(
            util::spread(&left, right, area.width as usize),
            Style::default()
                .fg(rgb(colors.accent_text))
                .bg(rgb(colors.accent))
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(rgb(colors.accent)));
        frame.render_widget(para, area);
    }

    fn draw_window(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let window = self.viewer.visible_window();
        if window.is_empty() {
            let msg = if self.loader.is_loading() {
                format!("Loading {}...", self.source.file_name())
            } else {
                "No script loaded. Press r to retry.".to_string()
            };
            let para = Paragraph::new(msg)
                .alignment(Alignment::Center)
                .style(Style::default().fg(rgb(colors.text_muted)));
            frame.render_widget(para, area);
            return;
        }

        let width = card_width(area.width);
        let x = area.x + (area.width - width) / 2;
        let bottom = area.y.saturating_add(area.height);
        let mut y = area.y;

        for line in window {
            if y >= bottom {
                break;
            }
            let (para, height) = line_widget(line, width, colors);
            let height = height.min(bottom - y);
            frame.render_widget(para, Rect::new(x, y, width, height));
            y = y.saturating_add(height).saturating_add(1);
        }
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let mut left = match self.viewer.position() {
            Some(pos) => format!(" Lines {}-{} of {}", pos.first, pos.last, pos.total),
            None if self.loader.is_loading() => " Loading...".to_string(),
            None => " No script".to_string(),
        };
        if self.loader.is_loading() && !self.viewer.script().is_empty() {
            left.push_str("  (reloading)");
        }
        let right = format!("{}?: help ", self.scroll_hint());

        let para = Paragraph::new(Line::from(Span::styled(
            util::spread(&left, &right, area.width as usize),
            Style::default().fg(rgb(colors.text_muted)).bg(rgb(colors.card)),
        )))
        .style(Style::default().bg(rgb(colors.card)));
        frame.render_widget(para, area);
    }

    /// Arrows for the directions the window can still move.
    fn scroll_hint(&self) -> &'static str {
        match (self.viewer.at_start(), self.viewer.at_end()) {
            (true, true) => "",
            (true, false) => "Use \u{2193} to scroll  ",
            (false, true) => "Use \u{2191} to scroll  ",
            (false, false) => "Use \u{2191}/\u{2193} to scroll  ",
        }
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect, colors: &ThemeColors) {
        let help_lines = [
            "",
            "  Navigation",
            "  ----------",
            "  Up / k / wheel    Previous line",
            "  Down / j / wheel  Next line",
            "  PgUp / PgDn       Previous/next 5 lines",
            "  Home / g          First line",
            "  End  / G          Last lines",
            "",
            "  General",
            "  -------",
            "  t                 Toggle dark mode",
            "  r                 Reload script",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
        ];
        let popup = centered(area, 46, help_lines.len() as u16 + 2);

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(rgb(colors.text)))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(colors.accent)))
            .title(" Keybindings ")
            .title_style(
                Style::default()
                    .fg(rgb(colors.accent))
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(rgb(colors.card)));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn draw_alert(frame: &mut Frame, area: Rect, message: &str, colors: &ThemeColors) {
    let width = 60.min(area.width.saturating_sub(4)).max(20);
    let text = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(rgb(colors.text)))),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(rgb(colors.text_muted)),
        )),
    ];
    let para = Paragraph::new(text).wrap(Wrap { trim: true });
    let height = line_height(&para, width.saturating_sub(4)) + 2;
    let popup = centered(area, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(rgb(colors.error)))
        .title(" Error ")
        .title_style(
            Style::default()
                .fg(rgb(colors.error))
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(rgb(colors.card)));

    frame.render_widget(Clear, popup);
    frame.render_widget(para.block(block), popup);
}

/// Widget for one script line and the rows it needs at `width`.
fn line_widget(line: &ScriptLine, width: u16, colors: &ThemeColors) -> (Paragraph<'static>, u16) {
    match line {
        ScriptLine::Dialogue { .. } => {
            let mut text = Vec::with_capacity(2);
            if let Some(speaker) = line.speaker() {
                text.push(Line::from(Span::styled(
                    format!("{}:", speaker),
                    Style::default()
                        .fg(rgb(colors.speaker))
                        .add_modifier(Modifier::BOLD),
                )));
            }
            text.push(Line::from(Span::styled(
                line.text().to_string(),
                Style::default().fg(rgb(colors.text)),
            )));

            let para = Paragraph::new(text).wrap(Wrap { trim: true });
            // Border and one column of padding on each side
            let height = line_height(&para, width.saturating_sub(4)) + 2;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(rgb(colors.card_border)))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(rgb(colors.card)));
            (para.block(block), height)
        }
        ScriptLine::Technical { text } | ScriptLine::Music { text } => {
            let color = if matches!(line, ScriptLine::Technical { .. }) {
                colors.technical
            } else {
                colors.music
            };
            let para = Paragraph::new(Line::from(Span::styled(
                text.clone(),
                Style::default()
                    .fg(rgb(color))
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            )))
            .alignment(Alignment::Right)
            .wrap(Wrap { trim: true });
            let height = line_height(&para, width);
            (para, height)
        }
    }
}

fn line_height(para: &Paragraph, width: u16) -> u16 {
    let rows = para.line_count(width.max(1)).max(1);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Cards take 80% of the width, but never less than 20 columns.
fn card_width(available: u16) -> u16 {
    let width = (u32::from(available) * 8 / 10) as u16;
    width.max(20).min(available)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn rgb(c: scriptview_config::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Run the interactive viewer. The first load starts immediately.
pub fn run(viewer: Viewer, source: ScriptSource, loader: ScriptLoader) -> Result<(), String> {
    let mut app = TuiApp::new(viewer, source, loader);
    app.start_load();
    run_app(app)
}

fn run_app(mut app: TuiApp) -> Result<(), String> {
    let _session = TerminalSession::enter()?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    loop {
        app.poll_loads();

        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            let event = event::read().map_err(|e| format!("event read error: {}", e))?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
