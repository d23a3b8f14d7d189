use serde::{Deserialize, Serialize};

use crate::script::{Script, ScriptLine};

/// Number of script lines visible at once.
pub const WINDOW_SIZE: usize = 5;

/// Light / dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Transient, UI-owned state: where the window starts and how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub cursor: usize,
    pub theme: Theme,
}

/// 1-based line range currently on screen, for status bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

/// Window controller: the loaded script plus the clamped cursor into it.
///
/// Invariant: `0 <= cursor <= max_cursor()` after every public method.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    script: Script,
    state: ViewState,
}

impl Viewer {
    pub fn new(theme: Theme) -> Self {
        Self {
            script: Script::empty(),
            state: ViewState { cursor: 0, theme },
        }
    }

    pub fn with_script(script: Script, theme: Theme) -> Self {
        let mut viewer = Self::new(theme);
        viewer.replace_script(script);
        viewer
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    /// Install a freshly loaded script. The cursor goes back to the top.
    pub fn replace_script(&mut self, script: Script) {
        self.script = script;
        self.state.cursor = 0;
    }

    /// Largest valid cursor. Scripts shorter than the window pin it at 0.
    pub fn max_cursor(&self) -> usize {
        self.script.len().saturating_sub(WINDOW_SIZE)
    }

    /// Move the window down one line. No-op at the bottom.
    pub fn advance(&mut self) {
        if self.state.cursor < self.max_cursor() {
            self.state.cursor += 1;
        }
    }

    /// Move the window up one line. No-op at the top.
    pub fn retreat(&mut self) {
        if self.state.cursor > 0 {
            self.state.cursor -= 1;
        }
    }

    pub fn page_down(&mut self) {
        self.set_cursor(self.state.cursor.saturating_add(WINDOW_SIZE));
    }

    pub fn page_up(&mut self) {
        self.set_cursor(self.state.cursor.saturating_sub(WINDOW_SIZE));
    }

    pub fn jump_to_start(&mut self) {
        self.state.cursor = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.state.cursor = self.max_cursor();
    }

    /// Set the cursor, clamped into `[0, max_cursor()]`.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.state.cursor = cursor.min(self.max_cursor());
    }

    /// Lines currently on screen: `script[cursor .. cursor + WINDOW_SIZE]`.
    pub fn visible_window(&self) -> &[ScriptLine] {
        self.script.window(self.state.cursor, WINDOW_SIZE)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }

    /// `None` while the script is empty.
    pub fn position(&self) -> Option<Position> {
        let shown = self.visible_window().len();
        if shown == 0 {
            return None;
        }
        Some(Position {
            first: self.state.cursor + 1,
            last: self.state.cursor + shown,
            total: self.script.len(),
        })
    }

    pub fn at_start(&self) -> bool {
        self.state.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.state.cursor >= self.max_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_of(n: usize) -> Script {
        Script::new(
            (0..n)
                .map(|i| ScriptLine::dialogue("A", format!("line {}", i)))
                .collect(),
        )
    }

    #[test]
    fn defaults() {
        let viewer = Viewer::default();
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.theme(), Theme::Light);
        assert!(viewer.visible_window().is_empty());
        assert_eq!(viewer.position(), None);
    }

    #[test]
    fn short_script_pins_cursor() {
        // 3 lines: window never moves, all three always visible
        let mut viewer = Viewer::with_script(script_of(3), Theme::Light);
        for _ in 0..4 {
            viewer.advance();
            assert_eq!(viewer.cursor(), 0);
        }
        viewer.retreat();
        viewer.page_down();
        viewer.jump_to_end();
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.visible_window(), script_of(3).lines());
    }

    #[test]
    fn advance_stops_at_max_cursor() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        assert_eq!(viewer.max_cursor(), 7);
        for _ in 0..10 {
            viewer.advance();
        }
        assert_eq!(viewer.cursor(), 7);
        assert_eq!(viewer.visible_window(), &script_of(12).lines()[7..12]);

        // No overshoot is remembered: one retreat moves back immediately
        viewer.retreat();
        assert_eq!(viewer.cursor(), 6);
    }

    #[test]
    fn retreat_at_zero_is_noop() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        for _ in 0..3 {
            viewer.retreat();
        }
        assert_eq!(viewer.cursor(), 0);
        viewer.advance();
        assert_eq!(viewer.cursor(), 1);
    }

    #[test]
    fn exactly_window_sized_script() {
        let mut viewer = Viewer::with_script(script_of(WINDOW_SIZE), Theme::Light);
        viewer.advance();
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.visible_window().len(), WINDOW_SIZE);
    }

    #[test]
    fn paging_clamps() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        viewer.page_down();
        assert_eq!(viewer.cursor(), 5);
        viewer.page_down();
        assert_eq!(viewer.cursor(), 7);
        viewer.page_up();
        assert_eq!(viewer.cursor(), 2);
        viewer.page_up();
        assert_eq!(viewer.cursor(), 0);
    }

    #[test]
    fn jumps() {
        let mut viewer = Viewer::with_script(script_of(20), Theme::Light);
        viewer.jump_to_end();
        assert_eq!(viewer.cursor(), 15);
        assert!(viewer.at_end());
        viewer.jump_to_start();
        assert!(viewer.at_start());
    }

    #[test]
    fn replace_script_resets_cursor() {
        let mut viewer = Viewer::with_script(script_of(20), Theme::Dark);
        viewer.jump_to_end();
        viewer.replace_script(script_of(8));
        assert_eq!(viewer.cursor(), 0);
        assert_eq!(viewer.max_cursor(), 3);
        // Theme survives a reload
        assert_eq!(viewer.theme(), Theme::Dark);
    }

    #[test]
    fn set_cursor_clamps() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        viewer.set_cursor(100);
        assert_eq!(viewer.cursor(), 7);
        viewer.set_cursor(3);
        assert_eq!(viewer.cursor(), 3);
    }

    #[test]
    fn position_reports_one_based_range() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        viewer.advance();
        assert_eq!(
            viewer.position(),
            Some(Position { first: 2, last: 6, total: 12 })
        );
        let short = Viewer::with_script(script_of(2), Theme::Light);
        assert_eq!(
            short.position(),
            Some(Position { first: 1, last: 2, total: 2 })
        );
    }

    #[test]
    fn theme_toggle_is_two_cycle() {
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);

        let mut viewer = Viewer::default();
        viewer.toggle_theme();
        assert_eq!(viewer.theme(), Theme::Dark);
        viewer.toggle_theme();
        assert_eq!(viewer.theme(), Theme::Light);
    }

    #[test]
    fn set_theme_leaves_cursor_alone() {
        let mut viewer = Viewer::with_script(script_of(12), Theme::Light);
        viewer.advance();
        viewer.set_theme(Theme::Dark);
        assert_eq!(viewer.cursor(), 1);
        assert_eq!(viewer.theme(), Theme::Dark);
    }

    #[test]
    fn theme_parse() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" Light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn theme_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let t: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(t, Theme::Light);
    }
}
