// scriptview - terminal viewer for JSON dialogue scripts

mod exit_codes;
mod logging;
mod plain;
mod tui;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use scriptview_config::settings::Settings;
use scriptview_core::{Theme, Viewer};
use scriptview_io::{LoadError, ScriptLoader, ScriptSource};

use exit_codes::{load_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

/// Source used when neither the command line nor the settings name one.
const DEFAULT_SOURCE: &str = "script.json";

#[derive(Parser)]
#[command(name = "scriptview")]
#[command(about = "Scroll through a JSON dialogue script, five lines at a time")]
#[command(version)]
#[command(after_help = "\
Examples:
  scriptview TK8.json
  scriptview https://example.com/scripts/TK8.json --theme dark
  scriptview TK8.json --plain
  scriptview TK8.json --plain --from 40

Keys: Up/Down or wheel to scroll, t toggles dark mode, r reloads, ? help, q quits.")]
struct Cli {
    /// Script to open: http(s) URL, file:// URL or path
    /// [default: "script.source" from settings, then ./script.json]
    source: Option<String>,

    /// Theme at startup (overrides "theme.initial" from settings)
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Print the script to stdout instead of opening the viewer
    #[arg(long)]
    plain: bool,

    /// With --plain, print only the five-line window starting at LINE (1-based)
    #[arg(long, value_name = "LINE", requires = "plain")]
    from: Option<usize>,

    /// Diagnostics log file (overrides "log.file" from settings)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Settings file [default: <config dir>/scriptview/settings.json]
    #[arg(long, value_name = "PATH", env = "SCRIPTVIEW_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let (settings, settings_error) = match Settings::load_at(&config_path) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| settings.effective_log_file());
    if !logging::init(&log_file) {
        eprintln!(
            "warning: cannot write log file {}; diagnostics disabled",
            log_file.display()
        );
    }
    if let Some(e) = settings_error {
        log::warn!("Error in {}: {}; using default settings", config_path.display(), e);
    }

    let source_text = cli
        .source
        .clone()
        .or_else(|| settings.source.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let source = ScriptSource::parse(&source_text).map_err(|e| {
        CliError::usage(e).with_hint("pass an http(s) URL, a file:// URL, or a path")
    })?;
    let theme = cli.theme.map(Theme::from).unwrap_or(settings.initial_theme);

    log::info!(
        "scriptview {} starting: source={} theme={}",
        env!("CARGO_PKG_VERSION"),
        source,
        theme.name()
    );

    let loader = ScriptLoader::new().map_err(CliError::load)?;

    if cli.plain {
        return cmd_plain(&loader, &source, theme, cli.from);
    }

    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        return Err(CliError::usage("the interactive viewer needs a terminal")
            .with_hint("use --plain to print the script instead"));
    }

    tui::run(Viewer::new(theme), source, loader).map_err(CliError::error)
}

fn cmd_plain(
    loader: &ScriptLoader,
    source: &ScriptSource,
    theme: Theme,
    from: Option<usize>,
) -> Result<(), CliError> {
    let script = loader.load(source).map_err(|e| {
        log::error!("load failed ({}) for {}: {}", e.kind(), source, e);
        CliError::load(e)
    })?;
    log::info!("loaded {} lines from {}", script.len(), source);

    let mut viewer = Viewer::with_script(script, theme);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let written = match from {
        Some(line) => {
            viewer.set_cursor(line.saturating_sub(1));
            plain::print_window(&viewer, &mut out)
        }
        None => plain::print_script(&viewer, &mut out),
    };

    match written.and_then(|()| out.flush()) {
        Ok(()) => Ok(()),
        // Reader went away (`scriptview --plain | head`)
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(CliError::error(format!("failed to write output: {}", e))),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a load failure with the matching exit code.
    pub fn load(err: LoadError) -> Self {
        let code = load_exit_code(&err);
        let hint = match &err {
            LoadError::Network(_) => Some("check the URL and your network connection".to_string()),
            LoadError::Http(404, _) => Some("no script at that URL; check the path".to_string()),
            LoadError::Parse(_) => {
                Some("a script is a JSON array of objects with a \"text\" field".to_string())
            }
            LoadError::Io(_) => Some("check that the file exists and is readable".to_string()),
            LoadError::Http(..) => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exit_codes::{EXIT_LOAD_HTTP, EXIT_LOAD_IO, EXIT_LOAD_PARSE};

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn from_requires_plain() {
        assert!(Cli::try_parse_from(["scriptview", "a.json", "--from", "3"]).is_err());
        let cli = Cli::try_parse_from(["scriptview", "a.json", "--plain", "--from", "3"]).unwrap();
        assert_eq!(cli.from, Some(3));
    }

    #[test]
    fn theme_flag() {
        let cli = Cli::try_parse_from(["scriptview", "--theme", "dark"]).unwrap();
        assert_eq!(cli.theme.map(Theme::from), Some(Theme::Dark));
        assert!(Cli::try_parse_from(["scriptview", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn load_errors_carry_codes_and_hints() {
        let e = CliError::load(LoadError::Http(404, String::new()));
        assert_eq!(e.code, EXIT_LOAD_HTTP);
        assert_eq!(e.message, "HTTP 404");
        assert!(e.hint.is_some());

        assert!(CliError::load(LoadError::Http(500, "boom".into())).hint.is_none());
        assert_eq!(CliError::load(LoadError::Parse("x".into())).code, EXIT_LOAD_PARSE);
        assert_eq!(CliError::load(LoadError::Io("x".into())).code, EXIT_LOAD_IO);
    }
}
