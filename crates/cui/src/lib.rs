mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::{App, FocusPane};
pub use app::UiLocale;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use itemdex_data::{load_failure_message, LoadOptions, DEFAULT_CONFIG_PATH};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

pub const LANG_ENV: &str = "ITEMDEX_LANG";

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub locale: Option<String>,
    pub config_path: PathBuf,
    pub db_path: Option<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            locale: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            db_path: None,
        }
    }
}

impl LaunchOptions {
    fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::new(self.config_path.clone());
        match self.db_path.as_ref() {
            Some(path) => options.with_db_path(path.clone()),
            None => options,
        }
    }
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let locale = UiLocale::from_opt(options.locale.as_deref());
    // Load fully before touching the terminal so failures print normally.
    let mut app = match App::bootstrap(locale, &options.load_options()) {
        Ok(app) => app,
        Err(err) => {
            log::error!("{err:#}");
            anyhow::bail!(load_failure_message(Some(locale.code())));
        }
    };
    log::info!(
        "browsing {} item(s), locale {}",
        app.catalog.len(),
        locale.code()
    );

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions {
        locale: std::env::var(LANG_ENV).ok(),
        ..LaunchOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    options.locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--config" | "-c" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config_path = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--db" => {
                if let Some(value) = args.get(idx + 1) {
                    options.db_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let typing = app.focus == FocusPane::Keyword && !app.show_help;
                let action = input::map_key(key, typing);
                actions::dispatch(app, action);
            }
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "itemdex browser requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}
