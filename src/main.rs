mod app;
mod config;
mod error;
mod event;
mod game;
mod ui;

use std::fs::File;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Cli;
use event::{Event, EventHandler};
use game::TICKS_PER_SECOND;

/// Set once the kitty keyboard flags have been pushed, so teardown only pops
/// what it pushed.
static FLAGS_PUSHED: AtomicBool = AtomicBool::new(false);

fn write_restore<W: Write>(out: &mut W, flags_pushed: bool) -> io::Result<()> {
    if flags_pushed {
        queue!(out, PopKeyboardEnhancementFlags)?;
    }
    queue!(out, LeaveAlternateScreen, cursor::Show)?;
    out.flush()
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = write_restore(&mut io::stdout(), FLAGS_PUSHED.swap(false, Ordering::SeqCst));
}

/// Restores the terminal when dropped, including on early `?` returns.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Log to a file; stdout belongs to the TUI. Runs without logs if the file
/// cannot be created.
fn init_logging(cli: &Cli) {
    let path = cli.log_path();
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled: cannot create {}: {}", path.display(), e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let guard = TerminalGuard;
    let releases = supports_keyboard_enhancement().unwrap_or(false);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    if releases {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        FLAGS_PUSHED.store(true, Ordering::SeqCst);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(cli.seed, cli.hold_mode(releases));
    tracing::info!(seed = ?cli.seed, hold = ?app.hold_mode(), "session started");

    let result = run(&mut terminal, &mut app);
    drop(guard);

    match &result {
        Ok(()) => tracing::info!("session ended"),
        Err(e) => tracing::error!(error = %e, "session aborted"),
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Dropped on return, which stops the tick thread before the terminal is restored.
    let events = EventHandler::new(Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND));

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pop_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        queue!(bytes, PopKeyboardEnhancementFlags).unwrap();
        bytes
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn restore_pops_flags_only_when_pushed() {
        let pop = pop_bytes();
        assert!(!pop.is_empty());

        let mut plain = Vec::new();
        write_restore(&mut plain, false).unwrap();
        assert!(!contains(&plain, &pop));

        let mut pushed = Vec::new();
        write_restore(&mut pushed, true).unwrap();
        assert!(pushed.starts_with(&pop));
    }

    #[test]
    fn restore_always_leaves_the_alternate_screen() {
        let mut leave = Vec::new();
        queue!(leave, LeaveAlternateScreen).unwrap();

        for pushed in [false, true] {
            let mut out = Vec::new();
            write_restore(&mut out, pushed).unwrap();
            assert!(contains(&out, &leave));
        }
    }
}
