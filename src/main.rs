use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use guessr::{
    app::App,
    audio::{BellPlayer, SilentPlayer, SoundPlayer},
    difficulty::Difficulty,
    logging,
    preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    TICK_RATE_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    rc::Rc,
    time::Duration,
};

/// guess the number before the clock or your attempts run out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess a secret number within a limited number of attempts and a countdown. Each wrong guess tells you whether you were too high or too low and how close you got."
)]
pub struct Cli {
    /// difficulty to start with
    #[clap(short = 'd', long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// play no feedback sounds
    #[clap(short = 'm', long)]
    mute: bool,

    /// keep the theme choice for this run only
    #[clap(long)]
    no_persist: bool,

    /// write logs to this file (also read from GUESSR_LOG_FILE)
    #[clap(long, env = logging::LOG_FILE_ENV)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn preference_store(&self) -> Box<dyn PreferenceStore> {
        if self.no_persist {
            Box::new(MemoryPreferenceStore::new())
        } else {
            Box::new(FilePreferenceStore::new())
        }
    }

    fn sound_player(&self) -> Rc<dyn SoundPlayer> {
        if self.mute {
            return Rc::new(SilentPlayer);
        }

        #[cfg(feature = "audio")]
        {
            match guessr::audio::RodioPlayer::new() {
                Ok(player) => return Rc::new(player),
                Err(e) => tracing::warn!(error = %e, "no audio device, using the terminal bell"),
            }
        }

        Rc::new(BellPlayer::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// A new game session replaced the old one
    NewSession,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(cli.log_file.as_deref())?;
    tracing::info!(difficulty = %cli.difficulty, mute = cli.mute, "starting");

    let mut app = App::new(cli.difficulty, cli.preference_store(), cli.sound_player());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Tick(elapsed) => app.on_tick(elapsed),
            GameEvent::Resize => {
                let size = terminal.size()?;
                app.set_viewport(size.width, size.height);
            }
            GameEvent::Key(key) => match handle_key(app, key) {
                Flow::Quit => break,
                Flow::NewSession => runner.restart_clock(),
                Flow::Continue => {}
            },
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Enter => {
            // rejections already show as the advisory message
            let _ = app.submit();
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Tab => {
            app.next_difficulty();
            return Flow::NewSession;
        }
        KeyCode::Char('e') => {
            app.select_difficulty(Difficulty::Easy);
            return Flow::NewSession;
        }
        KeyCode::Char('m') => {
            app.select_difficulty(Difficulty::Medium);
            return Flow::NewSession;
        }
        KeyCode::Char('h') => {
            app.select_difficulty(Difficulty::Hard);
            return Flow::NewSession;
        }
        KeyCode::Char('r') => {
            app.reset();
            return Flow::NewSession;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
        }
        KeyCode::Char(c) => {
            app.push_char(c);
        }
        _ => {}
    }

    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use guessr::game::{GameSession, Status};
    use guessr::theme::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(target: u32) -> App {
        let session = GameSession::with_target(Difficulty::Easy, target, Rc::new(SilentPlayer))
            .unwrap();
        App::with_session(session, Box::new(MemoryPreferenceStore::new()))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["guessr"]);

        assert_eq!(cli.difficulty, Difficulty::Medium);
        assert!(!cli.mute);
        assert!(!cli.no_persist);
    }

    #[test]
    fn test_cli_difficulty() {
        let cli = Cli::parse_from(["guessr", "--difficulty", "hard"]);
        assert_eq!(cli.difficulty, Difficulty::Hard);

        let cli = Cli::parse_from(["guessr", "-d", "easy"]);
        assert_eq!(cli.difficulty, Difficulty::Easy);

        assert!(Cli::try_parse_from(["guessr", "-d", "nightmare"]).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "guessr",
            "--mute",
            "--no-persist",
            "--log-file",
            "/tmp/guessr.log",
        ]);

        assert!(cli.mute);
        assert!(cli.no_persist);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/guessr.log")));
    }

    #[test]
    fn test_no_persist_store_is_in_memory() {
        let cli = Cli::parse_from(["guessr", "--no-persist"]);
        let store = cli.preference_store();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut app = test_app(27);

        handle_key(&mut app, key(KeyCode::Char('1')));
        handle_key(&mut app, key(KeyCode::Char('0')));
        assert_eq!(app.input(), "10");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.input(), "");
        assert_eq!(app.session().attempts_used(), 1);

        handle_key(&mut app, key(KeyCode::Char('2')));
        handle_key(&mut app, key(KeyCode::Char('8')));
        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Char('7')));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.session().status(), Status::Won);
    }

    #[test]
    fn test_level_keys() {
        let mut app = test_app(27);

        assert_eq!(handle_key(&mut app, key(KeyCode::Char('h'))), Flow::NewSession);
        assert_eq!(app.difficulty(), Difficulty::Hard);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('m'))), Flow::NewSession);
        assert_eq!(app.difficulty(), Difficulty::Medium);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('e'))), Flow::NewSession);
        assert_eq!(app.difficulty(), Difficulty::Easy);
        assert_eq!(handle_key(&mut app, key(KeyCode::Tab)), Flow::NewSession);
        assert_eq!(app.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_reset_key() {
        let mut app = test_app(27);
        handle_key(&mut app, key(KeyCode::Char('5')));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.session().attempts_used(), 1);

        assert_eq!(handle_key(&mut app, key(KeyCode::Char('r'))), Flow::NewSession);
        assert_eq!(app.session().attempts_used(), 0);
        assert_eq!(app.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_theme_key() {
        let mut app = test_app(27);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('t'))), Flow::Continue);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(27);
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Flow::Quit
        );
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('c'))), Flow::Continue);
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Flow::Continue);
    }
}
