mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_owl::config::{self, GameConfig};
use flappy_owl::game::{process_input, process_tick, GameInput, GameSession, Preset, ViewportSize};
use flappy_owl::input::map_key;
use flappy_owl::{build_info, logger, FrameClock};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use ui::{game_layout, render_game, CellScale};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, PartialEq)]
enum CliAction {
    Play { preset: Option<Preset> },
    PrintConfig { preset: Option<Preset> },
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<CliAction, String> {
    let mut preset = None;
    let mut print_config = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliAction::Version),
            "--help" | "-h" => return Ok(CliAction::Help),
            "--print-config" => print_config = true,
            "--preset" => {
                let name = iter
                    .next()
                    .ok_or_else(|| "--preset needs a value".to_string())?;
                preset = Some(
                    Preset::from_name(name).ok_or_else(|| format!("Unknown preset: {}", name))?,
                );
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    if print_config {
        Ok(CliAction::PrintConfig { preset })
    } else {
        Ok(CliAction::Play { preset })
    }
}

fn usage() -> &'static str {
    "Usage: flappy-owl [options]

Options:
  --preset NAME   Tuning preset: original, revised
  --print-config  Print the effective config as JSON and exit
  --version       Show version information
  --help          Show this help message

Controls: Space/Up jump, R restart, Esc/Q quit"
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match parse_args(&args) {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, usage());
            std::process::exit(1);
        }
    };

    let preset = match action {
        CliAction::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        CliAction::Help => {
            println!("Flappy Owl - terminal side-scroller\n\n{}", usage());
            return Ok(());
        }
        CliAction::Play { preset } | CliAction::PrintConfig { preset } => preset,
    };

    // Logging is best effort; the game runs without it.
    if let Err(e) = config::data_dir().and_then(|dir| logger::init(&dir)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut game_config = match config::config_path() {
        Ok(path) => GameConfig::load_or_default(&path),
        Err(e) => {
            tracing::warn!(error = %e, "no config directory, using defaults");
            GameConfig::default()
        }
    };
    if let Some(preset) = preset {
        game_config.preset = preset;
    }
    game_config.validate()?;

    if matches!(action, CliAction::PrintConfig { .. }) {
        println!("{}", game_config.to_pretty_json()?);
        return Ok(());
    }

    tracing::info!(
        version = %build_info::version_line(),
        preset = game_config.preset.name(),
        "starting"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &game_config);

    // Restore the terminal whatever happened above.
    let restored = restore_terminal(&mut terminal);
    if let Err(ref e) = result {
        tracing::error!(error = %e, "game loop failed");
    }
    result.and(restored)
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Viewport for the current terminal size. Read fresh every time so resizes
/// take effect on the next tick.
fn current_viewport(terminal: &Term, scale: CellScale) -> io::Result<ViewportSize> {
    let area = terminal.size()?;
    Ok(scale.viewport(game_layout(area).play))
}

/// The frame loop. Input and ticks run on this one thread, so the session is
/// never observed mid-tick.
fn run(terminal: &mut Term, game_config: &GameConfig) -> io::Result<()> {
    let scale = CellScale {
        width: game_config.cell_width,
        height: game_config.cell_height,
    };
    let mut rng = rand::thread_rng();
    let mut clock = FrameClock::new(game_config.frame_interval_ms);
    let mut session = GameSession::new(game_config.tuning(), current_viewport(terminal, scale)?);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| render_game(frame, &session, scale))?;

        // Wait for input until the next frame is due, then drain the queue.
        let mut timeout = Duration::from_millis(clock.until_next_ms());
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(input) = map_key(key) else {
                continue;
            };
            if input == GameInput::Quit {
                tracing::info!(score = session.score, "quit");
                return Ok(());
            }
            process_input(&mut session, input, current_viewport(terminal, scale)?);
        }

        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;

        // Nothing advances behind the game-over popup or the too-small notice.
        if session.over || !game_layout(terminal.size()?).ticks_allowed() {
            clock.reset();
            continue;
        }

        for _ in 0..clock.advance(elapsed_ms) {
            let viewport = current_viewport(terminal, scale)?;
            let events = process_tick(&mut session, viewport, &mut rng);
            if let Some(cause) = events.crash {
                tracing::info!(score = session.score, cause = ?cause, "run ended");
                break;
            }
        }
    }
}
