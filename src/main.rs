use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use hurdle::assets::{Assets, Sprite};
use hurdle::build_info;
use hurdle::cli::{self, CliOptions, Command};
use hurdle::clock::FrameLimiter;
use hurdle::config::GameConfig;
use hurdle::game::{process_input, step_session, GameSession, SessionReport};
use hurdle::input::{frame_input, is_interrupt, is_press, menu_input};
use hurdle::menu::{MenuInput, PickerOutcome, SpritePicker, StartChoice, StartMenu};
use hurdle::ui::{
    render_game_over, render_game_scene, render_sprite_picker, render_sprite_preview,
    render_start_menu, SceneSprites,
};

/// How long menu screens wait for a key before redrawing.
const MENU_POLL_MS: u64 = 20;

enum Screen {
    StartMenu,
    SpritePicker,
    Preview {
        sprite: Sprite,
        until: Instant,
    },
    Game {
        session: GameSession,
        sprite: Sprite,
        limiter: FrameLimiter,
    },
    GameOver(SessionReport),
}

fn main() -> io::Result<()> {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'hurdle --help' for usage.");
            std::process::exit(1);
        }
    };

    // Everything that can fail on bad input happens before raw mode.
    if let Some(path) = &options.log_path {
        if let Err(e) = init_logging(path) {
            eprintln!("Could not open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let (config, assets) = match load_game_data(&options) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = match options.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config, &assets, &mut rng);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("Terminal error: {}", e);
    }
    result
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("{} starting", build_info::version_line());
    Ok(())
}

fn load_game_data(options: &CliOptions) -> io::Result<(GameConfig, Assets)> {
    let config = match &options.config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let assets = Assets::load(&options.assets_dir, &config)?;
    Ok((config, assets))
}

/// Next pressed key within `timeout`, if any. Ctrl-C is always reported.
fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if is_press(&key) || is_interrupt(&key) {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut StdRng,
) -> io::Result<()> {
    let menu_poll = Duration::from_millis(MENU_POLL_MS);
    let mut start_menu = StartMenu::new(config);
    let mut picker = SpritePicker::new(assets.jumpers.len());
    let mut screen = Screen::StartMenu;

    loop {
        screen = match screen {
            Screen::StartMenu => {
                start_menu.tick(config);
                terminal.draw(|f| {
                    render_start_menu(f, f.size(), &start_menu, assets, config);
                })?;

                match poll_key(menu_poll)? {
                    Some(key) if is_interrupt(&key) => break,
                    Some(key) => match start_menu.process_input(menu_input(&key)) {
                        Some(StartChoice::NewGame) => {
                            picker = SpritePicker::new(assets.jumpers.len());
                            Screen::SpritePicker
                        }
                        Some(StartChoice::EndGame) => break,
                        None => Screen::StartMenu,
                    },
                    None => Screen::StartMenu,
                }
            }

            Screen::SpritePicker => {
                terminal.draw(|f| {
                    render_sprite_picker(f, f.size(), &picker, &assets.jumpers, config);
                })?;

                match poll_key(menu_poll)? {
                    Some(key) if is_interrupt(&key) => break,
                    Some(key) => match picker.process_input(menu_input(&key)) {
                        PickerOutcome::Chosen(index) => match assets.player_sprite(index, config)
                        {
                            Some(sprite) => {
                                log::info!("Picked jumper {}", sprite.name);
                                Screen::Preview {
                                    sprite,
                                    until: Instant::now()
                                        + Duration::from_millis(config.preview_ms),
                                }
                            }
                            None => Screen::SpritePicker,
                        },
                        PickerOutcome::Cancelled => Screen::StartMenu,
                        PickerOutcome::Stay => Screen::SpritePicker,
                    },
                    None => Screen::SpritePicker,
                }
            }

            Screen::Preview { sprite, until } => {
                terminal.draw(|f| {
                    render_sprite_preview(f, f.size(), &sprite, config);
                })?;

                let wait = until.saturating_duration_since(Instant::now());
                if matches!(poll_key(wait.min(menu_poll))?, Some(key) if is_interrupt(&key)) {
                    break;
                }

                if Instant::now() >= until {
                    log::info!("Run started");
                    Screen::Game {
                        session: GameSession::new(config.clone()),
                        sprite,
                        limiter: FrameLimiter::new(config.frame_duration()),
                    }
                } else {
                    Screen::Preview { sprite, until }
                }
            }

            Screen::Game {
                mut session,
                sprite,
                mut limiter,
            } => {
                // Drain this frame's input
                let mut events = Vec::new();
                while event::poll(Duration::ZERO)? {
                    events.push(event::read()?);
                }
                let input = frame_input(events);
                if input.interrupted {
                    break;
                }
                for action in input.actions {
                    process_input(&mut session, action);
                }

                step_session(&mut session, rng);

                let now = Instant::now();
                terminal.draw(|f| {
                    let sprites = SceneSprites {
                        background: &assets.background,
                        obstacle: &assets.obstacle,
                        player: &sprite,
                    };
                    render_game_scene(f, f.size(), &session, &sprites, now);
                })?;

                if session.is_over() {
                    Screen::GameOver(session.finish(now))
                } else {
                    limiter.wait();
                    Screen::Game {
                        session,
                        sprite,
                        limiter,
                    }
                }
            }

            Screen::GameOver(report) => {
                terminal.draw(|f| render_game_over(f, f.size(), &report))?;

                match poll_key(menu_poll)? {
                    Some(key) if is_interrupt(&key) => break,
                    Some(key) if menu_input(&key) == MenuInput::Select => {
                        start_menu = StartMenu::new(config);
                        Screen::StartMenu
                    }
                    _ => Screen::GameOver(report),
                }
            }
        };
    }

    Ok(())
}
