//! AppShell — menu, game hand-off, and the event loop.
//!
//! The starfield runs from the first frame. "Play" swaps the menu for the
//! game once; there is no way back to the menu.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use tracing::info;

use crate::audio::BackgroundMusic;
use crate::catalog::ContentCatalog;
use crate::config::matches_binding;
use crate::context::AppContext;
use crate::field::AnimationField;
use crate::narrative::NarrativeController;
use crate::presentation::font::Banner;
use crate::presentation::widgets::{Button, RED_BUTTON};
use crate::presentation::{ButtonRow, HINT_Y, HintBar, PresentationLayer, Signal};
use crate::renderer::Renderer;
use crate::types::{CanvasSize, Color, Draw, DrawOp, Style, Z_TEXT};

pub const MENU_TITLE: &str = "Critical.com";
pub const GAME_TITLE: &str = "Interstellar Decision Game";

/// The canvas plus the hint row.
pub const SCREEN: CanvasSize = CanvasSize {
    width: 80,
    height: 31,
};

/// Poll timeout when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

const BANNER_Y: u16 = 6;
const MENU_BUTTON_X: u16 = 30;
const MENU_BUTTON_WIDTH: u16 = 20;
const PLAY_Y: u16 = 15;
const QUIT_Y: u16 = 19;

pub struct MenuScreen {
    buttons: ButtonRow,
}

impl MenuScreen {
    fn new() -> Self {
        Self {
            buttons: ButtonRow::new(vec![
                Button::new("Play", MENU_BUTTON_X, PLAY_Y, MENU_BUTTON_WIDTH),
                Button::new("Quit", MENU_BUTTON_X, QUIT_Y, MENU_BUTTON_WIDTH)
                    .with_palette(RED_BUTTON),
            ])
            .with_focus(0),
        }
    }
}

pub struct GameScreen {
    controller: NarrativeController,
    layer: PresentationLayer,
}

impl GameScreen {
    pub fn controller(&self) -> &NarrativeController {
        &self.controller
    }

    pub fn layer(&self) -> &PresentationLayer {
        &self.layer
    }
}

pub enum Screen {
    Menu(MenuScreen),
    Game(GameScreen),
}

pub struct AppShell {
    ctx: AppContext,
    field: AnimationField,
    screen: Screen,
    music: Option<BackgroundMusic>,
}

impl AppShell {
    /// Build the menu and start the background animation.
    pub fn new(mut ctx: AppContext) -> Self {
        let mut field = AnimationField::new(
            &mut ctx.rng,
            ctx.canvas,
            ctx.config.star_count,
            ctx.config.nebula_count,
        );
        let (star, nebula) = (ctx.config.star_interval(), ctx.config.nebula_interval());
        field.start(&mut ctx.scheduler, star, nebula, ctx.now);
        Self {
            ctx,
            field,
            screen: Screen::Menu(MenuScreen::new()),
            music: None,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn field(&self) -> &AnimationField {
        &self.field
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn title(&self) -> &'static str {
        match self.screen {
            Screen::Menu(_) => MENU_TITLE,
            Screen::Game(_) => GAME_TITLE,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Signal {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                return Signal::Quit;
            }
        }

        match &mut self.screen {
            Screen::Menu(menu) => {
                let keys = &self.ctx.config.key_bindings;
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press
                        && (matches_binding(&keys.quit, key) || key.code == KeyCode::Esc)
                    {
                        return Signal::Quit;
                    }
                }
                let pressed = menu.buttons.handle_event(event, keys);
                match pressed {
                    Some(0) => {
                        self.start_game();
                        Signal::Continue
                    }
                    Some(_) => Signal::Quit,
                    None => Signal::Continue,
                }
            }
            Screen::Game(game) => {
                game.layer
                    .handle_event(&mut self.ctx, &mut game.controller, event)
            }
        }
    }

    /// Fire every due timer. Returns `true` if anything fired.
    pub fn fire_timers(&mut self) -> bool {
        let now = self.ctx.now;
        let fired = self.ctx.scheduler.fire_due(now);
        for &handle in &fired {
            if self.field.on_timer(handle, &mut self.ctx.rng) {
                continue;
            }
            if let Screen::Game(game) = &mut self.screen {
                game.layer.on_timer(&mut self.ctx, handle);
            }
        }
        !fired.is_empty()
    }

    /// Everything on screen this frame.
    pub fn frame(&self) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        self.field.draw(&mut ops);

        let keys = &self.ctx.config.key_bindings;
        let hints = match &self.screen {
            Screen::Menu(menu) => {
                Banner {
                    font: &self.ctx.font,
                    text: MENU_TITLE,
                    canvas_width: self.ctx.canvas.width,
                    y: BANNER_Y,
                    style: Style::fg(Color::hex(0x99d9ff)).bold(),
                    z_order: Z_TEXT,
                    ch: '█',
                }
                .draw(&mut ops);
                menu.buttons.draw(&mut ops);
                vec![
                    "[↑][↓] focus".to_string(),
                    format!("[{}] press", keys.activate),
                    format!("[{}] quit", keys.quit),
                ]
            }
            Screen::Game(game) => {
                game.layer.draw(&mut ops);
                PresentationLayer::hints(keys)
            }
        };
        let items: Vec<&str> = hints.iter().map(String::as_str).collect();
        HintBar {
            items: &items,
            y: HINT_Y,
        }
        .draw(&mut ops);
        ops
    }

    fn start_game(&mut self) {
        info!("game started");
        let controller = NarrativeController::new(ContentCatalog::builtin());
        let layer = PresentationLayer::mount(&mut self.ctx, &controller);
        self.screen = Screen::Game(GameScreen { controller, layer });
        let config = &self.ctx.config;
        self.music = BackgroundMusic::start(&config.music_path, config.music_volume);
    }

    /// Run in the terminal until the player quits.
    ///
    /// Sets up the terminal, enters the event loop, and restores the terminal
    /// on exit (even on error).
    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size().context("Failed to query terminal size")?;
        if term_w < SCREEN.width || term_h < SCREEN.height {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                SCREEN.width,
                SCREEN.height,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.event_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();

        info!("shut down");
        result
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut renderer = Renderer::new(SCREEN);
        let mut title = self.title();
        execute!(out, terminal::SetTitle(title))?;
        renderer.present(out, &self.frame())?;

        loop {
            let wait = self
                .ctx
                .scheduler
                .time_until_next(Instant::now())
                .unwrap_or(IDLE_WAIT);

            let mut dirty = false;
            if event::poll(wait)? {
                loop {
                    let event = event::read()?;
                    self.ctx.now = Instant::now();
                    if let Event::Resize(_, _) = event {
                        execute!(out, terminal::Clear(terminal::ClearType::All))?;
                        renderer.invalidate();
                    }
                    if self.handle_event(&event) == Signal::Quit {
                        return Ok(());
                    }
                    dirty = true;
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            self.ctx.now = Instant::now();
            dirty |= self.fire_timers();

            if self.title() != title {
                title = self.title();
                execute!(out, terminal::SetTitle(title))?;
            }
            if dirty {
                renderer.present(out, &self.frame())?;
            }
        }
    }
}
