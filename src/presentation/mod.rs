//! Presentation — the in-game screens.
//!
//! Exactly one view is mounted at a time: the prompt view (revealing text
//! plus two choice buttons) or the outcome view (tier message plus Replay and
//! Quit). Switching views always unmounts the old one first, which stops its
//! reveal timer.

mod buttons;
pub mod font;
mod hints;
mod reveal;
pub mod widgets;

pub use buttons::ButtonRow;
pub use hints::HintBar;
pub use reveal::TextReveal;

use crossterm::event::{Event, KeyEventKind};
use tracing::{debug, info};

use crate::catalog::PromptRecord;
use crate::config::{KeyBindings, matches_binding};
use crate::context::AppContext;
use crate::narrative::{Choice, NarrativeController, Outcome};
use crate::timer::TimerHandle;
use crate::types::{Color, Draw, DrawOp, Style, Z_PANEL, Z_TEXT};
use widgets::{Align, Button, Panel, TextBlock};

const HEADER: &str = "== CHOOSE YOUR PATH ==";
const SUBHEADER: &str = "Sacrifices Must Be Made";
const HEADER_Y: u16 = 1;
const SUBHEADER_Y: u16 = 3;

const PANEL_GLOW: [Color; 2] = [Color::hex(0x335577), Color::hex(0x223355)];
const PANEL: Panel = Panel {
    x: 5,
    y: 6,
    width: 70,
    height: 14,
    fill: Color::hex(0x101025),
    border: Color::hex(0x446688),
    glow: &PANEL_GLOW,
    z_order: Z_PANEL,
};
const TEXT_X: u16 = 7;
const TEXT_Y: u16 = 7;
const TEXT_WIDTH: u16 = 66;
const OUTCOME_Y: u16 = 11;

const CHOICE_Y: u16 = 22;
const CHOICE_WIDTH: u16 = 28;
const CHOICE_XS: [u16; 2] = [9, 43];
const OUTCOME_BUTTON_Y: u16 = 22;
const OUTCOME_BUTTON_WIDTH: u16 = 22;
const OUTCOME_BUTTON_XS: [u16; 2] = [16, 42];

/// Row of the key legend, just below the canvas.
pub const HINT_Y: u16 = 30;

/// What the shell should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Quit,
}

pub struct PromptView {
    reveal: TextReveal,
    choices: ButtonRow,
}

pub struct OutcomeView {
    outcome: Outcome,
    message: Vec<char>,
    controls: ButtonRow,
}

pub enum View {
    Prompt(PromptView),
    Outcome(OutcomeView),
}

pub struct PresentationLayer {
    view: View,
}

impl PresentationLayer {
    /// Mount the view matching the controller's current state.
    pub fn mount(ctx: &mut AppContext, controller: &NarrativeController) -> Self {
        let mut layer = Self {
            view: View::Prompt(PromptView {
                reveal: TextReveal::new(),
                choices: choice_buttons(),
            }),
        };
        layer.show(ctx, controller);
        layer
    }

    /// The outcome on display, if the outcome view is mounted.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.view {
            View::Outcome(v) => Some(&v.outcome),
            View::Prompt(_) => None,
        }
    }

    /// The prompt text revealed so far, if the prompt view is mounted.
    pub fn revealed_text(&self) -> Option<String> {
        match &self.view {
            View::Prompt(v) => Some(v.reveal.visible_text()),
            View::Outcome(_) => None,
        }
    }

    /// The labels of the buttons currently on screen.
    pub fn button_labels(&self) -> Vec<&str> {
        let row = match &self.view {
            View::Prompt(v) => &v.choices,
            View::Outcome(v) => &v.controls,
        };
        row.buttons().iter().map(|b| b.label.as_str()).collect()
    }

    pub fn handle_event(
        &mut self,
        ctx: &mut AppContext,
        controller: &mut NarrativeController,
        event: &Event,
    ) -> Signal {
        let keys = ctx.config.key_bindings.clone();
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press && matches_binding(&keys.quit, key) {
                return Signal::Quit;
            }
        }

        let pressed = match &mut self.view {
            View::Prompt(view) => {
                let direct = match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if matches_binding(&keys.choose_first, key) {
                            Some(0)
                        } else if matches_binding(&keys.choose_second, key) {
                            Some(1)
                        } else {
                            None
                        }
                    }
                    _ => None,
                };
                direct.or_else(|| view.choices.handle_event(event, &keys))
            }
            View::Outcome(view) => view.controls.handle_event(event, &keys),
        };

        match pressed {
            Some(index) => self.activate(ctx, controller, index),
            None => Signal::Continue,
        }
    }

    /// Press button `index` of the mounted view.
    pub fn activate(
        &mut self,
        ctx: &mut AppContext,
        controller: &mut NarrativeController,
        index: usize,
    ) -> Signal {
        if matches!(self.view, View::Prompt(_)) {
            let Some(choice) = Choice::from_index(index) else {
                return Signal::Continue;
            };
            controller.choose(choice);
            self.show(ctx, controller);
            return Signal::Continue;
        }
        match index {
            0 => {
                controller.reset();
                self.show(ctx, controller);
                Signal::Continue
            }
            1 => {
                info!("quit from outcome screen");
                Signal::Quit
            }
            _ => Signal::Continue,
        }
    }

    /// Forward a timer firing to the reveal effect.
    pub fn on_timer(&mut self, ctx: &mut AppContext, handle: TimerHandle) -> bool {
        match &mut self.view {
            View::Prompt(view) => view.reveal.on_timer(handle, &mut ctx.scheduler),
            View::Outcome(_) => false,
        }
    }

    /// Stop everything the mounted view scheduled.
    pub fn unmount(&mut self, ctx: &mut AppContext) {
        if let View::Prompt(view) = &mut self.view {
            view.reveal.cancel(&mut ctx.scheduler);
        }
    }

    /// Re-render from controller state: next prompt, or the outcome.
    fn show(&mut self, ctx: &mut AppContext, controller: &NarrativeController) {
        if controller.is_complete() {
            self.mount_outcome(ctx, controller.outcome());
        } else {
            self.mount_prompt(ctx, controller.current());
        }
    }

    fn mount_prompt(&mut self, ctx: &mut AppContext, record: &PromptRecord) {
        if !matches!(self.view, View::Prompt(_)) {
            self.unmount(ctx);
            self.view = View::Prompt(PromptView {
                reveal: TextReveal::new(),
                choices: choice_buttons(),
            });
        }
        let interval = ctx.config.reveal_interval();
        if let View::Prompt(view) = &mut self.view {
            view.reveal
                .start(&record.prose, &mut ctx.scheduler, interval, ctx.now);
            view.choices
                .set_labels(record.choice_labels.iter().map(String::as_str));
        }
        debug!(choices = ?record.choice_labels, "prompt mounted");
    }

    fn mount_outcome(&mut self, ctx: &mut AppContext, outcome: Outcome) {
        self.unmount(ctx);
        let controls = ButtonRow::new(
            ["Play Again", "Quit"]
                .iter()
                .zip(OUTCOME_BUTTON_XS)
                .map(|(label, x)| Button::new(label, x, OUTCOME_BUTTON_Y, OUTCOME_BUTTON_WIDTH))
                .collect(),
        );
        info!(tier = ?outcome.tier, "outcome mounted");
        self.view = View::Outcome(OutcomeView {
            outcome,
            message: outcome.message.chars().collect(),
            controls,
        });
    }

    pub fn hints(keys: &KeyBindings) -> Vec<String> {
        vec![
            format!("[{}] first", keys.choose_first),
            format!("[{}] second", keys.choose_second),
            format!("[{}][{}] focus", keys.prev, keys.next),
            format!("[{}] press", keys.activate),
            format!("[{}] quit", keys.quit),
        ]
    }
}

fn choice_buttons() -> ButtonRow {
    ButtonRow::new(
        CHOICE_XS
            .iter()
            .map(|&x| Button::new("", x, CHOICE_Y, CHOICE_WIDTH))
            .collect(),
    )
}

/// Single-line text centred on the canvas.
pub(crate) fn centred_line(ops: &mut Vec<DrawOp>, text: &str, y: u16, width: u16, style: Style) {
    let chars: Vec<char> = text.chars().collect();
    TextBlock {
        chars: &chars,
        visible: chars.len(),
        x: 0,
        y,
        width,
        align: Align::Center,
        style,
        z_order: Z_TEXT,
    }
    .draw(ops);
}

impl Draw for PresentationLayer {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let width = crate::types::CANVAS.width;
        centred_line(ops, HEADER, HEADER_Y, width, Style::fg(Color::hex(0x99d9ff)).bold());
        centred_line(ops, SUBHEADER, SUBHEADER_Y, width, Style::fg(Color::hex(0x66bbff)));
        PANEL.draw(ops);

        match &self.view {
            View::Prompt(view) => {
                TextBlock {
                    chars: view.reveal.chars(),
                    visible: view.reveal.visible(),
                    x: TEXT_X,
                    y: TEXT_Y,
                    width: TEXT_WIDTH,
                    align: Align::Left,
                    style: Style::fg(Color::hex(0xbbddff)),
                    z_order: Z_TEXT,
                }
                .draw(ops);
                view.choices.draw(ops);
            }
            View::Outcome(view) => {
                TextBlock {
                    chars: &view.message,
                    visible: view.message.len(),
                    x: TEXT_X,
                    y: OUTCOME_Y,
                    width: TEXT_WIDTH,
                    align: Align::Center,
                    style: Style::fg(view.outcome.color).bold(),
                    z_order: Z_TEXT,
                }
                .draw(ops);
                view.controls.draw(ops);
            }
        }
    }
}
