//! Run state and scoring.
//!
//! A run walks the catalog front to back. Each choice moves the score by one
//! and advances the index; answering the last prompt completes the run, after
//! which the outcome tier can be read.

use tracing::{debug, info};

use crate::catalog::{ContentCatalog, PromptRecord};
use crate::types::Color;

/// Score at or above which a run lands in the positive tier.
pub const POSITIVE_THRESHOLD: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// The first-listed choice; scores +1.
    First,
    /// The second-listed choice; scores -1.
    Second,
}

impl Choice {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Choice::First),
            1 => Some(Choice::Second),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Choice::First => 0,
            Choice::Second => 1,
        }
    }

    fn delta(self) -> i32 {
        match self {
            Choice::First => 1,
            Choice::Second => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub current_index: usize,
    pub score: i32,
    pub phase: Phase,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            current_index: 0,
            score: 0,
            phase: Phase::InProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Positive,
    Neutral,
    Negative,
}

impl Tier {
    pub fn for_score(score: i32) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Tier::Positive
        } else if score >= 0 {
            Tier::Neutral
        } else {
            Tier::Negative
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Tier::Positive => Outcome {
                tier: self,
                message: "You stayed true to your values.\nHumanity is grateful.",
                color: Color::hex(0xaaffaa),
            },
            Tier::Neutral => Outcome {
                tier: self,
                message: "You made difficult decisions.\nThe burden is heavy.",
                color: Color::hex(0xffaa55),
            },
            Tier::Negative => Outcome {
                tier: self,
                message: "Power without conscience leads to ruin.\nReflect on your path.",
                color: Color::hex(0xff7777),
            },
        }
    }
}

/// The closing message for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub tier: Tier,
    pub message: &'static str,
    pub color: Color,
}

pub struct NarrativeController {
    catalog: ContentCatalog,
    state: RunState,
}

impl NarrativeController {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self {
            catalog,
            state: RunState::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn is_complete(&self) -> bool {
        self.state.phase == Phase::Complete
    }

    /// The prompt at the current index. After completion this is the last one.
    pub fn current(&self) -> &PromptRecord {
        self.catalog.get(self.state.current_index)
    }

    /// Record a choice for the current prompt and advance.
    ///
    /// Panics if the run is already complete.
    pub fn choose(&mut self, choice: Choice) -> RunState {
        assert!(
            self.state.phase == Phase::InProgress,
            "choose called on a completed run"
        );
        self.state.score += choice.delta();
        debug!(
            index = self.state.current_index,
            choice = choice.index(),
            score = self.state.score,
            "choice recorded"
        );

        if self.state.current_index + 1 == self.catalog.len() {
            self.state.phase = Phase::Complete;
            info!(score = self.state.score, "run complete");
        } else {
            self.state.current_index += 1;
        }
        self.state
    }

    /// Panics unless the run is complete.
    pub fn outcome(&self) -> Outcome {
        assert!(
            self.state.phase == Phase::Complete,
            "outcome requested before the run is complete"
        );
        Tier::for_score(self.state.score).outcome()
    }

    pub fn reset(&mut self) {
        self.state = RunState::default();
        info!("run reset");
    }
}
