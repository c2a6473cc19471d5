//! The fixed list of dilemmas shown in a run.

/// One dilemma: the prose and its two choices.
///
/// By content convention the first choice is the one that scores +1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub prose: String,
    pub choice_labels: [String; 2],
}

impl PromptRecord {
    pub fn new(prose: &str, first: &str, second: &str) -> Self {
        Self {
            prose: prose.to_string(),
            choice_labels: [first.to_string(), second.to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContentCatalog {
    records: Vec<PromptRecord>,
}

impl ContentCatalog {
    /// Panics on an empty list: a run needs at least one prompt to end.
    pub fn new(records: Vec<PromptRecord>) -> Self {
        assert!(!records.is_empty(), "content catalog must not be empty");
        Self { records }
    }

    /// The six dilemmas the game ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            PromptRecord::new(
                "A terrorist demands you kill one innocent child or they'll detonate a bomb killing thousands. Will you take one life to save many?",
                "Kill one",
                "Refuse",
            ),
            PromptRecord::new(
                "Would you rather go to DayDream event at IIT Delhi by leaving your JEE classes which will create a backlog?",
                "Yes, I will",
                "No, preparation is important",
            ),
            PromptRecord::new(
                "A scientist offers to erase your most painful memory — but it also means forgetting the person who shaped your strength.",
                "Erase it",
                "Keep it",
            ),
            PromptRecord::new(
                "Your dying sibling can be saved if you clone and harvest organs from the clone — but the clone is conscious.",
                "Use the clone",
                "Refuse",
            ),
            PromptRecord::new(
                "You can travel back and stop a tragedy — but that act will erase your own existence. Will you die for a world that never knew you?",
                "Go back",
                "Stay",
            ),
            PromptRecord::new(
                "You are given control over life and death. You can eliminate all pain in the world, but free will will vanish. Do you create a perfect but controlled world?",
                "Press the switch",
                "Refuse",
            ),
        ])
    }

    /// Panics when `index` is out of range; the controller never asks for one.
    pub fn get(&self, index: usize) -> &PromptRecord {
        match self.records.get(index) {
            Some(record) => record,
            None => panic!(
                "prompt index {index} out of range for catalog of {}",
                self.records.len()
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
