//! A group of buttons sharing keyboard focus and mouse hover.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use crate::config::{KeyBindings, matches_binding};
use crate::types::{Draw, DrawOp};

use super::widgets::Button;

#[derive(Debug, Clone)]
pub struct ButtonRow {
    buttons: Vec<Button>,
    focus: Option<usize>,
    hover: Option<usize>,
}

impl ButtonRow {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self {
            buttons,
            focus: None,
            hover: None,
        }
    }

    /// Start with button `index` focused.
    pub fn with_focus(mut self, index: usize) -> Self {
        if index < self.buttons.len() {
            self.focus = Some(index);
            self.sync();
        }
        self
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn set_labels<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) {
        for (button, label) in self.buttons.iter_mut().zip(labels) {
            button.label = label.to_string();
        }
    }

    pub fn focus_next(&mut self) {
        let n = self.buttons.len();
        if n > 0 {
            self.focus = Some(self.focus.map_or(0, |i| (i + 1) % n));
            self.sync();
        }
    }

    pub fn focus_prev(&mut self) {
        let n = self.buttons.len();
        if n > 0 {
            self.focus = Some(self.focus.map_or(n - 1, |i| (i + n - 1) % n));
            self.sync();
        }
    }

    /// Index of the button under the given cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(column, row))
    }

    /// Update focus/hover from `event` and return the index of a button the
    /// event activated.
    pub fn handle_event(&mut self, event: &Event, keys: &KeyBindings) -> Option<usize> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches_binding(&keys.next, key)
                    || key.code == KeyCode::Tab
                    || key.code == KeyCode::Down
                {
                    self.focus_next();
                } else if matches_binding(&keys.prev, key)
                    || key.code == KeyCode::BackTab
                    || key.code == KeyCode::Up
                {
                    self.focus_prev();
                } else if matches_binding(&keys.activate, key) || key.code == KeyCode::Char(' ') {
                    if self.focus.is_none() {
                        self.focus_next();
                    } else {
                        return self.focus;
                    }
                }
                None
            }
            Event::Mouse(mouse) => {
                let under = self.hit(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Moved => {
                        self.hover = under;
                        self.sync();
                        None
                    }
                    MouseEventKind::Down(MouseButton::Left) => under,
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn sync(&mut self) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.hot = self.focus == Some(i) || self.hover == Some(i);
        }
    }
}

impl Draw for ButtonRow {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        for button in &self.buttons {
            button.draw(ops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn row() -> ButtonRow {
        ButtonRow::new(vec![Button::new("A", 0, 0, 10), Button::new("B", 20, 0, 10)])
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut r = row();
        r.focus_prev();
        assert_eq!(r.focused(), Some(1));
        r.focus_next();
        assert_eq!(r.focused(), Some(0));
        assert!(r.buttons()[0].hot);
        assert!(!r.buttons()[1].hot);
    }

    #[test]
    fn enter_focuses_first_then_activates() {
        let keys = KeyBindings::default();
        let mut r = row();
        assert_eq!(r.handle_event(&key(KeyCode::Enter), &keys), None);
        assert_eq!(r.focused(), Some(0));
        r.handle_event(&key(KeyCode::Right), &keys);
        assert_eq!(r.handle_event(&key(KeyCode::Enter), &keys), Some(1));
    }

    #[test]
    fn initial_focus_activates_on_first_enter() {
        let keys = KeyBindings::default();
        let mut r = row().with_focus(0);
        assert!(r.buttons()[0].hot);
        assert_eq!(r.handle_event(&key(KeyCode::Enter), &keys), Some(0));

        let out_of_range = row().with_focus(5);
        assert_eq!(out_of_range.focused(), None);
    }

    #[test]
    fn click_activates_button_under_cursor() {
        let keys = KeyBindings::default();
        let mut r = row();
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(r.handle_event(&mouse(down, 25, 1), &keys), Some(1));
        assert_eq!(r.handle_event(&mouse(down, 15, 1), &keys), None);
    }

    #[test]
    fn hover_highlights_without_moving_focus() {
        let keys = KeyBindings::default();
        let mut r = row();
        r.handle_event(&mouse(MouseEventKind::Moved, 3, 1), &keys);
        assert!(r.buttons()[0].hot);
        assert_eq!(r.focused(), None);
        r.handle_event(&mouse(MouseEventKind::Moved, 15, 1), &keys);
        assert!(!r.buttons()[0].hot);
    }

    #[test]
    fn set_labels_keeps_geometry() {
        let mut r = row();
        r.set_labels(["Yes", "No"]);
        assert_eq!(r.buttons()[1].label, "No");
        assert_eq!(r.buttons()[1].x, 20);
    }
}
