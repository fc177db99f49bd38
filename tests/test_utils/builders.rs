use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

#[derive(Default)]
pub struct EventBuilder {
    events: Vec<Event>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.events.push(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }));
        self
    }

    pub fn key(self, key: char) -> Self {
        self.push(KeyCode::Char(key), KeyModifiers::empty())
    }

    pub fn keys(mut self, keys: &str) -> Self {
        for ch in keys.chars() {
            self = self.key(ch);
        }
        self
    }

    pub fn enter(self) -> Self {
        self.push(KeyCode::Enter, KeyModifiers::empty())
    }

    pub fn esc(self) -> Self {
        self.push(KeyCode::Esc, KeyModifiers::empty())
    }

    pub fn backspace(self) -> Self {
        self.push(KeyCode::Backspace, KeyModifiers::empty())
    }

    pub fn build(self) -> Vec<Event> {
        self.events
    }
}
