use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Terminal input delivered through [`terminal_events`](crate::terminal_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press (releases and repeats are dropped before this point).
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
}

impl TerminalEvent {
    /// Convert a crossterm event, discarding the ones the explorer ignores
    /// (mouse input and key releases).
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TerminalEvent::Key(key)),
            Event::Key(_) | Event::Mouse(_) => None,
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            Event::Paste(text) => Some(TerminalEvent::Paste(text)),
            Event::FocusGained => Some(TerminalEvent::FocusGained),
            Event::FocusLost => Some(TerminalEvent::FocusLost),
        }
    }
}
