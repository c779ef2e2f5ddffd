//! Search input for the catalog screen.
//!
//! The bar owns the raw query text and reports every edit as
//! [`Message::QueryChanged`].  It never filters anything itself: the parent
//! re-runs the catalog filter with the new text and reports the result back
//! through [`SearchBar::set_match_count`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use explorer_runtime::{Command, Component};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Messages handled and emitted by [`SearchBar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Key press routed to the bar.
    KeyPress(KeyEvent),
    /// Pasted text to insert at the cursor.
    Paste(String),
    /// Emitted after every edit with the full query text.
    QueryChanged(String),
    /// Emitted when Esc is pressed on an already empty query.
    Cleared,
    /// Emitted when Enter is pressed.
    Submitted,
}

/// Style configuration for the bar.
#[derive(Debug, Clone)]
pub struct SearchBarStyle {
    /// The leading prompt glyph.
    pub prompt: Style,
    /// Query text.
    pub text: Style,
    /// Cell under the cursor while focused.
    pub cursor: Style,
    /// Placeholder shown while the query is empty.
    pub placeholder: Style,
    /// Right-aligned match counter.
    pub counter: Style,
    /// Counter text when the query matches nothing.
    pub no_matches: Style,
}

impl Default for SearchBarStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Yellow),
            text: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: Style::default().fg(Color::DarkGray),
            counter: Style::default().fg(Color::DarkGray),
            no_matches: Style::default().fg(Color::Red),
        }
    }
}

/// Single-line query input.
pub struct SearchBar {
    query: String,
    // Cursor position in chars, not bytes.
    cursor: usize,
    focused: bool,
    match_count: Option<usize>,
    placeholder: String,
    style: SearchBarStyle,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    /// An empty, focused search bar.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            focused: true,
            match_count: None,
            placeholder: "Search".to_string(),
            style: SearchBarStyle::default(),
        }
    }

    /// Set the text shown while the query is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: SearchBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Current raw query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and move the cursor to its end.
    ///
    /// Does not emit [`Message::QueryChanged`]; the caller already knows.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = self.query.chars().count();
    }

    /// Number of visible results, or `None` to hide the counter.
    pub fn set_match_count(&mut self, count: Option<usize>) {
        self.match_count = count;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::QueryChanged(self.query.clone()))
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return Command::none();
        }
        let at = self.byte_offset(self.cursor);
        self.query.insert_str(at, &clean);
        self.cursor += clean.chars().count();
        self.changed()
    }

    fn counter_text(&self) -> Option<(String, Style)> {
        match self.match_count {
            None => None,
            Some(0) => Some(("No matches".to_string(), self.style.no_matches)),
            Some(1) => Some(("1 match".to_string(), self.style.counter)),
            Some(n) => Some((format!("{n} matches"), self.style.counter)),
        }
    }
}

impl Component for SearchBar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                if !self.focused {
                    return Command::none();
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Esc, _) => {
                        if self.query.is_empty() {
                            Command::message(Message::Cleared)
                        } else {
                            self.set_query(String::new());
                            self.changed()
                        }
                    }
                    (KeyCode::Enter, _) => Command::message(Message::Submitted),
                    (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                        if self.query.is_empty() {
                            Command::none()
                        } else {
                            self.set_query(String::new());
                            self.changed()
                        }
                    }
                    (KeyCode::Backspace, _) => {
                        if self.cursor == 0 {
                            return Command::none();
                        }
                        self.cursor -= 1;
                        let at = self.byte_offset(self.cursor);
                        self.query.remove(at);
                        self.changed()
                    }
                    (KeyCode::Delete, _) => {
                        if self.cursor >= self.char_len() {
                            return Command::none();
                        }
                        let at = self.byte_offset(self.cursor);
                        self.query.remove(at);
                        self.changed()
                    }
                    (KeyCode::Left, _) => {
                        self.cursor = self.cursor.saturating_sub(1);
                        Command::none()
                    }
                    (KeyCode::Right, _) => {
                        self.cursor = (self.cursor + 1).min(self.char_len());
                        Command::none()
                    }
                    (KeyCode::Home, _) => {
                        self.cursor = 0;
                        Command::none()
                    }
                    (KeyCode::End, _) => {
                        self.cursor = self.char_len();
                        Command::none()
                    }
                    (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                        let mut buf = [0u8; 4];
                        self.insert(c.encode_utf8(&mut buf))
                    }
                    _ => Command::none(),
                }
            }
            Message::Paste(text) => {
                if self.focused {
                    self.insert(&text)
                } else {
                    Command::none()
                }
            }
            Message::QueryChanged(_) | Message::Cleared | Message::Submitted => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let counter = self.counter_text();
        let counter_width = counter
            .as_ref()
            .map(|(text, _)| text.width() as u16 + 1)
            .unwrap_or(0);
        let [input_area, counter_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(counter_width)])
                .areas(area);

        let mut spans = vec![Span::styled("/ ", self.style.prompt)];
        if self.query.is_empty() {
            if self.focused {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else {
            let at = self.byte_offset(self.cursor);
            let (before, rest) = self.query.split_at(at);
            spans.push(Span::styled(before, self.style.text));
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) if self.focused => {
                    spans.push(Span::styled(c.to_string(), self.style.cursor));
                    spans.push(Span::styled(chars.as_str(), self.style.text));
                }
                Some(_) => spans.push(Span::styled(rest, self.style.text)),
                None if self.focused => spans.push(Span::styled(" ", self.style.cursor)),
                None => {}
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), input_area);

        if let Some((text, style)) = counter {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text, style))).right_aligned(),
                counter_area,
            );
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn ctrl(c: char) -> Message {
        Message::KeyPress(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_str(bar: &mut SearchBar, s: &str) {
        for c in s.chars() {
            bar.update(key(KeyCode::Char(c)));
        }
    }

    fn render(bar: &SearchBar, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.view(f, area);
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn typing_emits_query_changed() {
        let mut bar = SearchBar::new();
        let cmd = bar.update(key(KeyCode::Char('t')));
        assert_eq!(cmd.into_message(), Some(Message::QueryChanged("t".into())));
        type_str(&mut bar, "og");
        assert_eq!(bar.query(), "tog");
    }

    #[test]
    fn backspace_and_delete_edit_at_cursor() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, "abc");
        bar.update(key(KeyCode::Left));
        let cmd = bar.update(key(KeyCode::Backspace));
        assert_eq!(bar.query(), "ac");
        assert_eq!(cmd.into_message(), Some(Message::QueryChanged("ac".into())));

        bar.update(key(KeyCode::Home));
        bar.update(key(KeyCode::Delete));
        assert_eq!(bar.query(), "c");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut bar = SearchBar::new();
        assert!(bar.update(key(KeyCode::Backspace)).is_none());
    }

    #[test]
    fn esc_clears_then_reports_cleared() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, "x");
        let cmd = bar.update(key(KeyCode::Esc));
        assert_eq!(bar.query(), "");
        assert_eq!(cmd.into_message(), Some(Message::QueryChanged(String::new())));

        let cmd = bar.update(key(KeyCode::Esc));
        assert_eq!(cmd.into_message(), Some(Message::Cleared));
    }

    #[test]
    fn ctrl_u_clears() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, "slider");
        let cmd = bar.update(ctrl('u'));
        assert_eq!(bar.query(), "");
        assert_eq!(cmd.into_message(), Some(Message::QueryChanged(String::new())));
    }

    #[test]
    fn enter_submits() {
        let mut bar = SearchBar::new();
        let cmd = bar.update(key(KeyCode::Enter));
        assert_eq!(cmd.into_message(), Some(Message::Submitted));
    }

    #[test]
    fn multibyte_editing() {
        let mut bar = SearchBar::new();
        type_str(&mut bar, "größe");
        bar.update(key(KeyCode::Left));
        bar.update(key(KeyCode::Backspace));
        assert_eq!(bar.query(), "gröe");
    }

    #[test]
    fn paste_strips_control_characters() {
        let mut bar = SearchBar::new();
        let cmd = bar.update(Message::Paste("to\ng".into()));
        assert_eq!(bar.query(), "tog");
        assert_eq!(cmd.into_message(), Some(Message::QueryChanged("tog".into())));
    }

    #[test]
    fn blurred_bar_ignores_input() {
        let mut bar = SearchBar::new();
        bar.blur();
        assert!(bar.update(key(KeyCode::Char('a'))).is_none());
        assert!(bar.update(Message::Paste("a".into())).is_none());
        assert_eq!(bar.query(), "");
    }

    #[test]
    fn set_query_moves_cursor_to_end() {
        let mut bar = SearchBar::new();
        bar.set_query("tex");
        bar.update(key(KeyCode::Char('t')));
        assert_eq!(bar.query(), "text");
    }

    #[test]
    fn renders_placeholder_and_counter() {
        let mut bar = SearchBar::new();
        let line = render(&bar, 40);
        assert!(line.contains("Search"));

        type_str(&mut bar, "zz");
        bar.set_match_count(Some(0));
        let line = render(&bar, 40);
        assert!(line.contains("zz"));
        assert!(line.contains("No matches"));

        bar.set_match_count(Some(3));
        assert!(render(&bar, 40).contains("3 matches"));
    }
}
