//! Sectioned list over a [`FilteredCatalog`].
//!
//! Section titles render as headers; the cursor only ever rests on entry
//! rows.  When the view is replaced (the query changed), the cursor stays on
//! the same entry if it is still visible and otherwise falls back to the
//! first visible entry.
//!
//! Empty sections are drawn as a header with no rows unless
//! [`SectionList::hide_empty_sections`] is set.

use crate::key::{Binding, KeyCombination};
use crossterm::event::{KeyCode, KeyEvent};
use explorer_core::FilteredCatalog;
use explorer_runtime::{Command, Component};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{HighlightSpacing, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use std::cell::Cell;

/// Messages handled and emitted by [`SectionList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Key press routed to the list.
    KeyPress(KeyEvent),
    /// Emitted when the cursor lands on the named entry.
    Select(String),
    /// Emitted when Enter is pressed on the named entry.
    Confirm(String),
}

/// Key bindings for list navigation.
#[derive(Debug, Clone)]
pub struct SectionListKeys {
    /// Previous entry.
    pub up: Binding,
    /// Next entry.
    pub down: Binding,
    /// First visible entry.
    pub first: Binding,
    /// Last visible entry.
    pub last: Binding,
    /// Back one rendered page.
    pub page_up: Binding,
    /// Forward one rendered page.
    pub page_down: Binding,
    /// Emit [`Message::Confirm`] for the selected entry.
    pub confirm: Binding,
}

impl Default for SectionListKeys {
    fn default() -> Self {
        Self {
            up: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Char('k')),
                ],
                "↑/k",
                "up",
            ),
            down: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::new(KeyCode::Char('j')),
                ],
                "↓/j",
                "down",
            ),
            first: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Home),
                    KeyCombination::new(KeyCode::Char('g')),
                ],
                "home",
                "first",
            ),
            last: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::End),
                    KeyCombination::new(KeyCode::Char('G')),
                ],
                "end",
                "last",
            ),
            page_up: Binding::new(KeyCombination::new(KeyCode::PageUp), "pgup", "page up"),
            page_down: Binding::new(KeyCombination::new(KeyCode::PageDown), "pgdn", "page down"),
            confirm: Binding::new(KeyCombination::new(KeyCode::Enter), "enter", "open"),
        }
    }
}

impl SectionListKeys {
    /// Bindings without printable keys, for a list that shares the keyboard
    /// with a text input.  Home/End need Ctrl held.
    pub fn arrows() -> Self {
        Self {
            up: Binding::new(KeyCombination::new(KeyCode::Up), "↑", "up"),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "↓", "down"),
            first: Binding::new(KeyCombination::ctrl(KeyCode::Home), "^home", "first"),
            last: Binding::new(KeyCombination::ctrl(KeyCode::End), "^end", "last"),
            ..Self::default()
        }
    }

    /// Whether any list binding handles `key`.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        [
            &self.up,
            &self.down,
            &self.first,
            &self.last,
            &self.page_up,
            &self.page_down,
            &self.confirm,
        ]
        .iter()
        .any(|binding| binding.matches(key))
    }
}

/// Style configuration for the list.
#[derive(Debug, Clone)]
pub struct SectionListStyle {
    /// Section header with at least one entry.
    pub header: Style,
    /// Section header left empty by the current query.
    pub empty_header: Style,
    /// Entry name.
    pub entry: Style,
    /// Entry description and the "No results" line.
    pub description: Style,
    /// The selected row.
    pub selected: Style,
    /// Marker drawn before the selected row.
    pub highlight_symbol: &'static str,
}

impl Default for SectionListStyle {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            empty_header: Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            entry: Style::default(),
            description: Style::default().fg(Color::DarkGray),
            selected: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            highlight_symbol: "▸ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Header { title: String, count: usize },
    Entry { name: String, description: String },
}

/// Sectioned, scrollable list of catalog entries.
pub struct SectionList {
    rows: Vec<Row>,
    // Indices into `rows` of every entry row, in order.
    entry_rows: Vec<usize>,
    // Index into `entry_rows`.
    cursor: Option<usize>,
    hide_empty: bool,
    focused: bool,
    // Last rendered height, used for page movement.
    page_height: Cell<usize>,
    keys: SectionListKeys,
    style: SectionListStyle,
    empty_message: String,
}

impl Default for SectionList {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionList {
    /// An empty, focused list.  Call [`set_view`](Self::set_view) to fill it.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            entry_rows: Vec::new(),
            cursor: None,
            hide_empty: false,
            focused: true,
            page_height: Cell::new(10),
            keys: SectionListKeys::default(),
            style: SectionListStyle::default(),
            empty_message: "No results".to_string(),
        }
    }

    /// Hide sections that have no entries in the current view.
    pub fn hide_empty_sections(mut self, hide: bool) -> Self {
        self.hide_empty = hide;
        self
    }

    pub fn with_keys(mut self, keys: SectionListKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_style(mut self, style: SectionListStyle) -> Self {
        self.style = style;
        self
    }

    pub fn keys(&self) -> &SectionListKeys {
        &self.keys
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replace the displayed view, keeping the cursor on the same entry
    /// when it survives the change.
    pub fn set_view(&mut self, view: &FilteredCatalog) {
        let previous = self.selected().map(str::to_owned);

        self.rows.clear();
        self.entry_rows.clear();
        for section in view.sections() {
            if self.hide_empty && section.is_empty() {
                continue;
            }
            self.rows.push(Row::Header {
                title: section.title().to_string(),
                count: section.len(),
            });
            for entry in section.entries() {
                self.entry_rows.push(self.rows.len());
                self.rows.push(Row::Entry {
                    name: entry.name().to_string(),
                    description: entry.description().to_string(),
                });
            }
        }

        self.cursor = if self.entry_rows.is_empty() {
            None
        } else {
            previous
                .and_then(|name| self.position_of(&name))
                .or(Some(0))
        };
    }

    /// Name of the entry under the cursor.
    pub fn selected(&self) -> Option<&str> {
        let row = *self.entry_rows.get(self.cursor?)?;
        match &self.rows[row] {
            Row::Entry { name, .. } => Some(name),
            Row::Header { .. } => None,
        }
    }

    /// Move the cursor to the named entry.  Returns `false` if it is not
    /// visible.
    pub fn select(&mut self, name: &str) -> bool {
        match self.position_of(name) {
            Some(pos) => {
                self.cursor = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Number of visible entry rows.
    pub fn entry_count(&self) -> usize {
        self.entry_rows.len()
    }

    /// Titles of the section headers currently drawn.
    pub fn headers(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Header { title, .. } => Some(title.as_str()),
                Row::Entry { .. } => None,
            })
            .collect()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.entry_rows.iter().position(|&row| {
            matches!(&self.rows[row], Row::Entry { name: n, .. } if n == name)
        })
    }

    fn move_to(&mut self, pos: usize) -> Command<Message> {
        if self.entry_rows.is_empty() {
            return Command::none();
        }
        let pos = pos.min(self.entry_rows.len() - 1);
        if self.cursor == Some(pos) {
            return Command::none();
        }
        self.cursor = Some(pos);
        match self.selected() {
            Some(name) => Command::message(Message::Select(name.to_string())),
            None => Command::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let current = self.cursor.unwrap_or(0);
        let page = self.page_height.get().max(1);

        if self.keys.up.matches(&key) {
            self.move_to(current.saturating_sub(1))
        } else if self.keys.down.matches(&key) {
            self.move_to(current + 1)
        } else if self.keys.first.matches(&key) {
            self.move_to(0)
        } else if self.keys.last.matches(&key) {
            self.move_to(usize::MAX)
        } else if self.keys.page_up.matches(&key) {
            self.move_to(current.saturating_sub(page))
        } else if self.keys.page_down.matches(&key) {
            self.move_to(current.saturating_add(page))
        } else if self.keys.confirm.matches(&key) {
            match self.selected() {
                Some(name) => Command::message(Message::Confirm(name.to_string())),
                None => Command::none(),
            }
        } else {
            Command::none()
        }
    }

    fn render_row<'a>(&'a self, row: &'a Row) -> ListItem<'a> {
        match row {
            Row::Header { title, count } => {
                let style = if *count == 0 {
                    self.style.empty_header
                } else {
                    self.style.header
                };
                ListItem::new(Line::from(vec![
                    Span::styled(title.as_str(), style),
                    Span::styled(format!(" ({count})"), self.style.description),
                ]))
            }
            Row::Entry { name, description } => {
                let mut spans = vec![Span::styled(format!("  {name}"), self.style.entry)];
                if !description.is_empty() {
                    spans.push(Span::styled(format!("  {description}"), self.style.description));
                }
                ListItem::new(Line::from(spans))
            }
        }
    }
}

impl Component for SectionList {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focused => self.handle_key(key),
            Message::KeyPress(_) | Message::Select(_) | Message::Confirm(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        self.page_height.set(area.height as usize);

        if self.entry_rows.is_empty() && (self.hide_empty || self.rows.is_empty()) {
            frame.render_widget(
                Paragraph::new(self.empty_message.as_str())
                    .style(self.style.description)
                    .centered(),
                area,
            );
            return;
        }

        let mut items: Vec<ListItem> = self.rows.iter().map(|row| self.render_row(row)).collect();
        if self.entry_rows.is_empty() {
            items.push(ListItem::new(Span::styled(
                format!("  {}", self.empty_message),
                self.style.description,
            )));
        }
        let list = List::new(items)
            .highlight_style(self.style.selected)
            .highlight_symbol(self.style.highlight_symbol)
            .highlight_spacing(HighlightSpacing::Always);

        let selected_row = self.cursor.and_then(|c| self.entry_rows.get(c).copied());
        let mut state = ListState::default().with_selected(selected_row);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use explorer_core::{filter, Catalog, Entry};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn catalog() -> Catalog {
        Catalog::builder()
            .section("Text", [
                Entry::new("Label", "Displays a label.", "tag", "u"),
                Entry::new("TextField", "A text input field.", "text.cursor", "u"),
            ])
            .section("Controls", [
                Entry::new("Button", "A button control.", "rectangle", "u"),
                Entry::new("Toggle", "A toggle switch.", "switch.2", "u"),
                Entry::new("Slider", "A slider control.", "slider", "u"),
            ])
            .build()
            .unwrap()
    }

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn render(list: &SectionList, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                list.view(f, area);
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn first_entry_selected_initially() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), ""));
        assert_eq!(list.selected(), Some("Label"));
        assert_eq!(list.entry_count(), 5);
    }

    #[test]
    fn cursor_skips_headers() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), ""));
        list.update(key(KeyCode::Down));
        let cmd = list.update(key(KeyCode::Down));
        assert_eq!(list.selected(), Some("Button"));
        assert_eq!(cmd.into_message(), Some(Message::Select("Button".into())));
    }

    #[test]
    fn cursor_clamps_at_ends() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), ""));
        assert!(list.update(key(KeyCode::Up)).is_none());
        list.update(key(KeyCode::End));
        assert_eq!(list.selected(), Some("Slider"));
        assert!(list.update(key(KeyCode::Down)).is_none());
        list.update(key(KeyCode::Home));
        assert_eq!(list.selected(), Some("Label"));
    }

    #[test]
    fn enter_confirms_selected() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), "tog"));
        let cmd = list.update(key(KeyCode::Enter));
        assert_eq!(cmd.into_message(), Some(Message::Confirm("Toggle".into())));
    }

    #[test]
    fn selection_survives_refilter() {
        let catalog = catalog();
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog, ""));
        assert!(list.select("Slider"));

        list.set_view(&filter(&catalog, "control"));
        assert_eq!(list.selected(), Some("Slider"));

        list.set_view(&filter(&catalog, "label"));
        assert_eq!(list.selected(), Some("Label"));
    }

    #[test]
    fn empty_sections_keep_headers_by_default() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), "tog"));
        assert_eq!(list.headers(), ["Text", "Controls"]);
    }

    #[test]
    fn empty_sections_can_be_hidden() {
        let mut list = SectionList::new().hide_empty_sections(true);
        list.set_view(&filter(&catalog(), "tog"));
        assert_eq!(list.headers(), ["Controls"]);
    }

    #[test]
    fn no_matches_has_no_selection() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), "zzz"));
        assert_eq!(list.selected(), None);
        assert!(list.update(key(KeyCode::Enter)).is_none());
        assert!(list.update(key(KeyCode::Down)).is_none());
    }

    #[test]
    fn blurred_list_ignores_keys() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), ""));
        list.blur();
        assert!(list.update(key(KeyCode::Down)).is_none());
        assert_eq!(list.selected(), Some("Label"));
    }

    #[test]
    fn arrow_keys_leave_letters_alone() {
        let mut list = SectionList::new().with_keys(SectionListKeys::arrows());
        list.set_view(&filter(&catalog(), ""));
        assert!(list.update(key(KeyCode::Char('j'))).is_none());
        list.update(key(KeyCode::Down));
        assert_eq!(list.selected(), Some("TextField"));
    }

    #[test]
    fn key_set_reports_handled_keys() {
        let keys = SectionListKeys::arrows();
        let Message::KeyPress(down) = key(KeyCode::Down) else { unreachable!() };
        let Message::KeyPress(letter) = key(KeyCode::Char('k')) else { unreachable!() };
        assert!(keys.matches(&down));
        assert!(!keys.matches(&letter));
        assert!(SectionListKeys::default().matches(&letter));
    }

    #[test]
    fn renders_headers_and_entries() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), ""));
        let out = render(&list, 50, 8);
        assert!(out.contains("Text (2)"));
        assert!(out.contains("Controls (3)"));
        assert!(out.contains("▸   Label"));
        assert!(out.contains("A toggle switch."));
    }

    #[test]
    fn renders_no_results_when_hidden_and_empty() {
        let mut list = SectionList::new().hide_empty_sections(true);
        list.set_view(&filter(&catalog(), "zzz"));
        assert!(render(&list, 30, 3).contains("No results"));
    }

    #[test]
    fn renders_empty_headers_when_shown() {
        let mut list = SectionList::new();
        list.set_view(&filter(&catalog(), "zzz"));
        let out = render(&list, 30, 6);
        assert!(out.contains("Text (0)"));
        assert!(out.contains("Controls (0)"));
        assert!(out.contains("No results"));
    }
}
