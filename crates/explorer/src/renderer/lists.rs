use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{consumed, plain, Effect, Preview, PreviewRegistry};

const ITEMS: usize = 10;

pub(super) fn register(registry: &mut PreviewRegistry) {
    registry.register("Plain", || Box::new(StyledList::new(ListStyle::Plain)));
    registry.register("Inset", || Box::new(StyledList::new(ListStyle::Inset)));
    registry.register("Grouped", || Box::new(StyledList::new(ListStyle::Grouped)));
    registry.register("Inset Grouped", || Box::new(StyledList::new(ListStyle::InsetGrouped)));
    registry.register("Sidebar", || Box::new(StyledList::new(ListStyle::Sidebar)));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Plain,
    Inset,
    Grouped,
    InsetGrouped,
    Sidebar,
}

/// Ten `Item N` rows drawn in one of the list styles.
struct StyledList {
    style: ListStyle,
    cursor: usize,
}

impl StyledList {
    fn new(style: ListStyle) -> Self {
        Self { style, cursor: 0 }
    }

    fn list(&self, block: Option<Block<'static>>) -> List<'static> {
        let row_style = match self.style {
            ListStyle::Plain | ListStyle::Grouped => Style::default(),
            _ => Style::default().bg(Color::Rgb(40, 40, 40)),
        };
        let items: Vec<ListItem> = (0..ITEMS)
            .map(|i| ListItem::new(format!("Item {i}")).style(row_style))
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        match block {
            Some(block) => list.block(block),
            None => list,
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, block: Option<Block<'static>>) {
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(self.list(block), area, &mut state);
    }
}

fn grouped_block(border: BorderType) -> Block<'static> {
    Block::new()
        .borders(Borders::ALL)
        .border_type(border)
        .border_style(Style::default().fg(Color::Gray))
        .title(Line::styled("HEADER", Style::default().fg(Color::DarkGray)))
}

impl Preview for StyledList {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(ITEMS - 1),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "↑/↓ move"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        match self.style {
            ListStyle::Plain => self.render_list(frame, area, None),
            ListStyle::Inset => {
                let inner = area.inner(Margin::new(2, 0));
                self.render_list(frame, inner, None);
            }
            ListStyle::Grouped => {
                self.render_list(frame, area, Some(grouped_block(BorderType::Plain)));
            }
            ListStyle::InsetGrouped => {
                let inner = area.inner(Margin::new(2, 0));
                self.render_list(frame, inner, Some(grouped_block(BorderType::Rounded)));
            }
            ListStyle::Sidebar => {
                let [sidebar, content] =
                    Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(area);
                let block = Block::new()
                    .borders(Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray));
                self.render_list(frame, sidebar, Some(block));
                frame.render_widget(
                    Paragraph::new(format!("  Item {}", self.cursor)),
                    content,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{key, render};

    #[test]
    fn cursor_moves_within_items() {
        let mut list = StyledList::new(ListStyle::Plain);
        assert_eq!(list.handle_key(&key(KeyCode::Up)), Some(Effect::None));
        assert_eq!(list.cursor, 0);
        for _ in 0..20 {
            list.handle_key(&key(KeyCode::Down));
        }
        assert_eq!(list.cursor, ITEMS - 1);
        assert_eq!(list.handle_key(&key(KeyCode::Left)), None);
    }

    #[test]
    fn every_style_renders_items() {
        for style in [
            ListStyle::Plain,
            ListStyle::Inset,
            ListStyle::Grouped,
            ListStyle::InsetGrouped,
            ListStyle::Sidebar,
        ] {
            let out = render(&StyledList::new(style), 50, 12);
            assert!(out.contains("Item 0"), "{style:?} missing first item");
        }
    }

    #[test]
    fn grouped_styles_have_header() {
        let out = render(&StyledList::new(ListStyle::Grouped), 40, 12);
        assert!(out.contains("HEADER"));
        let out = render(&StyledList::new(ListStyle::Plain), 40, 12);
        assert!(!out.contains("HEADER"));
    }

    #[test]
    fn sidebar_shows_selection_beside_list() {
        let mut list = StyledList::new(ListStyle::Sidebar);
        list.handle_key(&key(KeyCode::Down));
        list.handle_key(&key(KeyCode::Down));
        let out = render(&list, 50, 12);
        assert!(out.lines().next().unwrap().contains("Item 2"));
    }
}
