use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{consumed, plain, Effect, Preview, PreviewRegistry};

const STACK_ITEMS: usize = 15;
const NAV_ITEMS: usize = 5;

pub(super) fn register(registry: &mut PreviewRegistry) {
    registry.register("HStack", || Box::new(Stack::new(Axis::Horizontal)));
    registry.register("VStack", || Box::new(Stack::new(Axis::Vertical)));
    registry.register("ZStack", || Box::new(Overlay));
    registry.register("Form", || Box::new(Form));
    registry.register("NavigationView", || Box::new(Navigation::default()));
    registry.register("Alert", || Box::new(Modal::new(ModalKind::Alert)));
    registry.register("Sheet", || Box::new(Modal::new(ModalKind::Sheet)));
}

fn cell_block() -> Block<'static> {
    Block::new()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .style(Style::default().bg(Color::Rgb(60, 60, 60)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

/// A scrollable row or column of `Item N` cells.
struct Stack {
    axis: Axis,
    offset: usize,
}

impl Stack {
    fn new(axis: Axis) -> Self {
        Self { axis, offset: 0 }
    }
}

impl Preview for Stack {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        let (back, forward) = match self.axis {
            Axis::Horizontal => (KeyCode::Left, KeyCode::Right),
            Axis::Vertical => (KeyCode::Up, KeyCode::Down),
        };
        let code = plain(key)?;
        if code == back {
            self.offset = self.offset.saturating_sub(1);
        } else if code == forward {
            self.offset = (self.offset + 1).min(STACK_ITEMS - 1);
        } else {
            return None;
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        match self.axis {
            Axis::Horizontal => "←/→ scroll",
            Axis::Vertical => "↑/↓ scroll",
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let (cell, available) = match self.axis {
            Axis::Horizontal => (Constraint::Length(10), area.width / 10),
            Axis::Vertical => (Constraint::Length(3), area.height / 3),
        };
        let visible = (STACK_ITEMS - self.offset).min(available as usize);
        let constraints = vec![cell; visible];
        let cells = match self.axis {
            Axis::Horizontal => Layout::horizontal(constraints).split(area),
            Axis::Vertical => Layout::vertical(constraints).split(area),
        };
        for (i, cell_area) in cells.iter().enumerate() {
            let label = format!("Item {}", self.offset + i);
            frame.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .block(cell_block()),
                *cell_area,
            );
        }
    }
}

struct Overlay;

impl Preview for Overlay {
    fn view(&self, frame: &mut Frame, area: Rect) {
        let [square] = Layout::horizontal([Constraint::Length(20)]).areas(area);
        let [square] = Layout::vertical([Constraint::Length(7)]).areas(square);
        frame.render_widget(Block::new().style(Style::default().bg(Color::Blue)), square);

        let [middle] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(square);
        frame.render_widget(
            Paragraph::new("Overlay")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White).bg(Color::Blue)),
            middle,
        );
    }
}

struct Form;

impl Preview for Form {
    fn view(&self, frame: &mut Frame, area: Rect) {
        let rows = vec![
            Line::raw("Name      Sample Name"),
            Line::raw(""),
            Line::from(vec![
                Span::raw("Active    "),
                Span::styled(" ON ●", Style::default().fg(Color::Black).bg(Color::Green)),
            ]),
        ];
        let [form] = Layout::vertical([Constraint::Length(5)]).areas(area);
        frame.render_widget(
            Paragraph::new(rows).block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Gray)),
            ),
            form,
        );
    }
}

/// A list that pushes a detail page on Enter.
#[derive(Default)]
struct Navigation {
    cursor: usize,
    opened: Option<usize>,
}

impl Preview for Navigation {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        let code = plain(key)?;
        if self.opened.is_some() {
            return match code {
                KeyCode::Left | KeyCode::Esc | KeyCode::Backspace => {
                    self.opened = None;
                    consumed()
                }
                _ => None,
            };
        }
        match code {
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(NAV_ITEMS - 1),
            KeyCode::Enter | KeyCode::Right => self.opened = Some(self.cursor),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        if self.opened.is_some() {
            "← back"
        } else {
            "↑/↓ move · enter push"
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));

        match self.opened {
            Some(index) => {
                let title = format!("‹ Navigation Example  /  Item {index}");
                let block = block.title(Line::from(title));
                frame.render_widget(
                    Paragraph::new(format!("Detail for item {index}")).block(block),
                    area,
                );
            }
            None => {
                let items: Vec<ListItem> = (0..NAV_ITEMS)
                    .map(|i| ListItem::new(format!("Item {i}  ›")))
                    .collect();
                let list = List::new(items)
                    .block(block.title("Navigation Example"))
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
                let mut state = ListState::default().with_selected(Some(self.cursor));
                frame.render_stateful_widget(list, area, &mut state);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalKind {
    Alert,
    Sheet,
}

/// A trigger button that presents an alert or sheet.
struct Modal {
    kind: ModalKind,
    shown: bool,
}

impl Modal {
    fn new(kind: ModalKind) -> Self {
        Self { kind, shown: false }
    }

    fn trigger_label(&self) -> &'static str {
        match self.kind {
            ModalKind::Alert => " Show Alert ",
            ModalKind::Sheet => " Show Sheet ",
        }
    }
}

impl Preview for Modal {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match (plain(key)?, self.shown) {
            (KeyCode::Enter | KeyCode::Char(' '), false) => self.shown = true,
            (KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc, true) => self.shown = false,
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        match (self.kind, self.shown) {
            (ModalKind::Alert, false) => "enter show alert",
            (ModalKind::Sheet, false) => "enter show sheet",
            (_, true) => "enter dismiss",
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(Line::styled(
                self.trigger_label(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )),
            area,
        );
        if !self.shown {
            return;
        }

        let (popup, lines) = match self.kind {
            ModalKind::Alert => {
                let [row] = Layout::vertical([Constraint::Length(6)])
                    .flex(Flex::Center)
                    .areas(area);
                let [popup] = Layout::horizontal([Constraint::Length(36)])
                    .flex(Flex::Center)
                    .areas(row);
                let lines = vec![
                    Line::styled("Alert Title", Style::default().add_modifier(Modifier::BOLD)),
                    Line::raw("This is an example of an alert."),
                    Line::raw(""),
                    Line::styled("OK", Style::default().fg(Color::Blue)),
                ];
                (popup, lines)
            }
            ModalKind::Sheet => {
                let [_, popup] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
                    .areas(area);
                let lines = vec![
                    Line::styled(
                        "This is a modal sheet!",
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::raw(""),
                    Line::styled("Dismiss", Style::default().fg(Color::Blue)),
                ];
                (popup, lines)
            }
        };

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{key, render};

    #[test]
    fn horizontal_stack_scrolls_sideways() {
        let mut stack = Stack::new(Axis::Horizontal);
        assert_eq!(stack.handle_key(&key(KeyCode::Down)), None);
        stack.handle_key(&key(KeyCode::Right));
        stack.handle_key(&key(KeyCode::Right));
        let out = render(&stack, 40, 3);
        assert!(out.contains("Item 2"));
        assert!(!out.contains("Item 1 "));
    }

    #[test]
    fn vertical_stack_stops_at_last_item() {
        let mut stack = Stack::new(Axis::Vertical);
        for _ in 0..40 {
            stack.handle_key(&key(KeyCode::Down));
        }
        assert_eq!(stack.offset, STACK_ITEMS - 1);
        assert!(render(&stack, 20, 9).contains("Item 14"));
    }

    #[test]
    fn zstack_overlays_text() {
        assert!(render(&Overlay, 30, 8).contains("Overlay"));
    }

    #[test]
    fn form_shows_fields() {
        let out = render(&Form, 40, 5);
        assert!(out.contains("Sample Name"));
        assert!(out.contains("Active"));
    }

    #[test]
    fn navigation_pushes_and_pops() {
        let mut nav = Navigation::default();
        nav.handle_key(&key(KeyCode::Down));
        nav.handle_key(&key(KeyCode::Enter));
        assert_eq!(nav.opened, Some(1));
        assert!(render(&nav, 50, 5).contains("Detail for item 1"));

        assert_eq!(nav.handle_key(&key(KeyCode::Esc)), Some(Effect::None));
        assert_eq!(nav.opened, None);
        assert_eq!(nav.handle_key(&key(KeyCode::Esc)), None);
    }

    #[test]
    fn alert_presents_and_dismisses() {
        let mut alert = Modal::new(ModalKind::Alert);
        assert!(!render(&alert, 50, 10).contains("Alert Title"));
        alert.handle_key(&key(KeyCode::Enter));
        let out = render(&alert, 50, 10);
        assert!(out.contains("Alert Title"));
        assert!(out.contains("This is an example of an alert."));
        assert_eq!(alert.handle_key(&key(KeyCode::Esc)), Some(Effect::None));
        assert!(!alert.shown);
    }

    #[test]
    fn sheet_presents_and_dismisses() {
        let mut sheet = Modal::new(ModalKind::Sheet);
        assert_eq!(sheet.handle_key(&key(KeyCode::Esc)), None);
        sheet.handle_key(&key(KeyCode::Char(' ')));
        assert!(render(&sheet, 50, 10).contains("This is a modal sheet!"));
        sheet.handle_key(&key(KeyCode::Enter));
        assert!(!sheet.shown);
    }
}
