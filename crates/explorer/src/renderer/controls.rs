use std::time::Duration;

use chrono::{Local, NaiveDate, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, Gauge, LineGauge, List, ListItem, ListState, Paragraph, Tabs,
};
use ratatui::Frame;

use super::{consumed, plain, Effect, Preview, PreviewRegistry};

const OPTIONS: [&str; 3] = ["Option 1", "Option 2", "Option 3"];
const APPLE: &str = "https://www.apple.com";
const PROGRESS_STEP: Duration = Duration::from_millis(100);

pub(super) fn register(registry: &mut PreviewRegistry) {
    registry.register("Button", || Box::new(Buttons::default()));
    registry.register("Menu", || Box::new(Menu::default()));
    registry.register("Link", || Box::new(LinkPreview));
    registry.register("Slider", || Box::new(Slider { percent: 50 }));
    registry.register("Stepper", || Box::new(Stepper { value: 0 }));
    registry.register("Toggle", || Box::new(Toggle { on: false }));
    registry.register("Picker", || Box::new(Picker { selected: 0 }));
    registry.register("DatePicker", || Box::new(DatePicker::today()));
    registry.register("ColorPicker", || Box::new(ColorPicker { index: 0 }));
    registry.register("ProgressView", || Box::new(Progress::default()));
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[derive(Default)]
struct Buttons {
    presses: u32,
}

impl Preview for Buttons {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.presses += 1;
                tracing::debug!(presses = self.presses, "primary button pressed");
                consumed()
            }
            _ => None,
        }
    }

    fn hint(&self) -> &'static str {
        "enter press"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                " Primary Button ",
                Style::default().fg(Color::White).bg(Color::Blue),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                " Disabled Button ",
                Style::default().fg(Color::White).bg(Color::DarkGray),
            )),
            Line::raw(""),
            Line::styled(format!("Pressed {} times", self.presses), muted()),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[derive(Default)]
struct Menu {
    open: bool,
    highlighted: usize,
    chosen: Option<usize>,
}

impl Menu {
    fn label(&self) -> &'static str {
        self.chosen.map(|i| OPTIONS[i]).unwrap_or("Select an option")
    }
}

impl Preview for Menu {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        let code = plain(key)?;
        if !self.open {
            return match code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open = true;
                    consumed()
                }
                _ => None,
            };
        }
        match code {
            KeyCode::Up => self.highlighted = self.highlighted.saturating_sub(1),
            KeyCode::Down => self.highlighted = (self.highlighted + 1).min(OPTIONS.len() - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.chosen = Some(self.highlighted);
                self.open = false;
            }
            KeyCode::Esc => self.open = false,
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        if self.open {
            "↑/↓ move · enter choose · esc close"
        } else {
            "enter open menu"
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let [button, popup] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(5)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {} ", self.label()), Style::default().bg(Color::DarkGray)),
                Span::raw(" ▾"),
            ])),
            button,
        );

        if self.open {
            let [popup] = Layout::horizontal([Constraint::Length(16)]).areas(popup);
            let items: Vec<ListItem> = OPTIONS.iter().map(|o| ListItem::new(*o)).collect();
            let list = List::new(items)
                .block(Block::new().borders(Borders::ALL))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = ListState::default().with_selected(Some(self.highlighted));
            frame.render_widget(Clear, popup);
            frame.render_stateful_widget(list, popup, &mut state);
        }
    }
}

struct LinkPreview;

impl Preview for LinkPreview {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Enter => Some(Effect::Open(APPLE.to_string())),
            _ => None,
        }
    }

    fn hint(&self) -> &'static str {
        "enter follow link"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            "Open Apple",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Value in hundredths so repeated steps stay exact.
struct Slider {
    percent: u8,
}

impl Preview for Slider {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Left => self.percent = self.percent.saturating_sub(5),
            KeyCode::Right => self.percent = (self.percent + 5).min(100),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "←/→ adjust"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let [gauge, label] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(area);
        frame.render_widget(
            LineGauge::default()
                .filled_style(Style::default().fg(Color::Blue))
                .unfilled_style(muted())
                .label("")
                .ratio(f64::from(self.percent) / 100.0),
            gauge,
        );
        let value = format!("{}.{:02}", self.percent / 100, self.percent % 100);
        frame.render_widget(Paragraph::new(format!("\nSlider value: {value}")), label);
    }
}

struct Stepper {
    value: u8,
}

impl Preview for Stepper {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Char('-') | KeyCode::Left | KeyCode::Down => {
                self.value = self.value.saturating_sub(1)
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right | KeyCode::Up => {
                self.value = (self.value + 1).min(100)
            }
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "-/+ step"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(format!("Value: {:<5}", self.value)),
            Span::styled(" − ", Style::default().bg(Color::DarkGray)),
            Span::raw(" "),
            Span::styled(" + ", Style::default().bg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

struct Toggle {
    on: bool,
}

impl Preview for Toggle {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.on = !self.on;
                consumed()
            }
            _ => None,
        }
    }

    fn hint(&self) -> &'static str {
        "space toggle"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let switch = if self.on {
            Span::styled(" ON ●", Style::default().fg(Color::Black).bg(Color::Green))
        } else {
            Span::styled("● OFF", Style::default().fg(Color::White).bg(Color::DarkGray))
        };
        let line = Line::from(vec![Span::raw("Toggle me  "), switch]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Segmented picker over [`OPTIONS`].
struct Picker {
    selected: usize,
}

impl Preview for Picker {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Left => self.selected = self.selected.saturating_sub(1),
            KeyCode::Right => self.selected = (self.selected + 1).min(OPTIONS.len() - 1),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "←/→ choose"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let [tabs, label] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(2)]).areas(area);
        frame.render_widget(
            Tabs::new(OPTIONS)
                .select(self.selected)
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan)),
            tabs,
        );
        frame.render_widget(
            Paragraph::new(format!("\nSelected Option: {}", OPTIONS[self.selected])),
            label,
        );
    }
}

struct DatePicker {
    date: NaiveDate,
}

impl DatePicker {
    /// Starts on the local calendar day.
    fn today() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }

    /// Move by `days`, staying put at the ends of the supported range.
    fn step(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(TimeDelta::days(days)) {
            self.date = date;
        }
    }

    fn formatted(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }
}

impl Preview for DatePicker {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            KeyCode::Up => self.step(-7),
            KeyCode::Down => self.step(7),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "←/→ day · ↑/↓ week"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let date = self.formatted();
        let lines = vec![
            Line::from(vec![
                Span::raw("Select a date  "),
                Span::styled(format!(" {date} "), Style::default().bg(Color::DarkGray)),
            ]),
            Line::raw(""),
            Line::raw(format!("Selected Date: {date}")),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

const COLORS: [(&str, Color); 6] = [
    ("Blue", Color::Blue),
    ("Red", Color::Red),
    ("Green", Color::Green),
    ("Yellow", Color::Yellow),
    ("Magenta", Color::Magenta),
    ("Cyan", Color::Cyan),
];

struct ColorPicker {
    index: usize,
}

impl Preview for ColorPicker {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Left => self.index = (self.index + COLORS.len() - 1) % COLORS.len(),
            KeyCode::Right => self.index = (self.index + 1) % COLORS.len(),
            _ => return None,
        }
        consumed()
    }

    fn hint(&self) -> &'static str {
        "←/→ color"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let (name, color) = COLORS[self.index];
        let [picker, swatch] =
            Layout::vertical([Constraint::Length(2), Constraint::Length(3)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Select a color  "),
                Span::styled("  ", Style::default().bg(color)),
                Span::raw(format!(" {name}")),
            ])),
            picker,
        );
        let [swatch] = Layout::horizontal([Constraint::Length(24)]).areas(swatch);
        frame.render_widget(
            Paragraph::new("Selected Color:")
                .style(Style::default().bg(color).fg(Color::Black))
                .block(Block::new().borders(Borders::ALL)),
            swatch,
        );
    }
}

#[derive(Default)]
struct Progress {
    percent: u16,
    running: bool,
}

impl Preview for Progress {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Enter | KeyCode::Char(' ') if !self.running => {
                self.percent = 0;
                self.running = true;
                Some(Effect::TickAfter(PROGRESS_STEP))
            }
            KeyCode::Enter | KeyCode::Char(' ') => consumed(),
            _ => None,
        }
    }

    fn tick(&mut self) -> Effect {
        if !self.running {
            return Effect::None;
        }
        self.percent = (self.percent + 1).min(100);
        if self.percent == 100 {
            self.running = false;
            Effect::None
        } else {
            Effect::TickAfter(PROGRESS_STEP)
        }
    }

    fn hint(&self) -> &'static str {
        "enter simulate progress"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let [gauge, button] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(2)]).areas(area);
        frame.render_widget(
            Gauge::default()
                .block(Block::new().title("Loading..."))
                .gauge_style(Style::default().fg(Color::Blue))
                .percent(self.percent),
            gauge,
        );
        let style = if self.running { muted() } else { Style::default().bg(Color::DarkGray) };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(" Simulate Progress ", style))),
            button,
        );
    }
}
