//! The explorer application: a searchable list screen and a detail screen
//! with a live example.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use explorer_core::{CatalogStore, Entry, FilterCache};
use explorer_runtime::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use explorer_widgets::chrome::focus_block;
use explorer_widgets::key::{help_line, Binding, KeyCombination};
use explorer_widgets::section_list::{self, SectionListKeys};
use explorer_widgets::search_bar;
use explorer_widgets::{SearchBar, SectionList};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use url::Url;

use crate::config::ExplorerConfig;
use crate::fetch::{FetchError, Fetched, Fetcher};
use crate::link::{self, LinkError, Opener};
use crate::renderer::{Effect, Preview, PreviewRegistry};

const TITLE: &str = "Widget Explorer";

/// Startup data for [`Explorer`].
pub struct ExplorerFlags {
    pub store: CatalogStore,
    pub registry: PreviewRegistry,
    pub fetcher: Fetcher,
    pub config: ExplorerConfig,
}

pub enum Msg {
    Key(KeyEvent),
    Paste(String),
    Resize,
    Search(search_bar::Message),
    List(section_list::Message),
    /// Timer for the preview opened as detail screen number `generation`.
    PreviewTick { generation: u64 },
    /// Download requested by the preview of detail screen `generation`.
    PreviewFetched {
        generation: u64,
        result: Result<Fetched, FetchError>,
    },
    LinkOpened(Result<Url, LinkError>),
}

struct Keys {
    quit: Binding,
    back: Binding,
    open_docs: Binding,
    navigate: Binding,
    open: Binding,
    clear: Binding,
}

impl Keys {
    fn new() -> Self {
        Self {
            quit: Binding::new(KeyCombination::ctrl(KeyCode::Char('c')), "^c", "quit"),
            back: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Esc),
                    KeyCombination::new(KeyCode::Backspace),
                ],
                "esc",
                "back",
            ),
            open_docs: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Char('o')),
                    KeyCombination::ctrl(KeyCode::Char('o')),
                ],
                "o",
                "open docs",
            ),
            navigate: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Down),
                ],
                "↑/↓",
                "move",
            ),
            open: Binding::new(KeyCombination::new(KeyCode::Enter), "enter", "details"),
            clear: Binding::new(KeyCombination::new(KeyCode::Esc), "esc", "clear/quit"),
        }
    }
}

struct Status {
    text: String,
    error: bool,
}

enum Screen {
    List,
    Detail(Detail),
}

struct Detail {
    entry: Entry,
    preview: Box<dyn Preview>,
    generation: u64,
}

pub struct Explorer {
    store: CatalogStore,
    registry: PreviewRegistry,
    fetcher: Fetcher,
    opener: Opener,
    cache: FilterCache,
    search: SearchBar,
    list: SectionList,
    screen: Screen,
    status: Option<Status>,
    generation: u64,
    keys: Keys,
}

impl Explorer {
    /// Current search text, exactly as typed.
    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Re-filter with the search bar's query and push the result into the
    /// list.  Runs synchronously, so the view always matches the latest
    /// query.
    fn refresh(&mut self) {
        let view = self.cache.apply(self.search.query());
        self.list.set_view(view);
        self.search.set_match_count(if view.is_unfiltered() {
            None
        } else {
            Some(view.match_count())
        });
    }

    fn set_status(&mut self, text: impl Into<String>, error: bool) {
        self.status = Some(Status {
            text: text.into(),
            error,
        });
    }

    fn open_detail(&mut self, name: &str) -> Command<Msg> {
        let Some(entry) = self.store.lookup(name) else {
            tracing::warn!(name, "selected entry is not in the catalog");
            self.set_status(format!("No widget named {name:?}"), true);
            return Command::none();
        };
        tracing::debug!(name, live = self.registry.contains(name), "opening detail");
        self.generation += 1;
        let mut preview = self.registry.create(name);
        let effect = preview.start();
        self.screen = Screen::Detail(Detail {
            entry: entry.clone(),
            preview,
            generation: self.generation,
        });
        self.status = None;
        Command::batch([
            Command::set_title(format!("{TITLE} · {name}")),
            self.apply_effect(effect),
        ])
    }

    fn close_detail(&mut self) -> Command<Msg> {
        self.screen = Screen::List;
        self.status = None;
        Command::set_title(TITLE)
    }

    fn open_link(&mut self, raw: &str) -> Command<Msg> {
        match link::parse(raw) {
            Ok(url) => {
                self.set_status(format!("Opening {url}"), false);
                let opener = self.opener.clone();
                Command::perform(
                    async move { opener.open(&url).await.map(|()| url) },
                    Msg::LinkOpened,
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "not opening link");
                self.set_status(err.to_string(), true);
                Command::none()
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) -> Command<Msg> {
        match effect {
            Effect::None => Command::none(),
            Effect::Open(url) => self.open_link(&url),
            Effect::TickAfter(delay) => {
                let generation = self.generation;
                Command::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |()| Msg::PreviewTick { generation },
                )
            }
            Effect::Fetch(url) => {
                let generation = self.generation;
                let fetcher = self.fetcher.clone();
                Command::perform(async move { fetcher.fetch(&url).await }, move |result| {
                    Msg::PreviewFetched { generation, result }
                })
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if self.keys.quit.matches(&key) {
            return Command::quit();
        }
        match self.screen {
            Screen::List => self.list_key(key),
            Screen::Detail(_) => self.detail_key(key),
        }
    }

    fn list_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if self.list.keys().matches(&key) {
            self.list
                .update(section_list::Message::KeyPress(key))
                .map(Msg::List)
        } else {
            self.search
                .update(search_bar::Message::KeyPress(key))
                .map(Msg::Search)
        }
    }

    fn detail_key(&mut self, key: KeyEvent) -> Command<Msg> {
        let Screen::Detail(detail) = &mut self.screen else {
            return Command::none();
        };

        // Ctrl+O works even while a preview is capturing text.
        if key.modifiers.contains(KeyModifiers::CONTROL) && self.keys.open_docs.matches(&key) {
            let url = detail.entry.reference_url().to_string();
            return self.open_link(&url);
        }
        if let Some(effect) = detail.preview.handle_key(&key) {
            return self.apply_effect(effect);
        }
        if self.keys.back.matches(&key) {
            self.close_detail()
        } else if self.keys.open_docs.matches(&key) {
            let url = detail.entry.reference_url().to_string();
            self.open_link(&url)
        } else {
            Command::none()
        }
    }

    fn status_line(&self, help: Line<'static>) -> Line<'static> {
        match &self.status {
            Some(status) => {
                let style = if status.error {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(Span::styled(status.text.clone(), style))
            }
            None => help,
        }
    }

    fn view_list(&self, frame: &mut Frame, area: Rect) {
        let [search_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let block = focus_block("Search", true);
        let inner = block.inner(search_area);
        frame.render_widget(block, search_area);
        self.search.view(frame, inner);

        let block = focus_block("Components", self.list.focused());
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);
        self.list.view(frame, inner);

        let help = owned(help_line([
            &self.keys.navigate,
            &self.keys.open,
            &self.keys.clear,
            &self.keys.quit,
        ]));
        frame.render_widget(Paragraph::new(self.status_line(help)), status_area);
    }

    fn view_detail(&self, frame: &mut Frame, area: Rect, detail: &Detail) {
        let entry = &detail.entry;
        let [header_area, preview_area, status_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let label = Style::default().fg(Color::DarkGray);
        let header = vec![
            Line::raw(entry.description().to_string()),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Icon       ", label),
                Span::raw(entry.icon_key().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Reference  ", label),
                Span::styled(
                    entry.reference_url().to_string(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(header)
                .wrap(Wrap { trim: true })
                .block(focus_block(entry.name(), false)),
            header_area,
        );

        let block = focus_block("Example", true);
        let inner = block.inner(preview_area);
        frame.render_widget(block, preview_area);
        detail.preview.view(frame, inner);

        let mut help = owned(help_line([&self.keys.back, &self.keys.open_docs, &self.keys.quit]));
        let hint = detail.preview.hint();
        if !hint.is_empty() {
            help.spans.insert(0, Span::styled(" · ", label));
            help.spans.insert(0, Span::styled(hint, Style::default().fg(Color::Yellow)));
        }
        frame.render_widget(Paragraph::new(self.status_line(help)), status_area);
    }
}

#[cfg(test)]
impl Explorer {
    fn detail_name(&self) -> Option<&str> {
        match &self.screen {
            Screen::Detail(detail) => Some(detail.entry.name()),
            Screen::List => None,
        }
    }

    fn selected(&self) -> Option<&str> {
        self.list.selected()
    }

    fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    fn visible_matches(&self) -> usize {
        self.cache.current().match_count()
    }
}

/// Detach a help line from the bindings it was built from.
fn owned(line: Line<'_>) -> Line<'static> {
    Line::from(
        line.spans
            .into_iter()
            .map(|span| Span::styled(span.content.into_owned(), span.style))
            .collect::<Vec<_>>(),
    )
}

impl Model for Explorer {
    type Message = Msg;
    type Flags = ExplorerFlags;

    fn init(flags: ExplorerFlags) -> (Self, Command<Msg>) {
        let ExplorerFlags {
            store,
            registry,
            fetcher,
            config,
        } = flags;

        let mut search = SearchBar::new().with_placeholder("Search widgets");
        search.set_query(config.initial_query.clone());
        let list = SectionList::new()
            .with_keys(SectionListKeys::arrows())
            .hide_empty_sections(config.hide_empty);

        tracing::info!(
            entries = store.catalog().len(),
            previews = registry.len(),
            opener = config.opener.program(),
            "explorer started"
        );

        let mut explorer = Explorer {
            cache: FilterCache::new(store.shared()),
            store,
            registry,
            fetcher,
            opener: config.opener,
            search,
            list,
            screen: Screen::List,
            status: None,
            generation: 0,
            keys: Keys::new(),
        };
        explorer.refresh();
        (explorer, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Paste(text) => match self.screen {
                Screen::List => self
                    .search
                    .update(search_bar::Message::Paste(text))
                    .map(Msg::Search),
                Screen::Detail(_) => Command::none(),
            },
            Msg::Resize => Command::none(),
            Msg::Search(search_bar::Message::QueryChanged(_)) => {
                self.status = None;
                self.refresh();
                Command::none()
            }
            Msg::Search(search_bar::Message::Cleared) => Command::quit(),
            Msg::Search(search_bar::Message::Submitted) => match self.list.selected() {
                Some(name) => {
                    let name = name.to_string();
                    self.open_detail(&name)
                }
                None => Command::none(),
            },
            Msg::Search(m) => self.search.update(m).map(Msg::Search),
            Msg::List(section_list::Message::Confirm(name)) => self.open_detail(&name),
            Msg::List(section_list::Message::Select(_)) => Command::none(),
            Msg::List(m) => self.list.update(m).map(Msg::List),
            Msg::PreviewTick { generation } => match &mut self.screen {
                Screen::Detail(detail) if detail.generation == generation => {
                    let effect = detail.preview.tick();
                    self.apply_effect(effect)
                }
                _ => Command::none(),
            },
            Msg::PreviewFetched { generation, result } => {
                if let Err(err) = &result {
                    tracing::warn!(error = %err, "preview download failed");
                }
                match &mut self.screen {
                    Screen::Detail(detail) if detail.generation == generation => {
                        detail.preview.fetched(result);
                    }
                    _ => tracing::debug!(generation, "dropping download for a closed preview"),
                }
                Command::none()
            }
            Msg::LinkOpened(Ok(url)) => {
                tracing::info!(url = %url, "link opened");
                self.set_status(format!("Opened {url}"), false);
                Command::none()
            }
            Msg::LinkOpened(Err(err)) => {
                tracing::warn!(error = %err, "failed to open link");
                self.set_status(format!("Could not open link: {err}"), true);
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            Screen::List => self.view_list(frame, area),
            Screen::Detail(detail) => self.view_detail(frame, area, detail),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            TerminalEvent::Resize(..) => Some(Msg::Resize),
            TerminalEvent::FocusGained | TerminalEvent::FocusLost => None,
        })]
    }
}
