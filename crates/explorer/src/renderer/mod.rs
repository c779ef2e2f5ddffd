//! Live examples shown on the detail screen.
//!
//! Each catalog entry name maps to a [`PreviewFactory`] in a
//! [`PreviewRegistry`].  The catalog itself knows nothing about previews;
//! names without a registered factory get a placeholder.

mod containers;
mod controls;
mod lists;
mod text;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::fetch::{FetchError, Fetched};

/// Something a preview asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open this link with the configured opener.
    Open(String),
    /// Call [`Preview::tick`] after the delay.
    TickAfter(Duration),
    /// Download this image and hand the result to [`Preview::fetched`].
    Fetch(String),
}

/// An interactive (or static) example of one widget.
pub trait Preview: Send {
    /// Called once when the detail screen opens.
    fn start(&mut self) -> Effect {
        Effect::None
    }

    /// Handle a key.  Returns `None` when the key was not used, so the
    /// application can apply its own binding.
    fn handle_key(&mut self, _key: &KeyEvent) -> Option<Effect> {
        None
    }

    /// Timer callback requested through [`Effect::TickAfter`].
    fn tick(&mut self) -> Effect {
        Effect::None
    }

    /// Result of an [`Effect::Fetch`].
    fn fetched(&mut self, _result: Result<Fetched, FetchError>) {}

    /// One-line key hint, empty for static previews.
    fn hint(&self) -> &'static str {
        ""
    }

    fn view(&self, frame: &mut Frame, area: Rect);
}

pub type PreviewFactory = fn() -> Box<dyn Preview>;

/// Maps entry names to preview factories.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    factories: HashMap<String, PreviewFactory>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with an example for every built-in catalog entry.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        text::register(&mut registry);
        controls::register(&mut registry);
        containers::register(&mut registry);
        lists::register(&mut registry);
        registry
    }

    /// Register `factory` under `name`, returning the factory it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: PreviewFactory,
    ) -> Option<PreviewFactory> {
        self.factories.insert(name.into(), factory)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Build the preview for `name`, or a placeholder if none is registered.
    pub fn create(&self, name: &str) -> Box<dyn Preview> {
        match self.factories.get(name) {
            Some(factory) => factory(),
            None => {
                tracing::debug!(name, "no preview registered");
                Box::new(Unsupported {
                    name: name.to_string(),
                })
            }
        }
    }
}

/// Placeholder for names with no registered example.
struct Unsupported {
    name: String,
}

impl Preview for Unsupported {
    fn view(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::raw("Component not supported."),
            Line::styled(
                format!("No live example is registered for {:?}.", self.name),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
    }
}

/// The key code, if the key was pressed without Ctrl or Alt.
fn plain(key: &KeyEvent) -> Option<KeyCode> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        None
    } else {
        Some(key.code)
    }
}

/// Shorthand for "key used, nothing else to do".
fn consumed() -> Option<Effect> {
    Some(Effect::None)
}


#[cfg(test)]
mod tests {
    use super::testing::{key, render};
    use super::*;
    use explorer_core::CatalogStore;

    #[test]
    fn every_seeded_entry_has_a_preview() {
        let store = CatalogStore::seeded().unwrap();
        let registry = PreviewRegistry::builtin();
        for entry in store.catalog().entries() {
            assert!(registry.contains(entry.name()), "missing preview for {}", entry.name());
        }
        assert_eq!(registry.len(), store.catalog().len());
    }

    #[test]
    fn unknown_name_gets_placeholder() {
        let registry = PreviewRegistry::builtin();
        let preview = registry.create("Nonexistent");
        let out = render(preview.as_ref(), 60, 3);
        assert!(out.contains("Component not supported."));
        assert!(out.contains("\"Nonexistent\""));
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = PreviewRegistry::new();
        assert_eq!(registry.len(), 0);
        let placeholder: PreviewFactory = || {
            Box::new(Unsupported {
                name: "custom".into(),
            })
        };
        assert!(registry.register("Toggle", placeholder).is_none());
        assert!(registry.register("Toggle", placeholder).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ctrl_keys_are_not_plain() {
        let mut ev = key(KeyCode::Char('o'));
        assert_eq!(plain(&ev), Some(KeyCode::Char('o')));
        ev.modifiers = KeyModifiers::CONTROL;
        assert_eq!(plain(&ev), None);
    }
}
