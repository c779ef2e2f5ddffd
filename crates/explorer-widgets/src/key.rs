//! Key binding definitions and a compact help line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One or more key combinations mapped to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Combinations that trigger the binding.
    pub keys: Vec<KeyCombination>,
    /// Short key label for help text, e.g. `"↑/k"`.
    pub label: String,
    /// What the binding does.
    pub description: String,
}

/// A key code with required modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key with Ctrl held.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl Binding {
    /// Bind a single combination.
    pub fn new(
        key: KeyCombination,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_keys(vec![key], label, description)
    }

    /// Bind several combinations to the same action.
    pub fn with_keys(
        keys: Vec<KeyCombination>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            label: label.into(),
            description: description.into(),
        }
    }

    /// Whether `event` triggers this binding.
    ///
    /// Extra modifiers on the event are tolerated only when the binding asks
    /// for none of its own, except that Ctrl/Alt never match a plain binding.
    /// This lets `Shift+G` match a binding for `G`.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| {
            if k.code != event.code {
                return false;
            }
            if k.modifiers.is_empty() {
                !event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            } else {
                event.modifiers.contains(k.modifiers)
            }
        })
    }
}

/// Render bindings as `key description · key description`.
pub fn help_line<'a>(bindings: impl IntoIterator<Item = &'a Binding>) -> Line<'a> {
    let key_style = Style::default().fg(Color::Cyan);
    let desc_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for (i, binding) in bindings.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", desc_style));
        }
        spans.push(Span::styled(binding.label.as_str(), key_style));
        spans.push(Span::styled(format!(" {}", binding.description), desc_style));
    }
    Line::from(spans)
}
