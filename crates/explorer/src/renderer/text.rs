use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::{consumed, plain, Effect, Preview, PreviewRegistry};
use crate::fetch::{FetchError, Fetched};

const PHOTO: &str = concat!(
    "https://images.unsplash.com/photo-1635805737707-575885ab0820",
    "?q=80&w=774&auto=format&fit=crop"
);

pub(super) fn register(registry: &mut PreviewRegistry) {
    registry.register("Text", || Box::new(StaticText));
    registry.register("Label", || Box::new(Label));
    registry.register("TextField", || Box::new(TextInput::field("Enter text here", "Sample text")));
    registry.register("SecureField", || {
        Box::new(TextInput::secure("Enter secure text here", "Password"))
    });
    registry.register("TextArea", || Box::new(TextInput::area("This is a TextEditor.")));
    registry.register("Image", || Box::new(ImagePreview::Loading));
}

struct StaticText;

impl Preview for StaticText {
    fn view(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new("This is a Text component."), area);
    }
}

struct Label;

impl Preview for Label {
    fn view(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("★ ", Style::default().fg(Color::Yellow)),
            Span::raw("This is a Label"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Editable text box: single line, masked single line, or multi-line.
struct TextInput {
    title: &'static str,
    value: String,
    masked: bool,
    multiline: bool,
}

impl TextInput {
    fn field(title: &'static str, value: &str) -> Self {
        Self {
            title,
            value: value.to_string(),
            masked: false,
            multiline: false,
        }
    }

    fn secure(title: &'static str, value: &str) -> Self {
        Self {
            masked: true,
            ..Self::field(title, value)
        }
    }

    fn area(value: &str) -> Self {
        Self {
            multiline: true,
            ..Self::field("", value)
        }
    }

    fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

impl Preview for TextInput {
    fn handle_key(&mut self, key: &KeyEvent) -> Option<Effect> {
        match plain(key)? {
            KeyCode::Char(c) => {
                self.value.push(c);
                consumed()
            }
            KeyCode::Backspace => {
                self.value.pop();
                consumed()
            }
            KeyCode::Enter if self.multiline => {
                self.value.push('\n');
                consumed()
            }
            _ => None,
        }
    }

    fn hint(&self) -> &'static str {
        "type to edit"
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let height = if self.multiline { area.height.min(8) } else { 3 };
        let [input] = Layout::vertical([Constraint::Length(height)]).areas(area);

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .title(self.title);

        let cursor = Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED));
        let mut lines: Vec<Line> = self
            .display()
            .split('\n')
            .map(|l| Line::raw(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.push_span(cursor);
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            input,
        );
    }
}

/// Terminals cannot show the remote photo, so the fallback symbol is drawn
/// instead.
/// Remote photo: loading, then the download's metadata, or the fallback
/// symbol when it failed.
#[derive(Debug, PartialEq, Eq)]
enum ImagePreview {
    Loading,
    Loaded(Fetched),
    Failed,
}

impl Preview for ImagePreview {
    fn start(&mut self) -> Effect {
        *self = ImagePreview::Loading;
        Effect::Fetch(PHOTO.to_string())
    }

    fn fetched(&mut self, result: Result<Fetched, FetchError>) {
        *self = match result {
            Ok(fetched) => ImagePreview::Loaded(fetched),
            Err(err) => {
                tracing::debug!(error = %err, "showing fallback image");
                ImagePreview::Failed
            }
        };
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let caption_style = Style::default().fg(Color::DarkGray);
        let (art, caption) = match self {
            ImagePreview::Loading => {
                frame.render_widget(
                    Paragraph::new("⟳ Loading image...").style(caption_style),
                    area,
                );
                return;
            }
            ImagePreview::Loaded(fetched) => (
                vec![
                    Line::raw("▓▓▓▓▓▓▓▓▓▓▓▓▓▓"),
                    Line::raw("▓▓▒▒▓▓▓▓▒▒▒▓▓▓"),
                    Line::raw("▓▒▒▒▒▓▓▒▒▒▒▒▓▓"),
                    Line::raw("▒▒▒▒▒▒▒▒▒▒▒▒▒▒"),
                ],
                format!("photo loaded ({})", fetched.summary()),
            ),
            ImagePreview::Failed => (
                vec![
                    Line::raw("   ☀       "),
                    Line::raw("      /\\    "),
                    Line::raw("  /\\ /  \\   "),
                    Line::raw(" /  \\    \\  "),
                ],
                "photo (the image could not be loaded)".to_string(),
            ),
        };

        let [frame_area, caption_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Length(1)]).areas(area);
        let [picture] = Layout::horizontal([Constraint::Length(16)]).areas(frame_area);
        frame.render_widget(
            Paragraph::new(art).block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            ),
            picture,
        );
        frame.render_widget(Paragraph::new(caption).style(caption_style), caption_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{key, render};

    #[test]
    fn text_field_edits() {
        let mut field = TextInput::field("Enter text here", "Sample text");
        assert_eq!(field.handle_key(&key(KeyCode::Char('!'))), Some(Effect::None));
        assert_eq!(field.value, "Sample text!");
        field.handle_key(&key(KeyCode::Backspace));
        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value, "Sample tex");
        assert_eq!(field.handle_key(&key(KeyCode::Enter)), None);
        assert_eq!(field.handle_key(&key(KeyCode::Esc)), None);
    }

    #[test]
    fn secure_field_is_masked() {
        let field = TextInput::secure("Enter secure text here", "Password");
        let out = render(&field, 40, 3);
        assert!(out.contains("••••••••"));
        assert!(!out.contains("Password"));
        assert!(out.contains("Enter secure text here"));
    }

    #[test]
    fn text_area_accepts_newlines() {
        let mut area = TextInput::area("This is a TextEditor.");
        area.handle_key(&key(KeyCode::Enter));
        area.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(area.value, "This is a TextEditor.\nx");
        let out = render(&area, 40, 8);
        assert!(out.contains("This is a TextEditor."));
    }

    #[test]
    fn static_previews_render() {
        assert!(render(&StaticText, 40, 1).contains("This is a Text component."));
        assert!(render(&Label, 40, 1).contains("This is a Label"));
    }

    #[test]
    fn image_loads_then_reports_download() {
        let mut image = ImagePreview::Loading;
        assert_eq!(image.start(), Effect::Fetch(PHOTO.to_string()));
        assert!(render(&image, 60, 8).contains("Loading image..."));

        image.fetched(Ok(Fetched {
            content_type: "image/jpeg".into(),
            bytes: 4096,
        }));
        let out = render(&image, 60, 8);
        assert!(out.contains("photo loaded (image/jpeg, 4 KB)"));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn image_falls_back_when_fetch_fails() {
        let mut image = ImagePreview::Loading;
        image.start();
        image.fetched(Err(FetchError::Status {
            url: PHOTO.to_string(),
            status: 404,
        }));
        assert_eq!(image, ImagePreview::Failed);
        let out = render(&image, 60, 8);
        assert!(out.contains("☀"));
        assert!(out.contains("could not be loaded"));
    }
}
