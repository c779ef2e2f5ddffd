use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable piece of UI that renders into a region chosen by its parent.
///
/// Like [`Model`](crate::Model), but [`view`](Component::view) receives the
/// [`Rect`] to draw into.  A parent wraps the child's message type in one of
/// its own variants and translates commands with [`Command::map`]:
///
/// ```rust,ignore
/// Msg::Search(m) => self.search.update(m).map(Msg::Search),
/// ```
pub trait Component {
    /// Messages this component understands and emits.
    type Message: Send + 'static;

    /// Handle one message.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw into `area`.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether the component currently receives keyboard input.
    fn focused(&self) -> bool {
        false
    }
}
