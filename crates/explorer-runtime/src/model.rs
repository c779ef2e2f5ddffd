use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime calls [`init`](Model::init) once, renders with
/// [`view`](Model::view), and then feeds every message to
/// [`update`](Model::update), re-rendering and re-reconciling
/// [`subscriptions`](Model::subscriptions) after each one.
///
/// # Example
///
/// A model that shows how many catalog entries match a fixed query:
///
/// ```rust,ignore
/// use explorer_core::{filter, CatalogStore};
/// use explorer_runtime::{Command, Model};
/// use ratatui::widgets::Paragraph;
/// use ratatui::Frame;
///
/// struct Matches { store: CatalogStore, query: String }
///
/// enum Msg { Append(char) }
///
/// impl Model for Matches {
///     type Message = Msg;
///     type Flags = CatalogStore;
///
///     fn init(store: CatalogStore) -> (Self, Command<Msg>) {
///         (Matches { store, query: String::new() }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         let Msg::Append(c) = msg;
///         self.query.push(c);
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         let count = filter(self.store.catalog(), &self.query).match_count();
///         frame.render_widget(Paragraph::new(format!("{count} matches")), frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// Every event that can change the model.
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`].
    type Flags: Send + 'static;

    /// Build the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Handle one message and describe any follow-up side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state.  Must not mutate anything.
    fn view(&self, frame: &mut Frame);

    /// Event sources that should be running in the current state.
    ///
    /// The runtime diffs the returned list by [`SubscriptionId`](crate::SubscriptionId)
    /// after every update: new ids are started, missing ids are stopped.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
