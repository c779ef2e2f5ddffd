//! Terminal runtime for **widget-explorer**.
//!
//! The explorer UI is written in the [Elm Architecture]: an application is a
//! [`Model`] with a pure **init -> update -> view** cycle, and every side
//! effect (opening a link, quitting) is described by a [`Command`] that the
//! runtime executes.  Terminal input arrives through a [`Subscription`].
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Application trait (init / update / view / subscriptions) |
//! | [`Command`] | A side effect returned from `init` or `update` |
//! | [`Component`] | Reusable widget that renders into a given area |
//! | [`Subscription`] | Long-lived event source, diffed after every update |
//! | [`Program`] | Owns the terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! Messages are handled strictly in arrival order, so a model that derives
//! state synchronously inside `update` (as the explorer does with its
//! filtered catalog) always reflects the latest message: an older result can
//! never land after a newer one.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{terminal_events, Subscription, SubscriptionId};

/// Run a model with custom options until it quits.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
