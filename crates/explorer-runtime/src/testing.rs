//! Headless harness for exercising a [`Model`] in plain `#[test]` functions.

use crate::command::{Command, CommandInner};
use crate::model::Model;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

/// Drives a [`Model`] without a terminal or tokio runtime.
///
/// Immediate messages ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages).  Async work and terminal
/// commands are counted but not executed; a quit request is recorded in
/// [`quit_requested`](TestProgram::quit_requested).
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Explorer>::new(flags);
/// prog.send(Msg::Search(search_bar::Message::QueryChanged("tog".into())));
/// assert!(prog.render_string(60, 20).contains("Toggle"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: Vec<M::Message>,
    quit_requested: bool,
    spawned: usize,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and queue any immediate messages it returns.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: Vec::new(),
            quit_requested: false,
            spawned: 0,
        };
        program.collect(init_cmd);
        program
    }

    /// Run one update with `msg`.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process queued immediate messages until none remain.
    pub fn drain_messages(&mut self) {
        while !self.pending.is_empty() {
            let batch: Vec<_> = self.pending.drain(..).collect();
            for msg in batch {
                self.send(msg);
            }
        }
    }

    /// The model, for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether any update so far returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// How many async commands updates have asked the runtime to spawn.
    pub fn spawned_futures(&self) -> usize {
        self.spawned
    }

    /// Render into an off-screen buffer.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
            Ok(terminal) => terminal,
            Err(err) => panic!("test backend cannot fail: {err}"),
        };
        if let Err(err) = terminal.draw(|frame| self.model.view(frame)) {
            panic!("drawing to the test backend failed: {err}");
        }
        terminal.backend().buffer().clone()
    }

    /// Render and flatten the buffer to text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            if y + 1 < height {
                out.push('\n');
            }
        }
        out
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None | CommandInner::SetTitle(_) => {}
            CommandInner::Message(msg) => self.pending.push(msg),
            CommandInner::Quit => self.quit_requested = true,
            CommandInner::Future(_) => self.spawned += 1,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;
    use ratatui::Frame;

    struct Steps {
        log: Vec<String>,
    }

    #[derive(Debug)]
    enum Msg {
        Start,
        Step(&'static str),
        Fetch,
        Quit,
    }

    impl Model for Steps {
        type Message = Msg;
        type Flags = &'static str;

        fn init(first: &'static str) -> (Self, Command<Msg>) {
            (Steps { log: vec![] }, Command::message(Msg::Step(first)))
        }

        fn update(&mut self, msg: Msg) -> Command<Msg> {
            match msg {
                Msg::Start => {
                    self.log.push("start".into());
                    Command::message(Msg::Step("chained"))
                }
                Msg::Step(s) => {
                    self.log.push(s.into());
                    Command::none()
                }
                Msg::Fetch => Command::perform(async { "late" }, Msg::Step),
                Msg::Quit => Command::quit(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.render_widget(Paragraph::new(self.log.join(",")), frame.area());
        }
    }

    #[test]
    fn init_messages_are_queued() {
        let mut prog = TestProgram::<Steps>::new("boot");
        assert!(prog.model().log.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().log, ["boot"]);
    }

    #[test]
    fn chained_messages_drain() {
        let mut prog = TestProgram::<Steps>::new("boot");
        prog.send(Msg::Start);
        prog.drain_messages();
        assert_eq!(prog.model().log, ["start", "boot", "chained"]);
    }

    #[test]
    fn futures_are_counted_not_run() {
        let mut prog = TestProgram::<Steps>::new("boot");
        prog.send(Msg::Fetch);
        assert_eq!(prog.spawned_futures(), 1);
        prog.drain_messages();
        assert!(!prog.model().log.contains(&"late".to_string()));
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Steps>::new("boot");
        assert!(!prog.quit_requested());
        prog.send(Msg::Quit);
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_shows_view() {
        let mut prog = TestProgram::<Steps>::new("boot");
        prog.drain_messages();
        let out = prog.render_string(20, 2);
        assert!(out.starts_with("boot"));
        assert_eq!(out.lines().count(), 2);
    }
}
