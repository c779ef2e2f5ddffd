//! Resolved settings for an interactive session.

use std::path::PathBuf;

use explorer_runtime::ProgramOptions;

use crate::cli::TuiArgs;
use crate::link::Opener;

/// Everything the interactive explorer needs after flags and environment
/// have been read.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub initial_query: String,
    pub hide_empty: bool,
    pub fps: u32,
    pub alt_screen: bool,
    pub log_file: Option<PathBuf>,
    pub opener: Opener,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            initial_query: String::new(),
            hide_empty: false,
            fps: 60,
            alt_screen: true,
            log_file: None,
            opener: Opener::platform_default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_args(args: TuiArgs) -> Self {
        let opener = match args.opener {
            Some(program) if !program.trim().is_empty() => Opener::new(program),
            _ => Opener::platform_default(),
        };
        Self {
            initial_query: args.query,
            hide_empty: args.hide_empty,
            fps: args.fps,
            alt_screen: !args.no_alt_screen,
            log_file: args.log_file,
            opener,
        }
    }

    pub fn program_options(&self) -> ProgramOptions {
        ProgramOptions {
            fps: self.fps,
            alt_screen: self.alt_screen,
            title: Some("Widget Explorer".to_string()),
            ..ProgramOptions::default()
        }
    }
}
