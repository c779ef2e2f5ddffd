//! Widgets for the **widget-explorer** catalog screen.
//!
//! Every widget implements [`explorer_runtime::Component`], so it can be
//! embedded in a [`explorer_runtime::Model`] and placed in any ratatui
//! layout.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`search_bar`] | Single-line query input with a match counter |
//! | [`section_list`] | Sectioned, scrollable list over a filtered catalog |
//! | [`key`] | Key bindings and a one-line help renderer |
//! | [`chrome`] | Bordered panel helpers |

pub mod chrome;
pub mod key;
pub mod search_bar;
pub mod section_list;

pub use search_bar::SearchBar;
pub use section_list::SectionList;
