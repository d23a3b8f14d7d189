//! Core types for scriptview: the loaded script and the window over it.
//!
//! No I/O, no terminal concepts. The loader lives in `scriptview-io`, the
//! renderer in `scriptview-cli`.

pub mod script;
pub mod view;

pub use script::{LineKind, Script, ScriptLine};
pub use view::{Position, Theme, ViewState, Viewer, WINDOW_SIZE};
