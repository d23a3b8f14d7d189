//! Script loading: where a script comes from, how it is fetched, and how
//! its JSON records become [`scriptview_core::ScriptLine`]s.

pub mod background;
mod error;
pub mod fetch;
pub mod json;
mod source;

pub use background::{BackgroundLoader, LoadOutcome};
pub use error::LoadError;
pub use fetch::ScriptLoader;
pub use source::ScriptSource;
