//! Application module: the coordinator model driven by the runtime and drawn
//! by the UI.
//!
//! `App` (in `app::model`) owns the loaded tracks and the active component;
//! `app::options` holds the editable state behind component options.

mod model;
mod options;

pub use model::*;
pub use options::*;

#[cfg(test)]
mod tests;
