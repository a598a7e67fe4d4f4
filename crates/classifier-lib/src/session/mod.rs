//! Form session: state record, actions and the reducer that drives them
//!
//! The reducer is independent of any rendering; the HTTP server and the CLI
//! both build on it.

mod state;

#[cfg(test)]
mod tests;

pub use state::{reduce, reduce_all, summary, Action, SessionState};
