//! Command handlers that delegate to `AppCore`.
//!
//! Handlers follow the pattern
//! `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`: parse CLI
//! input, call `AppCore`, format output for the terminal.

pub mod aggregate;
pub mod events;
pub mod portals;
pub mod serve;
