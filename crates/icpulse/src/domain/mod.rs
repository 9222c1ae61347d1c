//! Domain types for command handling.

pub mod command;
pub mod errors;
pub mod memo;

pub use command::{ArgValue, CommandArg, CommandContext};
pub use errors::HandlerError;
pub use memo::{Note, Shoutout, Task};
