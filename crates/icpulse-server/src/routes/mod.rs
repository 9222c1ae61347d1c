pub mod definition;
pub mod execute;

pub use definition::bot_definition;
pub use execute::execute_command;
