pub mod completions;
pub mod env;
pub mod process;
pub mod save;

pub use completions::CompletionsCommand;
pub use env::EnvCommand;
pub use process::ProcessCommand;
pub use save::SaveCommand;
