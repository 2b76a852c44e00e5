//! The trait every pilecall subcommand implements.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// A runnable subcommand. `command_line` is the full invocation, for logging.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
