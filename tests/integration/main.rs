//! End-to-end tests that run the `pilecall` binary.

mod helpers;
mod test_error_paths;
mod test_stats_command;
mod test_streaming_input;
