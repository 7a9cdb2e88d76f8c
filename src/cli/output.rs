//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Result of a command, renderable for people or for scripts.
pub trait CommandOutput: Serialize {
    /// Plain-text rendering
    fn to_human(&self) -> String;
    /// JSON rendering used in `--json` mode
    fn to_json(&self) -> serde_json::Value;
}

/// Print `result` to stdout in the requested mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
