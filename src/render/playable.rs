//! Decides which code excerpts may be run interactively.
//!
//! The execution backend can only run Go source, so an excerpt is
//! playable only when play is enabled for the run, the author asked for
//! it with `.play`, and the file is a `.go` file.

use minijinja::value::Value;
use minijinja::State;

use crate::model::Code;

/// The only file extension the execution backend accepts.
pub const PLAYABLE_EXTENSION: &str = ".go";

/// Core policy over the three inputs.
pub fn playable(play_enabled: bool, play_requested: bool, ext: &str) -> bool {
    play_enabled && play_requested && ext == PLAYABLE_EXTENSION
}

/// Check whether `code` is playable in a run with `play_enabled`.
pub fn is_playable(code: &Code, play_enabled: bool) -> bool {
    playable(play_enabled, code.play, &code.ext)
}

/// Template helper: `playable(code)`.
///
/// The run-wide flag comes from the `play_enabled` context variable.
pub(crate) fn playable_helper(state: &State, code: Value) -> Result<bool, minijinja::Error> {
    let play_enabled = state
        .lookup("play_enabled")
        .is_some_and(|v| v.is_true());
    let play_requested = code.get_attr("play")?.is_true();
    let ext = code.get_attr("ext")?;

    Ok(playable(
        play_enabled,
        play_requested,
        ext.as_str().unwrap_or_default(),
    ))
}
