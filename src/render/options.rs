//! Rendering options and configuration.

/// Options for one render run.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Global switch for interactive code execution
    pub play_enabled: bool,

    /// Emit speaker notes into the output
    pub notes_enabled: bool,
}

impl RenderOptions {
    /// Create new render options with defaults (play and notes off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the play feature.
    pub fn with_play(mut self, enabled: bool) -> Self {
        self.play_enabled = enabled;
        self
    }

    /// Enable or disable speaker notes.
    pub fn with_notes(mut self, enabled: bool) -> Self {
        self.notes_enabled = enabled;
        self
    }
}
