//! Parsing options.

/// Flags controlling how much of a document is parsed.
///
/// The render pipeline always uses the default (zero) mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseMode(u8);

impl ParseMode {
    /// Stop after the header (title, subtitle, time, tags).
    pub const TITLES_ONLY: ParseMode = ParseMode(1);

    /// Create the default mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable titles-only parsing.
    pub fn with_titles_only(self, enabled: bool) -> Self {
        if enabled {
            ParseMode(self.0 | Self::TITLES_ONLY.0)
        } else {
            ParseMode(self.0 & !Self::TITLES_ONLY.0)
        }
    }

    /// Check if only the header should be parsed.
    pub fn titles_only(self) -> bool {
        self.0 & Self::TITLES_ONLY.0 != 0
    }
}
