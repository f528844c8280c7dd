//! Terminal styling for rule dumps and run traces.

/// Escape sequences spliced around labels, captures and secondary detail.
/// [`Colors::OFF`] renders plain text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Rule labels.
    pub blue: &'static str,
    /// Captures and fired rules.
    pub green: &'static str,
    /// Dependencies, back-links and misses.
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };
}
