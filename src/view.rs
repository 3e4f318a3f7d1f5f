//! Front-end view switcher
//!
//! Maps the location hash the host restores on entry to one of the
//! application views.

/// The views the front-end switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Generator view, shown when nothing else is requested
    #[default]
    Generator,
    /// Side-by-side comparison view
    Compare,
    /// Credits view
    Credit,
    /// Verification view (absorbed the retired scan view)
    Verify,
    /// Camera capture view
    Camera,
}

impl View {
    /// Resolve a location hash (`"#compare"` or bare `"compare"`).
    ///
    /// The retired `scan` name maps to [`View::Verify`]; anything
    /// unrecognized falls back to [`View::Generator`].
    pub fn from_hash(hash: &str) -> Self {
        match hash.strip_prefix('#').unwrap_or(hash) {
            "generator" => View::Generator,
            "compare" => View::Compare,
            "credit" => View::Credit,
            "verify" | "scan" => View::Verify,
            "camera" => View::Camera,
            _ => View::Generator,
        }
    }

    /// Hash-fragment name of this view
    pub fn name(&self) -> &'static str {
        match self {
            View::Generator => "generator",
            View::Compare => "compare",
            View::Credit => "credit",
            View::Verify => "verify",
            View::Camera => "camera",
        }
    }

    /// All selectable views
    pub fn all() -> &'static [View] {
        &[
            View::Generator,
            View::Compare,
            View::Credit,
            View::Verify,
            View::Camera,
        ]
    }
}
