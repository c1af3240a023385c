//! Module choice interface

/// What the user answered when asked which modules to reformat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResponse {
    /// `false` when the choice was cancelled
    pub confirmed: bool,
    /// Chosen non-root module names, in the order the user gave them
    pub chosen: Vec<String>,
    /// Apply to the root project instead of the chosen modules
    pub apply_to_root: bool,
}

impl SelectionResponse {
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn modules(chosen: Vec<String>) -> Self {
        Self {
            confirmed: true,
            chosen,
            apply_to_root: false,
        }
    }

    pub fn root() -> Self {
        Self {
            confirmed: true,
            chosen: Vec::new(),
            apply_to_root: true,
        }
    }
}

/// Trait for the modal module-selection primitive
pub trait ModuleSelector {
    /// Ask for a choice among `candidates` (non-root module names).
    /// `has_root` tells whether a root-project option should be offered.
    fn select(&self, candidates: &[String], has_root: bool) -> SelectionResponse;
}
