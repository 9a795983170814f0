//! UI-only state that lives beside the workflow.

use crate::features::{FeatureKey, RawFeatureInput};
use crate::prediction::ModelCatalog;

/// Reachability of the prediction service, as last probed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ServiceStatus {
    #[default]
    Checking,
    Online(ModelCatalog),
    Offline(String),
}

/// Text buffers and indicators the egui view edits directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormUiState {
    /// Text shown in each numeric entry, indexed by [`FeatureKey::index`].
    ///
    /// Kept separately from the workflow so partial input such as `"1."`
    /// survives redraws unchanged.
    pub numeric_text: [String; FeatureKey::COUNT],
    pub service: ServiceStatus,
    /// Set when a submit was refused because fields are invalid.
    pub show_validation_banner: bool,
}

impl FormUiState {
    pub fn new(input: &RawFeatureInput) -> Self {
        let mut state = Self::default();
        state.sync_numeric_text(input);
        state
    }

    /// Refill every text buffer from the workflow's raw values.
    pub fn sync_numeric_text(&mut self, input: &RawFeatureInput) {
        for key in FeatureKey::ALL {
            self.numeric_text[key.index()] = input.get(key).entry_text();
        }
    }

    pub fn numeric_text(&self, key: FeatureKey) -> &str {
        &self.numeric_text[key.index()]
    }
}
