use crate::locale::Locale;
use crate::prediction::PredictionResult;

/// Overall reading of a batch of model results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// No model flagged risk.
    AllClear,
    /// Some, but not all, models flagged risk.
    Mixed,
    /// Every model flagged risk.
    AllPositive,
}

/// How many models flagged risk, and what that means overall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub tone: Tone,
    pub positive_count: usize,
    pub total_count: usize,
}

impl Summary {
    pub fn message(&self, locale: Locale) -> String {
        locale.summary_message(self.tone, self.positive_count, self.total_count)
    }
}

/// Summarize a batch by each model's first prediction.
///
/// Returns `None` for an empty batch.
pub fn summarize(results: &[PredictionResult]) -> Option<Summary> {
    let total_count = results.len();
    if total_count == 0 {
        return None;
    }
    let positive_count = results.iter().filter(|result| result.flags_risk()).count();
    let tone = if positive_count == 0 {
        Tone::AllClear
    } else if positive_count == total_count {
        Tone::AllPositive
    } else {
        Tone::Mixed
    };
    Some(Summary {
        tone,
        positive_count,
        total_count,
    })
}
