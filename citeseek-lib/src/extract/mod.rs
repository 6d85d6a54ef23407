//! Answer extraction
//!
//! An [`AnswerExtractor`] derives a short answer span from a retrieved
//! passage. The primary path is an extractive QA model behind the
//! [`QaModel`] trait; answers below the confidence gate, empty no-answer
//! sentinels, and model call failures all fall through to a deterministic
//! rule-based heuristic, so extraction never fails for a non-empty passage.

use crate::Result;

mod fallback;

pub use fallback::heuristic_answer;

/// Answers below this confidence are discarded in favor of the heuristic.
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// An extractive QA model's answer for one (question, context) pair.
#[derive(Debug, Clone)]
pub struct QaAnswer {
    /// Verbatim span copied from the context; empty means "no answer"
    pub text: String,
    /// Model confidence in [0, 1]
    pub confidence: f32,
}

/// Trait for extractive question-answering engines
///
/// Implementations should bound the answer span length (≈50 tokens) and may
/// signal "no answer found" with empty text and near-zero confidence.
pub trait QaModel: Send + Sync {
    /// Extract an answer span for `question` from `context`.
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer>;

    /// Returns the model name/identifier
    fn name(&self) -> &str;
}

/// Confidence-gated answer extraction with heuristic fallback.
///
/// Constructed without a model it always uses the heuristic, which is the
/// degraded mode when the QA engine is unavailable at startup.
pub struct AnswerExtractor {
    qa: Option<Box<dyn QaModel>>,
    threshold: f32,
}

impl AnswerExtractor {
    /// Heuristic-only extractor.
    #[must_use]
    pub fn heuristic() -> Self {
        Self {
            qa: None,
            threshold: CONFIDENCE_THRESHOLD,
        }
    }

    /// Extractor backed by a QA model, gated at [`CONFIDENCE_THRESHOLD`].
    #[must_use]
    pub fn with_model(qa: Box<dyn QaModel>) -> Self {
        Self {
            qa: Some(qa),
            threshold: CONFIDENCE_THRESHOLD,
        }
    }

    /// Derive an answer for `query` from `passage`.
    ///
    /// Total for any non-empty passage; a QA failure is recovered locally
    /// and never surfaced.
    pub fn extract(&self, query: &str, passage: &str) -> String {
        if let Some(qa) = &self.qa {
            match qa.answer(query, passage) {
                Ok(ans) if ans.confidence >= self.threshold && !ans.text.trim().is_empty() => {
                    return ans.text;
                }
                Ok(ans) => {
                    tracing::debug!(
                        confidence = ans.confidence,
                        "QA answer below threshold, using heuristic"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "QA model failed, using heuristic");
                }
            }
        }

        heuristic_answer(query, passage)
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::heuristic()
    }
}
