/// Tolerance applied when callers do not configure their own.
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 2.0;

/// Whether an AI score sits within `threshold` points of the human assessment.
pub fn is_accurate(ai_score: f64, human_score: f64, threshold: f64) -> bool {
    (ai_score - human_score).abs() <= threshold
}
