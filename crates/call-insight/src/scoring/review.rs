use super::domain::MetricConfidence;

/// Pick the `count` least certain metrics for human review.
///
/// Entries are ordered by ascending confidence; equal confidences keep their input order.
/// Shorter inputs come back whole rather than padded.
pub fn select_for_review(confidences: &[MetricConfidence], count: usize) -> Vec<MetricConfidence> {
    let mut ranked = confidences.to_vec();
    // `sort_by` is stable, which keeps review queues reproducible.
    ranked.sort_by(|left, right| left.confidence.total_cmp(&right.confidence));
    ranked.truncate(count);
    ranked
}
