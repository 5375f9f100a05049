use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::insights::{derive_insights, priority_focus};
use super::{ExtractionError, ExtractionSource, SdrStats, TranscriptAnalysis};
use crate::scoring::{
    BantScores, MeddicScores, Metric, MetricConfidence, ScoreSet, MAX_METRIC_SCORE,
    MIN_METRIC_SCORE,
};

/// Confidence assigned to a metric the model left unscored.
const MISSING_SCORE_CONFIDENCE: f64 = 0.2;
/// Confidence assigned when the model scored a metric but gave no confidence.
const UNSTATED_CONFIDENCE: f64 = 0.5;

/// Turn raw model text into a complete analysis, repairing partial payloads.
///
/// Out-of-range values are clamped and missing metrics default to zero with low confidence.
/// Output without a JSON object, or without a single recognizable score, is malformed.
pub(crate) fn parse_model_output(text: &str) -> Result<TranscriptAnalysis, ExtractionError> {
    let object = extract_json_object(text)?;

    let mut scores: BTreeMap<Metric, f64> = BTreeMap::new();
    for group in ["bant", "meddic"] {
        if let Some(Value::Object(entries)) = object.get(group) {
            collect_scores(entries, &mut scores);
        }
    }
    if scores.is_empty() {
        return Err(ExtractionError::MalformedResponse(
            "no recognizable metric scores".to_string(),
        ));
    }

    let mut stated_confidence: BTreeMap<Metric, f64> = BTreeMap::new();
    if let Some(Value::Array(entries)) = object.get("confidence") {
        for entry in entries {
            let metric = entry
                .get("metric")
                .and_then(Value::as_str)
                .and_then(|name| name.parse::<Metric>().ok());
            let confidence = entry.get("confidence").and_then(numeric);
            if let (Some(metric), Some(confidence)) = (metric, confidence) {
                stated_confidence.insert(metric, confidence.clamp(0.0, 1.0));
            }
        }
    }

    let score_of = |metric: Metric| scores.get(&metric).copied().unwrap_or(MIN_METRIC_SCORE);
    let bant = BantScores::from_fn(score_of);
    let meddic = MeddicScores::from_fn(score_of);
    let confidences = Metric::ALL
        .into_iter()
        .map(|metric| {
            let confidence = match (scores.contains_key(&metric), stated_confidence.get(&metric)) {
                (false, _) => MISSING_SCORE_CONFIDENCE,
                (true, Some(confidence)) => *confidence,
                (true, None) => UNSTATED_CONFIDENCE,
            };
            MetricConfidence::new(metric, score_of(metric), confidence, true)
        })
        .collect();
    let score_set = ScoreSet::from_clamped_parts(bant, meddic, confidences);

    let mut insights: Vec<String> = match object.get("insights") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    if insights.is_empty() {
        insights = derive_insights(&score_set);
    }

    let priority = object
        .get("priorityFocus")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|focus| !focus.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| priority_focus(&score_set));

    Ok(TranscriptAnalysis {
        insights,
        priority_focus: priority,
        sdr_stats: object.get("sdrStats").and_then(parse_sdr_stats),
        source: ExtractionSource::Generative,
        scores: score_set,
    })
}

fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(ExtractionError::MalformedResponse(
            "model output contains no JSON object".to_string(),
        ));
    };
    if end < start {
        return Err(ExtractionError::MalformedResponse(
            "model output contains no JSON object".to_string(),
        ));
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(ExtractionError::MalformedResponse(
            "model output is not a JSON object".to_string(),
        )),
        Err(err) => Err(ExtractionError::MalformedResponse(err.to_string())),
    }
}

fn collect_scores(entries: &Map<String, Value>, scores: &mut BTreeMap<Metric, f64>) {
    for (name, value) in entries {
        let (Ok(metric), Some(score)) = (name.parse::<Metric>(), numeric(value)) else {
            continue;
        };
        scores.insert(metric, score.clamp(MIN_METRIC_SCORE, MAX_METRIC_SCORE));
    }
}

/// Numbers, or strings holding numbers; models emit both.
fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

fn parse_sdr_stats(value: &Value) -> Option<SdrStats> {
    let field = |name: &str| value.get(name).and_then(numeric);
    let count = |name: &str| field(name).map(|number| number.max(0.0).round() as u32);

    Some(SdrStats {
        talk_ratio: field("talkRatio")?.clamp(0.0, 100.0),
        questions_asked: count("questionsAsked")?,
        pain_points_uncovered: count("painPointsUncovered")?,
        next_steps_clarity: field("nextStepsClarity")?.clamp(MIN_METRIC_SCORE, MAX_METRIC_SCORE),
        objection_handling: field("objectionHandling")?.clamp(MIN_METRIC_SCORE, MAX_METRIC_SCORE),
    })
}
