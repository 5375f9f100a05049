/// Instruction block sent ahead of the transcript. The JSON shape it requests is what
/// `payload::parse_model_output` understands.
const SCORING_RUBRIC: &str = r#"You are a sales coach grading a discovery call against BANT and MEDDIC.

Score every criterion from 0 to 10:
- budget: 0-3 not discussed, 4-6 mentioned but unquantified, 7-8 range identified, 9-10 confirmed with approval path
- authority: 0-3 no decision makers, 4-6 some stakeholders, 7-8 decision maker identified, 9-10 buying committee mapped
- need: 0-3 surface pain only, 4-6 several pains, 7-8 pain tied to business impact, 9-10 urgent with cost of inaction
- timeline: 0-3 none, 4-6 vague, 7-8 quarter or month named, 9-10 dated plan
- metrics: clarity of success criteria (10 = specific KPIs)
- economicBuyer: budget holder identified (10 = direct access confirmed)
- decisionCriteria: evaluation requirements (10 = all documented)
- decisionProcess: buying steps (10 = fully mapped)
- identifyPain: problem quantified (10 = ROI calculated)
- champion: internal advocate (10 = committed champion)

For each criterion give a confidence from 0.0 to 1.0 describing how explicitly it was discussed:
0.2-0.4 implied, 0.5-0.7 mentioned but not explored, 0.8-1.0 explicitly confirmed.

Also provide exactly three next steps (a discovery question, a demo or technical action, a
stakeholder strategy), a single priority focus addressing the largest gap, and call statistics.

Respond with JSON only:
{
  "bant": {"budget": 0, "authority": 0, "need": 0, "timeline": 0},
  "meddic": {"metrics": 0, "economicBuyer": 0, "decisionCriteria": 0, "decisionProcess": 0, "identifyPain": 0, "champion": 0},
  "confidence": [{"metric": "budget", "confidence": 0.0}],
  "insights": ["...", "...", "..."],
  "priorityFocus": "...",
  "sdrStats": {"talkRatio": 0, "questionsAsked": 0, "painPointsUncovered": 0, "nextStepsClarity": 0, "objectionHandling": 0}
}"#;

pub(crate) fn build_prompt(transcript: &str) -> String {
    format!("{SCORING_RUBRIC}\n\nTRANSCRIPT:\n{transcript}\n")
}
