use crate::logger;
use crate::models::{Correctness, OptionEntry, QuestionRecord};
use serde::{Deserialize, Deserializer};

/// Strip the markdown fence some generations wrap around the JSON payload
/// (leading "```json", trailing "```").
pub fn strip_code_fence(message: &str) -> &str {
    let mut cleaned = message.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Parse a generation response into question records. A body that is not a
/// JSON array is an error (surfaced to the user; the record list stays
/// untouched). Individual elements that do not deserialize are dropped; the
/// drop count is returned so the caller can report it.
pub fn parse_questions(message: &str) -> Result<(Vec<QuestionRecord>, usize), String> {
    let cleaned = strip_code_fence(message);
    let values: Vec<serde_json::Value> = serde_json::from_str(cleaned)
        .map_err(|e| format!("response is not a JSON array: {e}"))?;

    let mut records = Vec::with_capacity(values.len());
    let mut dropped = 0;
    for value in values {
        match serde_json::from_value::<QuestionRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                dropped += 1;
                logger::log(&format!("Dropping malformed question: {e}"));
            }
        }
    }
    Ok((records, dropped))
}

/// Options arrive either as an ordered list of `{text, correctness}` pairs or
/// as a legacy `text -> correctness` mapping. Both normalize to the list shape
/// here, once, so nothing downstream has to shape-check. Mapping entries keep
/// their insertion order.
pub fn de_options<'de, D>(deserializer: D) -> Result<Vec<OptionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOptions {
        Entries(Vec<OptionEntry>),
        Mapping(serde_json::Map<String, serde_json::Value>),
    }

    match RawOptions::deserialize(deserializer)? {
        RawOptions::Entries(entries) => Ok(entries),
        RawOptions::Mapping(mapping) => Ok(mapping
            .into_iter()
            .map(|(text, value)| OptionEntry {
                text,
                correctness: Correctness::from_value(&value),
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    const LIST_SHAPED: &str = r#"[{
        "question_text": "What does this print?",
        "code_data": "print(1 + 1)",
        "difficulty_level": "EASY",
        "answer_explanation_content": "Integer addition.",
        "options": [
            {"text": "2", "correctness": "TRUE"},
            {"text": "11", "correctness": "FALSE"}
        ],
        "tags": ["PY_BASICS"]
    }]"#;

    #[test]
    fn test_strip_code_fence() {
        let fenced = "```json\n[{\"a\": 1}]\n```";
        assert_eq!(strip_code_fence(fenced), "[{\"a\": 1}]");
    }

    #[test]
    fn test_strip_code_fence_no_fence() {
        assert_eq!(strip_code_fence("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_strip_code_fence_trailing_only() {
        assert_eq!(strip_code_fence("[1]```"), "[1]");
    }

    #[test]
    fn test_parse_list_shaped_options() {
        let (records, dropped) = parse_questions(LIST_SHAPED).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.difficulty_level, Difficulty::Easy);
        assert_eq!(record.options.len(), 2);
        assert_eq!(record.options[0].text, "2");
        assert!(record.options[0].correctness.is_correct());
        assert!(!record.options[1].correctness.is_correct());
        assert_eq!(record.tags, vec!["PY_BASICS".to_string()]);
    }

    #[test]
    fn test_parse_fenced_payload() {
        let fenced = format!("```json\n{LIST_SHAPED}\n```");
        let (records, _) = parse_questions(&fenced).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_mapping_options_keep_insertion_order() {
        let payload = r#"[{
            "question_text": "Pick the truthy ones",
            "difficulty_level": "MEDIUM",
            "options": {
                "zebra": "FALSE",
                "apple": "TRUE",
                "mango": false,
                "kiwi": true
            }
        }]"#;
        let (records, dropped) = parse_questions(payload).unwrap();
        assert_eq!(dropped, 0);
        let options = &records[0].options;
        let pairs: Vec<(&str, bool)> = options
            .iter()
            .map(|o| (o.text.as_str(), o.correctness.is_correct()))
            .collect();
        // Insertion order, not alphabetical.
        assert_eq!(
            pairs,
            vec![
                ("zebra", false),
                ("apple", true),
                ("mango", false),
                ("kiwi", true)
            ]
        );
    }

    #[test]
    fn test_non_array_body_is_an_error() {
        assert!(parse_questions("{\"message\": \"oops\"}").is_err());
        assert!(parse_questions("not json at all").is_err());
    }

    #[test]
    fn test_malformed_elements_are_dropped() {
        let payload = r#"[
            {"question_text": "ok", "difficulty_level": "HARD", "options": []},
            {"question_text": "bad difficulty", "difficulty_level": "BRUTAL", "options": []},
            42
        ]"#;
        let (records, dropped) = parse_questions(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 2);
        assert_eq!(records[0].question_text, "ok");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let payload = r#"[{"question_text": "bare", "difficulty_level": "EASY"}]"#;
        let (records, dropped) = parse_questions(payload).unwrap();
        assert_eq!(dropped, 0);
        let record = &records[0];
        assert!(record.code_data.is_empty());
        assert!(record.answer_explanation_content.is_empty());
        assert!(record.options.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let (records, _) = parse_questions(LIST_SHAPED).unwrap();
        let serialized = serde_json::to_string(&records[0]).unwrap();
        let back: QuestionRecord = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, records[0]);
    }
}
