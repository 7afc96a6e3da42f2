use crate::models::{Difficulty, OptionEntry, QuestionRecord};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const QUESTION_TYPE: &str = "CODE_ANALYSIS_MULTIPLE_CHOICE";

/// The fixed external schema. Column names and order are contractual.
pub const CSV_HEADER: [&str; 19] = [
    "question_id",
    "question_type",
    "short_text",
    "question_text",
    "question_key",
    "content_type",
    "multimedia_count",
    "multimedia_format",
    "multimedia_url",
    "thumbnail_url",
    "tag_names",
    "c_options",
    "w_options",
    "options_content_type",
    "code_data",
    "code_language",
    "explanation",
    "explanation_content_type",
    "toughness",
];

/// Standard CSV quoting: wrap in double quotes, double any internal quote.
pub fn csv_escape(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Escape an arbitrary JSON value the way the export schema expects: strings
/// as-is, null as empty, anything else JSON-stringified before quoting.
pub fn csv_field(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => csv_escape(s),
        other => csv_escape(&other.to_string()),
    }
}

/// Partition options into correct and wrong buckets, keeping list order
/// within each bucket. The spacing difference ("OPTION : " vs "OPTION: ") is
/// part of the external schema and must not be normalized.
pub fn partition_options(options: &[OptionEntry]) -> (Vec<String>, Vec<String>) {
    let mut correct = Vec::new();
    let mut wrong = Vec::new();
    for option in options {
        if option.correctness.is_correct() {
            correct.push(format!("OPTION : {}", option.text));
        } else {
            wrong.push(format!("OPTION: {}", option.text));
        }
    }
    (correct, wrong)
}

/// Newline-joined tag list: fixed pool/source tags, the difficulty tag, the
/// generated question id, then any per-record tags. Empty entries filtered.
pub fn assemble_tags(question_id: &str, difficulty: Difficulty, extra: &[String]) -> String {
    let mut tags = vec![
        "POOL_1".to_string(),
        format!("DIFFICULTY_{}", difficulty.tag()),
        "SOURCE_GPT".to_string(),
        "IN_OFFLINE_EXAM".to_string(),
        "NIAT".to_string(),
        "IS_PUBLIC".to_string(),
        question_id.to_string(),
    ];
    tags.extend(extra.iter().cloned());
    tags.retain(|tag| !tag.is_empty());
    tags.join("\n")
}

/// Serialize the full record list into a CSV document, one row per record in
/// list order, with a fresh v4 UUID per row.
pub fn render_csv(records: &[QuestionRecord], technology: &str) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(CSV_HEADER.join(","));

    for (index, record) in records.iter().enumerate() {
        let question_id = Uuid::new_v4().to_string();
        let (c_options, w_options) = partition_options(&record.options);
        let tag_names = assemble_tags(&question_id, record.difficulty_level, &record.tags);

        let row = [
            question_id.clone(),
            QUESTION_TYPE.to_string(),
            csv_escape(""), // short_text
            csv_escape(&record.question_text),
            index.to_string(), // question_key: zero-based export position
            "HTML".to_string(),
            "0".to_string(),
            String::new(), // multimedia_format
            String::new(), // multimedia_url
            String::new(), // thumbnail_url
            csv_escape(&tag_names),
            csv_escape(&c_options.join("\n")),
            csv_escape(&w_options.join("\n")),
            "MARKDOWN".to_string(),
            csv_escape(&record.code_data),
            csv_escape(technology),
            csv_escape(&record.answer_explanation_content),
            "MARKDOWN".to_string(),
            record.difficulty_level.tag().to_string(),
        ];
        rows.push(row.join(","));
    }

    rows.join("\n")
}

pub fn export_file_name(technology: &str, topic_tag: &str) -> String {
    format!(
        "{}_{}_questions_{}.csv",
        technology,
        topic_tag,
        Utc::now().format("%Y-%m-%d")
    )
}

/// Write the CSV next to the process working directory; the TUI analog of the
/// browser blob download.
pub fn write_csv(
    dir: &Path,
    records: &[QuestionRecord],
    technology: &str,
    topic_tag: &str,
) -> io::Result<PathBuf> {
    let path = dir.join(export_file_name(technology, topic_tag));
    fs::write(&path, render_csv(records, technology))?;
    Ok(path)
}
