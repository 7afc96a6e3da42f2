use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

/// Topic tags accepted by the export pipeline, one per technology track.
pub const TOPIC_TAGS: [&str; 6] = [
    "TOPIC_CPP_CODING_ANALYSIS",
    "TOPIC_PYTHON_CODING_ANALYSIS",
    "TOPIC_JAVA_CODING_ANALYSIS",
    "TOPIC_C_CODING_ANALYSIS",
    "TOPIC_JS_CODING_ANALYSIS",
    "TOPIC_HTML_CSS_CODING_ANALYSIS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Technology {
    Cpp,
    Python,
    Java,
    C,
    Javascript,
    Sql,
    HtmlCss,
}

impl Technology {
    pub const ALL: [Technology; 7] = [
        Technology::Cpp,
        Technology::Python,
        Technology::Java,
        Technology::C,
        Technology::Javascript,
        Technology::Sql,
        Technology::HtmlCss,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Technology::Cpp => "CPP",
            Technology::Python => "Python",
            Technology::Java => "Java",
            Technology::C => "C",
            Technology::Javascript => "Javascript",
            Technology::Sql => "Sql",
            Technology::HtmlCss => "HTML_CSS",
        }
    }

    /// Server-side process name for the prompt template of this technology.
    /// Java and C have no generation process configured.
    pub fn process_name(&self) -> Option<&'static str> {
        match self {
            Technology::Cpp => Some("ca_mcq_cpp"),
            Technology::Python => Some("ca_mcq_python"),
            Technology::Java => None,
            Technology::C => None,
            Technology::Javascript => Some("ca_mcq_javascript"),
            Technology::Sql => Some("ca_mcq_sql"),
            Technology::HtmlCss => Some("ca_mcq_html_css"),
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Form-facing label, as sent in the generate payload.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Uppercase form used in records, tags and the toughness column.
    pub fn tag(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Difficulty::from_str(&raw).map_err(D::Error::custom)
    }
}

/// Option correctness. The generator emits `"TRUE"`/`"FALSE"` strings but the
/// legacy mapping shape sometimes carried plain booleans; anything that is not
/// `"TRUE"` or `true` counts as incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correctness {
    True,
    False,
}

impl Correctness {
    pub fn is_correct(&self) -> bool {
        matches!(self, Correctness::True)
    }

    pub fn toggle(&self) -> Correctness {
        match self {
            Correctness::True => Correctness::False,
            Correctness::False => Correctness::True,
        }
    }

    pub fn from_value(value: &serde_json::Value) -> Correctness {
        match value {
            serde_json::Value::Bool(true) => Correctness::True,
            serde_json::Value::String(s) if s == "TRUE" => Correctness::True,
            _ => Correctness::False,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Correctness::True => "TRUE",
            Correctness::False => "FALSE",
        }
    }
}

impl Serialize for Correctness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Correctness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Bool(_) | serde_json::Value::String(_) => {
                Ok(Correctness::from_value(&value))
            }
            other => Err(D::Error::custom(format!(
                "correctness must be a string or boolean, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub text: String,
    pub correctness: Correctness,
}

/// One generated multiple-choice question. Option order is significant and is
/// preserved through editing and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_text: String,
    #[serde(default)]
    pub code_data: String,
    pub difficulty_level: Difficulty,
    #[serde(default)]
    pub answer_explanation_content: String,
    #[serde(default, deserialize_with = "crate::r#gen::parser::de_options")]
    pub options: Vec<OptionEntry>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Requests serviced by the generation worker thread.
#[derive(Debug)]
pub enum GenRequest {
    FetchPrompt { process_name: String },
    Generate(GenerateParams),
}

#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub prompt: String,
    pub difficulty: String,
    pub topic: String,
    pub subtopic: String,
    pub number_of_question: String,
    pub is_updated: bool,
    pub process_name: String,
}

/// Results coming back from the generation worker.
#[derive(Debug)]
pub enum GenEvent {
    PromptLoaded { prompt: String },
    PromptFailed { error: String },
    Generated { records: Vec<QuestionRecord>, dropped: usize },
    GenerateFailed { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Form,
    Editor,
    ClearConfirm,
    QuitConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Technology,
    Topic,
    NumberOfQuestions,
    Difficulty,
    TopicTag,
    SubTopicTag,
    Syllabus,
    Prompt,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Technology,
        FormField::Topic,
        FormField::NumberOfQuestions,
        FormField::Difficulty,
        FormField::TopicTag,
        FormField::SubTopicTag,
        FormField::Syllabus,
        FormField::Prompt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Technology => "Technology",
            FormField::Topic => "Concept",
            FormField::NumberOfQuestions => "Number of Questions",
            FormField::Difficulty => "Difficulty",
            FormField::TopicTag => "Topic Tag",
            FormField::SubTopicTag => "Subtopic Tag",
            FormField::Syllabus => "Syllabus",
            FormField::Prompt => "Prompt",
        }
    }

    pub fn next(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// All user-entered generation parameters plus the prompt template state.
/// Nothing here is persisted; the form lives and dies with the process.
#[derive(Debug)]
pub struct FormState {
    pub technology: Option<Technology>,
    pub topic: String,
    pub number_of_questions: String,
    pub difficulty: Option<Difficulty>,
    pub topic_tag: String,
    pub sub_topic_tag: String,
    pub syllabus: String,
    /// Template as fetched from the server (or hand-edited).
    pub raw_prompt: String,
    /// Template with the current substitutions applied.
    pub message: String,
    /// Set once the user starts editing the fetched prompt directly.
    pub prompt_edited: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            technology: None,
            topic: String::new(),
            number_of_questions: String::new(),
            difficulty: None,
            topic_tag: String::new(),
            sub_topic_tag: "SUB_TOPIC_".to_string(),
            syllabus: String::new(),
            raw_prompt: String::new(),
            message: String::new(),
            prompt_edited: false,
        }
    }

    /// Re-run substitution over the raw template into `message`. Idempotent:
    /// calling twice with unchanged inputs yields the same message.
    pub fn refresh_message(&mut self) {
        let message = crate::template::substitute(&self.raw_prompt, &self.substitutions());
        self.message = message;
    }

    pub fn substitutions(&self) -> crate::template::Substitutions<'_> {
        crate::template::Substitutions {
            technology: self.technology.map(|t| t.label()).unwrap_or(""),
            topic: &self.topic,
            number_of_questions: &self.number_of_questions,
            difficulty: self.difficulty.map(|d| d.label()).unwrap_or(""),
            topic_tag: &self.topic_tag,
            sub_topic_tag: &self.sub_topic_tag,
            syllabus: &self.syllabus,
        }
    }

    /// The generate control stays disabled until every parameter is present.
    pub fn ready_to_generate(&self) -> bool {
        self.technology.is_some()
            && self.difficulty.is_some()
            && !self.topic.trim().is_empty()
            && !self.number_of_questions.trim().is_empty()
            && !self.topic_tag.trim().is_empty()
            && !self.sub_topic_tag.trim().is_empty()
            && !self.syllabus.trim().is_empty()
    }

    pub fn cycle_technology(&mut self, forward: bool) {
        self.technology = Some(cycle(&Technology::ALL, self.technology, forward));
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        self.difficulty = Some(cycle(&Difficulty::ALL, self.difficulty, forward));
    }

    pub fn cycle_topic_tag(&mut self, forward: bool) {
        let current = TOPIC_TAGS.iter().position(|t| *t == self.topic_tag);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % TOPIC_TAGS.len(),
            (Some(i), false) => (i + TOPIC_TAGS.len() - 1) % TOPIC_TAGS.len(),
        };
        self.topic_tag = TOPIC_TAGS[next].to_string();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> T {
    match current {
        None => all[0],
        Some(value) => {
            let idx = all.iter().position(|v| *v == value).unwrap_or(0);
            if forward {
                all[(idx + 1) % all.len()]
            } else {
                all[(idx + all.len() - 1) % all.len()]
            }
        }
    }
}

/// What the editor cursor is pointing at inside the selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    QuestionText,
    CodeData,
    Explanation,
}

/// Owned application state: the form, the accumulated records, the single
/// in-flight guard and the worker channels. The UI thread is the only writer.
pub struct Studio {
    pub form: FormState,
    pub records: Vec<QuestionRecord>,
    pub generation_in_flight: bool,
    pub prompt_loading: bool,
    /// Last user-visible error or info line.
    pub status: Option<String>,
    pub form_focus: FormField,
    pub form_cursor: usize,
    pub selected_record: usize,
    pub selected_row: usize,
    pub editing: bool,
    pub edit_buffer: String,
    pub edit_cursor: usize,
    gen_tx: Sender<GenRequest>,
    gen_rx: Receiver<GenEvent>,
}

impl Studio {
    pub fn new(gen_tx: Sender<GenRequest>, gen_rx: Receiver<GenEvent>) -> Self {
        Self {
            form: FormState::new(),
            records: Vec::new(),
            generation_in_flight: false,
            prompt_loading: false,
            status: None,
            form_focus: FormField::Technology,
            form_cursor: 0,
            selected_record: 0,
            selected_row: 0,
            editing: false,
            edit_buffer: String::new(),
            edit_cursor: 0,
            gen_tx,
            gen_rx,
        }
    }

    pub fn send_request(&self, request: GenRequest) -> bool {
        self.gen_tx.send(request).is_ok()
    }

    pub fn try_recv_gen_event(&self) -> Result<GenEvent, TryRecvError> {
        self.gen_rx.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_case_insensitive() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_serde_round_trip() {
        let json = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(json, "\"EASY\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Easy);
    }

    #[test]
    fn test_correctness_from_value() {
        assert_eq!(
            Correctness::from_value(&serde_json::json!("TRUE")),
            Correctness::True
        );
        assert_eq!(
            Correctness::from_value(&serde_json::json!(true)),
            Correctness::True
        );
        assert_eq!(
            Correctness::from_value(&serde_json::json!("FALSE")),
            Correctness::False
        );
        // Only the exact uppercase string counts as correct.
        assert_eq!(
            Correctness::from_value(&serde_json::json!("true")),
            Correctness::False
        );
        assert_eq!(
            Correctness::from_value(&serde_json::json!(1)),
            Correctness::False
        );
    }

    #[test]
    fn test_correctness_deserialize_from_bool() {
        let correct: Correctness = serde_json::from_str("true").unwrap();
        assert_eq!(correct, Correctness::True);
        let wrong: Correctness = serde_json::from_str("\"FALSE\"").unwrap();
        assert_eq!(wrong, Correctness::False);
        let invalid: Result<Correctness, _> = serde_json::from_str("3");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_technology_process_names() {
        assert_eq!(Technology::Python.process_name(), Some("ca_mcq_python"));
        assert_eq!(Technology::HtmlCss.process_name(), Some("ca_mcq_html_css"));
        assert_eq!(Technology::Java.process_name(), None);
        assert_eq!(Technology::C.process_name(), None);
    }

    #[test]
    fn test_form_ready_to_generate() {
        let mut form = FormState::new();
        assert!(!form.ready_to_generate());

        form.technology = Some(Technology::Python);
        form.difficulty = Some(Difficulty::Easy);
        form.topic = "recursion".to_string();
        form.number_of_questions = "5".to_string();
        form.topic_tag = "TOPIC_PYTHON_CODING_ANALYSIS".to_string();
        form.syllabus = "functions, recursion".to_string();
        assert!(form.ready_to_generate());

        form.syllabus.clear();
        assert!(!form.ready_to_generate());
    }

    #[test]
    fn test_form_field_cycling_wraps() {
        assert_eq!(FormField::Prompt.next(), FormField::Technology);
        assert_eq!(FormField::Technology.prev(), FormField::Prompt);
    }

    #[test]
    fn test_cycle_topic_tag_from_empty() {
        let mut form = FormState::new();
        form.cycle_topic_tag(true);
        assert_eq!(form.topic_tag, TOPIC_TAGS[0]);
        form.cycle_topic_tag(false);
        assert_eq!(form.topic_tag, TOPIC_TAGS[TOPIC_TAGS.len() - 1]);
    }

    #[test]
    fn test_sub_topic_tag_default_prefix() {
        let form = FormState::new();
        assert_eq!(form.sub_topic_tag, "SUB_TOPIC_");
    }
}
