use crate::export;
use crate::logger;
use crate::models::{
    AppState, Correctness, Difficulty, FormField, GenEvent, GenRequest, GenerateParams,
    RecordField, Studio,
};
use crate::utils::byte_index;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;

/// Per-difficulty histogram over the current record list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Studio {
    // ----- editable record operations -----

    /// Replace one named text field of the record at `index`; all other
    /// fields are untouched.
    pub fn update_field(&mut self, index: usize, field: RecordField, value: String) {
        let Some(record) = self.records.get_mut(index) else {
            return;
        };
        match field {
            RecordField::QuestionText => record.question_text = value,
            RecordField::CodeData => record.code_data = value,
            RecordField::Explanation => record.answer_explanation_content = value,
        }
    }

    pub fn set_difficulty(&mut self, index: usize, difficulty: Difficulty) {
        if let Some(record) = self.records.get_mut(index) {
            record.difficulty_level = difficulty;
        }
    }

    /// Replace a single option tuple in place; the order of all other
    /// options is preserved.
    pub fn update_option(
        &mut self,
        index: usize,
        option_index: usize,
        text: Option<String>,
        correctness: Option<Correctness>,
    ) {
        let Some(option) = self
            .records
            .get_mut(index)
            .and_then(|r| r.options.get_mut(option_index))
        else {
            return;
        };
        if let Some(text) = text {
            option.text = text;
        }
        if let Some(correctness) = correctness {
            option.correctness = correctness;
        }
    }

    /// Remove exactly one record; later indices shift down by one.
    pub fn delete_record(&mut self, index: usize) {
        if index < self.records.len() {
            self.records.remove(index);
            if self.selected_record >= self.records.len() {
                self.selected_record = self.records.len().saturating_sub(1);
            }
            self.selected_row = 0;
        }
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
        self.selected_record = 0;
        self.selected_row = 0;
        self.editing = false;
    }

    pub fn difficulty_counts(&self) -> DifficultyCounts {
        let mut counts = DifficultyCounts::default();
        for record in &self.records {
            match record.difficulty_level {
                Difficulty::Easy => counts.easy += 1,
                Difficulty::Medium => counts.medium += 1,
                Difficulty::Hard => counts.hard += 1,
            }
        }
        counts
    }

    // ----- generation plumbing -----

    /// Kick off a generation request. At most one request is in flight at a
    /// time; while the flag is set this is a no-op.
    pub fn request_generation(&mut self) {
        if self.generation_in_flight || !self.form.ready_to_generate() {
            return;
        }
        let Some(technology) = self.form.technology else {
            return;
        };

        self.form.refresh_message();
        let params = GenerateParams {
            prompt: self.form.message.clone(),
            difficulty: self
                .form
                .difficulty
                .map(|d| d.label().to_string())
                .unwrap_or_default(),
            topic: self.form.topic_tag.clone(),
            subtopic: self.form.sub_topic_tag.clone(),
            number_of_question: self.form.number_of_questions.clone(),
            is_updated: self.form.prompt_edited,
            process_name: technology
                .process_name()
                .unwrap_or_default()
                .to_string(),
        };

        if self.send_request(GenRequest::Generate(params)) {
            self.generation_in_flight = true;
            self.status = None;
            logger::log("Generation request sent");
        }
    }

    /// Called when the technology selection changes: fetch that technology's
    /// prompt template, unless no process is configured for it.
    pub fn technology_changed(&mut self) {
        self.form.refresh_message();
        let Some(process_name) = self.form.technology.and_then(|t| t.process_name()) else {
            return;
        };
        if self.send_request(GenRequest::FetchPrompt {
            process_name: process_name.to_string(),
        }) {
            self.prompt_loading = true;
        }
    }

    pub fn process_gen_event(&mut self, event: GenEvent) {
        match event {
            GenEvent::PromptLoaded { prompt } => {
                self.prompt_loading = false;
                self.form.raw_prompt = prompt;
                self.form.refresh_message();
            }
            GenEvent::PromptFailed { error } => {
                // Silent apart from the log; the form stays usable with an
                // empty prompt.
                self.prompt_loading = false;
                logger::log(&format!("Prompt load failed: {error}"));
            }
            GenEvent::Generated { records, dropped } => {
                self.generation_in_flight = false;
                let added = records.len();
                self.records.extend(records);
                self.status = Some(if dropped > 0 {
                    format!("Added {added} questions ({dropped} malformed dropped)")
                } else {
                    format!("Added {added} questions")
                });
            }
            GenEvent::GenerateFailed { error } => {
                self.generation_in_flight = false;
                self.status = Some(error);
            }
        }
    }

    pub fn export_records(&mut self) {
        if self.records.is_empty() {
            self.status = Some("Nothing to export".to_string());
            return;
        }
        let Some(technology) = self.form.technology else {
            self.status = Some("Select a technology before exporting".to_string());
            return;
        };
        match export::write_csv(
            Path::new("."),
            &self.records,
            technology.label(),
            &self.form.topic_tag,
        ) {
            Ok(path) => self.status = Some(format!("Exported {}", path.display())),
            Err(e) => self.status = Some(format!("Export failed: {e}")),
        }
    }

    // ----- editor row model -----

    /// Rows per record: question text, code, explanation, difficulty, then
    /// one row per option.
    pub fn row_count(&self) -> usize {
        self.records
            .get(self.selected_record)
            .map(|r| 4 + r.options.len())
            .unwrap_or(0)
    }

    pub fn selected_text_field(&self) -> Option<RecordField> {
        match self.selected_row {
            0 => Some(RecordField::QuestionText),
            1 => Some(RecordField::CodeData),
            2 => Some(RecordField::Explanation),
            _ => None,
        }
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        if self.selected_row >= 4 {
            Some(self.selected_row - 4)
        } else {
            None
        }
    }

    fn begin_edit(&mut self) {
        let Some(record) = self.records.get(self.selected_record) else {
            return;
        };
        let current = match self.selected_row {
            0 => record.question_text.clone(),
            1 => record.code_data.clone(),
            2 => record.answer_explanation_content.clone(),
            3 => return, // difficulty cycles with Space instead
            row => match record.options.get(row - 4) {
                Some(option) => option.text.clone(),
                None => return,
            },
        };
        self.edit_cursor = current.chars().count();
        self.edit_buffer = current;
        self.editing = true;
    }

    fn commit_edit(&mut self) {
        let value = std::mem::take(&mut self.edit_buffer);
        let index = self.selected_record;
        if let Some(field) = self.selected_text_field() {
            self.update_field(index, field, value);
        } else if let Some(option_index) = self.selected_option_index() {
            self.update_option(index, option_index, Some(value), None);
        }
        self.editing = false;
        self.edit_cursor = 0;
    }
}

/// Key handling for the parameter form.
pub fn handle_form_input(studio: &mut Studio, key: KeyEvent, app_state: &mut AppState) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('g') => studio.request_generation(),
            KeyCode::Char('d') => studio.export_records(),
            KeyCode::Char('l') => {
                if !studio.records.is_empty() {
                    *app_state = AppState::ClearConfirm;
                }
            }
            KeyCode::Char('e') => {
                // One-way switch, like the original edit-prompt button.
                studio.form.prompt_edited = true;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => *app_state = AppState::QuitConfirm,
        KeyCode::Tab => {
            if !studio.records.is_empty() {
                *app_state = AppState::Editor;
            }
        }
        KeyCode::Down => {
            studio.form_focus = studio.form_focus.next();
            studio.form_cursor = focused_len(studio);
        }
        KeyCode::Up => {
            studio.form_focus = studio.form_focus.prev();
            studio.form_cursor = focused_len(studio);
        }
        KeyCode::Left => handle_form_left_right(studio, false),
        KeyCode::Right => handle_form_left_right(studio, true),
        KeyCode::Backspace => {
            let cursor = studio.form_cursor;
            if cursor > 0
                && let Some(text) = focused_text(studio)
            {
                let at = byte_index(text, cursor - 1);
                text.remove(at);
                studio.form_cursor -= 1;
                after_form_edit(studio);
            }
        }
        KeyCode::Enter => {
            // Multiline fields accept literal newlines.
            if matches!(studio.form_focus, FormField::Syllabus | FormField::Prompt) {
                insert_form_char(studio, '\n');
            }
        }
        KeyCode::Char(c) => insert_form_char(studio, c),
        _ => {}
    }
}

fn handle_form_left_right(studio: &mut Studio, forward: bool) {
    match studio.form_focus {
        FormField::Technology => {
            studio.form.cycle_technology(forward);
            studio.technology_changed();
        }
        FormField::Difficulty => {
            studio.form.cycle_difficulty(forward);
            studio.form.refresh_message();
        }
        FormField::TopicTag => {
            studio.form.cycle_topic_tag(forward);
            studio.form.refresh_message();
        }
        _ => {
            // Cursor movement inside a text field.
            if forward {
                let len = focused_len(studio);
                if studio.form_cursor < len {
                    studio.form_cursor += 1;
                }
            } else if studio.form_cursor > 0 {
                studio.form_cursor -= 1;
            }
        }
    }
}

fn insert_form_char(studio: &mut Studio, c: char) {
    // The question-count field accepts digits only.
    if studio.form_focus == FormField::NumberOfQuestions && !c.is_ascii_digit() {
        return;
    }
    let cursor = studio.form_cursor;
    if let Some(text) = focused_text(studio) {
        let at = byte_index(text, cursor);
        text.insert(at, c);
        studio.form_cursor += 1;
        after_form_edit(studio);
    }
}

/// Mutable access to the text behind the focused field; selects return None.
fn focused_text(studio: &mut Studio) -> Option<&mut String> {
    match studio.form_focus {
        FormField::Topic => Some(&mut studio.form.topic),
        FormField::NumberOfQuestions => Some(&mut studio.form.number_of_questions),
        FormField::SubTopicTag => Some(&mut studio.form.sub_topic_tag),
        FormField::Syllabus => Some(&mut studio.form.syllabus),
        FormField::Prompt if studio.form.prompt_edited => Some(&mut studio.form.raw_prompt),
        _ => None,
    }
}

fn focused_len(studio: &mut Studio) -> usize {
    focused_text(studio)
        .map(|t| t.chars().count())
        .unwrap_or(0)
}

fn after_form_edit(studio: &mut Studio) {
    studio.form.refresh_message();
}

/// Key handling for the record editor.
pub fn handle_editor_input(studio: &mut Studio, key: KeyEvent, app_state: &mut AppState) {
    if studio.editing {
        match key.code {
            KeyCode::Esc => {
                studio.editing = false;
                studio.edit_buffer.clear();
                studio.edit_cursor = 0;
            }
            KeyCode::Enter => studio.commit_edit(),
            KeyCode::Left => {
                if studio.edit_cursor > 0 {
                    studio.edit_cursor -= 1;
                }
            }
            KeyCode::Right => {
                if studio.edit_cursor < studio.edit_buffer.chars().count() {
                    studio.edit_cursor += 1;
                }
            }
            KeyCode::Backspace => {
                if studio.edit_cursor > 0 {
                    let at = byte_index(&studio.edit_buffer, studio.edit_cursor - 1);
                    studio.edit_buffer.remove(at);
                    studio.edit_cursor -= 1;
                }
            }
            KeyCode::Char(c) => {
                let at = byte_index(&studio.edit_buffer, studio.edit_cursor);
                studio.edit_buffer.insert(at, c);
                studio.edit_cursor += 1;
            }
            _ => {}
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('d') {
            studio.export_records();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => *app_state = AppState::QuitConfirm,
        KeyCode::Tab => *app_state = AppState::Form,
        KeyCode::Left => {
            if studio.selected_record > 0 {
                studio.selected_record -= 1;
                studio.selected_row = 0;
            }
        }
        KeyCode::Right => {
            if studio.selected_record + 1 < studio.records.len() {
                studio.selected_record += 1;
                studio.selected_row = 0;
            }
        }
        KeyCode::Up => {
            studio.selected_row = studio.selected_row.saturating_sub(1);
        }
        KeyCode::Down => {
            if studio.selected_row + 1 < studio.row_count() {
                studio.selected_row += 1;
            }
        }
        KeyCode::Enter => studio.begin_edit(),
        KeyCode::Char(' ') => {
            if studio.selected_row == 3 {
                let index = studio.selected_record;
                if let Some(current) = studio.records.get(index).map(|r| r.difficulty_level) {
                    studio.set_difficulty(index, current.next());
                }
            }
        }
        KeyCode::Char('t') => {
            if let Some(option_index) = studio.selected_option_index() {
                let index = studio.selected_record;
                let current = studio
                    .records
                    .get(index)
                    .and_then(|r| r.options.get(option_index))
                    .map(|o| o.correctness);
                if let Some(current) = current {
                    studio.update_option(index, option_index, None, Some(current.toggle()));
                }
            }
        }
        KeyCode::Char('d') => {
            let index = studio.selected_record;
            studio.delete_record(index);
            if studio.records.is_empty() {
                *app_state = AppState::Form;
            }
        }
        KeyCode::Char('c') => {
            if !studio.records.is_empty() {
                *app_state = AppState::ClearConfirm;
            }
        }
        _ => {}
    }
}
