/// Current values for the prompt template placeholders. Empty values leave
/// their placeholder untouched so the user can see which fields are missing.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
    pub technology: &'a str,
    pub topic: &'a str,
    pub number_of_questions: &'a str,
    pub difficulty: &'a str,
    pub topic_tag: &'a str,
    pub sub_topic_tag: &'a str,
    pub syllabus: &'a str,
}

impl<'a> Substitutions<'a> {
    /// Placeholder tokens paired with their values, in the fixed application
    /// order.
    fn pairs(&self) -> [(&'static str, &'a str); 7] {
        [
            ("{{technology}}", self.technology),
            ("{{topic}}", self.topic),
            ("{{no_of_questions}}", self.number_of_questions),
            ("{{difficulty_level}}", self.difficulty),
            ("{{topic_tag}}", self.topic_tag),
            ("{{sub_topic_tag}}", self.sub_topic_tag),
            ("{{syllabus_details}}", self.syllabus),
        ]
    }
}

/// Replace every occurrence of each placeholder token with its current value.
/// Tokens whose value is empty stay verbatim in the output. Applying the same
/// substitutions twice yields the same result as applying them once.
pub fn substitute(template: &str, values: &Substitutions<'_>) -> String {
    let mut message = template.to_string();
    for (token, value) in values.pairs() {
        if value.is_empty() {
            continue;
        }
        message = message.replace(token, value);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_filled() -> Substitutions<'static> {
        Substitutions {
            technology: "Python",
            topic: "recursion",
            number_of_questions: "5",
            difficulty: "Easy",
            topic_tag: "TOPIC_PYTHON_CODING_ANALYSIS",
            sub_topic_tag: "SUB_TOPIC_RECURSION",
            syllabus: "base cases, call stacks",
        }
    }

    #[test]
    fn test_substitute_all_tokens() {
        let template = "Write {{no_of_questions}} {{difficulty_level}} questions \
                        about {{topic}} in {{technology}}. Syllabus: {{syllabus_details}}";
        let result = substitute(template, &all_filled());
        assert_eq!(
            result,
            "Write 5 Easy questions about recursion in Python. \
             Syllabus: base cases, call stacks"
        );
    }

    #[test]
    fn test_substitute_is_global_per_token() {
        let template = "{{topic}} and again {{topic}}";
        let result = substitute(template, &all_filled());
        assert_eq!(result, "recursion and again recursion");
    }

    #[test]
    fn test_empty_value_preserves_placeholder() {
        let mut values = all_filled();
        values.topic = "";
        let template = "Generate questions about {{topic}} in {{technology}}";
        let result = substitute(template, &values);
        assert_eq!(result, "Generate questions about {{topic}} in Python");
    }

    #[test]
    fn test_substitute_is_idempotent() {
        let template = "{{technology}} / {{topic}} / {{sub_topic_tag}} / {{missing}}";
        let values = all_filled();
        let once = substitute(template, &values);
        let twice = substitute(&once, &values);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_tokens_left_alone() {
        let result = substitute("{{something_else}}", &all_filled());
        assert_eq!(result, "{{something_else}}");
    }

    #[test]
    fn test_all_empty_is_identity() {
        let values = Substitutions {
            technology: "",
            topic: "",
            number_of_questions: "",
            difficulty: "",
            topic_tag: "",
            sub_topic_tag: "",
            syllabus: "",
        };
        let template = "{{technology}} {{topic}} {{no_of_questions}}";
        assert_eq!(substitute(template, &values), template);
    }
}
