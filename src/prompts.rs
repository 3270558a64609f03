use crate::models::QuizParameters;

pub const QUIZ_INSTRUCTION: &str = include_str!("../data/prompts/quiz_instruction.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

fn label<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Frame a free-text question with the selected quiz parameters.
pub fn quiz_instruction(input: &str, params: &QuizParameters) -> String {
    let count = label(params.count);
    let question_type = label(params.question_type);
    let level = label(params.level);
    let language = label(params.language);
    let difficulty = label(params.difficulty);

    // `input` goes last so placeholders typed by the user are left alone.
    render(
        QUIZ_INSTRUCTION,
        &[
            ("count", &count),
            ("type", &question_type),
            ("level", &level),
            ("language", &language),
            ("difficulty", &difficulty),
            ("input", input),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Language, Level, QuestionType};

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_quiz_instruction_has_placeholders() {
        for key in ["count", "input", "type", "level", "language", "difficulty"] {
            assert!(
                QUIZ_INSTRUCTION.contains(&format!("{{{{{}}}}}", key)),
                "missing {{{{{}}}}}",
                key
            );
        }
    }

    #[test]
    fn test_quiz_instruction_full_parameters() {
        let params = QuizParameters {
            language: Some(Language::English),
            level: Some(Level::Fifth),
            difficulty: Some(Difficulty::Hard),
            question_type: Some(QuestionType::Mcq),
            count: Some(5),
        };

        assert_eq!(
            quiz_instruction("What is photosynthesis?", &params),
            "Give me 5 only question like = What is photosynthesis? of type MCQ for class 5th \
             in English and all the questions should be Hard"
        );
    }

    #[test]
    fn test_quiz_instruction_unset_parameters_are_blank() {
        assert_eq!(
            quiz_instruction("fractions", &QuizParameters::default()),
            "Give me  only question like = fractions of type  for class  in  and all the \
             questions should be "
        );
    }

    #[test]
    fn test_quiz_instruction_keeps_user_braces() {
        let text = quiz_instruction("{{level}}", &QuizParameters::default());
        assert!(text.contains("like = {{level}} of type"));
    }
}
