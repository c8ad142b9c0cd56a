use glowcart_core::quiz::{questions, QuizVariant};

use super::{load_config, to_data, CommandResult};

const COMMAND: &str = "questions";

pub fn run(variant: Option<QuizVariant>) -> CommandResult {
    let variant = match variant {
        Some(variant) => variant,
        None => match load_config(COMMAND) {
            Ok(config) => config.quiz.default_variant,
            Err(failure) => return failure,
        },
    };

    let questions = questions(variant);
    let data = match to_data(COMMAND, &questions) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    let mut lines = vec![format!("{variant} quiz ({} questions):", questions.len())];
    for question in questions {
        lines.push(format!("{}. {}", question.id, question.prompt));
        for (index, option) in question.options.iter().enumerate() {
            lines.push(format!("   [{index}] {}", option.label));
        }
    }

    CommandResult::success_with_data(COMMAND, lines.join("\n"), data)
}
