use glowcart_core::quiz::{AnswerSet, QuizVariant};
use glowcart_core::recommend::RecommendationEngine;
use tracing::debug;

use super::{load_config, to_data, CommandResult};

const COMMAND: &str = "recommend";

/// Runs the engine directly on `question_id=tag` pairs, bypassing the
/// question flow. Unknown tags are passed through untouched.
pub fn run(variant: Option<QuizVariant>, answers: &[(u8, String)]) -> CommandResult {
    let variant = match variant {
        Some(variant) => variant,
        None => match load_config(COMMAND) {
            Ok(config) => config.quiz.default_variant,
            Err(failure) => return failure,
        },
    };

    let answers = answers
        .iter()
        .fold(AnswerSet::new(), |set, (question_id, tag)| set.with_tag(*question_id, tag.clone()));
    debug!(event_name = "cli.recommend", variant = variant.as_str(), answers = answers.len());

    let bundle = RecommendationEngine::default().recommend(variant, &answers);
    let data = match to_data(COMMAND, &bundle) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    let mut lines =
        vec![format!("{} recommendations for the {variant} quiz:", bundle.iter().count())];
    for recommendation in bundle.iter() {
        lines.push(format!("- {}: {}", recommendation.slot, recommendation.product));
    }
    for unfilled in &bundle.unfilled {
        lines.push(format!("! no {} for `{}`", unfilled.slot.as_str(), unfilled.key));
    }

    CommandResult::success_with_data(COMMAND, lines.join("\n"), data)
}

/// Parses `ID=TAG`, e.g. `1=Dry` or `2=Barrier Repair/Hydration`.
pub fn parse_answer(raw: &str) -> Result<(u8, String), String> {
    let (id, tag) =
        raw.split_once('=').ok_or_else(|| format!("expected QUESTION_ID=TAG, got `{raw}`"))?;
    let id = id
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("question id must be a small positive number, got `{id}`"))?;
    if id == 0 {
        return Err("question ids start at 1".to_string());
    }
    Ok((id, tag.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_answer;

    #[test]
    fn answers_keep_tags_with_slashes_and_spaces() {
        assert_eq!(
            parse_answer("2= Barrier Repair/Hydration "),
            Ok((2, "Barrier Repair/Hydration".to_string()))
        );
    }

    #[test]
    fn malformed_answers_are_rejected() {
        assert!(parse_answer("Dry").is_err());
        assert!(parse_answer("0=Dry").is_err());
        assert!(parse_answer("x=Dry").is_err());
    }
}
