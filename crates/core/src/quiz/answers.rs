use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tags::UnknownTag;

/// One recorded answer. `mapping` is the semantic tag of the chosen option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u8,
    pub label: String,
    pub mapping: Option<String>,
}

impl Answer {
    pub fn new(question_id: u8, label: impl Into<String>, mapping: impl Into<String>) -> Self {
        Self { question_id, label: label.into(), mapping: Some(mapping.into()) }
    }
}

/// Tag value read from an answer set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagValue<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Copy + ToString> TagValue<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(tag) => Some(*tag),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Known(tag) => tag.to_string(),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }
}

/// Answers keyed by 1-based question id. Recording an id twice keeps the latest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<u8, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, answer: Answer) {
        self.answers.insert(answer.question_id, answer);
    }

    /// Records a bare mapping tag, using the tag as the label.
    pub fn with_tag(mut self, question_id: u8, mapping: impl Into<String>) -> Self {
        let mapping = mapping.into();
        self.record(Answer { question_id, label: mapping.clone(), mapping: Some(mapping) });
        self
    }

    pub fn get(&self, question_id: u8) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    pub fn remove(&mut self, question_id: u8) -> Option<Answer> {
        self.answers.remove(&question_id)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }

    /// Reads the tag for a question, substituting `fallback` when the question
    /// was not answered or the answer carries no (or a blank) mapping.
    pub fn tag_or<T>(&self, question_id: u8, fallback: T) -> TagValue<T>
    where
        T: FromStr<Err = UnknownTag>,
    {
        let mapping = self
            .get(question_id)
            .and_then(|answer| answer.mapping.as_deref())
            .filter(|mapping| !mapping.trim().is_empty());

        match mapping {
            None => TagValue::Known(fallback),
            Some(raw) => match raw.parse::<T>() {
                Ok(tag) => TagValue::Known(tag),
                Err(error) => TagValue::Unrecognized(error.raw),
            },
        }
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = Self::new();
        for answer in iter {
            set.record(answer);
        }
        set
    }
}
