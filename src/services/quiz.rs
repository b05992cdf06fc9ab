//! Quiz overlay — the standing question and answer checking.
//!
//! The quiz host broadcasts a question together with its answer; every
//! participant's panel holds the latest one and compares submitted drafts
//! against it. Matching is case-insensitive and otherwise exact.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("answer must not be empty")]
    EmptyAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
}

impl QuizQuestion {
    /// Build a question authored locally. Both fields must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::EmptyQuestion`] or [`QuizError::EmptyAnswer`].
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self, QuizError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        Ok(Self { question, answer })
    }

    /// Accept a question as broadcast by the host, without validation.
    pub(crate) fn from_broadcast(question: String, answer: String) -> Self {
        Self { question, answer }
    }

    #[must_use]
    pub fn matches(&self, attempt: &str) -> bool {
        attempt.to_lowercase() == self.answer.to_lowercase()
    }
}

#[derive(Debug, Default)]
pub struct Quiz {
    active: Option<QuizQuestion>,
}

impl Quiz {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the standing question. Returns `true` if it changed.
    pub fn set(&mut self, question: QuizQuestion) -> bool {
        if self.active.as_ref() == Some(&question) {
            return false;
        }
        self.active = Some(question);
        true
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn active(&self) -> Option<&QuizQuestion> {
        self.active.as_ref()
    }

    /// Banner text for the standing question.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.active.as_ref().map(|q| q.question.as_str())
    }

    /// Whether `attempt` answers the standing question. `false` when none is active.
    #[must_use]
    pub fn is_correct(&self, attempt: &str) -> bool {
        self.active.as_ref().is_some_and(|q| q.matches(attempt))
    }
}

#[cfg(test)]
#[path = "quiz_test.rs"]
mod tests;
