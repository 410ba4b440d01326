//! Interactive input as a capability.
//!
//! Commands never read the terminal directly; they ask whatever [`Prompt`]
//! the binary installed. Batch runs install [`DisabledPrompt`], tests script
//! answers with [`ScriptedPrompt`].

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    sync::{Arc, Mutex},
};
use thiserror::Error;
use zeroize::Zeroizing;

/// Error thrown while gathering interactive input
#[derive(Debug, Error)]
pub enum PromptError {
    /// The execution context does not allow interactive input
    #[error("interactive input is disabled")]
    Unavailable,
    /// Reading from the terminal failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A source of interactive answers.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Asks for a line of input
    async fn input(&self, message: &str) -> Result<String, PromptError>;

    /// Asks for a secret; implementations must not echo it back
    async fn secret(&self, message: &str) -> Result<Zeroizing<String>, PromptError>;
}

/// Reads answers from the controlling terminal.
///
/// The pipeline is a single task, so blocking on the terminal here is the
/// suspension point the command is designed around.
#[derive(Clone, Copy, Debug, Default)]
pub struct TtyPrompt;

#[async_trait]
impl Prompt for TtyPrompt {
    async fn input(&self, message: &str) -> Result<String, PromptError> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{message} ")?;
        stderr.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    async fn secret(&self, message: &str) -> Result<Zeroizing<String>, PromptError> {
        Ok(Zeroizing::new(rpassword::prompt_password(format!("{message} "))?))
    }
}

/// Fails every request; installed by `--batch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledPrompt;

#[async_trait]
impl Prompt for DisabledPrompt {
    async fn input(&self, _message: &str) -> Result<String, PromptError> {
        Err(PromptError::Unavailable)
    }

    async fn secret(&self, _message: &str) -> Result<Zeroizing<String>, PromptError> {
        Err(PromptError::Unavailable)
    }
}

/// Prompt double with queued answers, used in test environments.
///
/// Records every message it is asked, so tests can assert both what was
/// prompted and that nothing was prompted at all.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompt {
    answers: Arc<Mutex<VecDeque<String>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompt {
    /// Instantiates an empty scripted prompt
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next unanswered prompt
    pub fn push(&self, answer: impl Into<String>) {
        self.answers.lock().unwrap().push_back(answer.into());
    }

    /// The messages prompted so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn input(&self, message: &str) -> Result<String, PromptError> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().ok_or(PromptError::Unavailable)
    }

    async fn secret(&self, message: &str) -> Result<Zeroizing<String>, PromptError> {
        self.input(message).await.map(Zeroizing::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_answers_in_order() {
        let prompt = ScriptedPrompt::new();
        prompt.push("first");
        prompt.push("second");

        assert_eq!(prompt.input("One?").await.unwrap(), "first");
        assert_eq!(prompt.secret("Two?").await.unwrap().as_str(), "second");
        assert_eq!(prompt.asked(), ["One?", "Two?"]);
    }

    #[tokio::test]
    async fn exhausted_script_reads_as_unavailable() {
        let prompt = ScriptedPrompt::new();
        assert!(matches!(prompt.input("Any?").await, Err(PromptError::Unavailable)));
        // the attempt is still recorded
        assert_eq!(prompt.asked(), ["Any?"]);
    }

    #[tokio::test]
    async fn disabled_prompt_never_answers() {
        assert!(matches!(DisabledPrompt.input("Any?").await, Err(PromptError::Unavailable)));
        assert!(matches!(DisabledPrompt.secret("Any?").await, Err(PromptError::Unavailable)));
    }
}
