//! Text generation with bounded retry.
//!
//! A [`Transport`] performs exactly one request and classifies the outcome;
//! [`RetryingGenerator`] owns the attempt loop and backoff schedule.

mod gemini;

pub use gemini::{GeminiTransport, extract_text, outcome_for};

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("API Error {status}: {body}")]
    Permanent { status: u16, body: String },

    #[error(
        "The model is currently overloaded after multiple retries. Please try again in a few moments."
    )]
    Exhausted { attempts: u32, last: String },

    #[error("Failed to generate SOW content: {reason}")]
    Malformed { reason: String, raw: String },

    #[error("request could not be built: {0}")]
    Request(String),
}

/// Outcome of a single request.
#[derive(Debug, PartialEq)]
pub enum Attempt {
    Success(String),
    /// Rate limited, overloaded or a network failure; worth retrying.
    Retryable(String),
    Fatal(GenerateError),
}

pub trait Transport {
    fn attempt(&self, prompt: &str) -> Attempt;
}

pub trait Generator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (0-based): `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
    }
}

/// Run `transport` until it succeeds, fails fatally, or the policy's attempt
/// ceiling is reached. `sleep` is called between attempts only.
pub fn generate_with_retry<T, S>(
    transport: &T,
    policy: &RetryPolicy,
    mut sleep: S,
    prompt: &str,
) -> Result<String, GenerateError>
where
    T: Transport + ?Sized,
    S: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last = String::new();
    for attempt in 0..max_attempts {
        match transport.attempt(prompt) {
            Attempt::Success(text) => {
                log::info!("Generation succeeded on attempt {}/{}", attempt + 1, max_attempts);
                return Ok(text);
            }
            Attempt::Fatal(e) => return Err(e),
            Attempt::Retryable(reason) => {
                log::warn!(
                    "Generation attempt {}/{} failed: {reason}",
                    attempt + 1,
                    max_attempts
                );
                last = reason;
                if attempt + 1 < max_attempts {
                    sleep(policy.delay_for(attempt));
                }
            }
        }
    }
    Err(GenerateError::Exhausted {
        attempts: max_attempts,
        last,
    })
}

pub struct RetryingGenerator<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingGenerator<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }
}

impl<T: Transport> Generator for RetryingGenerator<T> {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        generate_with_retry(&self.transport, &self.policy, std::thread::sleep, prompt)
    }
}
