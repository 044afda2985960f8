use crate::error::FolioError;
use std::time::Duration;

/// How often and how patiently a failed attempt is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `2` means three attempts in total.
    pub max_retries: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        RetryPolicy {
            max_retries,
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error, or
    /// the budget is spent.
    ///
    /// `attempt` receives the 1-based attempt number. On failure every
    /// message collected along the way is returned, prefixed with its
    /// attempt number.
    pub fn run<T, F>(&self, mut attempt: F) -> Result<T, Vec<String>>
    where
        F: FnMut(u32) -> Result<T, FolioError>,
    {
        let mut state = RetryState::Attempting(0);
        let mut messages = Vec::new();

        loop {
            state = match state {
                RetryState::Attempting(n) => {
                    let number = n + 1;
                    match attempt(number) {
                        Ok(value) => return Ok(value),
                        Err(err) => {
                            record(&mut messages, number, &err);
                            if err.is_retryable() && n < self.max_retries {
                                tracing::warn!(attempt = number, error = %err, "attempt failed, retrying");
                                if !self.backoff.is_zero() {
                                    std::thread::sleep(self.backoff);
                                }
                                RetryState::Attempting(n + 1)
                            } else {
                                RetryState::Failed
                            }
                        }
                    }
                }
                RetryState::Failed => return Err(messages),
            };
        }
    }
}

/// Attempt counter is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryState {
    Attempting(u32),
    Failed,
}

fn record(messages: &mut Vec<String>, number: u32, err: &FolioError) {
    match err {
        FolioError::ValidationFailure(violations) => {
            for v in violations {
                messages.push(format!("attempt {}: {}", number, v));
            }
        }
        other => messages.push(format!("attempt {}: {}", number, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::ZERO)
    }

    #[test]
    fn test_default_is_three_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff, Duration::from_secs(1));
    }

    #[test]
    fn test_exhaustion_collects_every_message() {
        let mut calls = 0;
        let result: Result<(), _> = instant(2).run(|_| {
            calls += 1;
            Err(FolioError::Timeout { seconds: 120 })
        });
        assert_eq!(calls, 3);
        let messages = result.unwrap_err();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("attempt 1: timed out"));
        assert!(messages[2].starts_with("attempt 3: "));
    }

    #[test]
    fn test_success_after_failures() {
        let result = instant(2).run(|n| {
            if n < 3 {
                Err(FolioError::ExtractionFailure)
            } else {
                Ok(n)
            }
        });
        assert_eq!(result, Ok(3));
    }

    #[test]
    fn test_non_retryable_stops_immediately() {
        let mut calls = 0;
        let result: Result<(), _> = instant(5).run(|_| {
            calls += 1;
            Err(FolioError::UnknownEntityType {
                requested: "x".into(),
                known: vec![],
            })
        });
        assert_eq!(calls, 1);
        assert_eq!(result.unwrap_err().len(), 1);
    }

    #[test]
    fn test_validation_violations_each_recorded() {
        let result: Result<(), _> = instant(0).run(|_| {
            Err(FolioError::ValidationFailure(vec![
                "missing required field: id".into(),
                "missing required field: attributes".into(),
            ]))
        });
        assert_eq!(
            result.unwrap_err(),
            vec![
                "attempt 1: missing required field: id",
                "attempt 1: missing required field: attributes",
            ]
        );
    }

    #[test]
    fn test_zero_retries_single_attempt() {
        let mut calls = 0;
        let _: Result<(), _> = instant(0).run(|_| {
            calls += 1;
            Err(FolioError::ConnectionFailure("refused".into()))
        });
        assert_eq!(calls, 1);
    }
}
