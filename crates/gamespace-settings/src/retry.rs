//! Retry policy for settings I/O
//!
//! A failed read or write is retried exactly once. If the second attempt
//! fails too the error is returned and the caller decides how to degrade.

use crate::Result;

pub fn retry_once<T, F>(operation: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::debug!(operation, error = %first, "Settings operation failed, retrying once");
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SettingsError;

    #[test]
    fn test_second_attempt_wins() {
        let mut calls = 0;
        let value = retry_once("read", || {
            calls += 1;
            if calls == 1 {
                Err(SettingsError::Unavailable("busy".to_string()))
            } else {
                Ok(7)
            }
        })
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_gives_up_after_one_retry() {
        let mut calls = 0;
        let result: Result<()> = retry_once("write", || {
            calls += 1;
            Err(SettingsError::Unavailable("down".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_success_is_not_repeated() {
        let mut calls = 0;
        retry_once("write", || {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 1);
    }
}
