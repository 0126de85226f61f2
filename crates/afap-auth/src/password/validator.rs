//! Password policy enforcement for new accounts.

use afap_core::config::auth::AuthConfig;
use afap_core::error::AppError;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    min_score: zxcvbn::Score,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: score_from_level(config.password_min_score),
        }
    }

    /// Validates a password, returning the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "La contraseña debe tener al menos {} caracteres",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "La contraseña es demasiado débil, elegí una más segura",
            ));
        }

        Ok(())
    }
}

fn score_from_level(level: u8) -> zxcvbn::Score {
    match level {
        0 => zxcvbn::Score::Zero,
        1 => zxcvbn::Score::One,
        2 => zxcvbn::Score::Two,
        3 => zxcvbn::Score::Three,
        _ => zxcvbn::Score::Four,
    }
}
