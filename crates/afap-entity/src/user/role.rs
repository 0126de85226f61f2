//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the habilitaciones system.
///
/// A role is fixed at registration; there is no promotion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    /// A citizen filing permit applications for their own commerce.
    #[serde(rename = "ciudadano")]
    #[sqlx(rename = "ciudadano")]
    Citizen,
    /// A municipal inspector reviewing applications and premises.
    #[serde(rename = "inspector")]
    #[sqlx(rename = "inspector")]
    Inspector,
    /// A municipal administrator with full visibility.
    #[serde(rename = "administrador")]
    #[sqlx(rename = "administrador")]
    Administrator,
}

impl UserRole {
    /// Whether this role may review applications (change permit status,
    /// schedule inspections).
    pub fn can_review(&self) -> bool {
        matches!(self, Self::Inspector | Self::Administrator)
    }

    /// Whether this role sees every permit rather than only its own.
    pub fn sees_all_permits(&self) -> bool {
        self.can_review()
    }

    /// Whether this role is an administrator.
    pub fn is_administrator(&self) -> bool {
        matches!(self, Self::Administrator)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "ciudadano",
            Self::Inspector => "inspector",
            Self::Administrator => "administrador",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = afap_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ciudadano" => Ok(Self::Citizen),
            "inspector" => Ok(Self::Inspector),
            "administrador" => Ok(Self::Administrator),
            _ => Err(afap_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: ciudadano, inspector, administrador"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rights() {
        assert!(!UserRole::Citizen.can_review());
        assert!(UserRole::Inspector.can_review());
        assert!(UserRole::Administrator.can_review());
        assert!(!UserRole::Inspector.is_administrator());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ciudadano".parse::<UserRole>().unwrap(), UserRole::Citizen);
        assert_eq!(
            "ADMINISTRADOR".parse::<UserRole>().unwrap(),
            UserRole::Administrator
        );
        assert!("viewer".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_wire_serialization() {
        let json = serde_json::to_string(&UserRole::Inspector).unwrap();
        assert_eq!(json, "\"inspector\"");
    }
}
