//! Session

use serde::{Deserialize, Serialize};

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Sign-in e-mail
    pub email: String,

    /// Whether the user may run store administration actions
    #[serde(default)]
    pub is_admin: bool,
}

/// The authenticated session issued at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Signed-in user
    pub user: User,

    /// Bearer token for API calls
    pub token: String,
}

impl Session {
    /// Whether the session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_sign_in_response() -> TestResult {
        let session: Session = serde_json::from_str(
            r#"{"user":{"_id":"u1","name":"Ana","email":"ana@example.com","isAdmin":true},"token":"t"}"#,
        )?;

        assert!(session.is_admin());
        assert_eq!(session.user.name, "Ana");

        Ok(())
    }

    #[test]
    fn admin_flag_defaults_to_false() -> TestResult {
        let user: User =
            serde_json::from_str(r#"{"_id":"u2","name":"Bia","email":"bia@example.com"}"#)?;

        assert!(!user.is_admin);

        Ok(())
    }
}
