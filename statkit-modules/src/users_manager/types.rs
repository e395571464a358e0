//! User types.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use statkit_core::{CoreError, ParamValue, Params};

/// Access a user has to a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// No access.
    #[serde(rename = "noaccess")]
    NoAccess,
    /// Read reports.
    View,
    /// Read reports and manage goals, annotations and similar.
    Write,
    /// Manage the site and its users.
    Admin,
}

impl AccessLevel {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAccess => "noaccess",
            Self::View => "view",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }

    /// Returns all levels, weakest first.
    pub fn all() -> &'static [AccessLevel] {
        &[Self::NoAccess, Self::View, Self::Write, Self::Admin]
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::InvalidParams(format!("unknown access level: {s}")))
    }
}

impl From<AccessLevel> for ParamValue {
    fn from(level: AccessLevel) -> Self {
        Self::Str(level.as_str().to_string())
    }
}

/// Filters for `UsersManager.getUsersPlusRole`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Site whose roles are reported.
    pub site: Option<u32>,
    /// Text matched against login and email.
    pub search: Option<String>,
    /// Only users with this access.
    pub access: Option<AccessLevel>,
    /// Maximum users.
    pub limit: Option<u32>,
    /// Users to skip.
    pub offset: Option<u32>,
}

impl UserFilter {
    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with_opt("idSite", self.site)
            .with_opt("filter_search", self.search.as_deref())
            .with_opt("filter_access", self.access)
            .with_opt("limit", self.limit)
            .with_opt("offset", self.offset)
    }
}

/// Changes for `UsersManager.updateUser`. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    /// New password.
    pub password: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// Current password of the caller, required by the server for changes
    /// to another user.
    pub password_confirmation: Option<String>,
}

impl UserUpdate {
    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with_opt("password", self.password.as_deref())
            .with_opt("email", self.email.as_deref())
            .with_opt("passwordConfirmation", self.password_confirmation.as_deref())
    }
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    /// Login.
    pub login: String,
    /// Email address; hidden from non-superusers on some servers.
    #[serde(default)]
    pub email: Option<String>,
    /// Superuser flag (`0`/`1` or a boolean depending on the server).
    #[serde(default)]
    pub superuser_access: serde_json::Value,
    /// Registration date.
    #[serde(default)]
    pub date_registered: Option<String>,
    /// Role on the filtered site (`getUsersPlusRole` only).
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// Whether the user has superuser access.
    pub fn is_superuser(&self) -> bool {
        match &self.superuser_access {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_i64() == Some(1),
            serde_json::Value::String(s) => s == "1",
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_level_parse() {
        assert_eq!("ADMIN".parse::<AccessLevel>().unwrap(), AccessLevel::Admin);
        assert_eq!("noaccess".parse::<AccessLevel>().unwrap(), AccessLevel::NoAccess);
        assert!("owner".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn test_filter_params() {
        let filter = UserFilter {
            site: Some(1),
            access: Some(AccessLevel::View),
            ..UserFilter::default()
        };
        let params = filter.to_params();

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["idSite", "filter_access"]);
        assert_eq!(params.get("filter_access"), Some(&ParamValue::Str("view".into())));
    }

    #[test]
    fn test_superuser_flag() {
        let user: User = serde_json::from_value(serde_json::json!({
            "login": "admin",
            "email": "admin@example.com",
            "superuser_access": "1"
        }))
        .unwrap();
        assert!(user.is_superuser());

        let user: User = serde_json::from_value(serde_json::json!({ "login": "viewer" })).unwrap();
        assert!(!user.is_superuser());
    }
}
