//! User identity model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use super::FieldPatch;
use super::macros::define_entity_id;

define_entity_id! {
    /// Stable user identifier.
    UserId
}

/// Validation errors raised by the user input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail,
    InvalidAvatarUrl,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a well-formed address"),
            Self::InvalidAvatarUrl => write!(f, "avatar url must be a valid URL"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Structural check only; the unique constraint on the store is the
        // authoritative gate for registration.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Registered email address, unique per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = "email", example = "ada@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered user.
///
/// ## Invariants
/// - `email` is unique across all users (enforced by the store).
/// - `created_at` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn require_name(name: String) -> Result<String, UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    Ok(name)
}

fn require_url(value: &str) -> Result<(), UserValidationError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| UserValidationError::InvalidAvatarUrl)
}

/// Validated draft for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: EmailAddress,
    avatar_url: Option<String>,
    location: Option<String>,
}

impl NewUser {
    /// Validate registration input into a draft.
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
        avatar_url: Option<String>,
        location: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = require_name(name.into())?;
        let email = EmailAddress::new(email)?;
        if let Some(url) = avatar_url.as_deref() {
            require_url(url)?;
        }
        Ok(Self {
            name,
            email,
            avatar_url,
            location,
        })
    }

    /// Display name supplied at registration.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Registration email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Optional avatar URL.
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Optional free-text location.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Sparse update for the mutable user fields.
///
/// Absent fields keep the stored value; `avatar_url` and `location` are
/// nullable and so carry [`FieldPatch`] instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    name: Option<String>,
    avatar_url: FieldPatch<String>,
    location: FieldPatch<String>,
}

impl UserPatch {
    /// Validate partial-update input into a patch.
    pub fn try_new(
        name: Option<String>,
        avatar_url: FieldPatch<String>,
        location: FieldPatch<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.map(require_name).transpose()?;
        if let Some(url) = avatar_url.set_value() {
            require_url(url)?;
        }
        Ok(Self {
            name,
            avatar_url,
            location,
        })
    }

    /// Replacement name, when supplied.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Avatar URL instruction.
    pub fn avatar_url(&self) -> &FieldPatch<String> {
        &self.avatar_url
    }

    /// Location instruction.
    pub fn location(&self) -> &FieldPatch<String> {
        &self.location
    }

    /// True when no field is present, making the update a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_keep() && self.location.is_keep()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign", false)]
    #[case("missing@domain", false)]
    #[case("two@@example.com", false)]
    #[case("spaced name@example.com", false)]
    fn email_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(EmailAddress::new(input).is_ok(), ok);
    }

    #[test]
    fn draft_rejects_blank_name() {
        let result = NewUser::try_new("   ", "ada@example.com", None, None);
        assert_eq!(result, Err(UserValidationError::EmptyName));
    }

    #[test]
    fn draft_rejects_malformed_avatar_url() {
        let result = NewUser::try_new(
            "Ada",
            "ada@example.com",
            Some("not a url".to_owned()),
            None,
        );
        assert_eq!(result, Err(UserValidationError::InvalidAvatarUrl));
    }

    #[test]
    fn draft_accepts_optional_fields_absent() {
        let draft = NewUser::try_new("Ada", "ada@example.com", None, None).expect("valid draft");
        assert_eq!(draft.name(), "Ada");
        assert!(draft.avatar_url().is_none());
        assert!(draft.location().is_none());
    }

    #[test]
    fn empty_patch_is_reported_as_no_op() {
        let patch = UserPatch::default();
        assert!(patch.is_empty());

        let named = UserPatch::try_new(Some("Ada".to_owned()), FieldPatch::Keep, FieldPatch::Keep)
            .expect("valid patch");
        assert!(!named.is_empty());

        let cleared = UserPatch::try_new(None, FieldPatch::Keep, FieldPatch::Clear)
            .expect("valid patch");
        assert!(!cleared.is_empty());
    }

    #[test]
    fn patch_validates_replacement_avatar_url() {
        let result = UserPatch::try_new(
            None,
            FieldPatch::Set("still not a url".to_owned()),
            FieldPatch::Keep,
        );
        assert_eq!(result, Err(UserValidationError::InvalidAvatarUrl));
    }
}
