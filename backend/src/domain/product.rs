//! Product submission model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use super::FieldPatch;
use super::macros::define_entity_id;
use super::user::UserId;

define_entity_id! {
    /// Stable product identifier.
    ProductId
}

/// Validation errors raised by the product input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyTitle,
    EmptyDescription,
    InvalidUrl,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::InvalidUrl => write!(f, "url must be a valid URL"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Submitted product.
///
/// ## Invariants
/// - `author_id` references an existing user and never changes.
/// - `created_at` is assigned by the store and never changes.
/// - `tags` preserve submission order; duplicates are allowed and matching is
///   exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
    /// Marks the product as locally made. Listings surface only flagged
    /// products; by-author queries ignore the flag.
    pub is_made_in_my: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
}

fn require_title(title: String) -> Result<String, ProductValidationError> {
    if title.trim().is_empty() {
        return Err(ProductValidationError::EmptyTitle);
    }
    Ok(title)
}

fn require_description(description: String) -> Result<String, ProductValidationError> {
    if description.trim().is_empty() {
        return Err(ProductValidationError::EmptyDescription);
    }
    Ok(description)
}

fn require_url(url: String) -> Result<String, ProductValidationError> {
    Url::parse(&url).map_err(|_| ProductValidationError::InvalidUrl)?;
    Ok(url)
}

/// Validated draft for submitting a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    title: String,
    description: String,
    url: String,
    tags: Vec<String>,
    location: Option<String>,
    is_made_in_my: bool,
    author_id: UserId,
}

impl NewProduct {
    /// Validate submission input into a draft. `is_made_in_my` defaults to
    /// true when the caller leaves it unspecified.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        tags: Vec<String>,
        location: Option<String>,
        is_made_in_my: Option<bool>,
        author_id: UserId,
    ) -> Result<Self, ProductValidationError> {
        Ok(Self {
            title: require_title(title.into())?,
            description: require_description(description.into())?,
            url: require_url(url.into())?,
            tags,
            location,
            is_made_in_my: is_made_in_my.unwrap_or(true),
            author_id,
        })
    }

    /// Product title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Product description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Canonical product URL.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Free-text tags in submission order.
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }

    /// Optional free-text location.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Locally-made flag.
    pub fn is_made_in_my(&self) -> bool {
        self.is_made_in_my
    }

    /// Submitting author.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }
}

/// Sparse update for the mutable product fields.
///
/// `author_id` and `created_at` are immutable and deliberately absent here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    tags: Option<Vec<String>>,
    location: FieldPatch<String>,
    is_made_in_my: Option<bool>,
}

impl ProductPatch {
    /// Validate partial-update input into a patch.
    pub fn try_new(
        title: Option<String>,
        description: Option<String>,
        url: Option<String>,
        tags: Option<Vec<String>>,
        location: FieldPatch<String>,
        is_made_in_my: Option<bool>,
    ) -> Result<Self, ProductValidationError> {
        Ok(Self {
            title: title.map(require_title).transpose()?,
            description: description.map(require_description).transpose()?,
            url: url.map(require_url).transpose()?,
            tags,
            location,
            is_made_in_my,
        })
    }

    /// Replacement title, when supplied.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replacement description, when supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replacement URL, when supplied.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Replacement tag list, when supplied. An empty list clears all tags.
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Location instruction.
    pub fn location(&self) -> &FieldPatch<String> {
        &self.location
    }

    /// Replacement locally-made flag, when supplied.
    pub fn is_made_in_my(&self) -> Option<bool> {
        self.is_made_in_my
    }

    /// True when no field is present, making the update a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.tags.is_none()
            && self.location.is_keep()
            && self.is_made_in_my.is_none()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn draft(is_made_in_my: Option<bool>) -> Result<NewProduct, ProductValidationError> {
        NewProduct::try_new(
            "Kopi Kita",
            "Single-origin coffee",
            "https://kopikita.example.com",
            vec!["coffee".to_owned()],
            Some("Kuala Lumpur".to_owned()),
            is_made_in_my,
            UserId::random(),
        )
    }

    #[test]
    fn locally_made_defaults_to_true() {
        assert!(draft(None).expect("valid draft").is_made_in_my());
        assert!(!draft(Some(false)).expect("valid draft").is_made_in_my());
    }

    #[rstest]
    #[case("", "desc", "https://x.example.com", ProductValidationError::EmptyTitle)]
    #[case("title", " ", "https://x.example.com", ProductValidationError::EmptyDescription)]
    #[case("title", "desc", "not-a-url", ProductValidationError::InvalidUrl)]
    fn draft_rejects_invalid_fields(
        #[case] title: &str,
        #[case] description: &str,
        #[case] url: &str,
        #[case] expected: ProductValidationError,
    ) {
        let result = NewProduct::try_new(
            title,
            description,
            url,
            Vec::new(),
            None,
            None,
            UserId::random(),
        );
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn empty_patch_is_reported_as_no_op() {
        assert!(ProductPatch::default().is_empty());

        let tags_cleared =
            ProductPatch::try_new(None, None, None, Some(Vec::new()), FieldPatch::Keep, None)
                .expect("valid patch");
        assert!(!tags_cleared.is_empty());
        assert_eq!(tags_cleared.tags(), Some(&[][..]));
    }

    #[test]
    fn patch_validates_replacement_url() {
        let result = ProductPatch::try_new(
            None,
            None,
            Some("nope".to_owned()),
            None,
            FieldPatch::Keep,
            None,
        );
        assert_eq!(result, Err(ProductValidationError::InvalidUrl));
    }
}
