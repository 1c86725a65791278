//! Diesel row models used by the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::FieldPatch;

use super::schema::{comments, products, users, votes};

/// Convert a nullable-field patch into the nested-option shape the
/// changeset derives understand: outer `None` skips, `Some(None)` writes
/// NULL.
pub(crate) fn nullable_text(patch: &FieldPatch<String>) -> Option<Option<&str>> {
    match patch {
        FieldPatch::Keep => None,
        FieldPatch::Clear => Some(None),
        FieldPatch::Set(value) => Some(Some(value.as_str())),
    }
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Queryable row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
///
/// `created_at` is omitted so the database default applies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub avatar_url: Option<&'a str>,
    pub location: Option<&'a str>,
}

/// Changeset for sparse user updates.
///
/// Outer `None` skips the column; `Some(None)` writes SQL NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub avatar_url: Option<Option<&'a str>>,
    pub location: Option<Option<&'a str>>,
}

// ---------------------------------------------------------------------------
// Product models
// ---------------------------------------------------------------------------

/// Queryable row for products.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_made_in_my: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Insertable struct for creating product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub tags: &'a [String],
    pub location: Option<&'a str>,
    pub is_made_in_my: bool,
    pub author_id: Uuid,
}

/// Changeset for sparse product updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub url: Option<&'a str>,
    pub tags: Option<&'a [String]>,
    pub location: Option<Option<&'a str>>,
    pub is_made_in_my: Option<bool>,
}

// ---------------------------------------------------------------------------
// Vote models
// ---------------------------------------------------------------------------

/// Queryable row for votes.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating vote records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Queryable row for comments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub id: Uuid,
    pub content: &'a str,
    pub author_id: Uuid,
    pub product_id: Uuid,
}
