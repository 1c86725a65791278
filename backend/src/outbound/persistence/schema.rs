//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// User accounts table.
    ///
    /// `email` carries a unique constraint; it is the authoritative guard
    /// against duplicate registrations.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Unique registration email.
        email -> Varchar,
        /// Optional avatar URL.
        avatar_url -> Nullable<Varchar>,
        /// Optional free-text location.
        location -> Nullable<Varchar>,
        /// Record creation timestamp, assigned by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted products table.
    products (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Product title.
        title -> Varchar,
        /// Product description.
        description -> Text,
        /// Canonical product URL.
        url -> Varchar,
        /// Free-text tags in submission order.
        tags -> Array<Text>,
        /// Optional free-text location.
        location -> Nullable<Varchar>,
        /// Locally-made flag; listings filter on it.
        is_made_in_my -> Bool,
        /// Record creation timestamp, assigned by the database.
        created_at -> Timestamptz,
        /// Submitting author (foreign key to users).
        author_id -> Uuid,
    }
}

diesel::table! {
    /// Votes table.
    ///
    /// `(user_id, product_id)` carries a unique constraint; it is the
    /// authoritative guard against duplicate votes.
    votes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Voting user (foreign key to users).
        user_id -> Uuid,
        /// Voted product (foreign key to products).
        product_id -> Uuid,
        /// Record creation timestamp, assigned by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments table.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Comment body.
        content -> Text,
        /// Commenting user (foreign key to users).
        author_id -> Uuid,
        /// Commented product (foreign key to products).
        product_id -> Uuid,
        /// Record creation timestamp, assigned by the database.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(products -> users (author_id));
diesel::joinable!(votes -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(users, products, votes, comments);
