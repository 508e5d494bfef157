//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts that may sign in.
    users (id) {
        id -> Uuid,
        /// Lowercased, unique.
        email -> Varchar,
        /// Argon2id digest as a PHC string (`$argon2id$v=19$...`).
        password_digest -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Articles authored by users.
    articles (id) {
        id -> Uuid,
        owner_id -> Uuid,
        /// At most 255 characters.
        title -> Varchar,
        text -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(articles -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(articles, users);
