//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `users_username_key` and `users_email_key`.
    users (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Unique login name (max 50 characters).
        username -> Varchar,
        /// Unique contact address (max 100 characters).
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        /// Most recent successful login.
        last_login -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Last habit id handed out to each user.
    habit_counters (user_id) {
        user_id -> Int8,
        last_habit_id -> Int4,
    }
}

diesel::table! {
    /// Habits keyed by `(user_id, id)`; ids restart at 1 for every user.
    habits (user_id, id) {
        user_id -> Int8,
        id -> Int4,
        name -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only completion ledger.
    track_records (id) {
        /// Globally increasing record id; orders same-day entries.
        id -> Int8,
        habit_id -> Int4,
        user_id -> Int8,
        completed -> Bool,
        tracked_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(habit_counters, habits, track_records);
