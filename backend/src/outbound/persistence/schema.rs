//! Diesel table definitions.
//!
//! Must match `backend/migrations`; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Personal notes. `slug` carries a unique index.
    notes (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        slug -> Varchar,
        author -> Uuid,
    }
}

diesel::table! {
    /// Public news feed.
    news (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        date -> Date,
    }
}

diesel::table! {
    /// Comments on news items; deleted with their news item.
    comments (id) {
        id -> Int8,
        news_id -> Int8,
        text -> Text,
        author -> Uuid,
        created -> Timestamptz,
    }
}

diesel::joinable!(comments -> news (news_id));
diesel::allow_tables_to_appear_in_same_query!(comments, news, notes);
