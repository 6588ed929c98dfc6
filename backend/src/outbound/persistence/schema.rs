//! Diesel table definitions for the tables this service owns.
//!
//! `geom` is a PostGIS column Diesel cannot type, so it is left out here and
//! every statement touching it goes through `sql_query`. Keep the remaining
//! columns in step with `migrations/`.

diesel::table! {
    /// One drawing set per agent/user pair.
    user_polygons (id) {
        id -> Int4,
        name -> Text,
        agent_id -> Text,
        user_id -> Text,
        /// Client-supplied properties, including `featureCount`.
        properties -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
