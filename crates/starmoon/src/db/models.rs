//! Database models for the preferences table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored key-value pair.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::preferences)]
pub struct Preference {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable row; also used as the changeset of an upsert.
#[derive(Debug, Clone, Insertable, AsChangeset, new, Getters)]
#[diesel(table_name = schema::preferences)]
#[diesel(primary_key(key))]
pub struct NewPreference {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
