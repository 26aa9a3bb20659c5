use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::favorites;

/// A candidate curriculum saved by a company account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Identifiable, Selectable, Queryable, Insertable)]
#[diesel(table_name = favorites)]
pub struct FavoriteEntity {
    pub id: Uuid,
    pub account_id: String,
    pub curriculum_id: String,
    pub added_on: NaiveDate,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}
