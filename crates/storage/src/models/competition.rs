use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A scouting competition owned by a single account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Competition {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    pub username: String,
}
