use chrono::{DateTime, Utc};

use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `waitlist` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Store-assigned identifier, either a uuid or a bigint identity column
    #[serde(
        default,
        deserialize_with = "deserialize_row_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// User supplied email
    pub email: String,
    /// Store-assigned creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn deserialize_row_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RowId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RowId>::deserialize(deserializer)?.map(|id| match id {
        RowId::Text(s) => s,
        RowId::Number(n) => n.to_string(),
    }))
}

/// Insert payload for the `waitlist` table
#[derive(Debug, Serialize)]
pub struct NewWaitlistEntry<'a> {
    pub email: &'a str,
}
