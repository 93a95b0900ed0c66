use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One ledger entry as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub amount: f64,
    pub description: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserData {
    pub username: String,
    pub profile_pic: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HistoryData {
    pub history: Vec<Record>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegisterResponse {
    pub record: Record,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest<'a> {
    pub amount: f64,
    pub description: &'a str,
}

/// The fragment served by `/get_content` together with the session flag.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeContent {
    pub html: String,
    pub is_authenticated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Gain,
    Expense,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Gain, RecordKind::Expense];

    /// Route segment and DOM id prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Gain => "gain",
            RecordKind::Expense => "expense",
        }
    }

    pub fn amount_id(self) -> String {
        format!("{}Amount", self.as_str())
    }

    pub fn description_id(self) -> String {
        format!("{}Description", self.as_str())
    }

    pub fn button_id(self) -> String {
        format!("{}Button", self.as_str())
    }

    pub fn error_id(self) -> String {
        format!("{}Error", self.as_str())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// OAuth users carry string ids, older rows are numeric.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Int(value) => value.to_string(),
    })
}
