use serde::{Deserialize, Serialize};
use crate::grpc::api;

///
/// The rotation record for an identity - exactly one document per user.
///
/// Holds the current (hashed) credential, when it was last changed and whether the
/// user is pinned to the forced-change flow.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    pub user_id: String,
    pub phc: String,
    pub last_changed: bson::DateTime,
    #[serde(default)]
    pub must_change: bool,
}

///
/// A single retained password hash - many documents per user, append-only, newest-first
/// is the canonical read order. Pruned to the policy depth after every insert.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub user_id: String,
    pub created: bson::DateTime,
    pub phc: String,
}

impl From<&Account> for api::Account {
    fn from(account: &Account) -> Self {
        let last_changed: chrono::DateTime<chrono::Utc> = account.last_changed.into();

        api::Account {
            user_id: account.user_id.clone(),
            last_changed: last_changed.to_rfc3339(),
            must_change: account.must_change,
        }
    }
}

impl From<&HistoryEntry> for api::HistoryEntry {
    fn from(entry: &HistoryEntry) -> Self {
        let created: chrono::DateTime<chrono::Utc> = entry.created.into();

        api::HistoryEntry {
            created: created.to_rfc3339(),
        }
    }
}
