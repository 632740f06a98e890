use serde::{Deserialize, Serialize};

///
/// A notification sent when an identity has been registered for rotation tracking.
///
#[derive(Debug, Deserialize, Serialize)]
pub struct AccountRegistered {
    pub user_id: String
}

///
/// A notification sent when a password has successfully been changed.
///
#[derive(Debug, Deserialize, Serialize)]
pub struct PasswordChanged {
    pub user_id: String
}

///
/// A notification sent when a login was evaluated against an expired password and
/// the user was pinned to the forced-change flow.
///
#[derive(Debug, Deserialize, Serialize)]
pub struct PasswordExpired {
    pub user_id: String
}

///
/// A notification sent when an identity's rotation record and history have been removed.
///
#[derive(Debug, Deserialize, Serialize)]
pub struct AccountDeleted {
    pub user_id: String
}
