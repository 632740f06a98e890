pub mod mongo;
pub mod account;
pub mod history;

pub mod prelude {
    // Collection names.
    pub const ACCOUNTS: &str = "Accounts";
    pub const HISTORY:  &str = "History";

    // Field names.
    pub const USER_ID:      &str = "user_id";
    pub const PHC:          &str = "phc";
    pub const LAST_CHANGED: &str = "last_changed";
    pub const MUST_CHANGE:  &str = "must_change";
    pub const CREATED:      &str = "created";
}
