#[cfg(feature = "kafka")]
pub mod producer;

// The topic names are referenced by the services whether or not the kafka
// feature is compiled in - sends become no-ops without it.
pub mod prelude {
    pub const TOPIC_ACCOUNT_REGISTERED: &str = "password.account.registered";
    pub const TOPIC_ACCOUNT_DELETED:    &str = "password.account.deleted";
    pub const TOPIC_PASSWORD_CHANGED:   &str = "password.changed";
    pub const TOPIC_PASSWORD_EXPIRED:   &str = "password.expired";
}
