use mongodb::Database;
use serde_json::Value;
use parking_lot::RwLock;
use chrono::{DateTime, Utc};
use crate::{model::policy::RotationPolicy, utils::{config::Configuration, errors::WardenError, time_provider::TimeProvider}};

#[cfg(feature = "kafka")]
use rdkafka::producer::FutureProducer;


///
/// The context is available to all gRPC service endpoints and gives them access to the DB, the
/// rotation policy, the clock, Kafka, config, etc.
///
pub struct ServiceContext {
    db: Database,
    config: Configuration,
    policy: RotationPolicy,
    time_provider: RwLock<TimeProvider>,

    #[cfg(feature = "kafka")]
    producer: FutureProducer,
}

impl ServiceContext {
    pub fn new(config: Configuration, db: Database) -> Self {
        ServiceContext {
            db,
            policy: RotationPolicy::from(&config),
            time_provider: RwLock::new(TimeProvider::default()),

            #[cfg(feature = "kafka")]
            producer: crate::utils::kafka::producer::producer(&config),

            config,
        }
    }

    #[allow(unused_variables)]
    pub async fn send(&self, topic: &str, payload: Value, version: u8) -> Result<(), WardenError> {
        #[cfg(feature = "kafka")]
        crate::utils::kafka::producer::send(
            &self.producer,
            &self.config,
            topic,
            &payload.to_string(),
            version).await?;

        Ok(())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    ///
    /// The rotation policy - built from the configuration at start-up.
    ///
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
