use std::fs;
use tracing::info;
use crate::db::prelude::*;
use mongodb::error::ErrorKind;
use crate::utils::errors::ErrorCode;
use crate::utils::errors::WardenError;
use crate::utils::config::Configuration;
use mongodb::{Client, Database, bson::{Document, doc}, options::ClientOptions};

///
/// Run any schema-like updates against MongoDB that haven't been run yet.
///
pub async fn update_mongo(db: &Database) -> Result<(), WardenError> {
    create_init_indexes(db).await?;
    Ok(())
}

async fn create_init_indexes(db: &Database) -> Result<(), WardenError> {
    // Note: the current driver doesn't yet support creating indexes on collections, so the dbcommand must be used instead.
    // https://docs.mongodb.com/manual/reference/command/createIndexes/#createindexes

    db.run_command(doc! { "createIndexes": ACCOUNTS, "indexes": [
        { "key": { USER_ID: 1 }, "name": "idx_user_id", "unique": true }] }, None).await?;

    // The reuse scan and the prune both rank by created within a user.
    db.run_command(doc! { "createIndexes": HISTORY, "indexes": [
        { "key": { USER_ID: 1, CREATED: -1 }, "name": "idx_user_id_created", "unique": false }] }, None).await?;

    Ok(())
}

///
/// Indicates if the MongoDB error is from a duplicate key violation.
///
pub fn is_duplicate_err(err: &mongodb::error::Error) -> bool {
    let ec = err.clone();
    match *ec.kind {
        ErrorKind::Write(sub_err) => match sub_err {
            mongodb::error::WriteFailure::WriteError(we) => {
                if we.code == 11000 /* Duplicate insert */ {
                    return true
                }

                false
            },
            _ => false,
        },
        _ => return false
    }
}


pub async fn get_mongo_db(app_name: &str, config: &Configuration) -> Result<Database, WardenError> {

    // Read username and password from a secrets file - a uri without the placeholders
    // (local dev, tests) is used as-is.
    let uri = match config.mongo_uri.contains("$USERNAME") {
        true => {
            let username = fs::read_to_string("secrets/mongodb_username")
                .map_err(|err| ErrorCode::UnableToReadCredentials
                    .with_msg(&format!("Unable to read credentials from secrets/mongodb_username: {}", err)))?;

            let password = fs::read_to_string("secrets/mongodb_password")
                .map_err(|err| ErrorCode::UnableToReadCredentials
                    .with_msg(&format!("Unable to read credentials from secrets/mongodb_password: {}", err)))?;

            config.mongo_uri.replace("$USERNAME", &username).replace("$PASSWORD", &password)
        },
        false => config.mongo_uri.clone(),
    };

    // Parse the uri now.
    let mut client_options = ClientOptions::parse(&uri).await?;

    // Manually set an option.
    client_options.app_name = Some(app_name.to_string());

    // Get a handle to the deployment.
    let client = Client::with_options(client_options)?;

    info!("Connecting to MongoDB...");

    let db = client.database(&config.db_name);
    ping(&db).await?;

    info!("Connected to MongoDB");
    Ok(db)
}


pub async fn ping(db: &Database) -> Result<Document, WardenError> {
    Ok(db.run_command(doc! { "ping": 1 }, None).await?)
}
