use futures::TryStreamExt;
use mongodb::Database;
use bson::{Document, doc};
use crate::db::{mongo, prelude::*};
use crate::model::account::Account;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};


///
/// Load the rotation record for the user specified.
///
pub async fn load(user_id: &str, db: &Database) -> Result<Account, WardenError> {

    match load_if_present(user_id, db).await? {
        Some(account) => Ok(account),
        None => Err(ErrorCode::AccountNotFound.with_msg("The account requested does not exist")),
    }
}


///
/// Load the rotation record if the user has one - absence is not an error, callers
/// fall back to the identity's creation time.
///
pub async fn load_if_present(user_id: &str, db: &Database) -> Result<Option<Account>, WardenError> {

    let filter = doc!{ USER_ID: user_id };

    db.collection::<Account>(ACCOUNTS).find_one(filter, None)
        .await
        .map_err(WardenError::from)
}


///
/// Start tracking the user specified - the record is stamped with the current time.
///
pub async fn insert(ctx: &ServiceContext, user_id: &str, phc: &str) -> Result<(), WardenError> {

    let account = Account {
        user_id: user_id.to_string(),
        phc: phc.to_string(),
        last_changed: bson::DateTime::from_chrono(ctx.now()),
        must_change: false,
    };

    match ctx.db().collection::<Account>(ACCOUNTS).insert_one(account, None).await {
        Ok(_) => Ok(()),
        Err(err) => {
            match mongo::is_duplicate_err(&err) {
                true  => Err(ErrorCode::AccountAlreadyExists.with_msg("The account is already tracked")),
                false => Err(WardenError::from(err)),
            }
        },
    }
}


///
/// Store the new credential, refresh the last_changed stamp and clear the
/// must-change flag in one update.
///
pub async fn update_credential(ctx: &ServiceContext, user_id: &str, phc: &str) -> Result<(), WardenError> {

    let filter = doc!{ USER_ID: user_id };

    let update = doc!{
        "$set": {
            PHC: phc,
            LAST_CHANGED: bson::DateTime::from_chrono(ctx.now()),
            MUST_CHANGE: false,
        }
    };

    ctx.db().collection::<Document>(ACCOUNTS).update_one(filter, update, None)
        .await
        .map_err(WardenError::from)?;

    Ok(())
}


///
/// Pin the user to the forced-change flow. A no-op for identities with no record -
/// their status is recomputed from the creation-time fallback on every request anyway.
///
pub async fn set_must_change(ctx: &ServiceContext, user_id: &str) -> Result<(), WardenError> {

    let filter = doc!{ USER_ID: user_id };
    let update = doc!{ "$set": { MUST_CHANGE: true } };

    ctx.db().collection::<Document>(ACCOUNTS).update_one(filter, update, None)
        .await
        .map_err(WardenError::from)?;

    Ok(())
}


///
/// Remove the rotation record - returns whether there was one.
///
pub async fn delete(ctx: &ServiceContext, user_id: &str) -> Result<bool, WardenError> {

    let filter = doc!{ USER_ID: user_id };

    let result = ctx.db().collection::<Document>(ACCOUNTS).delete_one(filter, None)
        .await
        .map_err(WardenError::from)?;

    Ok(result.deleted_count > 0)
}


///
/// Return all the rotation records - the administrative list view.
///
/// There is one record per user so batching/pagination is left to the caller's
/// admin tooling.
///
pub async fn load_all(db: &Database) -> Result<Vec<Account>, WardenError> {

    let cursor = db.collection::<Account>(ACCOUNTS).find(None, None)
        .await
        .map_err(WardenError::from)?;

    cursor.try_collect()
        .await
        .map_err(WardenError::from)
}
