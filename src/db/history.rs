use futures::TryStreamExt;
use mongodb::{Database, options::{FindOneOptions, FindOptions}};
use bson::{Document, doc};
use crate::db::prelude::*;
use crate::model::account::HistoryEntry;
use crate::utils::context::ServiceContext;
use crate::utils::errors::WardenError;


///
/// Append a history entry for the user - entries are never overwritten.
///
pub async fn record(ctx: &ServiceContext, user_id: &str, phc: &str) -> Result<(), WardenError> {

    let entry = HistoryEntry {
        user_id: user_id.to_string(),
        created: bson::DateTime::from_chrono(ctx.now()),
        phc: phc.to_string(),
    };

    ctx.db().collection::<HistoryEntry>(HISTORY).insert_one(entry, None)
        .await
        .map_err(WardenError::from)?;

    Ok(())
}


///
/// The user's most recent entries, newest first, bounded by the policy depth.
///
pub async fn load_recent(user_id: &str, limit: u32, db: &Database) -> Result<Vec<HistoryEntry>, WardenError> {

    let filter = doc!{ USER_ID: user_id };
    let options = FindOptions::builder()
        .sort(doc!{ CREATED: -1 })
        .limit(limit as i64)
        .build();

    let cursor = db.collection::<HistoryEntry>(HISTORY).find(filter, options)
        .await
        .map_err(WardenError::from)?;

    cursor.try_collect()
        .await
        .map_err(WardenError::from)
}


///
/// Delete every entry outside the `keep` most recent for the user.
///
/// The entry ranked at `keep` (0-indexed, newest-first by created) marks the cutoff and
/// everything at or below its timestamp is deleted. Entries sharing the cutoff timestamp
/// all go together, which can retain fewer than `keep` - and means re-running the prune,
/// even concurrently, always converges on the same retained set.
///
pub async fn prune(ctx: &ServiceContext, user_id: &str, keep: u32) -> Result<(), WardenError> {

    let filter = doc!{ USER_ID: user_id };
    let options = FindOneOptions::builder()
        .sort(doc!{ CREATED: -1 })
        .skip(keep as u64)
        .build();

    let cutoff = ctx.db().collection::<HistoryEntry>(HISTORY).find_one(filter, options)
        .await
        .map_err(WardenError::from)?;

    if let Some(entry) = cutoff {
        let filter = doc!{ USER_ID: user_id, CREATED: { "$lte": entry.created } };

        ctx.db().collection::<Document>(HISTORY).delete_many(filter, None)
            .await
            .map_err(WardenError::from)?;
    }

    Ok(())
}


///
/// Remove every entry for the user - used when the account itself is removed.
///
pub async fn delete_all(ctx: &ServiceContext, user_id: &str) -> Result<(), WardenError> {

    let filter = doc!{ USER_ID: user_id };

    ctx.db().collection::<Document>(HISTORY).delete_many(filter, None)
        .await
        .map_err(WardenError::from)?;

    Ok(())
}
