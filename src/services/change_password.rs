use serde_json::json;
use tonic::{Request, Response, Status};
use crate::{db, grpc::{api, common}, model::{algorithm, algorithm::argon::ArgonPolicy, events::PasswordChanged}, utils::{context::ServiceContext, errors::{ErrorCode, WardenError}, kafka::prelude::*}};

const V1: u8 = 1;

///
/// The change-password flow.
///
/// Validation runs in a fixed order: confirmation match, old-password verification,
/// similarity against the password being replaced, then reuse against the current
/// credential and the retained history. Only then is the new credential hashed and
/// committed, with exactly one history entry recorded.
///
pub async fn change_password(ctx: &ServiceContext, request: Request<api::ChangeRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    if request.new_password != request.new_password_confirmation {
        return Err(Status::from(ErrorCode::ConfirmationMismatch
            .with_msg("The new password and its confirmation do not match")))
    }

    // Load the record and the retained history - the reuse scan is bounded by the
    // policy depth.
    let account = db::account::load(&request.user_id, ctx.db()).await?;
    let history: Vec<String> = db::history::load_recent(&request.user_id, ctx.policy().history_count, ctx.db())
        .await?
        .iter()
        .map(|entry| entry.phc.clone())
        .collect();

    // Verifying and hashing are highly CPU-bound - keep them off the main event loop.
    let policy = ctx.policy().clone();
    let old_password = request.old_password.clone();
    let new_password = request.new_password.clone();
    let phc = tokio::task::spawn_blocking(move || {
            if !algorithm::validate(&old_password, &account.phc)? {
                return Err(ErrorCode::PasswordNotMatch.with_msg("The old password is incorrect"))
            }

            // Form-level check: the new password against the one it replaces.
            policy.validate_similarity(&old_password, &new_password)?;

            // Credential-policy check: the new password against the current credential
            // and the retained history.
            policy.validate_history(&new_password, &account.phc, &history)?;

            ArgonPolicy::default().hash_into_phc(&new_password)
        })
        .await
        .map_err(WardenError::from)?
        ?;

    // Commit: refresh the credential and stamp, clear the must-change state, then
    // record and prune the history. The entry is recorded here and nowhere else, so
    // one logical change can never append twice.
    db::account::update_credential(ctx, &request.user_id, &phc).await?;
    db::history::record(ctx, &request.user_id, &phc).await?;
    db::history::prune(ctx, &request.user_id, ctx.policy().history_count).await?;

    ctx.send(TOPIC_PASSWORD_CHANGED, json!(PasswordChanged { user_id: request.user_id.clone() }), V1).await?;

    Ok(Response::new(common::Empty::default()))
}
