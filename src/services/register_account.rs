use serde_json::json;
use tonic::{Request, Response, Status};
use crate::{db, grpc::{api, common}, model::{algorithm, algorithm::argon::ArgonPolicy, events::AccountRegistered}, utils::{context::ServiceContext, errors::WardenError, kafka::prelude::*}};

const V1: u8 = 1;

///
/// Start tracking an identity: store its (hashed) credential, stamp last_changed and
/// write the first history entry - a brand-new password cannot be immediately reused.
///
pub async fn register_account(ctx: &ServiceContext, request: Request<api::RegisterRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    if request.user_id.is_empty() {
        return Err(Status::invalid_argument("user_id must be specified"))
    }

    let phc = match request.credential {
        Some(api::register_request::Credential::PlainTextPassword(plain)) => {
            tokio::task::spawn_blocking(move || ArgonPolicy::default().hash_into_phc(&plain))
                .await
                .map_err(WardenError::from)?
                ?
        },

        Some(api::register_request::Credential::Phc(phc)) => {
            // A pre-hashed credential must still be in a scheme we can verify later.
            algorithm::select(&phc)?;
            phc
        },

        None => return Err(Status::invalid_argument("a credential must be specified")),
    };

    db::account::insert(ctx, &request.user_id, &phc).await?;

    db::history::record(ctx, &request.user_id, &phc).await?;
    db::history::prune(ctx, &request.user_id, ctx.policy().history_count).await?;

    ctx.send(TOPIC_ACCOUNT_REGISTERED, json!(AccountRegistered { user_id: request.user_id.clone() }), V1).await?;

    Ok(Response::new(common::Empty::default()))
}
