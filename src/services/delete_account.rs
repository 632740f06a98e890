use serde_json::json;
use tonic::{Request, Response, Status};
use crate::{db, grpc::{api, common}, model::events::AccountDeleted, utils::{context::ServiceContext, errors::ErrorCode, kafka::prelude::*}};

const V1: u8 = 1;

///
/// Remove the rotation record and all history for an identity.
///
pub async fn delete_account(ctx: &ServiceContext, request: Request<api::DeleteRequest>)
    -> Result<Response<common::Empty>, Status> {

    let request = request.into_inner();

    let found = db::account::delete(ctx, &request.user_id).await?;

    if !found {
        return Err(Status::from(ErrorCode::AccountNotFound
            .with_msg("The account requested does not exist")))
    }

    db::history::delete_all(ctx, &request.user_id).await?;

    ctx.send(TOPIC_ACCOUNT_DELETED, json!(AccountDeleted { user_id: request.user_id.clone() }), V1).await?;

    Ok(Response::new(common::Empty::default()))
}
