use serde_json::json;
use tonic::{Request, Response, Status};
use super::get_status;
use crate::{db, grpc::api, model::{events::PasswordExpired, policy::PasswordStatus}, utils::{context::ServiceContext, kafka::prelude::*}};

const V1: u8 = 1;

///
/// Evaluate the rotation policy for a login that has just succeeded.
///
/// If the password has expired, pin the user to the forced-change flow - this is the
/// only operation that raises the must-change state. The caller surfaces the returned
/// message and relies on CheckRequest to intercept every subsequent request.
///
pub async fn login(ctx: &ServiceContext, request: Request<api::LoginRequest>)
    -> Result<Response<api::LoginResponse>, Status> {

    let request = request.into_inner();
    let evaluation = get_status::evaluate(ctx, &request.user_id, &request.joined_at).await?;

    if evaluation.status != PasswordStatus::Expired {
        return Ok(Response::new(api::LoginResponse {
            status: api::PasswordStatus::from(evaluation.status) as i32,
            must_change: evaluation.must_change,
            message: String::default(),
            expires_in: evaluation.expires_in.unwrap_or_default(),
        }))
    }

    // Identities without a record are re-evaluated from the creation-time fallback on
    // every request, so the missing flag still enforces for them.
    db::account::set_must_change(ctx, &request.user_id).await?;

    tracing::info!("Password for user {} has expired, pinning to the change flow", request.user_id);

    ctx.send(TOPIC_PASSWORD_EXPIRED, json!(PasswordExpired { user_id: request.user_id.clone() }), V1).await?;

    let message = match ctx.config().contact.as_deref() {
        Some(contact) => format!("Password expired. Contact {}.", contact),
        None => "Password must be changed.".to_string(),
    };

    Ok(Response::new(api::LoginResponse {
        status: api::PasswordStatus::Expired as i32,
        must_change: true,
        message,
        expires_in: String::default(),
    }))
}
