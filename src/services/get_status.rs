use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};
use crate::{db, grpc::api, model::policy::{self, PasswordStatus}, utils::{context::ServiceContext, errors::{ErrorCode, WardenError}}};

///
/// A point-in-time evaluation of a user's password against the rotation policy.
///
pub struct Evaluation {
    pub status: PasswordStatus,
    pub must_change: bool,
    pub last_changed: DateTime<Utc>,
    pub expires_in: Option<String>,
}

pub async fn get_status(ctx: &ServiceContext, request: Request<api::StatusRequest>)
    -> Result<Response<api::StatusResponse>, Status> {

    let request = request.into_inner();
    let evaluation = evaluate(ctx, &request.user_id, &request.joined_at).await?;

    Ok(Response::new(api::StatusResponse {
        status: api::PasswordStatus::from(evaluation.status) as i32,
        expires_in: evaluation.expires_in.unwrap_or_default(),
        last_changed: evaluation.last_changed.to_rfc3339(),
    }))
}

///
/// Evaluate the policy for the user specified.
///
/// last_changed comes from the rotation record, falling back to the identity's
/// creation time when there is no record - identities may legitimately pre-date
/// this service, so absence is never an error.
///
pub async fn evaluate(ctx: &ServiceContext, user_id: &str, joined_at: &str)
    -> Result<Evaluation, WardenError> {

    let account = db::account::load_if_present(user_id, ctx.db()).await?;

    let (last_changed, must_change) = match &account {
        Some(account) => (account.last_changed.into(), account.must_change),
        None => (parse_joined_at(joined_at)?, false),
    };

    let now = ctx.now();
    let status = ctx.policy().evaluate(last_changed, now);
    let expires_in = ctx.policy().remaining(last_changed, now).map(policy::humanize);

    Ok(Evaluation { status, must_change, last_changed, expires_in })
}

fn parse_joined_at(joined_at: &str) -> Result<DateTime<Utc>, WardenError> {
    if joined_at.is_empty() {
        return Err(ErrorCode::AccountNotFound
            .with_msg("The user has no rotation record and no joined_at fallback was provided"))
    }

    Ok(DateTime::parse_from_rfc3339(joined_at)?.with_timezone(&Utc))
}
