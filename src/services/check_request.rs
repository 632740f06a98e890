use tonic::{Request, Response, Status};
use super::get_status;
use crate::grpc::api;
use crate::model::gate::{self, Exemptions, Gate, IdentityState, RequestInfo};
use crate::utils::context::ServiceContext;

// The caller's messaging channel queues at most one notice per tag and
// request/response cycle - re-entrant evaluation must not duplicate the warning.
pub const NOTICE_TAG: &str = "password_rotation";

///
/// The per-request gate - called once per inbound request, before the request reaches
/// any other handler.
///
/// Returns proceed, warn (with the one-time notice to queue) or redirect (with the
/// change-password endpoint to redirect to, short-circuiting normal handling).
///
pub async fn check_request(ctx: &ServiceContext, request: Request<api::GateRequest>)
    -> Result<Response<api::GateResponse>, Status> {

    let request = request.into_inner();

    // Unauthenticated requests pass straight through.
    if request.user_id.is_empty() {
        return Ok(Response::new(api::GateResponse {
            action: api::gate_response::Action::Proceed as i32,
            status: api::PasswordStatus::Valid as i32,
            ..Default::default()
        }))
    }

    let evaluation = get_status::evaluate(ctx, &request.user_id, &request.joined_at).await?;

    let config = ctx.config();
    let decision = gate::decide(
        &RequestInfo {
            endpoint: &request.endpoint,
            method: &request.method,
            is_async: request.is_async,
        },
        Some(&IdentityState {
            status: evaluation.status,
            must_change: evaluation.must_change,
        }),
        &Exemptions {
            change_endpoint: &config.change_endpoint,
            logout_endpoint: &config.logout_endpoint,
        });

    let mut response = api::GateResponse {
        action: api::gate_response::Action::Proceed as i32,
        status: api::PasswordStatus::from(evaluation.status) as i32,
        expires_in: evaluation.expires_in.clone().unwrap_or_default(),
        ..Default::default()
    };

    match decision {
        Gate::Proceed => {},

        Gate::Warn => {
            response.action = api::gate_response::Action::Warn as i32;
            response.notice = warning_notice(&evaluation.expires_in);
            response.notice_tag = NOTICE_TAG.to_string();
        },

        Gate::Redirect => {
            tracing::debug!("Redirecting user {} to {}", request.user_id, config.change_endpoint);
            response.action = api::gate_response::Action::Redirect as i32;
            response.redirect_to = config.change_endpoint.clone();
        },
    }

    Ok(Response::new(response))
}

///
/// e.g. "Please change your password. It expires in 3 days."
///
fn warning_notice(expires_in: &Option<String>) -> String {
    match expires_in {
        Some(expires_in) => format!("Please change your password. It expires in {}.", expires_in),
        None => "Please change your password.".to_string(),
    }
}
