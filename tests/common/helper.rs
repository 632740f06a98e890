use tonic::{Request, Status};
use warden::grpc::{admin, api, common};
use super::TestContext;

///
/// Each test owns a unique user so tests cannot interfere with each other's data.
///
pub fn unique_user() -> String {
    uuid::Uuid::new_v4().to_hyphenated().to_string()
}

///
/// Parse the numeric error code out of the status details.
///
pub fn error_code(status: Status) -> u32 {
    String::from_utf8(status.details().to_vec())
        .expect("status details were not utf8")
        .parse()
        .expect("status details were not a numeric error code")
}

pub async fn set_time(new_time: &str, ctx: &mut TestContext) {
    ctx.admin().set_time(Request::new(admin::NewTime { new_time: new_time.to_string() }))
        .await
        .expect("Unable to fix the server clock");
}

pub async fn reset_time(ctx: &mut TestContext) {
    ctx.admin().reset_time(Request::new(common::Empty::default()))
        .await
        .expect("Unable to un-fix the server clock");
}

pub async fn register_assert_ok(user_id: &str, password: &str, ctx: &mut TestContext) {
    ctx.client().register_account(Request::new(api::RegisterRequest {
            user_id: user_id.to_string(),
            credential: Some(api::register_request::Credential::PlainTextPassword(password.to_string())),
        }))
        .await
        .expect("Unable to register the account");
}

pub async fn register_phc_assert_ok(user_id: &str, phc: &str, ctx: &mut TestContext) {
    ctx.client().register_account(Request::new(api::RegisterRequest {
            user_id: user_id.to_string(),
            credential: Some(api::register_request::Credential::Phc(phc.to_string())),
        }))
        .await
        .expect("Unable to register the account with a pre-hashed credential");
}

pub async fn register_assert_err(user_id: &str, password: &str, ctx: &mut TestContext) -> Status {
    ctx.client().register_account(Request::new(api::RegisterRequest {
            user_id: user_id.to_string(),
            credential: Some(api::register_request::Credential::PlainTextPassword(password.to_string())),
        }))
        .await
        .err()
        .expect("Registering should have failed")
}

pub async fn login_assert_ok(user_id: &str, ctx: &mut TestContext) -> api::LoginResponse {
    ctx.client().login(Request::new(api::LoginRequest {
            user_id: user_id.to_string(),
            joined_at: String::default(),
        }))
        .await
        .expect("Unable to evaluate the login")
        .into_inner()
}

pub async fn check_page(user_id: &str, endpoint: &str, ctx: &mut TestContext) -> api::GateResponse {
    check_request(user_id, endpoint, "GET", false, ctx).await
}

pub async fn check_request(user_id: &str, endpoint: &str, method: &str, is_async: bool, ctx: &mut TestContext)
    -> api::GateResponse {

    ctx.client().check_request(Request::new(api::GateRequest {
            user_id: user_id.to_string(),
            joined_at: String::default(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
            is_async,
        }))
        .await
        .expect("Unable to check the request")
        .into_inner()
}

pub async fn change_password_assert_ok(user_id: &str, old: &str, new: &str, ctx: &mut TestContext) {
    ctx.client().change_password(Request::new(api::ChangeRequest {
            user_id: user_id.to_string(),
            old_password: old.to_string(),
            new_password: new.to_string(),
            new_password_confirmation: new.to_string(),
        }))
        .await
        .expect("Unable to change the password");
}

pub async fn change_password_assert_err(user_id: &str, old: &str, new: &str, confirmation: &str, ctx: &mut TestContext)
    -> Status {

    ctx.client().change_password(Request::new(api::ChangeRequest {
            user_id: user_id.to_string(),
            old_password: old.to_string(),
            new_password: new.to_string(),
            new_password_confirmation: confirmation.to_string(),
        }))
        .await
        .err()
        .expect("Changing the password should have failed")
}

pub async fn get_status_assert_ok(user_id: &str, joined_at: &str, ctx: &mut TestContext) -> api::StatusResponse {
    ctx.client().get_status(Request::new(api::StatusRequest {
            user_id: user_id.to_string(),
            joined_at: joined_at.to_string(),
        }))
        .await
        .expect("Unable to get the password status")
        .into_inner()
}

pub async fn get_status_assert_err(user_id: &str, joined_at: &str, ctx: &mut TestContext) -> Status {
    ctx.client().get_status(Request::new(api::StatusRequest {
            user_id: user_id.to_string(),
            joined_at: joined_at.to_string(),
        }))
        .await
        .err()
        .expect("Getting the password status should have failed")
}

pub async fn get_history_assert_ok(user_id: &str, ctx: &mut TestContext) -> api::GetHistoryResponse {
    ctx.client().get_history(Request::new(api::HistoryRequest { user_id: user_id.to_string() }))
        .await
        .expect("Unable to get the password history")
        .into_inner()
}

pub async fn get_accounts_assert_ok(ctx: &mut TestContext) -> api::GetAccountsResponse {
    ctx.client().get_accounts(Request::new(common::Empty::default()))
        .await
        .expect("Unable to list the accounts")
        .into_inner()
}

pub async fn delete_account_assert_ok(user_id: &str, ctx: &mut TestContext) {
    ctx.client().delete_account(Request::new(api::DeleteRequest { user_id: user_id.to_string() }))
        .await
        .expect("Unable to delete the account");
}

pub async fn delete_account_assert_err(user_id: &str, ctx: &mut TestContext) -> Status {
    ctx.client().delete_account(Request::new(api::DeleteRequest { user_id: user_id.to_string() }))
        .await
        .err()
        .expect("Deleting the account should have failed")
}
