mod change_password;
mod check_request;
mod delete_account;
mod get_accounts;
mod get_history;
mod get_status;
mod login;
mod register_account;
mod reset_time;
mod set_time;

use std::sync::Arc;
use tracing::instrument;
use tonic::{Request, Response, Status};
use crate::grpc::{admin, api, common};
use crate::grpc::api::warden_server::Warden;
use crate::grpc::admin::admin_server::Admin;

pub use crate::utils::context::ServiceContext;

///
/// Implemention for all the gRPC service endpoints defined in the .proto file.
///
#[tonic::async_trait]
impl Warden for Arc<ServiceContext> {

    #[instrument(skip(self, request))]
    async fn register_account(&self, request: Request<api::RegisterRequest>) -> Result<Response<common::Empty>, Status> {
        register_account::register_account(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn login(&self, request: Request<api::LoginRequest>) -> Result<Response<api::LoginResponse>, Status> {
        login::login(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn check_request(&self, request: Request<api::GateRequest>) -> Result<Response<api::GateResponse>, Status> {
        check_request::check_request(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn change_password(&self, request: Request<api::ChangeRequest>) -> Result<Response<common::Empty>, Status> {
        change_password::change_password(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn get_status(&self, request: Request<api::StatusRequest>) -> Result<Response<api::StatusResponse>, Status> {
        get_status::get_status(self, request).await
    }

    #[instrument(skip(self))]
    async fn get_accounts(&self, request: Request<common::Empty>) -> Result<Response<api::GetAccountsResponse>, Status> {
        get_accounts::get_accounts(self, request).await
    }

    #[instrument(skip(self))]
    async fn get_history(&self, request: Request<api::HistoryRequest>) -> Result<Response<api::GetHistoryResponse>, Status> {
        get_history::get_history(self, request).await
    }

    #[instrument(skip(self, request))]
    async fn delete_account(&self, request: Request<api::DeleteRequest>) -> Result<Response<common::Empty>, Status> {
        delete_account::delete_account(self, request).await
    }
}

#[tonic::async_trait]
impl Admin for Arc<ServiceContext> {

    async fn ping(&self, _request: Request<common::Empty>) -> Result<Response<common::Empty>, Status> {
        Ok(Response::new(common::Empty::default()))
    }

    async fn set_time(&self, request: Request<admin::NewTime>) -> Result<Response<common::Empty>, Status> {
        set_time::set_time(self, request).await
    }

    async fn reset_time(&self, request: Request<common::Empty>) -> Result<Response<common::Empty>, Status> {
        reset_time::reset_time(self, request).await
    }
}
