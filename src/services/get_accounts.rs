use tonic::{Request, Response, Status};
use crate::{db, grpc::{api, common}, utils::context::ServiceContext};

///
/// Return all the rotation records in the system.
///
/// A display-only view for admin tooling - there is one record per user and hashes
/// are never included.
///
pub async fn get_accounts(ctx: &ServiceContext, _request: Request<common::Empty>)
    -> Result<Response<api::GetAccountsResponse>, Status> {

    let accounts: Vec<api::Account> = db::account::load_all(ctx.db())
        .await?
        .iter()
        .map(|account| account.into())
        .collect();

    Ok(Response::new(api::GetAccountsResponse { accounts }))
}
