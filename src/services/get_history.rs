use tonic::{Request, Response, Status};
use crate::{db, grpc::api, utils::context::ServiceContext};

///
/// Return the retained history entries for a user, newest first.
///
/// Display only - the entries carry their timestamps, never the hashes.
///
pub async fn get_history(ctx: &ServiceContext, request: Request<api::HistoryRequest>)
    -> Result<Response<api::GetHistoryResponse>, Status> {

    let request = request.into_inner();

    let entries: Vec<api::HistoryEntry> = db::history::load_recent(&request.user_id, ctx.policy().history_count, ctx.db())
        .await?
        .iter()
        .map(|entry| entry.into())
        .collect();

    Ok(Response::new(api::GetHistoryResponse { entries }))
}
