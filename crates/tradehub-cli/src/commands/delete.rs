//! 레코드 삭제.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tradehub_client::Transport;
use tradehub_core::EndpointConfig;

use super::{dispatch, repository, ResourceKind, ScreenResource};

pub async fn run(
    kind: ResourceKind,
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: &str,
) -> Result<()> {
    dispatch!(kind, delete_resource(endpoints, transport, id))
}

async fn delete_resource<T: ScreenResource>(
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: &str,
) -> Result<()> {
    repository::<T>(endpoints, transport)?.delete(id).await?;

    info!(resource = T::NAME, id, "Record deleted");
    println!("삭제 완료: {} {}", T::NAME, id);
    Ok(())
}
