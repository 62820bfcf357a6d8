//! 폼 스키마 출력.

use anyhow::Result;
use std::sync::Arc;
use tradehub_client::{RouteContext, Transport};
use tradehub_core::EndpointConfig;

use super::{dispatch, repository, ResourceKind, ScreenResource};

pub async fn run(
    kind: ResourceKind,
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: Option<&str>,
) -> Result<()> {
    dispatch!(kind, print_schema(endpoints, transport, id))
}

async fn print_schema<T: ScreenResource>(
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    id: Option<&str>,
) -> Result<()> {
    let repository = repository::<T>(endpoints, transport)?;
    let route = RouteContext::resolve(&repository, id).await?;
    let resource = route.resource.unwrap_or_default();

    println!("{}", serde_json::to_string_pretty(&resource.form_items())?);
    Ok(())
}
