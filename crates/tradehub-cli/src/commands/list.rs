//! 리소스 목록 조회.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tradehub_client::{ResourceList, Transport};
use tradehub_core::EndpointConfig;

use super::{dispatch, repository, ResourceKind, ScreenResource};

pub async fn run(
    kind: ResourceKind,
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    filter: Option<&str>,
    json: bool,
) -> Result<()> {
    dispatch!(kind, list_resource(endpoints, transport, filter, json))
}

async fn list_resource<T: ScreenResource>(
    endpoints: &EndpointConfig,
    transport: Arc<dyn Transport>,
    filter: Option<&str>,
    json: bool,
) -> Result<()> {
    let repository = repository::<T>(endpoints, transport)?;

    let mut list = ResourceList::<T>::new();
    list.load(&repository).await?;
    if let Some(filter) = filter {
        list.set_filter(filter);
    }

    let rows = list.table_rows()?;
    info!(resource = T::NAME, rows = rows.len(), "Listed records");

    if json {
        println!("{}", serde_json::to_string_pretty(&list.records()?)?);
    } else {
        println!("{}", format_table(&list.headers(), &rows));
    }

    Ok(())
}

/// 테이블 형식 출력.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();

    // 헤더
    output.push_str(&pad_line(headers.iter().copied(), &widths));
    output.push('\n');
    let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    output.push_str(&"-".repeat(rule));
    output.push('\n');

    // 데이터
    for row in rows {
        output.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        output.push('\n');
    }

    // 요약
    output.push_str(&format!("Total: {} records", rows.len()));

    output
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
