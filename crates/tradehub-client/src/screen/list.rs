//! 일반 리스트/테이블 화면 기반.

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tradehub_core::{to_record, ColumnDescriptor, ColumnType, HubError, HubResult, Resource};
use tradehub_form::Navigator;

use crate::repository::ResourceRepository;
use crate::resources::TableSource;

/// 리스트 화면의 행 공급자 (`loadData`).
#[async_trait]
pub trait RowSource<T>: Send + Sync {
    async fn load_rows(&self) -> HubResult<Vec<T>>;
}

#[async_trait]
impl<T: Resource> RowSource<T> for ResourceRepository<T> {
    async fn load_rows(&self) -> HubResult<Vec<T>> {
        self.get_all(None).await
    }
}

/// 로드 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 행을 저장함
    Loaded(usize),
    /// 화면이 해제되어 응답을 무시함
    Ignored,
}

/// 리소스 `T`의 리스트 화면 상태.
///
/// 화면 인스턴스마다 자신의 행 목록을 소유합니다. 해제 후 도착한 응답은 상태를 바꾸지 않습니다.
#[derive(Debug)]
pub struct ResourceList<T: TableSource> {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<T>,
    filter: Option<String>,
    cancel: CancellationToken,
}

impl<T: TableSource> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableSource> ResourceList<T> {
    pub fn new() -> Self {
        Self {
            columns: T::columns(),
            rows: Vec::new(),
            filter: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// 해제 신호용 토큰 (복제본).
    pub fn teardown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 화면을 해제합니다. 진행 중인 로드는 결과를 버립니다.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// 행을 불러옵니다.
    ///
    /// 전송 에러는 그대로 호출자에게 전달되며 기존 행은 유지됩니다.
    pub async fn load(&mut self, source: &dyn RowSource<T>) -> HubResult<LoadOutcome> {
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = source.load_rows() => Some(result),
        };

        let rows = match result {
            Some(result) if !self.cancel.is_cancelled() => result?,
            _ => {
                debug!(resource = T::NAME, "Late response ignored after teardown");
                return Ok(LoadOutcome::Ignored);
            }
        };

        debug!(resource = T::NAME, rows = rows.len(), "Rows loaded");
        self.rows = rows;
        Ok(LoadOutcome::Loaded(self.rows.len()))
    }

    /// 전역 텍스트 필터를 설정합니다. 빈 문자열이면 해제합니다.
    pub fn set_filter(&mut self, text: &str) {
        let text = text.trim();
        self.filter = (!text.is_empty()).then(|| text.to_lowercase());
    }

    /// 텍스트 셀이 있는 컬럼의 헤더.
    pub fn headers(&self) -> Vec<&str> {
        self.text_columns().map(|c| c.header.as_str()).collect()
    }

    fn text_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| {
            matches!(c.column_type, ColumnType::Default | ColumnType::Nested)
        })
    }

    /// 컬럼 디스크립터로 투영한 표시 행 (필터 적용).
    pub fn table_rows(&self) -> HubResult<Vec<Vec<String>>> {
        let mut table = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let record = to_record(row)?;
            let cells: Vec<String> = self.text_columns().map(|c| c.format_cell(&record)).collect();
            if self.matches_filter(&cells) {
                table.push(cells);
            }
        }
        Ok(table)
    }

    fn matches_filter(&self, cells: &[String]) -> bool {
        match &self.filter {
            Some(query) => cells.iter().any(|cell| cell.to_lowercase().contains(query)),
            None => true,
        }
    }

    /// 원시 레코드 목록 반환.
    pub fn records(&self) -> HubResult<Vec<Value>> {
        self.rows.iter().map(to_record).collect()
    }

    /// 생성 화면으로 이동합니다.
    pub fn add(&self, navigator: &dyn Navigator) {
        navigator.navigate(&format!("/{}/form", T::ROUTE));
    }

    /// 편집 화면으로 이동합니다.
    pub fn edit(&self, navigator: &dyn Navigator, row: &T) -> HubResult<()> {
        let id = row
            .id()
            .ok_or_else(|| HubError::InvalidInput(format!("{}: 식별자가 없는 행입니다", T::NAME)))?;
        navigator.navigate(&format!("/{}/form/{}", T::ROUTE, id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Agent;
    use std::sync::Mutex;

    struct StaticRows(Vec<Agent>);

    #[async_trait]
    impl RowSource<Agent> for StaticRows {
        async fn load_rows(&self) -> HubResult<Vec<Agent>> {
            Ok(self.0.clone())
        }
    }

    struct FailingRows;

    #[async_trait]
    impl RowSource<Agent> for FailingRows {
        async fn load_rows(&self) -> HubResult<Vec<Agent>> {
            Err(HubError::transport(Some(500)))
        }
    }

    #[derive(Default)]
    struct RecordingNavigator(Mutex<Vec<String>>);

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.0.lock().unwrap().push(path.to_string());
        }

        fn back(&self) {
            self.0.lock().unwrap().push("<back>".to_string());
        }
    }

    fn agent(id: &str, name: &str) -> Agent {
        Agent {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn test_load_and_project_rows() {
        let mut list = ResourceList::<Agent>::new();
        let source = StaticRows(vec![agent("1", "Alpha"), agent("2", "Beta")]);

        assert_eq!(list.load(&source).await.unwrap(), LoadOutcome::Loaded(2));
        assert_eq!(list.headers(), vec!["ID", "NOME"]);
        assert_eq!(
            list.table_rows().unwrap(),
            vec![vec!["1".to_string(), "Alpha".to_string()], vec!["2".to_string(), "Beta".to_string()]]
        );

        list.set_filter("BET");
        assert_eq!(list.table_rows().unwrap().len(), 1);
        list.set_filter("  ");
        assert_eq!(list.table_rows().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_name_renders_placeholder() {
        let mut list = ResourceList::<Agent>::new();
        let source = StaticRows(vec![Agent {
            id: Some("9".to_string()),
            name: None,
        }]);
        list.load(&source).await.unwrap();
        assert_eq!(list.table_rows().unwrap()[0][1], "-");
    }

    #[tokio::test]
    async fn test_transport_error_keeps_rows() {
        let mut list = ResourceList::<Agent>::new();
        list.load(&StaticRows(vec![agent("1", "Alpha")])).await.unwrap();

        let err = list.load(&FailingRows).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(list.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_load_after_teardown_is_ignored() {
        let mut list = ResourceList::<Agent>::new();
        list.teardown();

        let outcome = list.load(&StaticRows(vec![agent("1", "Alpha")])).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Ignored);
        assert!(list.rows().is_empty());
    }

    #[test]
    fn test_navigation() {
        let list = ResourceList::<Agent>::new();
        let navigator = RecordingNavigator::default();

        list.add(&navigator);
        list.edit(&navigator, &agent("42", "x")).unwrap();
        assert!(list.edit(&navigator, &Agent::default()).is_err());

        assert_eq!(
            *navigator.0.lock().unwrap(),
            vec!["/agents/form".to_string(), "/agents/form/42".to_string()]
        );
    }
}
