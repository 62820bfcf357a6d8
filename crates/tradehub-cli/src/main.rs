//! 트레이드 허브 관리자 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 에이전트 목록 (테이블)
//! tradehub list agent
//!
//! # 텍스트 필터와 JSON 출력
//! tradehub list risk-management --filter hold --json
//!
//! # 레코드 하나를 보기 모드 폼으로 출력
//! tradehub show tradezero-fact 42
//!
//! # 생성 폼 스키마
//! tradehub schema datafeed
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tradehub_client::{HttpTransport, Transport};
use tradehub_core::{bootstrap, init_logging, init_logging_from_env, AppConfig, LogConfig, LogFormat};

mod commands;

use commands::ResourceKind;

#[derive(Parser)]
#[command(name = "tradehub")]
#[command(about = "Trade hub admin CLI - 메타데이터 기반 리소스 관리", long_about = None)]
#[command(version)]
struct Cli {
    /// 엔드포인트 설정 파일 (JSON, TOML, YAML)
    #[arg(short, long, global = true, default_value = "config/endpoints.json", env = "TRADEHUB_CONFIG")]
    config: PathBuf,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true, env = "TRADEHUB_LOG_FORMAT")]
    log_format: Option<String>,

    /// 스팬 생성/종료 이벤트 기록
    #[arg(long, global = true, default_value = "false")]
    trace_spans: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 리소스 목록 조회
    List {
        /// 리소스 종류
        resource: ResourceKind,

        /// 전역 텍스트 필터 (대소문자 무시)
        #[arg(short, long)]
        filter: Option<String>,

        /// 원시 레코드를 JSON으로 출력
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 레코드 하나를 폼 순서로 출력
    Show {
        /// 리소스 종류
        resource: ResourceKind,

        /// 레코드 식별자
        id: String,
    },

    /// 폼 스키마 출력 (식별자가 있으면 현재 값 포함)
    Schema {
        /// 리소스 종류
        resource: ResourceKind,

        /// 레코드 식별자
        #[arg(long)]
        id: Option<String>,
    },

    /// 레코드 삭제
    Delete {
        /// 리소스 종류
        resource: ResourceKind,

        /// 레코드 식별자
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            // 설정 문서 없이도 부트스트랩 실패는 기록합니다
            init_logging_from_env().map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
            error!(config = %cli.config.display(), "Bootstrap failed: {e}");
            return Err(e)
                .with_context(|| format!("Failed to load configuration: {}", cli.config.display()));
        }
    };

    let mut log_config = LogConfig::from(&config.logging).with_span_events(cli.trace_spans);
    if let Some(format) = cli.log_format.as_deref() {
        log_config = log_config.with_format(format.parse::<LogFormat>().map_err(anyhow::Error::msg)?);
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let endpoints = bootstrap::init_from(config.endpoints())?;
    info!(config = %cli.config.display(), "Configuration loaded");

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new());

    let result = match cli.command {
        Commands::List {
            resource,
            filter,
            json,
        } => commands::list::run(resource, endpoints, transport, filter.as_deref(), json).await,
        Commands::Show { resource, id } => {
            commands::show::run(resource, endpoints, transport, &id).await
        }
        Commands::Schema { resource, id } => {
            commands::schema::run(resource, endpoints, transport, id.as_deref()).await
        }
        Commands::Delete { resource, id } => {
            commands::delete::run(resource, endpoints, transport, &id).await
        }
    };

    if let Err(e) = &result {
        error!("Command failed: {e:#}");
    }
    result
}
