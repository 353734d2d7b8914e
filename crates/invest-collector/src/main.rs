//! InvestLink 갱신 CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use invest_collector::{refresh_equities, refresh_funds, run_all, RefreshOutcome};
use invest_core::{init_logging, AppConfig, LogConfig};
use invest_data::{Database, PgUnitOfWork, StatusInvestClient};

#[derive(Parser)]
#[command(name = "invest-collector")]
#[command(about = "InvestLink StatusInvest snapshot collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로
    #[arg(long, default_value = "config/default.toml")]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error). 설정 파일보다 우선합니다.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 데이터베이스 마이그레이션 실행
    Migrate,

    /// 주식 스냅샷 갱신
    RefreshEquities,

    /// FII 스냅샷 갱신
    RefreshFunds,

    /// 전체 갱신 (주식 → FII)
    RunAll,

    /// 데몬 모드: 주기적으로 전체 갱신 실행
    Daemon,
}

fn exit_code(outcomes: &[RefreshOutcome]) -> ExitCode {
    if outcomes.iter().all(RefreshOutcome::is_success) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // 설정 로드
    let mut config = AppConfig::load(&cli.config).context("설정 로드 실패")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // 로깅 초기화
    init_logging(LogConfig::from(&config.logging)).map_err(|e| anyhow!(e))?;

    tracing::info!("InvestLink Collector 시작");

    // DB 연결
    let db = Database::connect(&config.database)
        .await
        .context("데이터베이스 연결 실패")?;

    let provider = StatusInvestClient::new(&config.provider).context("Provider 생성 실패")?;
    let uow = PgUnitOfWork::from_database(&db);

    // 명령 실행
    let code = match cli.command {
        Commands::Migrate => {
            db.migrate().await.context("마이그레이션 실패")?;
            ExitCode::SUCCESS
        }
        Commands::RefreshEquities => {
            let outcome = refresh_equities(&provider, &uow).await;
            tracing::info!(status = outcome.status, message = %outcome.message, "주식 갱신 결과");
            exit_code(&[outcome])
        }
        Commands::RefreshFunds => {
            let outcome = refresh_funds(&provider, &uow).await;
            tracing::info!(status = outcome.status, message = %outcome.message, "FII 갱신 결과");
            exit_code(&[outcome])
        }
        Commands::RunAll => exit_code(&run_all(&provider, &uow).await),
        Commands::Daemon => {
            tracing::info!(
                "=== 데몬 모드 시작 (주기: {}분) ===",
                config.daemon.interval_minutes
            );

            let mut interval = tokio::time::interval(config.daemon.interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    _ = interval.tick() => {
                        for outcome in run_all(&provider, &uow).await {
                            if !outcome.is_success() {
                                tracing::warn!(
                                    status = outcome.status,
                                    message = %outcome.message,
                                    "갱신 실패"
                                );
                            }
                        }

                        tracing::info!(
                            "=== 갱신 완료, 다음 실행: {}분 후 ===",
                            config.daemon.interval_minutes
                        );
                    }
                }
            }

            ExitCode::SUCCESS
        }
    };

    db.pool().close().await;
    tracing::info!("InvestLink Collector 종료");

    Ok(code)
}
