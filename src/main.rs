// region:    --- Imports
use charity_auction::config::{self, Config};
use charity_auction::database::DatabaseManager;
use charity_auction::handlers;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
// endregion: --- Imports

const LOG_FILE_NAME: &str = "auction-server-logs.log";

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // logging 초기화 (설정 로드 로그까지 남기도록 먼저)
    init_tracing(config::log_dir_from_env().as_deref())?;

    let config = Config::from_env()?;

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new(&config.database).await?);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
    info!("{:<12} --> 입찰 정책: {}", "Main", config.bid_policy);

    // 라우터 설정
    let routes_all = handlers::routes(Arc::clone(&db_manager), config.bid_policy);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }

    db_manager.pool().close().await;
    info!("{:<12} --> 데이터베이스 연결 종료", "Main");
    Ok(())
}
// endregion: --- Main

/// stdout 출력과, LOG_DIR이 설정된 경우 파일 출력을 함께 구성
fn init_tracing(log_dir: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    Ok(())
}
