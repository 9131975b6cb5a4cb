// region:    --- Imports
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

// endregion: --- Imports

// region:    --- Errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("환경 변수 {key} 값이 올바르지 않습니다: {value} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
// endregion: --- Errors

// region:    --- Bid Policy
/// 동일 상품에 대한 입찰 순서 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BidPolicy {
    /// 새 입찰은 현재 최고 입찰가보다 커야 한다
    #[default]
    Ascending,
    /// 새 입찰은 최소 입찰가 이상이기만 하면 된다
    MinimumOnly,
}

impl FromStr for BidPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(Self::Ascending),
            "minimum" | "minimum_only" => Ok(Self::MinimumOnly),
            other => Err(format!("알 수 없는 입찰 정책: {other}")),
        }
    }
}

impl Display for BidPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::MinimumOnly => f.write_str("minimum"),
        }
    }
}
// endregion: --- Bid Policy

// region:    --- Config
/// 데이터베이스 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:///app/data/auction.db".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// 서버 설정
///
/// | Env Var                    | Default                         |
/// |----------------------------|---------------------------------|
/// | `DATABASE_URL`             | `sqlite:///app/data/auction.db` |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                             |
/// | `DATABASE_BUSY_TIMEOUT_MS` | `5000`                          |
/// | `BIND_ADDR`                | `0.0.0.0:3000`                  |
/// | `BID_POLICY`               | `ascending`                     |
/// | `LOG_DIR`                  | 미설정 (stdout 전용)              |
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: String,
    pub bid_policy: BidPolicy,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// 환경 변수로부터 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 조회 함수로부터 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.max_connections,
            )?,
            busy_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DATABASE_BUSY_TIMEOUT_MS",
                defaults.busy_timeout.as_millis() as u64,
            )?),
        };

        Ok(Self {
            database,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            bid_policy: parse_or(&lookup, "BID_POLICY", BidPolicy::default())?,
            log_dir: log_dir_from(&lookup),
        })
    }
}

/// 로그 디렉터리만 먼저 읽는다 (나머지 설정 로드 전에 로깅을 초기화하기 위함)
pub fn log_dir_from_env() -> Option<PathBuf> {
    log_dir_from(&|key: &str| std::env::var(key).ok())
}

fn log_dir_from<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_DIR")
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{:<12} --> {key} 미설정, 기본값 사용: {default}", "Config");
            Ok(default)
        }
    }
}
// endregion: --- Config

// endregion: --- Tests
