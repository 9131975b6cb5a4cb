/// 계정 커맨드 처리 (로그인 / 가입)
// region:    --- Imports
use crate::account::model::Account;
use crate::database::DatabaseManager;
use crate::error::{AuctionError, AuctionResult};
use crate::query::queries;
use chrono::Utc;
use tracing::info;
// endregion: --- Imports

/// 이메일로 계정 조회, 없으면 생성
///
/// 같은 이메일로 여러 번 호출해도 같은 계정을 돌려준다. 기존 계정의 이름은 바꾸지 않는다.
pub async fn resolve_account(
    db_manager: &DatabaseManager,
    email: &str,
    name: &str,
) -> AuctionResult<Account> {
    let email = normalize_email(email)?;
    let name = name.trim().to_string();
    info!("{:<12} --> 계정 확인: {}", "Command", email);

    let now = Utc::now();
    db_manager
        .transaction::<_, _, AuctionError>(|tx| {
            Box::pin(async move {
                let account = sqlx::query_as::<_, Account>(queries::UPSERT_ACCOUNT)
                    .bind(name)
                    .bind(email)
                    .bind(now)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(account)
            })
        })
        .await
}

fn normalize_email(email: &str) -> AuctionResult<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(AuctionError::InvalidEmail(email))
    }
}
