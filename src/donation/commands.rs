/// 기부 커맨드 처리
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::donation::model::Donation;
use crate::error::{AuctionError, AuctionResult};
use crate::query::queries;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
// endregion: --- Imports

/// 기부 등록 또는 갱신
///
/// user_id의 unique 제약에 기대는 단일 INSERT ... ON CONFLICT 문으로 처리하므로
/// 동시에 호출되어도 사용자 당 행은 하나만 남는다.
pub async fn upsert_donation(
    db_manager: &DatabaseManager,
    user_id: i64,
    amount: i64,
) -> AuctionResult<Donation> {
    info!(
        "{:<12} --> 기부 등록 요청: user: {}, amount: {}",
        "Command", user_id, amount
    );
    if amount < 0 {
        return Err(AuctionError::InvalidAmount(amount));
    }

    let donation_id = Uuid::now_v7();
    let now = Utc::now();

    db_manager
        .transaction::<_, _, AuctionError>(|tx| {
            Box::pin(async move {
                let donation = sqlx::query_as::<_, Donation>(queries::UPSERT_DONATION)
                    .bind(donation_id)
                    .bind(user_id)
                    .bind(amount)
                    .bind(now)
                    .fetch_one(&mut **tx)
                    .await?;
                Ok(donation)
            })
        })
        .await
}
