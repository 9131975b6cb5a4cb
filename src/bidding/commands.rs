/// 입찰 관련 커맨드 처리
/// 1. 입찰
/// 2. 입찰 취소
/// 3. 경매 종료
// region:    --- Imports
use crate::bidding::model::{Bid, Item};
use crate::config::BidPolicy;
use crate::database::DatabaseManager;
use crate::error::{is_unique_violation, AuctionError, AuctionResult};
use crate::query::queries;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{info, warn};
use uuid::Uuid;
// endregion: --- Imports

// region:    --- Commands

/// 1. 입찰
///
/// 검증 순서: 상품 존재 -> 종료 여부 -> 최소 입찰가 -> (오름차순 정책) 최고 입찰가.
/// 검증과 삽입은 하나의 조건부 INSERT로 수행되며, 삽입되지 않은 경우에만
/// 같은 트랜잭션 안에서 거절 사유를 조회한다.
pub async fn place_bid(
    db_manager: &DatabaseManager,
    policy: BidPolicy,
    user_id: i64,
    item_id: i64,
    amount: i64,
) -> AuctionResult<Bid> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: user: {}, item: {}, amount: {}, policy: {}",
        "Command", user_id, item_id, amount, policy
    );

    let bid_id = Uuid::now_v7();
    let now = Utc::now();
    let ascending = policy == BidPolicy::Ascending;

    let result = db_manager
        .transaction::<_, _, AuctionError>(|tx| {
            Box::pin(async move {
                let inserted = sqlx::query_as::<_, Bid>(queries::INSERT_BID_IF_VALID)
                    .bind(bid_id)
                    .bind(user_id)
                    .bind(item_id)
                    .bind(amount)
                    .bind(now)
                    .bind(ascending)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            AuctionError::BidExists { item_id }
                        } else {
                            e.into()
                        }
                    })?;

                match inserted {
                    Some(bid) => Ok(bid),
                    None => Err(rejection_reason(&mut **tx, policy, item_id, amount).await?),
                }
            })
        })
        .await;

    match &result {
        Ok(bid) => info!("{:<12} --> 입찰 성공: {}", "Command", bid.uuid),
        Err(e) => warn!("{:<12} --> 입찰 거절: {} ({})", "Command", e, e.code()),
    }
    result
}

/// 조건부 INSERT가 거절된 사유 조회
async fn rejection_reason(
    conn: &mut SqliteConnection,
    policy: BidPolicy,
    item_id: i64,
    amount: i64,
) -> AuctionResult<AuctionError> {
    let item = sqlx::query_as::<_, Item>(queries::GET_ITEM)
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(item) = item else {
        return Ok(AuctionError::not_found("item", item_id));
    };
    if item.is_closed {
        return Ok(AuctionError::ItemClosed(item_id));
    }
    if amount <= 0 || amount < item.min_bid {
        return Ok(AuctionError::InvalidAmount(amount));
    }

    let highest = sqlx::query_scalar::<_, Option<i64>>(queries::GET_HIGHEST_BID)
        .bind(item_id)
        .fetch_one(&mut *conn)
        .await?;

    match (policy, highest) {
        (BidPolicy::Ascending, Some(highest)) if amount <= highest => {
            Ok(AuctionError::BidTooLow { amount, highest })
        }
        _ => Ok(AuctionError::ConstraintViolation(format!(
            "bid on item {item_id} was not recorded"
        ))),
    }
}

/// 2. 입찰 취소 (본인 입찰만)
pub async fn cancel_bid(
    db_manager: &DatabaseManager,
    bid_id: Uuid,
    requesting_user_id: i64,
) -> AuctionResult<()> {
    info!(
        "{:<12} --> 입찰 취소 요청: bid: {}, user: {}",
        "Command", bid_id, requesting_user_id
    );

    db_manager
        .transaction::<_, _, AuctionError>(|tx| {
            Box::pin(async move {
                let deleted = sqlx::query_scalar::<_, Uuid>(queries::DELETE_OWN_BID)
                    .bind(bid_id)
                    .bind(requesting_user_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                if deleted.is_some() {
                    return Ok(());
                }

                // 삭제되지 않았다면 존재 여부로 사유 구분
                let existing = sqlx::query_as::<_, Bid>(queries::GET_BID)
                    .bind(bid_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                match existing {
                    Some(bid) => {
                        warn!(
                            "{:<12} --> 타인 입찰 취소 시도: bid: {}, owner: {}, user: {}",
                            "Command", bid_id, bid.user_id, requesting_user_id
                        );
                        Err(AuctionError::Forbidden)
                    }
                    None => Err(AuctionError::not_found("bid", bid_id)),
                }
            })
        })
        .await
}

/// 3. 경매 종료
pub async fn close_item(db_manager: &DatabaseManager, item_id: i64) -> AuctionResult<Item> {
    info!("{:<12} --> 경매 종료 요청: item: {}", "Command", item_id);

    db_manager
        .transaction::<_, _, AuctionError>(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Item>(queries::CLOSE_ITEM)
                    .bind(item_id)
                    .fetch_optional(&mut **tx)
                    .await?
                    .ok_or_else(|| AuctionError::not_found("item", item_id))
            })
        })
        .await
}

// endregion: --- Commands
