// region:    --- Imports
use super::queries;
use crate::account::model::Account;
use crate::bidding::model::{Bid, Item};
use crate::database::DatabaseManager;
use crate::donation::model::Donation;
use crate::error::AuctionResult;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 상품 조회 (전시 순서 오름차순)
pub async fn list_items(db_manager: &DatabaseManager) -> AuctionResult<Vec<Item>> {
    info!("{:<12} --> 모든 상품 조회", "Query");
    let items = sqlx::query_as::<_, Item>(queries::GET_ALL_ITEMS)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(items)
}

/// 상품 조회
pub async fn get_item(db_manager: &DatabaseManager, item_id: i64) -> AuctionResult<Option<Item>> {
    info!("{:<12} --> 상품 조회 id: {}", "Query", item_id);
    let item = sqlx::query_as::<_, Item>(queries::GET_ITEM)
        .bind(item_id)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(item)
}

/// 최고 입찰가 조회
pub async fn get_highest_bid(
    db_manager: &DatabaseManager,
    item_id: i64,
) -> AuctionResult<Option<i64>> {
    info!("{:<12} --> 최고 입찰가 조회 id: {}", "Query", item_id);
    let highest = sqlx::query_scalar::<_, Option<i64>>(queries::GET_HIGHEST_BID)
        .bind(item_id)
        .fetch_one(db_manager.pool())
        .await?;
    Ok(highest)
}

/// 사용자의 상품 입찰 조회 (없으면 None)
pub async fn get_bid(
    db_manager: &DatabaseManager,
    user_id: i64,
    item_id: i64,
) -> AuctionResult<Option<Bid>> {
    info!(
        "{:<12} --> 입찰 조회 user: {}, item: {}",
        "Query", user_id, item_id
    );
    let bid = sqlx::query_as::<_, Bid>(queries::GET_USER_ITEM_BID)
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(bid)
}

/// 사용자 입찰 목록 조회 (최신순)
pub async fn list_user_bids(db_manager: &DatabaseManager, user_id: i64) -> AuctionResult<Vec<Bid>> {
    info!("{:<12} --> 사용자 입찰 목록 조회 user: {}", "Query", user_id);
    let bids = sqlx::query_as::<_, Bid>(queries::GET_USER_BIDS)
        .bind(user_id)
        .fetch_all(db_manager.pool())
        .await?;
    Ok(bids)
}

/// 기부 조회
pub async fn get_donation(
    db_manager: &DatabaseManager,
    user_id: i64,
) -> AuctionResult<Option<Donation>> {
    info!("{:<12} --> 기부 조회 user: {}", "Query", user_id);
    let donation = sqlx::query_as::<_, Donation>(queries::GET_DONATION)
        .bind(user_id)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(donation)
}

/// 계정 조회
pub async fn get_account(
    db_manager: &DatabaseManager,
    account_id: i64,
) -> AuctionResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(queries::GET_ACCOUNT)
        .bind(account_id)
        .fetch_optional(db_manager.pool())
        .await?;
    Ok(account)
}

// endregion: --- Query Handlers
