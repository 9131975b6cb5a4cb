mod common;

use charity_auction::account::commands::resolve_account;
use charity_auction::bidding::commands::place_bid;
use charity_auction::config::BidPolicy;
use charity_auction::donation::commands::upsert_donation;
use charity_auction::error::AuctionError;
use charity_auction::query;
use common::{count_rows, create_test_account, create_test_item, setup_file};
use std::sync::Arc;

/// 동시 기부 등록에도 사용자 당 행은 하나
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_donation_upserts() {
    let dir = tempfile::tempdir().unwrap();
    let db_manager = Arc::new(setup_file(dir.path()).await);
    create_test_account(&db_manager, 7).await;

    let mut handles = vec![];
    for amount in 1..=20 {
        let db_manager = Arc::clone(&db_manager);
        handles.push(tokio::spawn(async move {
            upsert_donation(&db_manager, 7, amount).await
        }));
    }

    let mut amounts = vec![];
    for handle in handles {
        amounts.push(handle.await.unwrap().unwrap().amount);
    }

    assert_eq!(
        count_rows(
            &db_manager,
            "SELECT COUNT(*) FROM donations WHERE user_id = ?1",
            7
        )
        .await,
        1
    );
    let stored = query::handlers::get_donation(&db_manager, 7)
        .await
        .unwrap()
        .unwrap();
    assert!(amounts.contains(&stored.amount));
}

/// 동시 입찰: 오름차순 정책에서 최고 금액 입찰은 항상 성공
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ascending_bids() {
    let dir = tempfile::tempdir().unwrap();
    let db_manager = Arc::new(setup_file(dir.path()).await);
    let item = create_test_item(&db_manager, 1, 100).await;
    for user_id in 1..=20 {
        create_test_account(&db_manager, user_id).await;
    }

    let mut handles = vec![];
    for user_id in 1..=20 {
        let db_manager = Arc::clone(&db_manager);
        let item_id = item.id;
        handles.push(tokio::spawn(async move {
            let amount = 100 + user_id * 10;
            (
                amount,
                place_bid(&db_manager, BidPolicy::Ascending, user_id, item_id, amount).await,
            )
        }));
    }

    let mut accepted = vec![];
    for handle in handles {
        let (amount, result) = handle.await.unwrap();
        match result {
            Ok(bid) => accepted.push(bid),
            Err(AuctionError::BidTooLow { highest, .. }) => assert!(highest >= amount),
            Err(e) => panic!("예상하지 못한 오류: {e:?}"),
        }
    }

    assert!(accepted.iter().any(|bid| bid.amount == 300));
    assert_eq!(
        query::handlers::get_highest_bid(&db_manager, item.id)
            .await
            .unwrap(),
        Some(300)
    );

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bids WHERE item_id = ?1")
        .bind(item.id)
        .fetch_one(db_manager.pool())
        .await
        .unwrap();
    assert_eq!(total as usize, accepted.len());
}

/// 같은 이메일 동시 로그인은 같은 계정
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_account_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let db_manager = Arc::new(setup_file(dir.path()).await);

    let mut handles = vec![];
    for i in 0..10 {
        let db_manager = Arc::clone(&db_manager);
        handles.push(tokio::spawn(async move {
            resolve_account(&db_manager, "donor@example.org", &format!("Donor {i}")).await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
}
