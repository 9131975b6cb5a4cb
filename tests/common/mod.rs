#![allow(dead_code)]

use charity_auction::bidding::model::Item;
use charity_auction::config::DatabaseConfig;
use charity_auction::database::DatabaseManager;
use std::path::Path;
use std::time::Duration;

/// 인메모리 데이터베이스 매니저 설정
pub async fn setup() -> DatabaseManager {
    let db_manager = DatabaseManager::in_memory()
        .await
        .expect("인메모리 데이터베이스 생성 실패");
    db_manager
        .initialize_database()
        .await
        .expect("스키마 생성 실패");
    db_manager
}

/// 파일 데이터베이스 매니저 설정 (동시성 테스트용)
pub async fn setup_file(dir: &Path) -> DatabaseManager {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.join("auction.db").display()),
        max_connections: 8,
        busy_timeout: Duration::from_secs(10),
    };
    let db_manager = DatabaseManager::new(&config)
        .await
        .expect("파일 데이터베이스 생성 실패");
    db_manager
        .initialize_database()
        .await
        .expect("스키마 생성 실패");
    db_manager
}

/// 테스트용 상품 생성
pub async fn create_test_item(db_manager: &DatabaseManager, show_order: i64, min_bid: i64) -> Item {
    sqlx::query_as::<_, Item>(
        "INSERT INTO items (title, img_location, author, author_description, min_bid, year, description, show_order)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6, ?7)
         RETURNING id, title, img_location, author, author_description, min_bid, year, description, show_order, is_closed",
    )
    .bind(format!("테스트 작품 {show_order}"))
    .bind(format!("/static/items/{show_order}.jpg"))
    .bind("테스트 작가")
    .bind(min_bid)
    .bind(2024)
    .bind("테스트를 위한 작품입니다.")
    .bind(show_order)
    .fetch_one(db_manager.pool())
    .await
    .expect("상품 생성 실패")
}

/// 지정한 id로 테스트용 계정 생성
pub async fn create_test_account(db_manager: &DatabaseManager, id: i64) {
    sqlx::query("INSERT INTO accounts (id, name, email, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(format!("user {id}"))
        .bind(format!("user{id}@example.org"))
        .bind(chrono::Utc::now())
        .execute(db_manager.pool())
        .await
        .expect("계정 생성 실패");
}

/// 테이블 행 수 조회
pub async fn count_rows(db_manager: &DatabaseManager, sql: &str, user_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(user_id)
        .fetch_one(db_manager.pool())
        .await
        .expect("행 수 조회 실패")
}
