use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub img_location: String,
    pub author: String,
    pub author_description: Option<String>,
    pub min_bid: i64,
    pub year: i64,
    pub description: String,
    pub show_order: i64,
    pub is_closed: bool,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub uuid: Uuid,
    pub user_id: i64,
    pub item_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}
