use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 기부 모델 (사용자 당 1건)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Donation {
    pub uuid: Uuid,
    pub user_id: i64,
    pub amount: i64,
    pub updated_at: DateTime<Utc>,
}
