//! 경매 도메인 오류
//!
//! 모든 연산은 [`AuctionError`]로 실패를 보고한다. 저장소 수준의 제약 조건
//! 위반(unique / foreign key / check)은 원시 `sqlx::Error`로 노출하지 않고
//! [`AuctionError::ConstraintViolation`]으로 변환한다.

use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("{entity}을(를) 찾을 수 없습니다: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("이미 종료된 경매입니다: item {0}")]
    ItemClosed(i64),

    #[error("입찰 금액이 올바르지 않습니다: {0}")]
    InvalidAmount(i64),

    #[error("입찰 금액이 현재 최고 입찰가보다 낮습니다: {amount} <= {highest}")]
    BidTooLow { amount: i64, highest: i64 },

    #[error("이미 해당 상품에 활성 입찰이 있습니다: item {item_id}")]
    BidExists { item_id: i64 },

    #[error("권한이 없습니다")]
    Forbidden,

    #[error("이메일이 올바르지 않습니다: {0}")]
    InvalidEmail(String),

    #[error("잘못된 요청입니다: {0}")]
    BadRequest(String),

    #[error("제약 조건 위반: {0}")]
    ConstraintViolation(String),

    #[error("데이터베이스 오류: {0}")]
    Database(sqlx::Error),
}

pub type AuctionResult<T> = Result<T, AuctionError>;

impl AuctionError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// 기계 판독용 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ItemClosed(_) => "ITEM_CLOSED",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::BidTooLow { .. } => "LOW_BID",
            Self::BidExists { .. } => "BID_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Database(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ItemClosed(_) | Self::BidExists { .. } | Self::ConstraintViolation(_) => {
                StatusCode::CONFLICT
            }
            Self::InvalidAmount(_)
            | Self::BidTooLow { .. }
            | Self::InvalidEmail(_)
            | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AuctionError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation() =>
            {
                Self::ConstraintViolation(db_err.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// unique 제약 위반 여부
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
