// region:    --- Imports
use crate::account::commands::resolve_account;
use crate::account::model::Account;
use crate::bidding::commands::{cancel_bid, place_bid};
use crate::bidding::model::{Bid, Item};
use crate::config::BidPolicy;
use crate::database::DatabaseManager;
use crate::donation::commands::upsert_donation;
use crate::donation::model::Donation;
use crate::error::AuctionError;
use crate::query;
use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

// endregion: --- Imports

type AppState = (Arc<DatabaseManager>, BidPolicy);

/// 상위 세션 계층이 인증된 사용자 id를 실어 보내는 헤더
pub const USER_ID_HEADER: &str = "x-user-id";

// region:    --- Router
pub fn routes(db_manager: Arc<DatabaseManager>, bid_policy: BidPolicy) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/healthcheck", get(handle_healthcheck))
        .route("/login", post(handle_login))
        .route("/items", get(handle_get_items))
        .route("/items/:id", get(handle_get_item))
        .route("/items/:id/highest-bid", get(handle_get_highest_bid))
        .route("/items/:id/bid", get(handle_get_my_bid))
        .route("/items/:id/bids", post(handle_place_bid))
        .route("/bids", get(handle_get_my_bids))
        .route("/bids/:uuid", delete(handle_cancel_bid))
        .route(
            "/donation",
            get(handle_get_donation).put(handle_put_donation),
        )
        .layer(TraceLayer::new_for_http())
        .with_state((db_manager, bid_policy))
}
// endregion: --- Router

// region:    --- Auth
/// 인증된 사용자
///
/// 세션 쿠키 처리는 이 서비스 앞단에서 끝나며, 여기서는 그 결과로 전달된
/// `x-user-id` 헤더만 읽는다.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "로그인이 필요합니다.",
                        "code": "UNAUTHORIZED"
                    })),
                )
                    .into_response()
            })?;

        Ok(AuthUser { user_id })
    }
}
// endregion: --- Auth

// region:    --- Error Response
impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AuctionError::Database(e) => {
                error!("{:<12} --> 데이터베이스 오류: {:?}", "Handler", e);
                "내부 오류가 발생했습니다.".to_string()
            }
            other => other.to_string(),
        };

        let mut body = serde_json::json!({
            "error": message,
            "code": self.code(),
        });
        if let AuctionError::BidTooLow { amount, highest } = &self {
            body["bid_amount"] = (*amount).into();
            body["highest_bid"] = (*highest).into();
        }

        (status, Json(body)).into_response()
    }
}
// endregion: --- Error Response

// region:    --- Requests
/// 본문 역직렬화 실패도 `{"error", "code"}` 형식으로 응답
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AuctionError))]
pub struct AppJson<T>(pub T);

/// 경로 파라미터 파싱 실패도 `{"error", "code"}` 형식으로 응답
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AuctionError))]
pub struct AppPath<T>(pub T);

impl From<JsonRejection> for AuctionError {
    fn from(rejection: JsonRejection) -> Self {
        AuctionError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AuctionError {
    fn from(rejection: PathRejection) -> Self {
        AuctionError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: i64,
}
// endregion: --- Requests

// region:    --- Command Handlers

/// 로그인 / 가입
pub async fn handle_login(
    State((db_manager, _)): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<Account>, AuctionError> {
    info!("{:<12} --> 로그인 요청: {}", "Handler", req.email);
    let account = resolve_account(&db_manager, &req.email, &req.name).await?;
    Ok(Json(account))
}

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State((db_manager, bid_policy)): State<AppState>,
    user: AuthUser,
    AppPath(item_id): AppPath<i64>,
    AppJson(req): AppJson<AmountRequest>,
) -> Result<(StatusCode, Json<Bid>), AuctionError> {
    let bid = place_bid(&db_manager, bid_policy, user.user_id, item_id, req.amount).await?;
    Ok((StatusCode::CREATED, Json(bid)))
}

/// 입찰 취소 요청 처리
pub async fn handle_cancel_bid(
    State((db_manager, _)): State<AppState>,
    user: AuthUser,
    AppPath(bid_id): AppPath<Uuid>,
) -> Result<StatusCode, AuctionError> {
    cancel_bid(&db_manager, bid_id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 기부 요청 처리
pub async fn handle_put_donation(
    State((db_manager, _)): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<AmountRequest>,
) -> Result<Json<Donation>, AuctionError> {
    let donation = upsert_donation(&db_manager, user.user_id, req.amount).await?;
    Ok(Json(donation))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

pub async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Hello World!"}))
}

/// 상태 확인
pub async fn handle_healthcheck(State((db_manager, _)): State<AppState>) -> impl IntoResponse {
    match db_manager.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "database": "connected",
                "check": "passed"
            })),
        ),
        Err(e) => {
            error!("{:<12} --> 상태 확인 실패: {:?}", "Handler", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "error": format!("Database unhealthy: {e}"),
                })),
            )
        }
    }
}

/// 모든 상품 조회
pub async fn handle_get_items(
    State((db_manager, _)): State<AppState>,
) -> Result<Json<Vec<Item>>, AuctionError> {
    Ok(Json(query::handlers::list_items(&db_manager).await?))
}

/// 상품 조회
pub async fn handle_get_item(
    State((db_manager, _)): State<AppState>,
    AppPath(item_id): AppPath<i64>,
) -> Result<Json<Item>, AuctionError> {
    query::handlers::get_item(&db_manager, item_id)
        .await?
        .map(Json)
        .ok_or_else(|| AuctionError::not_found("item", item_id))
}

/// 최고 입찰가 조회
pub async fn handle_get_highest_bid(
    State((db_manager, _)): State<AppState>,
    AppPath(item_id): AppPath<i64>,
) -> Result<Json<Option<i64>>, AuctionError> {
    Ok(Json(
        query::handlers::get_highest_bid(&db_manager, item_id).await?,
    ))
}

/// 내 상품 입찰 조회
pub async fn handle_get_my_bid(
    State((db_manager, _)): State<AppState>,
    user: AuthUser,
    AppPath(item_id): AppPath<i64>,
) -> Result<Json<Option<Bid>>, AuctionError> {
    Ok(Json(
        query::handlers::get_bid(&db_manager, user.user_id, item_id).await?,
    ))
}

/// 내 입찰 목록 조회
pub async fn handle_get_my_bids(
    State((db_manager, _)): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Bid>>, AuctionError> {
    Ok(Json(
        query::handlers::list_user_bids(&db_manager, user.user_id).await?,
    ))
}

/// 내 기부 조회
pub async fn handle_get_donation(
    State((db_manager, _)): State<AppState>,
    user: AuthUser,
) -> Result<Json<Option<Donation>>, AuctionError> {
    Ok(Json(
        query::handlers::get_donation(&db_manager, user.user_id).await?,
    ))
}

// endregion: --- Query Handlers
