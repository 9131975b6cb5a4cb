/// 모든 상품 조회 (전시 순서)
pub const GET_ALL_ITEMS: &str = "SELECT id, title, img_location, author, author_description, min_bid, year, description, show_order, is_closed FROM items ORDER BY show_order ASC";

/// 상품 조회
pub const GET_ITEM: &str = "SELECT id, title, img_location, author, author_description, min_bid, year, description, show_order, is_closed FROM items WHERE id = ?1";

/// 상품 종료
pub const CLOSE_ITEM: &str = "UPDATE items SET is_closed = 1 WHERE id = ?1 RETURNING id, title, img_location, author, author_description, min_bid, year, description, show_order, is_closed";

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str = "SELECT MAX(amount) FROM bids WHERE item_id = ?1";

/// 조건부 입찰 등록
///
/// 상품이 존재하고, 종료되지 않았고, 금액이 최소 입찰가 이상이며,
/// 오름차순 정책(?6 = 1)이면 현재 최고 입찰가보다 클 때에만 행이 삽입된다.
pub const INSERT_BID_IF_VALID: &str = r#"
    INSERT INTO bids (uuid, user_id, item_id, amount, created_at)
    SELECT ?1, ?2, items.id, ?4, ?5
    FROM items
    WHERE items.id = ?3
      AND items.is_closed = 0
      AND ?4 > 0
      AND ?4 >= items.min_bid
      AND (?6 = 0 OR ?4 > COALESCE((SELECT MAX(amount) FROM bids WHERE item_id = items.id), 0))
    RETURNING uuid, user_id, item_id, amount, created_at
"#;

/// 사용자의 상품 입찰 조회
pub const GET_USER_ITEM_BID: &str =
    "SELECT uuid, user_id, item_id, amount, created_at FROM bids WHERE user_id = ?1 AND item_id = ?2";

/// 입찰 조회
pub const GET_BID: &str =
    "SELECT uuid, user_id, item_id, amount, created_at FROM bids WHERE uuid = ?1";

/// 사용자 입찰 목록 조회
pub const GET_USER_BIDS: &str = r#"
    SELECT uuid, user_id, item_id, amount, created_at
    FROM bids
    WHERE user_id = ?1
    ORDER BY created_at DESC, uuid DESC
"#;

/// 본인 입찰 취소
pub const DELETE_OWN_BID: &str =
    "DELETE FROM bids WHERE uuid = ?1 AND user_id = ?2 RETURNING uuid";

/// 기부 등록 또는 갱신
pub const UPSERT_DONATION: &str = r#"
    INSERT INTO donations (uuid, user_id, amount, updated_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (user_id) DO UPDATE
        SET amount = excluded.amount,
            updated_at = excluded.updated_at
    RETURNING uuid, user_id, amount, updated_at
"#;

/// 기부 조회
pub const GET_DONATION: &str =
    "SELECT uuid, user_id, amount, updated_at FROM donations WHERE user_id = ?1";

/// 계정 조회 또는 생성 (기존 행은 변경하지 않음)
pub const UPSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (name, email, created_at)
    VALUES (?1, ?2, ?3)
    ON CONFLICT (email) DO UPDATE
        SET email = email
    RETURNING id, name, email, created_at
"#;

/// 계정 조회
pub const GET_ACCOUNT: &str = "SELECT id, name, email, created_at FROM accounts WHERE id = ?1";
