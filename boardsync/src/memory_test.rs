use whiteboard::point::Point;
use whiteboard::stroke::Shape;

use super::*;

fn key(board: &str, tenant: &str) -> BoardKey {
    BoardKey::new(board, tenant)
}

fn pen(board: BoardKey, x: f64) -> Stroke {
    Stroke {
        shape: Shape::Pen { points: vec![Point::new(x, x)] },
        color: "#000000".into(),
        width: 3.0,
        created_by: "u".into(),
        created_at: 0,
        board,
    }
}

#[tokio::test]
async fn list_unknown_board_is_empty() {
    let log = MemoryStrokeLog::new();
    assert!(log.list(&key("b", "t")).await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_list_preserves_order() {
    let log = MemoryStrokeLog::new();
    let k = key("b", "t");
    for x in [1.0, 2.0, 3.0] {
        log.append(&pen(k.clone(), x)).await.unwrap();
    }
    let listed = log.list(&k).await.unwrap();
    let xs: Vec<f64> = listed.iter().map(|s| s.shape.points()[0].x).collect();
    assert_eq!(xs, [1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn boards_are_scoped_by_tenant() {
    let log = MemoryStrokeLog::new();
    log.append(&pen(key("b", "t1"), 1.0)).await.unwrap();
    assert!(log.list(&key("b", "t2")).await.unwrap().is_empty());
    assert_eq!(log.list(&key("b", "t1")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_most_recent_pops_last() {
    let log = MemoryStrokeLog::new();
    let k = key("b", "t");
    log.append(&pen(k.clone(), 1.0)).await.unwrap();
    log.append(&pen(k.clone(), 2.0)).await.unwrap();
    log.delete_most_recent(&k).await.unwrap();
    let listed = log.list(&k).await.unwrap();
    assert_eq!(listed, vec![pen(k.clone(), 1.0)]);
}

#[tokio::test]
async fn delete_most_recent_on_empty_board_is_ok() {
    let log = MemoryStrokeLog::new();
    assert!(log.delete_most_recent(&key("b", "t")).await.is_ok());
}

#[tokio::test]
async fn delete_all_only_touches_one_board() {
    let log = MemoryStrokeLog::new();
    log.append(&pen(key("a", "t"), 1.0)).await.unwrap();
    log.append(&pen(key("b", "t"), 1.0)).await.unwrap();
    log.delete_all(&key("a", "t")).await.unwrap();
    assert!(log.list(&key("a", "t")).await.unwrap().is_empty());
    assert_eq!(log.list(&key("b", "t")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn non_member_tenant_is_unauthorized() {
    let log = MemoryStrokeLog::for_tenants(["org-1"]);
    let err = log.list(&key("b", "org-2")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(log.append(&pen(key("b", "org-1"), 1.0)).await.is_ok());
}

#[tokio::test]
async fn failing_log_rejects_every_call() {
    let log = MemoryStrokeLog::new();
    log.set_failing(true);
    assert!(matches!(log.append(&pen(key("b", "t"), 1.0)).await, Err(SyncError::Unavailable(_))));
    log.set_failing(false);
    assert!(log.list(&key("b", "t")).await.unwrap().is_empty());
}

#[tokio::test]
async fn clones_share_state() {
    let log = MemoryStrokeLog::new();
    let other = log.clone();
    log.append(&pen(key("b", "t"), 1.0)).await.unwrap();
    assert_eq!(other.list(&key("b", "t")).await.unwrap().len(), 1);
}
