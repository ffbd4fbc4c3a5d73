use axum::extract::FromRequestParts;
use axum::http::Request;

use super::*;

fn parts(headers: &[(&str, &str)]) -> Parts {
    let mut builder = Request::builder().uri("/api/tenants/org-1/boards/b/strokes");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(()).unwrap().into_parts().0
}

async fn extract(headers: &[(&str, &str)]) -> Result<AuthUser, StatusCode> {
    AuthUser::from_request_parts(&mut parts(headers), &()).await
}

#[tokio::test]
async fn missing_user_is_unauthorized() {
    assert_eq!(extract(&[(TENANTS_HEADER, "org-1")]).await, Err(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn blank_user_is_unauthorized() {
    assert_eq!(extract(&[(USER_HEADER, "  ")]).await, Err(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn tenants_are_split_and_trimmed() {
    let auth = extract(&[(USER_HEADER, "user-1"), (TENANTS_HEADER, "org-1, org-2,,")]).await.unwrap();
    assert_eq!(auth.user_id, "user-1");
    assert_eq!(auth.tenant_ids, vec!["org-1".to_owned(), "org-2".to_owned()]);
}

#[tokio::test]
async fn missing_tenants_means_no_membership() {
    let auth = extract(&[(USER_HEADER, "user-1")]).await.unwrap();
    assert!(auth.tenant_ids.is_empty());
    assert_eq!(auth.require_tenant("org-1"), Err(StatusCode::FORBIDDEN));
}

#[test]
fn require_tenant_checks_membership() {
    let auth = AuthUser { user_id: "u".into(), tenant_ids: vec!["org-1".into()] };
    assert!(auth.require_tenant("org-1").is_ok());
    assert_eq!(auth.require_tenant("org-10"), Err(StatusCode::FORBIDDEN));
}
