use uuid::Uuid;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn owner_can_read_video() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let video_id = app.create_video(owner).await;
    let token = app.token_for(owner);

    let res = app.get_with_token(&routes::video(video_id), &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["id"], video_id.to_string());
    assert_eq!(res.body["title"], "Test video");
    assert!(res.body["thumbnail_url"].is_null());
}

#[tokio::test]
async fn other_users_cannot_read_video() {
    let app = TestApp::spawn().await;
    let video_id = app.create_video(Uuid::new_v4()).await;
    let token = app.token_for(Uuid::new_v4());

    let res = app.get_with_token(&routes::video(video_id), &token).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "NOT_OWNER");
}

#[tokio::test]
async fn reading_requires_a_token() {
    let app = TestApp::spawn().await;
    let video_id = app.create_video(Uuid::new_v4()).await;

    let res = app.get_without_token(&routes::video(video_id)).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn unknown_video_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.token_for(Uuid::new_v4());

    let res = app.get_with_token(&routes::video(Uuid::new_v4()), &token).await;

    assert_eq!(res.status, 404);
}
