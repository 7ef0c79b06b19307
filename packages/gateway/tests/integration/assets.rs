use uuid::Uuid;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn uploaded_asset_is_served_with_its_media_type() {
    let app = TestApp::spawn().await;
    let owner = Uuid::new_v4();
    let video_id = app.create_video(owner).await;
    let token = app.token_for(owner);
    let data = vec![0xFF, 0xD8, 0xFF, 0xDB, 1, 2, 3, 4];

    let upload = app
        .upload_thumbnail(video_id, data.clone(), "image/jpeg", Some(&token))
        .await;
    assert_eq!(upload.status, 200);

    // Retrieval is public.
    let res = app
        .get_without_token(&routes::asset(&upload.thumbnail_name()))
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(res.bytes, data);
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let app = TestApp::spawn().await;
    let name = format!("{}.png", "A".repeat(43));

    let res = app.get_without_token(&routes::asset(&name)).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_asset_name_is_not_found() {
    let app = TestApp::spawn().await;

    for name in ["short.png", "config.toml", "..%2Ftest.db"] {
        let res = app.get_without_token(&routes::asset(name)).await;
        assert_eq!(res.status, 404, "expected 404 for {name}");
    }
}
