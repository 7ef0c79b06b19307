use uuid::Uuid;

use crate::common::{PUBLIC_ORIGIN, TestApp, routes};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

mod upload_success {
    use super::*;

    #[tokio::test]
    async fn owner_can_upload_jpeg_thumbnail() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let res = app
            .upload_thumbnail(video_id, JPEG_BYTES.to_vec(), "image/jpeg", Some(&token))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], video_id.to_string());
        assert_eq!(res.body["user_id"], owner.to_string());

        let url = res.body["thumbnail_url"].as_str().unwrap();
        let prefix = format!("{PUBLIC_ORIGIN}/assets/");
        assert!(url.starts_with(&prefix), "unexpected url {url}");

        let name = res.thumbnail_name();
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(stem.len(), 43);
        assert!(stem.chars().all(is_identifier_char));
        assert_eq!(ext, "jpeg");

        assert_eq!(app.asset_files(), vec![name.clone()]);
        assert_eq!(std::fs::read(app.assets_root.join(&name)).unwrap(), JPEG_BYTES);
    }

    #[tokio::test]
    async fn png_thumbnail_gets_png_extension() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let res = app
            .upload_thumbnail(video_id, PNG_BYTES.to_vec(), "image/png", Some(&token))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.thumbnail_name().ends_with(".png"));
    }

    #[tokio::test]
    async fn media_type_parameters_are_ignored() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let res = app
            .upload_thumbnail(
                video_id,
                PNG_BYTES.to_vec(),
                "image/png; charset=binary",
                Some(&token),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.thumbnail_name().ends_with(".png"));
    }

    #[tokio::test]
    async fn second_upload_replaces_url_and_keeps_first_file() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let first = app
            .upload_thumbnail(video_id, JPEG_BYTES.to_vec(), "image/jpeg", Some(&token))
            .await;
        assert_eq!(first.status, 200);
        let second = app
            .upload_thumbnail(video_id, PNG_BYTES.to_vec(), "image/png", Some(&token))
            .await;
        assert_eq!(second.status, 200);

        let first_name = first.thumbnail_name();
        let second_name = second.thumbnail_name();
        assert_ne!(first_name, second_name);

        let mut expected = vec![first_name, second_name.clone()];
        expected.sort();
        assert_eq!(app.asset_files(), expected);

        let fetched = app.get_with_token(&routes::video(video_id), &token).await;
        assert_eq!(fetched.thumbnail_name(), second_name);
    }

    #[tokio::test]
    async fn unrelated_fields_are_skipped() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let thumbnail = reqwest::multipart::Part::bytes(PNG_BYTES.to_vec())
            .file_name("thumb.png")
            .mime_str("image/png")
            .unwrap();
        let form = reqwest::multipart::Form::new()
            .text("caption", "ignored")
            .part("thumbnail", thumbnail);

        let res = app
            .post_multipart(&routes::thumbnail_upload(video_id), form, Some(&token))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(app.asset_files().len(), 1);
    }
}

mod upload_rejections {
    use super::*;

    #[tokio::test]
    async fn unsupported_media_type_is_rejected_without_writing() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let res = app
            .upload_thumbnail(video_id, b"hello".to_vec(), "text/plain", Some(&token))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(app.asset_files().is_empty());

        let fetched = app.get_with_token(&routes::video(video_id), &token).await;
        assert!(fetched.body["thumbnail_url"].is_null());
    }

    #[tokio::test]
    async fn gif_is_not_in_the_allow_list() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let res = app
            .upload_thumbnail(video_id, b"GIF89a".to_vec(), "image/gif", Some(&token))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(app.asset_files().is_empty());
    }

    #[tokio::test]
    async fn non_owner_is_rejected_without_writing() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let intruder = app.token_for(Uuid::new_v4());

        let res = app
            .upload_thumbnail(video_id, JPEG_BYTES.to_vec(), "image/jpeg", Some(&intruder))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "NOT_OWNER");
        assert!(app.asset_files().is_empty());

        let owner_token = app.token_for(owner);
        let fetched = app.get_with_token(&routes::video(video_id), &owner_token).await;
        assert!(fetched.body["thumbnail_url"].is_null());
    }

    #[tokio::test]
    async fn missing_bearer_token_is_rejected() {
        let app = TestApp::spawn().await;
        let video_id = app.create_video(Uuid::new_v4()).await;

        let res = app
            .upload_thumbnail(video_id, JPEG_BYTES.to_vec(), "image/jpeg", None)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert!(app.asset_files().is_empty());
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;
        let video_id = app.create_video(Uuid::new_v4()).await;

        let res = app
            .upload_thumbnail(video_id, JPEG_BYTES.to_vec(), "image/jpeg", Some("not.a.jwt"))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn unknown_video_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.token_for(Uuid::new_v4());

        let res = app
            .upload_thumbnail(Uuid::new_v4(), JPEG_BYTES.to_vec(), "image/jpeg", Some(&token))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(app.asset_files().is_empty());
    }

    #[tokio::test]
    async fn malformed_video_id_is_bad_request() {
        let app = TestApp::spawn().await;
        let token = app.token_for(Uuid::new_v4());

        let res = app
            .upload_thumbnail("not-a-uuid", JPEG_BYTES.to_vec(), "image/jpeg", Some(&token))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_thumbnail_field_is_bad_request() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let form = reqwest::multipart::Form::new().text("caption", "no file here");
        let res = app
            .post_multipart(&routes::thumbnail_upload(video_id), form, Some(&token))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.asset_files().is_empty());
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected_and_leaves_partial_file() {
        let app = TestApp::spawn().await;
        let owner = Uuid::new_v4();
        let video_id = app.create_video(owner).await;
        let token = app.token_for(owner);

        let too_big = vec![0u8; gateway::handlers::thumbnail::MAX_UPLOAD_BYTES + (1 << 20)];
        let res = app
            .upload_thumbnail(video_id, too_big, "image/png", Some(&token))
            .await;

        assert_eq!(res.status, 413);
        assert_eq!(res.body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(app.asset_files().len(), 1);

        let fetched = app.get_with_token(&routes::video(video_id), &token).await;
        assert!(fetched.body["thumbnail_url"].is_null());
    }
}
