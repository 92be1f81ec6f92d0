//! Post pages and post management over HTTP.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use chrono::{FixedOffset, TimeZone};

use quill_core::domain::{NewPost, PostContent};
use quill_core::ports::{BaseRepository, ImageStore, PostRepository};
use quill_shared::dto::PostForm;

use common::{create_request, location, login_cookie, test_state, test_state_with};

fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn new_post(title: &str, hour: u32) -> NewPost {
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    NewPost {
        content: PostContent::new(title, "body").unwrap(),
        created_at: offset.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
        img_name: None,
    }
}

#[actix_rt::test]
async fn test_index_lists_newest_first() {
    let state = test_state().await;
    state.posts.insert(new_post("older", 8)).await.unwrap();
    state.posts.insert(new_post("newest", 12)).await.unwrap();
    state.posts.insert(new_post("tie-first", 10)).await.unwrap();
    state.posts.insert(new_post("tie-second", 10)).await.unwrap();
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);

    let pos = |title: &str| html.find(title).unwrap();
    assert!(pos("newest") < pos("tie-first"));
    assert!(pos("tie-first") < pos("tie-second"));
    assert!(pos("tie-second") < pos("older"));
}

#[actix_rt::test]
async fn test_readmore_unknown_or_malformed_id_is_404() {
    let state = test_state().await;
    let app = test_app!(state);

    let resp = test::call_service(&app, TestRequest::get().uri("/99/readmore").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, TestRequest::get().uri("/abc/readmore").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, TestRequest::get().uri("/no/such/page").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_create_rejects_disallowed_extension() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let req = create_request(&cookie, "T", "B", Some(("photo.exe", b"MZ"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.posts.list_all().await.unwrap().is_empty());
    assert!(!state.images.exists("photo.exe").await);
}

#[actix_rt::test]
async fn test_create_rejects_path_in_filename() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let req = create_request(&cookie, "T", "B", Some(("../evil.png", b"x"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.posts.list_all().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_accepts_uppercase_extension() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let req = create_request(&cookie, "T", "B", Some(("photo.PNG", b"png"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");

    let posts = state.posts.list_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].img_name.as_deref(), Some("photo.PNG"));
    assert!(state.images.exists("photo.PNG").await);
}

#[actix_rt::test]
async fn test_create_requires_image() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    // A browser sends an empty filename when no file is chosen
    let req = create_request(&cookie, "T", "B", Some(("", b""))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = create_request(&cookie, "T", "B", Some(("photo", b"x"))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = create_request(&cookie, "T", "B", None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(state.posts.list_all().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_rejects_blank_title() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let req = create_request(&cookie, "  ", "B", Some(("a.png", b"x"))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.posts.list_all().await.unwrap().is_empty());
    assert!(!state.images.exists("a.png").await);
}

#[actix_rt::test]
async fn test_create_rejects_oversized_image() {
    let state = test_state_with(&[("MAX_UPLOAD_BYTES", "16")]).await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let big = vec![0u8; 64];
    let req = create_request(&cookie, "T", "B", Some(("a.png", &big))).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(state.posts.list_all().await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_create_update_delete_flow() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let app = test_app!(state);

    let req = create_request(&cookie, "T", "B", Some(("a.png", b"img"))).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let created = state.posts.list_all().await.unwrap().remove(0);
    let id = created.id;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri(&format!("/{id}/readmore")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains(">T<"));
    assert!(html.contains(">B<"));
    assert!(html.contains("/static/img/a.png"));

    // Update form shows current values
    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/{id}/update"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/{id}/update"))
            .cookie(cookie.clone())
            .set_form(PostForm {
                title: "T2".to_string(),
                body: "B2".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");

    let updated = state.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.body, "B2");
    assert_eq!(updated.img_name.as_deref(), Some("a.png"));
    assert_eq!(updated.created_at, created.created_at);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/{id}/delete"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri(&format!("/{id}/readmore")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The image stays behind
    assert!(state.images.exists("a.png").await);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/{id}/delete"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_update_unknown_and_invalid() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    let post = state.posts.insert(new_post("T", 9)).await.unwrap();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        TestRequest::get()
            .uri("/404/update")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/404/update")
            .cookie(cookie.clone())
            .set_form(PostForm {
                title: "T".to_string(),
                body: "B".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri(&format!("/{}/update", post.id))
            .cookie(cookie)
            .set_form(PostForm {
                title: String::new(),
                body: "B".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let unchanged = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "T");
}

#[actix_rt::test]
async fn test_admin_lists_posts_in_store_order() {
    let state = test_state().await;
    let cookie = login_cookie(&state).await;
    state.posts.insert(new_post("first-stored", 12)).await.unwrap();
    state.posts.insert(new_post("second-stored", 8)).await.unwrap();
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/admin").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(test::read_body(resp).await);
    assert!(html.find("first-stored").unwrap() < html.find("second-stored").unwrap());
    assert!(html.contains("/1/update"));
    assert!(html.contains("/2/delete"));
}
