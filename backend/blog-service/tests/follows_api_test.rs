mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use blog_service::serializers::messages;
use blog_service::services::{FollowService, UserService};
use serde_json::{json, Value};

use common::{count_rows, init_app, setup, TestUser};

#[actix_web::test]
async fn anonymous_callers_cannot_use_follow_endpoint() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/follow/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .set_json(json!({"following": "bob"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn follow_scenario() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let alice = TestUser::register("alice", &pool).await;
    let _bob = TestUser::register("bob", &pool).await;
    let _carol = TestUser::register("carol", &pool).await;

    // Self-follow is rejected on the `following` field.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "alice"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["following"][0], messages::SELF_FOLLOW);

    // `user` in the body is ignored.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"user": "carol", "following": "bob"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"user": "alice", "following": "bob"}));

    // A second subscription to the same author is a duplicate.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "bob"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["non_field_errors"][0], messages::ALREADY_FOLLOWING);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM follows").await, 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "carol"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/follow/?search=BO")
            .insert_header(alice.auth())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([{"user": "alice", "following": "bob"}]));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/follow/?search=zzz")
            .insert_header(alice.auth())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn follow_target_validation() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let alice = TestUser::new("alice");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "nobody"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["fields"]["following"][0],
        messages::unknown_username("nobody")
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["following"][0], messages::REQUIRED);

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM follows").await, 0);
}

#[actix_web::test]
async fn followers_and_unfollow_for_admin() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let alice = TestUser::register("alice", &pool).await;
    let bob = TestUser::register("bob", &pool).await;
    let _carol = TestUser::register("carol", &pool).await;

    for follower in [&alice, &bob] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/follow/")
                .insert_header(follower.auth())
                .set_json(json!({"following": "carol"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let service = FollowService::new(pool.clone());
    let followers = service.list_followers("carol").await.unwrap();
    let mut names: Vec<_> = followers.into_iter().map(|f| f.user_username).collect();
    names.sort();
    assert_eq!(names, vec!["alice", "bob"]);

    service.unfollow("alice", "carol").await.unwrap();
    assert!(service.unfollow("alice", "carol").await.is_err());
    assert_eq!(service.list_followers("carol").await.unwrap().len(), 1);
    assert!(service.list_followers("nobody").await.is_err());
}

#[actix_web::test]
async fn deleting_user_removes_their_content() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let alice = TestUser::register("alice", &pool).await;
    let bob = TestUser::register("bob", &pool).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts/")
            .insert_header(bob.auth())
            .set_json(json!({"text": "bob writes"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{}/comments/", post["id"]))
            .insert_header(alice.auth())
            .set_json(json!({"text": "alice replies"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "bob"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let deleted = UserService::new(pool.clone()).delete_user("bob").await.unwrap();
    assert_eq!(deleted.id, bob.id);

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM posts").await, 0);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM comments").await, 0);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM follows").await, 0);
    assert!(UserService::new(pool.clone()).delete_user("bob").await.is_err());
}

#[actix_web::test]
async fn reader_can_be_followed() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let alice = TestUser::new("alice");
    let bob = TestUser::new("bob");

    // bob has only read so far.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/posts/")
            .insert_header(bob.auth())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(alice.auth())
            .set_json(json!({"following": "bob"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"user": "alice", "following": "bob"}));
}

#[actix_web::test]
async fn username_moves_to_the_account_presenting_it() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let previous = TestUser::register("ann", &pool).await;
    let current = TestUser::new("ann");
    let carol = TestUser::new("carol");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts/")
            .insert_header(current.auth())
            .set_json(json!({"text": "hello again"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["author"], "ann");

    let stale = format!(
        "SELECT COUNT(*) FROM users WHERE id = '{}' AND username = 'user-{}'",
        previous.id, previous.id
    );
    assert_eq!(count_rows(&pool, &stale).await, 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/")
            .insert_header(carol.auth())
            .set_json(json!({"following": "ann"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let followed = format!(
        "SELECT COUNT(*) FROM follows WHERE following_id = '{}'",
        current.id
    );
    assert_eq!(count_rows(&pool, &followed).await, 1);
}

#[actix_web::test]
async fn overlong_username_is_unauthorized() {
    let (_pg, pool) = setup().await;
    let app = init_app(&pool).await;
    let caller = TestUser::new(&"x".repeat(crypto_core::jwt::MAX_USERNAME_LENGTH + 1));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts/")
            .insert_header(caller.auth())
            .set_json(json!({"text": "too long a name"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM users").await, 0);
}
