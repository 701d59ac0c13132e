/// End-to-end scenarios against a real, isolated PostgreSQL database.
///
/// Every test creates its own database from TEST_DATABASE_URL and drops it
/// afterwards; without that variable the tests return early.
mod utils;

use axum::http::{Method, StatusCode};
use serde_json::json;
use utils::factories::{create_user, id_of, rate, MovieFactory};
use utils::helpers::{app_with, empty_request, json_request, multipart_request, send};
use utils::test_db::TestDb;

#[tokio::test]
async fn one_top_level_rating_per_user_and_movie() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let user = create_user(&app, "Ana").await;
    let movie = MovieFactory::new("F1").create(&app).await;

    rate(&app, &movie, &user, 4).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/ratings",
            json!({ "movieId": movie, "userId": user, "rating": 2 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "You have already rated this movie");

    let (status, body) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageRating"], 4.0);
    assert_eq!(body["ratingCount"], 1);
}

#[tokio::test]
async fn replies_are_unlimited_and_never_counted() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let bo = create_user(&app, "Bo").await;
    let movie = MovieFactory::new("Heat").create(&app).await;
    let top = rate(&app, &movie, &ana, 5).await;

    for score in [json!(null), json!(1), json!(null)] {
        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/ratings",
                json!({ "movieId": movie, "userId": bo, "parentId": top, "rating": score, "review": "hm" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["parentId"], top.as_str());
    }

    let (_, body) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(body["averageRating"], 5.0);
    assert_eq!(body["ratingCount"], 1);
    assert_eq!(body["ratings"].as_array().unwrap().len(), 1);
    assert_eq!(body["ratings"][0]["replies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn reply_to_a_rating_on_another_movie_is_rejected() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let first = MovieFactory::new("F1").create(&app).await;
    let second = MovieFactory::new("Heat").create(&app).await;
    let top = rate(&app, &first, &ana, 3).await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/ratings",
            json!({ "movieId": second, "userId": ana, "parentId": top }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn averages_round_half_up_to_one_decimal() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let movie = MovieFactory::new("Heat").create(&app).await;
    for (name, score) in [("Ana", 4), ("Bo", 4), ("Cy", 5), ("Di", 4), ("Ed", 5), ("Fa", 4)] {
        let user = create_user(&app, name).await;
        rate(&app, &movie, &user, score).await;
    }

    // 26 / 6 = 4.333...
    let (_, body) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(body["averageRating"], 4.3);
    assert_eq!(body["ratingCount"], 6);
}

#[tokio::test]
async fn bad_recommendations_feed_the_leaderboard() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let bo = create_user(&app, "Bo").await;
    let critic = create_user(&app, "Critic").await;

    let weak = MovieFactory::new("Weak").recommended_by(&ana).create(&app).await;
    let strong = MovieFactory::new("Strong").recommended_by(&ana).create(&app).await;
    MovieFactory::new("Unrated").recommended_by(&bo).create(&app).await;

    rate(&app, &weak, &critic, 2).await;
    rate(&app, &strong, &critic, 4).await;

    let (status, users) = send(&app, empty_request(Method::GET, "/users")).await;
    assert_eq!(status, StatusCode::OK);
    let count_for = |name: &str| {
        users
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["name"] == name)
            .map(|u| u["badRecommendationsCount"].clone())
            .unwrap()
    };
    assert_eq!(count_for("Ana"), 1);
    assert_eq!(count_for("Bo"), 0);

    let (_, board) = send(&app, empty_request(Method::GET, "/users/leaderboard")).await;
    let names: Vec<&str> = board
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana"]);

    let (_, profile) = send(&app, empty_request(Method::GET, &format!("/users/{critic}"))).await;
    assert_eq!(profile["ratingCount"], 2);
    assert_eq!(profile["badRecommendationsCount"], 0);
    assert_eq!(profile["ratings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn uniqueness_conflicts_and_missing_entities() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    create_user(&app, "Ana").await;
    MovieFactory::new("F1").create(&app).await;
    let other = MovieFactory::new("Heat").create(&app).await;

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/users", json!({ "name": "Ana", "icon": "🍿" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, json_request(Method::POST, "/movies", json!({ "title": "F1" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        json_request(Method::PUT, &format!("/movies/{other}"), json!({ "title": "F1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Movie title already exists");

    let missing = uuid::Uuid::new_v4();
    for uri in [format!("/movies/{missing}"), format!("/users/{missing}")] {
        let (status, _) = send(&app, empty_request(Method::GET, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn movie_update_replaces_recommenders_and_clears_image() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let bo = create_user(&app, "Bo").await;
    let movie = MovieFactory::new("F1")
        .image("https://img.example/f1.png")
        .recommended_by(&ana)
        .create(&app)
        .await;

    // Omitted image and recommenders stay as they are
    let (status, body) = send(
        &app,
        json_request(Method::PUT, &format!("/movies/{movie}"), json!({ "title": "F1 Redux" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"], "https://img.example/f1.png");
    assert_eq!(body["recommenders"][0]["id"], ana.as_str());

    let (_, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/movies/{movie}"),
            json!({ "title": "F1 Redux", "image": null, "recommenderIds": [bo] }),
        ),
    )
    .await;
    assert!(body["image"].is_null());
    let recommenders = body["recommenders"].as_array().unwrap();
    assert_eq!(recommenders.len(), 1);
    assert_eq!(recommenders[0]["id"], bo.as_str());
}

#[tokio::test]
async fn uploaded_posters_and_icons_are_stored_as_returned() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let near_limit = vec![42u8; 5 * 1024 * 1024 - 1024];
    let (status, body) = send(&app, multipart_request("file", "image/png", &near_limit)).await;
    assert_eq!(status, StatusCode::OK);
    let url = body["url"].as_str().unwrap().to_string();

    let movie = MovieFactory::new("Big poster").image(&url).create(&app).await;
    let (status, body) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["image"].as_str(), Some(url.as_str()));

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/users", json!({ "name": "Ana", "icon": url })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["icon"].as_str(), Some(url.as_str()));
}

#[tokio::test]
async fn deleting_a_user_cascades_to_ratings_and_recommendations() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let bo = create_user(&app, "Bo").await;
    let movie = MovieFactory::new("F1").recommended_by(&ana).create(&app).await;
    let top = rate(&app, &movie, &ana, 2).await;
    send(
        &app,
        json_request(
            Method::POST,
            "/ratings",
            json!({ "movieId": movie, "userId": bo, "parentId": top }),
        ),
    )
    .await;

    let (status, body) = send(&app, empty_request(Method::DELETE, &format!("/users/{ana}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, detail) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(detail["ratingCount"], 0);
    assert_eq!(detail["averageRating"], 0.0);
    assert!(detail["ratings"].as_array().unwrap().is_empty());
    assert!(detail["recommenders"].as_array().unwrap().is_empty());

    let (_, ratings) = send(&app, empty_request(Method::GET, "/ratings")).await;
    assert!(ratings.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_movie_removes_its_ratings() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let movie = MovieFactory::new("F1").create(&app).await;
    let rating = rate(&app, &movie, &ana, 5).await;

    let (status, _) = send(&app, empty_request(Method::DELETE, &format!("/movies/{movie}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, empty_request(Method::DELETE, &format!("/ratings/{rating}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, profile) = send(&app, empty_request(Method::GET, &format!("/users/{ana}"))).await;
    assert_eq!(profile["ratingCount"], 0);
}

#[tokio::test]
async fn rating_updates_keep_top_level_scores() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let movie = MovieFactory::new("F1").create(&app).await;
    let rating = rate(&app, &movie, &ana, 2).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/ratings/{rating}"),
            json!({ "rating": 5, "review": "grew on me" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 5);
    assert_eq!(body["review"], "grew on me");

    let (status, _) = send(
        &app,
        json_request(Method::PUT, &format!("/ratings/{rating}"), json!({ "review": "no score" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, detail) = send(&app, empty_request(Method::GET, &format!("/movies/{movie}"))).await;
    assert_eq!(detail["averageRating"], 5.0);
}

#[tokio::test]
async fn activity_feed_lists_newest_first() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let ana = create_user(&app, "Ana").await;
    let bo = create_user(&app, "Bo").await;
    let movie = MovieFactory::new("F1").create(&app).await;
    let top = rate(&app, &movie, &ana, 4).await;
    let (_, reply) = send(
        &app,
        json_request(
            Method::POST,
            "/ratings",
            json!({ "movieId": movie, "userId": bo, "parentId": top }),
        ),
    )
    .await;
    let reply = id_of(&reply);

    let (status, feed) = send(&app, empty_request(Method::GET, "/notifications?limit=3")).await;
    assert_eq!(status, StatusCode::OK);

    let types: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["reply_create", "rating_create", "movie_create"]);
    assert_eq!(feed[0]["entityId"], reply.as_str());
    assert_eq!(feed[0]["entityType"], "rating");
    assert_eq!(feed[1]["message"], "Ana rated \"F1\" 4/5");

    let (_, everything) = send(&app, empty_request(Method::GET, "/notifications?limit=abc")).await;
    assert_eq!(everything.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn health_is_ok_with_a_live_database() {
    let Some(db) = TestDb::try_new() else { return };
    let app = app_with(db.database());

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storeQuery"]["status"], "ok");
}
