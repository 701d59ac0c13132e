/// Request bodies with sensible defaults, plus shortcuts that create the
/// resource over HTTP and return its id.
use super::helpers::{json_request, send};
use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

pub struct MovieFactory {
    title: String,
    image: Option<String>,
    recommender_ids: Vec<String>,
}

impl MovieFactory {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            image: None,
            recommender_ids: Vec::new(),
        }
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn recommended_by(mut self, user_id: &str) -> Self {
        self.recommender_ids.push(user_id.to_string());
        self
    }

    pub fn body(&self) -> Value {
        json!({
            "title": self.title,
            "image": self.image,
            "recommenderIds": self.recommender_ids,
        })
    }

    pub async fn create(self, app: &Router) -> String {
        let (status, body) = send(app, json_request(Method::POST, "/movies", self.body())).await;
        assert_eq!(status, StatusCode::CREATED, "movie create failed: {body}");
        id_of(&body)
    }
}

pub async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        json_request(Method::POST, "/users", json!({ "name": name, "icon": "🎬" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "user create failed: {body}");
    id_of(&body)
}

pub async fn rate(app: &Router, movie_id: &str, user_id: &str, score: i32) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/ratings",
            json!({ "movieId": movie_id, "userId": user_id, "rating": score }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "rating create failed: {body}");
    id_of(&body)
}

pub fn id_of(body: &Value) -> String {
    body["id"]
        .as_str()
        .unwrap_or_else(|| panic!("response has no id: {body}"))
        .to_string()
}
