use super::model::{CreateUser, UpdateUser, User};
use super::service::UserService;
use crate::error::Result;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub struct UserController {
    service: Arc<UserService>,
}

impl UserController {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }

    pub fn base_path() -> &'static str {
        "/users"
    }

    /// Routes relative to [`Self::base_path`].
    pub fn router(controller: Arc<Self>) -> Router {
        Router::new()
            .route("/", post(Self::create).get(Self::find_all))
            .route(
                "/{id}",
                get(Self::find_one).patch(Self::update).delete(Self::remove),
            )
            .with_state(controller)
    }

    async fn create(
        State(this): State<Arc<Self>>,
        Json(data): Json<CreateUser>,
    ) -> Result<(StatusCode, Json<User>)> {
        let user = this.service.create(data).await?;
        Ok((StatusCode::CREATED, Json(user)))
    }

    async fn find_all(State(this): State<Arc<Self>>) -> Result<Json<Vec<User>>> {
        Ok(Json(this.service.find_all().await?))
    }

    async fn find_one(State(this): State<Arc<Self>>, Path(id): Path<i32>) -> Result<Json<User>> {
        Ok(Json(this.service.find_one(id).await?))
    }

    async fn update(
        State(this): State<Arc<Self>>,
        Path(id): Path<i32>,
        Json(data): Json<UpdateUser>,
    ) -> Result<Json<User>> {
        Ok(Json(this.service.update(id, data).await?))
    }

    async fn remove(State(this): State<Arc<Self>>, Path(id): Path<i32>) -> Result<Json<User>> {
        Ok(Json(this.service.remove(id).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_connection;
    use crate::modules::user::repository::SeaOrmUserRepository;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let repository = Arc::new(SeaOrmUserRepository::new(test_connection().await));
        let controller = Arc::new(UserController::new(Arc::new(UserService::new(repository))));
        Router::new().nest(UserController::base_path(), UserController::router(controller))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_crud_over_http() {
        let app = app().await;

        let (status, created) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({ "name": "Ann", "email": "ann@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["name"], "Ann");
        assert_eq!(created["createdAt"], created["updatedAt"]);

        let (status, listed) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created.clone()]));

        let (status, fetched) = send(&app, Method::GET, "/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = send(
            &app,
            Method::PATCH,
            "/users/1",
            Some(json!({ "name": "Annie" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Annie");
        assert_eq!(updated["email"], "ann@example.com");
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, deleted) = send(&app, Method::DELETE, "/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, updated);

        let (status, body) = send(&app, Method::GET, "/users/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NotFound");
        assert_eq!(body["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_404() {
        let app = app().await;

        for (method, body) in [
            (Method::GET, None),
            (Method::PATCH, Some(json!({ "name": "x" }))),
            (Method::DELETE, None),
        ] {
            let (status, _) = send(&app, method.clone(), "/users/99", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", method);
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_409() {
        let app = app().await;
        let body = json!({ "name": "Ann", "email": "ann@example.com" });

        let (status, _) = send(&app, Method::POST, "/users", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, error) = send(&app, Method::POST, "/users", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error["code"], "ConstraintViolation");
    }

    #[tokio::test]
    async fn test_rejects_client_supplied_system_fields() {
        let app = app().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/users",
            Some(json!({ "id": 7, "name": "Ann", "email": "ann@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, listed) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let app = app().await;
        let (status, _) = send(&app, Method::GET, "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
