// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use fairs_api::{
    config::{CloudinaryConfig, Config},
    error::AppError,
    media::ImageHost,
    models::{
        fair::{Fair, NewFair},
        preference::{Preference, PreferenceRequest},
        user::{NewUser, ProfileChanges, User},
    },
    repositories::{FairRepository, PreferenceRepository, Repositories, UserRepository},
    routes,
    state::AppState,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_for_integration_tests";
pub const BOUNDARY: &str = "----fairs-test-boundary";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
        port: 0,
        request_timeout_secs: 30,
        cloudinary: CloudinaryConfig {
            cloud_name: "test".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
        },
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    fairs: Vec<Fair>,
    preferences: Vec<Preference>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process stand-in for the three PostgreSQL repositories.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            fairs: Arc::new(self.clone()),
            preferences: Arc::new(self.clone()),
        }
    }

    pub fn fair_count(&self) -> usize {
        self.tables.lock().unwrap().fairs.len()
    }

    pub fn stored_password_hash(&self, email: &str) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        tables
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        let stored = User {
            id: tables.next_id(),
            name: user.name.clone(),
            occupation: user.occupation.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            photo_url: None,
        };
        tables.users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.id == id))
    }

    async fn update_profile(
        &self,
        id: i64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.name = changes.name.clone();
        user.occupation = changes.occupation.clone();
        user.email = changes.email.clone();
        if let Some(photo_url) = &changes.photo_url {
            user.photo_url = Some(photo_url.clone());
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl FairRepository for MemoryStore {
    async fn reserve_id(&self) -> Result<i64, AppError> {
        Ok(self.tables.lock().unwrap().next_id())
    }

    async fn create(&self, id: i64, fair: &NewFair) -> Result<Fair, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.fairs.iter().any(|f| f.id == id) {
            return Err(AppError::Conflict(format!("Fair {} already exists", id)));
        }
        let stored = Fair {
            id,
            title: fair.title.clone(),
            description: fair.description.clone(),
            start_date: fair.start_date.clone(),
            user_id: fair.user_id,
            photo_url: fair.photo_url.clone(),
        };
        tables.fairs.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Fair>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.fairs.iter().find(|f| f.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Fair>, AppError> {
        let mut fairs = self.tables.lock().unwrap().fairs.clone();
        fairs.sort_by_key(|f| f.id);
        Ok(fairs)
    }

    async fn update(&self, id: i64, fair: &NewFair) -> Result<Option<Fair>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(stored) = tables.fairs.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        stored.title = fair.title.clone();
        stored.description = fair.description.clone();
        stored.start_date = fair.start_date.clone();
        stored.user_id = fair.user_id;
        stored.photo_url = Some(fair.photo_url.clone().unwrap_or_default());
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.fairs.len();
        tables.fairs.retain(|f| f.id != id);
        Ok((before - tables.fairs.len()) as u64)
    }
}

#[async_trait]
impl PreferenceRepository for MemoryStore {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Preference>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .preferences
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn create(&self, links: &PreferenceRequest) -> Result<Preference, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.preferences.iter().any(|p| p.user_id == links.user_id) {
            return Err(AppError::Conflict(format!(
                "Preferences for user {} already exist",
                links.user_id
            )));
        }
        let stored = Preference {
            id: tables.next_id(),
            user_id: links.user_id,
            linkedin: links.linkedin.clone(),
            instagram: links.instagram.clone(),
            x_link: links.x_link.clone(),
        };
        tables.preferences.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, links: &PreferenceRequest) -> Result<Option<Preference>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(stored) = tables
            .preferences
            .iter_mut()
            .find(|p| p.user_id == links.user_id)
        else {
            return Ok(None);
        };
        stored.linkedin = links.linkedin.clone();
        stored.instagram = links.instagram.clone();
        stored.x_link = links.x_link.clone();
        Ok(Some(stored.clone()))
    }
}

/// One recorded upload: folder, public id and payload size.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub folder: String,
    pub public_id: String,
    pub size: usize,
}

/// Image host that records uploads and answers with a predictable URL.
#[derive(Default)]
pub struct FakeImageHost {
    uploads: Mutex<Vec<Upload>>,
    failing: AtomicBool,
}

impl FakeImageHost {
    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        public_id: &str,
        _overwrite: bool,
    ) -> Result<String, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError("upload rejected".to_string()));
        }
        self.uploads.lock().unwrap().push(Upload {
            folder: folder.to_string(),
            public_id: public_id.to_string(),
            size: bytes.len(),
        });
        Ok(format!("https://img.test/{}/{}", folder, public_id))
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
    pub images: Arc<FakeImageHost>,
}

pub fn test_app() -> TestApp {
    let store = MemoryStore::default();
    let images = Arc::new(FakeImageHost::default());
    let state = AppState::new(test_config(), store.repositories(), images.clone());
    let router = routes::create_router(state.clone());

    TestApp {
        router,
        state,
        store,
        images,
    }
}

/// Sends one request through the router; the body is parsed as JSON
/// (`Null` when empty).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a multipart/form-data request with text fields and an optional file.
pub fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
