use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    media::{CloudinaryClient, ImageHost},
    repositories::Repositories,
    services::{FairService, PreferenceService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<UserService>,
    pub fairs: Arc<FairService>,
    pub preferences: Arc<PreferenceService>,
}

impl AppState {
    /// Wires the services over the given repositories and image host.
    pub fn new(config: Config, repos: Repositories, images: Arc<dyn ImageHost>) -> Self {
        let users = UserService::new(
            repos.users.clone(),
            images.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration,
        );
        let fairs = FairService::new(repos.fairs, repos.users.clone(), images);
        let preferences = PreferenceService::new(repos.preferences, repos.users);

        Self {
            config,
            users: Arc::new(users),
            fairs: Arc::new(fairs),
            preferences: Arc::new(preferences),
        }
    }

    /// Production wiring: PostgreSQL repositories and Cloudinary uploads.
    pub fn postgres(pool: PgPool, config: Config) -> Result<Self, reqwest::Error> {
        let images = CloudinaryClient::new(
            config.cloudinary.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(config, Repositories::postgres(pool), Arc::new(images)))
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<FairService> {
    fn from_ref(state: &AppState) -> Self {
        state.fairs.clone()
    }
}

impl FromRef<AppState> for Arc<PreferenceService> {
    fn from_ref(state: &AppState) -> Self {
        state.preferences.clone()
    }
}
