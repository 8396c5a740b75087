// src/services/user.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    media::{self, ImageHost},
    models::user::{CreateUserRequest, LoginResponse, NewUser, ProfileChanges, UpdateProfileForm, User},
    repositories::UserRepository,
    utils::{
        hash::{hash_password, verify_dummy_password, verify_password},
        jwt::sign_jwt,
    },
};

/// Registration, login and profile management.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageHost>,
    jwt_secret: String,
    jwt_expiration: u64,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        images: Arc<dyn ImageHost>,
        jwt_secret: String,
        jwt_expiration: u64,
    ) -> Self {
        Self {
            users,
            images,
            jwt_secret,
            jwt_expiration,
        }
    }

    /// Stores a new user with an Argon2-hashed password.
    pub async fn register(&self, request: CreateUserRequest) -> Result<User, AppError> {
        let password_hash = hash_password(&request.password)?;

        let user = self
            .users
            .create(&NewUser {
                name: request.name,
                occupation: request.occupation,
                email: request.email,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verifies the credentials and issues a session token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::AuthError("Invalid email or password".to_string());

        let Some(user) = self.users.find_by_email(email).await? else {
            verify_dummy_password(password);
            tracing::debug!("Login rejected: unknown email");
            return Err(invalid());
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!("Login rejected: wrong password for user {}", user.id);
            return Err(invalid());
        }

        let token = sign_jwt(user.id, &self.jwt_secret, self.jwt_expiration)?;

        Ok(LoginResponse { token, user })
    }

    pub async fn get_profile(&self, id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Overwrites name, occupation and email. The stored photo only changes
    /// when `photo` carries a new upload.
    pub async fn update_profile(
        &self,
        id: i64,
        form: UpdateProfileForm,
        photo: Option<Vec<u8>>,
    ) -> Result<User, AppError> {
        if !self.users.exists(id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let photo_url = match photo {
            Some(bytes) => Some(
                self.images
                    .upload(bytes, media::PROFILE_FOLDER, &media::profile_photo_id(id), true)
                    .await?,
            ),
            None => None,
        };

        let changes = ProfileChanges {
            name: form.name,
            occupation: form.occupation,
            email: form.email,
            photo_url,
        };

        self.users
            .update_profile(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
