use crate::model::{normalize_email, NewUser, User};
use crate::store::{StoreError, UserStore};
use crate::user_actor::UserError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Registration form. Password is plain text until hashed here.
#[derive(Clone, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub phone: Option<String>,
}

/// Account registration and login. Passwords are hashed with bcrypt on the
/// blocking pool.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn register(&self, form: Registration) -> Result<User, UserError> {
        let email = normalize_email(&form.email);
        let name = form.name.trim().to_string();
        if email.is_empty() || form.password.is_empty() || name.is_empty() {
            return Err(UserError::Validation(
                "Email, password and name are required".into(),
            ));
        }

        let cost = self.bcrypt_cost;
        let password = form.password;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(StoreError::from)??;

        let phone = form.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        let user = self
            .store
            .create_user(NewUser {
                email,
                name,
                phone,
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Unknown email and wrong password fail the same way.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, UserError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(UserError::Validation("Email and password are required".into()));
        }

        let Some(record) = self.store.find_credentials(email).await? else {
            warn!("Login for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = record.password_hash;
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(StoreError::from)??;
        if !valid {
            warn!(user_id = %record.user.id, "Wrong password");
            return Err(UserError::InvalidCredentials);
        }

        info!(user_id = %record.user.id, "User logged in");
        Ok(record.user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.store.list_users().await
    }
}
