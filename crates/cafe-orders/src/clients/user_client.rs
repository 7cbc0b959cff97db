//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<UserRecord>` and exposes domain‑specific methods.
use crate::model::{normalize_email, NewUser, UserId, UserRecord};
use crate::store::StoreError;
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<UserRecord>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<UserRecord>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<UserRecord> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<UserRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::Conflict(email)) => UserError::AlreadyExists(email),
            Err(other) => UserError::Store(StoreError::Unavailable(other.to_string())),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: NewUser) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Looks an account up by email, ignoring case.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserError> {
        let wanted = normalize_email(email);
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .find(|r| normalize_email(&r.user.email) == wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use actor_framework::mock::MockClient;
    use chrono::Utc;

    fn record(id: u64, email: &str) -> UserRecord {
        UserRecord {
            user: User {
                id: UserId(id),
                email: email.into(),
                name: "Dilnoza".into(),
                phone: None,
                created_at: Utc::now(),
            },
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn find_by_email_ignores_case() {
        let mut mock = MockClient::<UserRecord>::new();
        mock.expect_list()
            .return_ok(vec![record(1, "a@cafe.uz"), record(2, "dilnoza@cafe.uz")]);

        let client = UserClient::new(mock.client());
        let found = client.find_by_email("Dilnoza@Cafe.UZ").await.unwrap();
        assert_eq!(found.map(|r| r.user.id), Some(UserId(2)));
        mock.verify();
    }

    #[tokio::test]
    async fn duplicate_key_maps_to_already_exists() {
        let mut mock = MockClient::<UserRecord>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("a@cafe.uz".into()));

        let client = UserClient::new(mock.client());
        let result = client
            .create_user(NewUser {
                email: "a@cafe.uz".into(),
                name: "A".into(),
                phone: None,
                password_hash: "hash".into(),
            })
            .await;
        assert!(matches!(result, Err(UserError::AlreadyExists(e)) if e == "a@cafe.uz"));
    }
}
