//! [`ActorEntity`] implementation for [`UserRecord`].
//!
//! Accounts are read-only after registration, so there are no actions.

use super::UserError;
use crate::model::{normalize_email, NewUser, User, UserId, UserRecord};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// Users have no mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {}

#[async_trait]
impl ActorEntity for UserRecord {
    type Id = UserId;
    type Create = NewUser;
    type Action = UserAction;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: NewUser, _ctx: &()) -> Result<Self, UserError> {
        Ok(Self {
            user: User {
                id,
                email: params.email,
                name: params.name,
                phone: params.phone,
                created_at: Utc::now(),
            },
            password_hash: params.password_hash,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(normalize_email(&self.user.email))
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<(), UserError> {
        match action {}
    }
}
