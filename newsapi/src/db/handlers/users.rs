//! Database repository for users.
//!
//! Users are read-only through the API; rows come from the seed data, so the
//! create request type is uninhabited.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::users::UserDBResponse,
};
use sqlx::PgConnection;
use std::convert::Infallible;
use tracing::instrument;

pub struct Users<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Users<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Users<'c> {
    type CreateRequest = Infallible;
    type Response = UserDBResponse;
    type ListItem = UserDBResponse;
    type Id = String;
    type Filter = ();

    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        match *request {}
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, username: Self::Id) -> Result<Option<Self::Response>> {
        let user = sqlx::query_as::<_, UserDBResponse>("SELECT username, name, avatar_url FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::ListItem>> {
        let users = sqlx::query_as::<_, UserDBResponse>("SELECT username, name, avatar_url FROM users ORDER BY username")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(users)
    }
}
