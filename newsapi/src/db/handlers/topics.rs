//! Database repository for topics.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::topics::{TopicCreateDBRequest, TopicDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Topics<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Topics<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Topics<'c> {
    type CreateRequest = TopicCreateDBRequest;
    type Response = TopicDBResponse;
    type ListItem = TopicDBResponse;
    type Id = String;
    type Filter = ();

    #[instrument(skip(self, request), fields(slug = ?request.slug), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let topic = sqlx::query_as::<_, TopicDBResponse>(
            r#"
            INSERT INTO topics (slug, description)
            VALUES ($1, COALESCE($2, ''))
            RETURNING slug, description
            "#,
        )
        .bind(&request.slug)
        .bind(&request.description)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(topic)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, slug: Self::Id) -> Result<Option<Self::Response>> {
        let topic = sqlx::query_as::<_, TopicDBResponse>("SELECT slug, description FROM topics WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(topic)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::ListItem>> {
        let topics = sqlx::query_as::<_, TopicDBResponse>("SELECT slug, description FROM topics ORDER BY slug")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(topics)
    }
}
