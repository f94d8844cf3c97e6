//! Database repository for comments.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::comments::{CommentCreateDBRequest, CommentDBResponse},
};
use crate::types::{ArticleId, CommentId};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing comments; comments are always listed per article
#[derive(Debug, Clone, Copy)]
pub struct CommentFilter {
    pub article_id: ArticleId,
}

impl CommentFilter {
    pub fn for_article(article_id: ArticleId) -> Self {
        Self { article_id }
    }
}

pub struct Comments<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Comments<'c> {
    type CreateRequest = CommentCreateDBRequest;
    type Response = CommentDBResponse;
    type ListItem = CommentDBResponse;
    type Id = CommentId;
    type Filter = CommentFilter;

    /// Insert a comment. An unknown article or author surfaces as a foreign
    /// key violation naming the offending constraint.
    #[instrument(skip(self, request), fields(article_id = request.article_id, author = ?request.author), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let comment = sqlx::query_as::<_, CommentDBResponse>(
            r#"
            INSERT INTO comments (article_id, author, body)
            VALUES ($1, $2, $3)
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(request.article_id)
        .bind(&request.author)
        .bind(&request.body)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, comment_id: Self::Id) -> Result<Option<Self::Response>> {
        let comment = sqlx::query_as::<_, CommentDBResponse>(
            "SELECT comment_id, body, article_id, author, votes, created_at FROM comments WHERE comment_id = $1",
        )
        .bind(comment_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(comment)
    }

    /// Comments on one article, newest first
    #[instrument(skip(self), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::ListItem>> {
        let comments = sqlx::query_as::<_, CommentDBResponse>(
            r#"
            SELECT comment_id, body, article_id, author, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC, comment_id DESC
            "#,
        )
        .bind(filter.article_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(comments)
    }
}

impl<'c> Comments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Add a signed delta to a comment's votes. Returns `None` if no comment has this id.
    #[instrument(skip(self), err)]
    pub async fn increment_votes(&mut self, comment_id: CommentId, inc_votes: Option<i32>) -> Result<Option<CommentDBResponse>> {
        let comment = sqlx::query_as::<_, CommentDBResponse>(
            r#"
            UPDATE comments SET votes = votes + $2
            WHERE comment_id = $1
            RETURNING comment_id, body, article_id, author, votes, created_at
            "#,
        )
        .bind(comment_id)
        .bind(inc_votes)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(comment)
    }

    /// Returns whether a row was deleted
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, comment_id: CommentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
