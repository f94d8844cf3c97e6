//! Database repository for articles.
//!
//! Listing supports a topic filter and a caller-chosen sort. The sort column
//! and direction are spliced into the SQL text (bind parameters only carry
//! values), so both are restricted to the closed [`SortBy`] and [`SortOrder`]
//! enums and only their fixed SQL fragments ever reach the query.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::articles::{ArticleCreateDBRequest, ArticleDBResponse, ArticleSummaryDBResponse},
};
use crate::types::ArticleId;
use sqlx::{PgConnection, QueryBuilder};
use std::{fmt, str::FromStr};
use tracing::instrument;

/// Columns an article listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    Author,
    Title,
    ArticleId,
    Topic,
    #[default]
    CreatedAt,
    Votes,
    ArticleImgUrl,
    CommentCount,
}

impl SortBy {
    pub const ALL: [SortBy; 8] = [
        SortBy::Author,
        SortBy::Title,
        SortBy::ArticleId,
        SortBy::Topic,
        SortBy::CreatedAt,
        SortBy::Votes,
        SortBy::ArticleImgUrl,
        SortBy::CommentCount,
    ];

    /// The query parameter value naming this column
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Author => "author",
            SortBy::Title => "title",
            SortBy::ArticleId => "article_id",
            SortBy::Topic => "topic",
            SortBy::CreatedAt => "created_at",
            SortBy::Votes => "votes",
            SortBy::ArticleImgUrl => "article_img_url",
            SortBy::CommentCount => "comment_count",
        }
    }

    /// The ORDER BY expression for this column in the listing query
    fn as_sql(&self) -> &'static str {
        match self {
            SortBy::Author => "a.author",
            SortBy::Title => "a.title",
            SortBy::ArticleId => "a.article_id",
            SortBy::Topic => "a.topic",
            SortBy::CreatedAt => "a.created_at",
            SortBy::Votes => "a.votes",
            SortBy::ArticleImgUrl => "a.article_img_url",
            SortBy::CommentCount => "comment_count",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("cannot sort articles by {s:?}"))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an article listing sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("cannot order articles {s:?}")),
        }
    }
}

/// Filter for listing articles
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl ArticleFilter {
    pub fn new(topic: Option<String>, sort_by: SortBy, order: SortOrder) -> Self {
        Self { topic, sort_by, order }
    }
}

pub struct Articles<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Articles<'c> {
    type CreateRequest = ArticleCreateDBRequest;
    type Response = ArticleDBResponse;
    type ListItem = ArticleSummaryDBResponse;
    type Id = ArticleId;
    type Filter = ArticleFilter;

    #[instrument(skip(self, request), fields(author = ?request.author, topic = ?request.topic), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            INSERT INTO articles (author, title, body, topic, article_img_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url,
                      0::BIGINT AS comment_count
            "#,
        )
        .bind(&request.author)
        .bind(&request.title)
        .bind(&request.body)
        .bind(&request.topic)
        .bind(&request.article_img_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, article_id: Self::Id) -> Result<Option<Self::Response>> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            SELECT a.article_id, a.title, a.topic, a.author, a.body, a.created_at, a.votes, a.article_img_url,
                   COUNT(c.comment_id) AS comment_count
            FROM articles a
            LEFT JOIN comments c ON c.article_id = a.article_id
            WHERE a.article_id = $1
            GROUP BY a.article_id
            "#,
        )
        .bind(article_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(article)
    }

    #[instrument(skip(self, filter), fields(topic = ?filter.topic, sort_by = %filter.sort_by, order = ?filter.order), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::ListItem>> {
        let mut query = QueryBuilder::new(
            "SELECT a.article_id, a.title, a.topic, a.author, a.created_at, a.votes, a.article_img_url, \
             COUNT(c.comment_id) AS comment_count \
             FROM articles a \
             LEFT JOIN comments c ON c.article_id = a.article_id",
        );

        if let Some(ref topic) = filter.topic {
            query.push(" WHERE a.topic = ");
            query.push_bind(topic.clone());
        }

        let direction = filter.order.as_sql();
        query.push(" GROUP BY a.article_id ORDER BY ");
        query.push(filter.sort_by.as_sql());
        query.push(" ");
        query.push(direction);
        // Stable order between rows that tie on the sort column
        query.push(", a.article_id ");
        query.push(direction);

        let articles = query
            .build_query_as::<ArticleSummaryDBResponse>()
            .fetch_all(&mut *self.db)
            .await?;

        Ok(articles)
    }
}

impl<'c> Articles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Whether an article with this id exists
    #[instrument(skip(self), err)]
    pub async fn exists(&mut self, article_id: ArticleId) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM articles WHERE article_id = $1)")
            .bind(article_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(exists)
    }

    /// Add a signed delta to an article's votes in a single statement.
    ///
    /// Returns `None` if no article has this id. A `None` delta writes `NULL`
    /// and is rejected by the `votes` not-null constraint.
    #[instrument(skip(self), err)]
    pub async fn increment_votes(&mut self, article_id: ArticleId, inc_votes: Option<i32>) -> Result<Option<ArticleDBResponse>> {
        let article = sqlx::query_as::<_, ArticleDBResponse>(
            r#"
            WITH updated AS (
                UPDATE articles SET votes = votes + $2
                WHERE article_id = $1
                RETURNING *
            )
            SELECT u.article_id, u.title, u.topic, u.author, u.body, u.created_at, u.votes, u.article_img_url,
                   (SELECT COUNT(*) FROM comments c WHERE c.article_id = u.article_id) AS comment_count
            FROM updated u
            "#,
        )
        .bind(article_id)
        .bind(inc_votes)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(article)
    }

    /// Delete an article and, through the cascading foreign key, its comments.
    ///
    /// Returns whether a row was deleted.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, article_id: ArticleId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
