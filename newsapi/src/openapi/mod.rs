//! OpenAPI documentation for the news API.
//!
//! [`ApiDoc`] is served as JSON at `/api/openapi.json` and rendered with
//! Scalar at `/api/docs`.

use utoipa::OpenApi;

use crate::{api, errors};

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::endpoints::get_endpoints,
        api::handlers::endpoints::healthz,
        api::handlers::topics::list_topics,
        api::handlers::topics::create_topic,
        api::handlers::articles::list_articles,
        api::handlers::articles::get_article,
        api::handlers::articles::create_article,
        api::handlers::articles::update_article_votes,
        api::handlers::articles::delete_article,
        api::handlers::comments::list_article_comments,
        api::handlers::comments::create_article_comment,
        api::handlers::comments::update_comment_votes,
        api::handlers::comments::delete_comment,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
    ),
    components(
        schemas(
            errors::ErrorBody,
            api::models::endpoints::EndpointsEnvelope,
            api::models::topics::TopicCreate,
            api::models::topics::TopicResponse,
            api::models::topics::TopicsEnvelope,
            api::models::topics::TopicEnvelope,
            api::models::articles::ArticleCreate,
            api::models::articles::VotesUpdate,
            api::models::articles::ArticleResponse,
            api::models::articles::ArticleSummaryResponse,
            api::models::articles::ArticlesEnvelope,
            api::models::articles::ArticleEnvelope,
            api::models::comments::CommentCreate,
            api::models::comments::CommentResponse,
            api::models::comments::CommentsEnvelope,
            api::models::comments::CommentEnvelope,
            api::models::users::UserResponse,
            api::models::users::UsersEnvelope,
            api::models::users::UserEnvelope,
        )
    ),
    tags(
        (name = "meta", description = "Endpoint catalog and liveness."),
        (name = "topics", description = "Categories that articles belong to."),
        (name = "articles", description = "Articles with derived comment counts and a vote counter.

Listings accept `topic`, `sort_by` and `order` query parameters. `sort_by` must be one of
`author`, `title`, `article_id`, `topic`, `created_at`, `votes`, `article_img_url` or `comment_count`."),
        (name = "comments", description = "Replies attached to articles, each with its own vote counter."),
        (name = "users", description = "Author identities referenced by articles and comments."),
    ),
    info(
        title = "News API",
        version = "1.0.0",
        description = "REST API serving topics, articles, comments and users.

## Errors

Every error response has the same shape:

```json
{ \"msg\": \"Not Found - article_id does not exist\" }
```",
    ),
)]
pub struct ApiDoc;
