//! End-to-end tests: the full router on a freshly migrated database loaded
//! with `seeds/news.sql` (3 topics, 4 users, 13 articles, 18 comments).

use crate::test_utils::{count_rows, create_test_server};
use axum::http::{Method, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{Value, json};
use sqlx::PgPool;

fn msg(response: &TestResponse) -> String {
    response.json::<Value>()["msg"].as_str().unwrap_or_default().to_string()
}

fn request(server: &TestServer, method: Method, path: &str) -> axum_test::TestRequest {
    server.method(method, path)
}

mod routing {
    use super::*;

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_unknown_path_is_not_found(pool: PgPool) {
        let server = create_test_server(pool);

        for path in ["/api/not-a-route", "/", "/api/articles/1/comments/2"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(msg(&response), "Not Found - endpoint does not exist", "{path}");
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_unsupported_method_is_not_found(pool: PgPool) {
        let server = create_test_server(pool);

        for (method, path) in [
            (Method::PUT, "/api/topics"),
            (Method::DELETE, "/api/users"),
            (Method::GET, "/api/comments/1"),
        ] {
            let response = request(&server, method.clone(), path).await;
            response.assert_status(StatusCode::NOT_FOUND);
            assert_eq!(msg(&response), "Not Found - endpoint does not exist", "{method} {path}");
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_endpoint_catalog_is_served(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api").await;
        response.assert_status_ok();
        let body: Value = response.json();
        let endpoints = body["endpoints"].as_object().unwrap();
        assert!(endpoints.contains_key("GET /api/articles"));
        assert_eq!(
            endpoints["GET /api/articles"]["queries"],
            json!(["topic", "sort_by", "order"])
        );
    }

    /// Every route in the catalog must be routable; none may fall through to the 404 fallback.
    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_endpoint_catalog_matches_router(pool: PgPool) {
        let server = create_test_server(pool);
        let catalog: Value = server.get("/api").await.json();

        for route in catalog["endpoints"].as_object().unwrap().keys() {
            let (method, template) = route.split_once(' ').unwrap();
            let path = template
                .replace(":article_id", "2")
                .replace(":comment_id", "3")
                .replace(":username", "lurker");
            let method: Method = method.parse().unwrap();

            let response = request(&server, method, &path).json(&json!({})).await;
            if response.status_code() == StatusCode::NOT_FOUND {
                assert_ne!(msg(&response), "Not Found - endpoint does not exist", "{route} is not routed");
            }
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz_and_docs(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();
        let doc = response.text();
        assert!(doc.contains("\"openapi\""));
        assert!(doc.contains("News API"));

        server.get("/api/docs").await.assert_status_ok();
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_non_numeric_ids_are_rejected(pool: PgPool) {
        let server = create_test_server(pool);

        for (method, path) in [
            (Method::GET, "/api/articles/notanarticle"),
            (Method::PATCH, "/api/articles/notanarticle"),
            (Method::DELETE, "/api/articles/1.5"),
            (Method::GET, "/api/articles/abc/comments"),
            (Method::POST, "/api/articles/abc/comments"),
            (Method::PATCH, "/api/comments/one"),
            (Method::DELETE, "/api/comments/99999999999"),
            (Method::GET, "/api/articles/%FF"),
            (Method::GET, "/api/articles/%FF/comments"),
            (Method::PATCH, "/api/comments/%FF"),
        ] {
            let response = request(&server, method.clone(), path)
                .json(&json!({"inc_votes": 1, "username": "lurker", "body": "hi"}))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(msg(&response), "Bad Request - parametric endpoint must be a number", "{method} {path}");
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_undecodable_username_is_a_json_error(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/users/%FF").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - path parameter is malformed");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_malformed_query_string_is_a_json_error(pool: PgPool) {
        let server = create_test_server(pool);

        for query in ["topic=cats&topic=mitch", "order=asc&order=desc"] {
            let response = server.get(&format!("/api/articles?{query}")).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(msg(&response), "Bad Request - query string is malformed", "{query}");
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_malformed_json_body(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server
            .post("/api/articles/1/comments")
            .bytes("{\"username\": \"lurker\",".into())
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body is malformed");

        let response = server.patch("/api/articles/1").json(&json!({"inc_votes": "ten"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body is malformed");
    }
}

mod topics {
    use super::*;

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_topics(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/topics").await;
        response.assert_status_ok();
        let topics = response.json::<Value>()["topics"].as_array().unwrap().clone();
        assert_eq!(topics.len(), 3);
        for topic in &topics {
            assert!(topic["slug"].is_string());
            assert!(topic["description"].is_string());
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_create_topic(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server
            .post("/api/topics")
            .json(&json!({"slug": "football", "description": "Footie!"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({"topic": {"slug": "football", "description": "Footie!"}}));

        let response = server.post("/api/topics").json(&json!({"slug": "football"})).await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(msg(&response), "Conflict - resource already exists");

        let response = server.post("/api/topics").json(&json!({"description": "no slug"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body must contain all required keys");
    }
}

mod articles {
    use super::*;

    fn articles(response: &TestResponse) -> Vec<Value> {
        response.json::<Value>()["articles"].as_array().unwrap().clone()
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_articles_defaults(pool: PgPool) {
        let server = create_test_server(pool.clone());

        let response = server.get("/api/articles").await;
        response.assert_status_ok();
        let articles = articles(&response);
        assert_eq!(articles.len(), 13);

        let created: Vec<&str> = articles.iter().map(|a| a["created_at"].as_str().unwrap()).collect();
        assert!(created.windows(2).all(|w| w[0] >= w[1]), "not newest first: {created:?}");
        assert_eq!(articles[0]["article_id"], 3);

        for article in &articles {
            assert!(article.get("body").is_none());
            let id = article["article_id"].as_i64().unwrap() as i32;
            let expected: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE article_id = $1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(article["comment_count"].as_i64(), Some(expected), "article {id}");
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_articles_sorted(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/articles").add_query_params(json!({"sort_by": "votes", "order": "asc"})).await;
        response.assert_status_ok();
        let votes: Vec<i64> = articles(&response).iter().map(|a| a["votes"].as_i64().unwrap()).collect();
        assert!(votes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(votes.last(), Some(&100));

        let response = server.get("/api/articles?sort_by=comment_count").await;
        let counts: Vec<i64> = articles(&response)
            .iter()
            .map(|a| a["comment_count"].as_i64().unwrap())
            .collect();
        assert_eq!(counts[0], 11);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));

        let response = server.get("/api/articles?order=ASC").await;
        response.assert_status_ok();
        assert_eq!(articles(&response)[0]["article_id"], 7);
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_articles_rejects_invalid_sort(pool: PgPool) {
        let server = create_test_server(pool);

        for sort_by in ["not_a_column", "body", "votes;DROP TABLE articles"] {
            let response = server.get("/api/articles").add_query_param("sort_by", sort_by).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(msg(&response), "Bad Request - invalid sort_by query", "{sort_by}");
        }

        let response = server.get("/api/articles?order=sideways").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - invalid order query");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_articles_by_topic(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/articles?topic=cats").await;
        response.assert_status_ok();
        let cats = articles(&response);
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0]["topic"], "cats");

        let response = server.get("/api/articles?topic=mitch").await;
        assert_eq!(articles(&response).len(), 12);

        // Known topic, no articles
        let response = server.get("/api/articles?topic=paper").await;
        response.assert_status_ok();
        response.assert_json(&json!({"articles": []}));

        let response = server.get("/api/articles?topic=dogs").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - topic does not exist");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_get_article(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/articles/1").await;
        response.assert_status_ok();
        let article = response.json::<Value>()["article"].clone();
        assert_eq!(article["article_id"], 1);
        assert_eq!(article["title"], "Living in the shadow of a great man");
        assert_eq!(article["topic"], "mitch");
        assert_eq!(article["author"], "butter_bridge");
        assert_eq!(article["body"], "I find this existence challenging");
        assert_eq!(article["created_at"], "2020-07-09T20:11:00Z");
        assert_eq!(article["votes"], 100);
        assert_eq!(article["comment_count"], 11);

        let response = server.get("/api/articles/7777").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - article_id does not exist");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_create_article(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server
            .post("/api/articles")
            .json(&json!({
                "author": "lurker",
                "title": "Why paper?",
                "body": "Because books.",
                "topic": "paper",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let article = response.json::<Value>()["article"].clone();
        assert_eq!(article["article_id"], 14);
        assert_eq!(article["votes"], 0);
        assert_eq!(article["comment_count"], 0);
        assert_eq!(article["article_img_url"], Value::Null);
        assert!(article["created_at"].is_string());

        server.get("/api/articles/14").await.assert_status_ok();
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_create_article_rejections(pool: PgPool) {
        let server = create_test_server(pool.clone());
        let valid = json!({"author": "lurker", "title": "t", "body": "b", "topic": "paper"});

        let mut unknown_topic = valid.clone();
        unknown_topic["topic"] = json!("dogs");
        let response = server.post("/api/articles").json(&unknown_topic).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - topic does not exist");

        let mut unknown_author = valid.clone();
        unknown_author["author"] = json!("nobody");
        let response = server.post("/api/articles").json(&unknown_author).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - author does not exist");

        let response = server
            .post("/api/articles")
            .json(&json!({"author": "lurker", "topic": "paper", "body": "no title"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body must contain all required keys");

        assert_eq!(count_rows(&pool, "articles").await, 13);
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_update_article_votes(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.patch("/api/articles/1").json(&json!({"inc_votes": 10})).await;
        response.assert_status_ok();
        let article = response.json::<Value>()["article"].clone();
        assert_eq!(article["votes"], 110);
        assert_eq!(article["comment_count"], 11);
        assert_eq!(article["body"], "I find this existence challenging");

        let response = server.patch("/api/articles/1").json(&json!({"inc_votes": -150})).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["article"]["votes"], -40);

        let response = server.patch("/api/articles/1").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body must contain all required keys");

        let response = server.patch("/api/articles/7777").json(&json!({"inc_votes": 1})).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - article_id does not exist");

        let response = server.patch("/api/articles/1").json(&json!({"inc_votes": i32::MIN})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - votes out of range");
        let response = server.get("/api/articles/1").await;
        assert_eq!(response.json::<Value>()["article"]["votes"], -40);

        // Only the targeted article changed
        let response = server.get("/api/articles/2").await;
        assert_eq!(response.json::<Value>()["article"]["votes"], 0);
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_delete_article_removes_its_comments(pool: PgPool) {
        let server = create_test_server(pool.clone());

        let response = server.delete("/api/articles/1").await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.as_bytes().is_empty());

        server.get("/api/articles/1").await.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(count_rows(&pool, "articles").await, 12);
        assert_eq!(count_rows(&pool, "comments").await, 18 - 11);

        let response = server.delete("/api/articles/1").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - article_id does not exist");
    }
}

mod comments {
    use super::*;

    fn comments(response: &TestResponse) -> Vec<Value> {
        response.json::<Value>()["comments"].as_array().unwrap().clone()
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_article_comments(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/articles/1/comments").await;
        response.assert_status_ok();
        let comments = comments(&response);
        assert_eq!(comments.len(), 11);
        let created: Vec<&str> = comments.iter().map(|c| c["created_at"].as_str().unwrap()).collect();
        assert!(created.windows(2).all(|w| w[0] >= w[1]));
        for comment in &comments {
            assert_eq!(comment["article_id"], 1);
            for key in ["comment_id", "votes", "author", "body"] {
                assert!(comment.get(key).is_some(), "missing {key}");
            }
        }

        let response = server.get("/api/articles/2/comments").await;
        response.assert_status_ok();
        response.assert_json(&json!({"comments": []}));

        let response = server.get("/api/articles/7777/comments").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - article_id does not exist");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_post_comment(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server
            .post("/api/articles/2/comments")
            .json(&json!({"username": "lurker", "body": "First!"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let comment = response.json::<Value>()["comment"].clone();
        assert_eq!(comment["comment_id"], 19);
        assert_eq!(comment["article_id"], 2);
        assert_eq!(comment["author"], "lurker");
        assert_eq!(comment["body"], "First!");
        assert_eq!(comment["votes"], 0);

        let response = server.get("/api/articles/2").await;
        assert_eq!(response.json::<Value>()["article"]["comment_count"], 1);
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_post_comment_rejections(pool: PgPool) {
        let server = create_test_server(pool.clone());

        let response = server
            .post("/api/articles/2/comments")
            .json(&json!({"username": "nobody", "body": "hi"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - user does not exist");

        let response = server
            .post("/api/articles/7777/comments")
            .json(&json!({"username": "lurker", "body": "hi"}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - article_id does not exist");

        let response = server.post("/api/articles/2/comments").json(&json!({"username": "lurker"})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body must contain all required keys");

        assert_eq!(count_rows(&pool, "comments").await, 18);
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_update_comment_votes(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.patch("/api/comments/1").json(&json!({"inc_votes": 1})).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["comment"]["votes"], 17);

        let response = server.patch("/api/comments/1").json(&json!({"inc_votes": -20})).await;
        assert_eq!(response.json::<Value>()["comment"]["votes"], -3);

        let response = server.patch("/api/comments/1").json(&json!({"votes": 1})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - request body must contain all required keys");

        let response = server.patch("/api/comments/1").json(&json!({"inc_votes": i32::MIN})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(msg(&response), "Bad Request - votes out of range");

        let response = server.patch("/api/comments/7777").json(&json!({"inc_votes": 1})).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - comment_id does not exist");
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_delete_comment_removes_exactly_one_row(pool: PgPool) {
        let server = create_test_server(pool.clone());

        let response = server.delete("/api/comments/1").await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(count_rows(&pool, "comments").await, 17);

        let remaining: Vec<i32> = sqlx::query_scalar("SELECT comment_id FROM comments ORDER BY comment_id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, (2..=18).collect::<Vec<_>>());

        let response = server.delete("/api/comments/1").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - comment_id does not exist");
    }
}

mod users {
    use super::*;

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_list_users(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/users").await;
        response.assert_status_ok();
        let users = response.json::<Value>()["users"].as_array().unwrap().clone();
        assert_eq!(users.len(), 4);
        for user in &users {
            for key in ["username", "name", "avatar_url"] {
                assert!(user.get(key).is_some(), "missing {key}");
            }
        }
    }

    #[sqlx::test(fixtures(path = "../../seeds", scripts("news")))]
    #[test_log::test]
    async fn test_get_user(pool: PgPool) {
        let server = create_test_server(pool);

        let response = server.get("/api/users/butter_bridge").await;
        response.assert_status_ok();
        let user = response.json::<Value>()["user"].clone();
        assert_eq!(user["username"], "butter_bridge");
        assert_eq!(user["name"], "jonny");

        let response = server.get("/api/users/nobody").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(msg(&response), "Not Found - username does not exist");
    }
}
