//! Repository implementations for database access.
//!
//! Each repository borrows a single `PgConnection` for its lifetime and maps
//! rows into the models in [`crate::db::models`]. Every mutation is one SQL
//! statement, so a repository never needs to hold a transaction open.
//!
//! # Available Repositories
//!
//! - [`Topics`]: topic listing and creation
//! - [`Articles`]: article listing with filter/sort, vote increments, deletion
//! - [`Comments`]: per-article comment listing, posting, votes, deletion
//! - [`Users`]: user listing and lookup
//!
//! # Common Pattern
//!
//! ```ignore
//! use newsapi::db::handlers::{Articles, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Articles::new(&mut conn);
//!
//!     if let Some(article) = repo.get_by_id(1).await? {
//!         println!("{} has {} comments", article.title, article.comment_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod articles;
pub mod comments;
pub mod repository;
pub mod topics;
pub mod users;

pub use articles::Articles;
pub use comments::Comments;
pub use repository::Repository;
pub use topics::Topics;
pub use users::Users;
