use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostContent, User};
use crate::error::RepoError;

/// Generic repository trait with the lookups every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Store a new user. A taken username is a `RepoError::Constraint`.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Store a new post and return it with its generated id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace title and body. Image and creation time are kept.
    async fn update_content(&self, id: i32, content: PostContent) -> Result<Post, RepoError>;

    /// All posts, newest first; equal timestamps keep insertion order.
    async fn list_ordered(&self) -> Result<Vec<Post>, RepoError>;

    /// All posts in storage order.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;
}
