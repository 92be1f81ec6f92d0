use chrono::{DateTime, FixedOffset, TimeZone};
use sea_orm::{Database, DatabaseBackend, DbConn, MockDatabase};

use migration::{Migrator, MigratorTrait};
use quill_core::domain::{NewPost, NewUser, Post, PostContent, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::post;
use crate::database::{SqlPostRepository, SqlUserRepository};

fn tokyo() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

fn at(hour: u32) -> DateTime<FixedOffset> {
    tokyo().with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
}

fn new_post(title: &str, created_at: DateTime<FixedOffset>) -> NewPost {
    NewPost {
        content: PostContent::new(title, "body").unwrap(),
        created_at,
        img_name: None,
    }
}

async fn sqlite() -> DbConn {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

#[tokio::test]
async fn test_find_post_by_id() {
    let now = at(10);

    // Mock the query expectation
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 3,
            title: "Test Post".to_owned(),
            body: "Content".to_owned(),
            created_at: now,
            img_name: Some("a.png".to_owned()),
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(3).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 3);
    assert_eq!(post.img_name.as_deref(), Some("a.png"));
}

#[tokio::test]
async fn test_find_missing_post_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(42).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_insert_and_list_ordered_newest_first() {
    let repo = SqlPostRepository::new(sqlite().await);

    let early = repo.insert(new_post("early", at(8))).await.unwrap();
    let late = repo.insert(new_post("late", at(12))).await.unwrap();
    let tie_a = repo.insert(new_post("tie a", at(10))).await.unwrap();
    let tie_b = repo.insert(new_post("tie b", at(10))).await.unwrap();

    let ids: Vec<i32> = repo
        .list_ordered()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![late.id, tie_a.id, tie_b.id, early.id]);

    let all: Vec<i32> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all, vec![early.id, late.id, tie_a.id, tie_b.id]);
}

#[tokio::test]
async fn test_list_ordered_across_offsets() {
    let repo = SqlPostRepository::new(sqlite().await);

    // 10:00 +09:00 is 01:00 UTC, an hour before 02:00 UTC
    let tokyo_morning = repo.insert(new_post("tokyo", at(10))).await.unwrap();
    let utc = FixedOffset::east_opt(0).unwrap();
    let utc_night = repo
        .insert(new_post("utc", utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap()))
        .await
        .unwrap();

    let ids: Vec<i32> = repo
        .list_ordered()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![utc_night.id, tokyo_morning.id]);

    let stored: Post = repo.find_by_id(tokyo_morning.id).await.unwrap().unwrap();
    assert_eq!(stored.created_at, at(10));
}

#[tokio::test]
async fn test_update_content_keeps_image_and_timestamp() {
    let repo = SqlPostRepository::new(sqlite().await);

    let mut original = new_post("before", at(9));
    original.img_name = Some("a.png".to_string());
    let stored = repo.insert(original).await.unwrap();

    let updated = repo
        .update_content(stored.id, PostContent::new("after", "new body").unwrap())
        .await
        .unwrap();

    assert_eq!(updated.title, "after");
    assert_eq!(updated.body, "new body");
    assert_eq!(updated.img_name.as_deref(), Some("a.png"));
    assert_eq!(updated.created_at, stored.created_at);

    let missing = repo
        .update_content(stored.id + 100, PostContent::new("x", "y").unwrap())
        .await;
    assert!(matches!(missing, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_post() {
    let repo = SqlPostRepository::new(sqlite().await);
    let stored = repo.insert(new_post("doomed", at(9))).await.unwrap();

    BaseRepository::<Post, i32>::delete(&repo, stored.id)
        .await
        .unwrap();

    let found: Option<Post> = repo.find_by_id(stored.id).await.unwrap();
    assert!(found.is_none());

    let again = BaseRepository::<Post, i32>::delete(&repo, stored.id).await;
    assert!(matches!(again, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_duplicate_username_is_constraint_error() {
    let repo = SqlUserRepository::new(sqlite().await);

    let alice = repo
        .insert(NewUser::new("alice".to_string(), "hash-1".to_string()))
        .await
        .unwrap();
    let duplicate = repo
        .insert(NewUser::new("alice".to_string(), "hash-2".to_string()))
        .await;
    assert!(matches!(duplicate, Err(RepoError::Constraint(_))));

    let found = repo.find_by_username("alice").await.unwrap();
    assert_eq!(found, Some(alice.clone()));
    assert!(repo.find_by_username("bob").await.unwrap().is_none());

    let by_id: Option<User> = repo.find_by_id(alice.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.password_hash), Some("hash-1".to_string()));
}
