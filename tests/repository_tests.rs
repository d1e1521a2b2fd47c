//! 仓库层测试

use jokes_gateway::{error::AppError, repository::UserRepository};

mod common;
use common::{create_test_config, create_test_user, setup_test_db};

#[tokio::test]
async fn test_user_repository_create_and_find() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let user_repo = UserRepository::new(pool.clone());

    let id = user_repo.create("testuser", "hash123").await.unwrap();

    let by_name = user_repo
        .find_by_username("testuser")
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(by_name.id, id);
    assert_eq!(by_name.password, "hash123");

    let by_id = user_repo.find_by_id(id).await.unwrap().expect("User not found");
    assert_eq!(by_id.username, "testuser");
}

#[tokio::test]
async fn test_user_repository_missing_user() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let user_repo = UserRepository::new(pool);

    assert!(user_repo.find_by_username("nobody").await.unwrap().is_none());
    assert!(user_repo.find_by_id(42).await.unwrap().is_none());
    assert!(!user_repo.exists("nobody").await.unwrap());
}

#[tokio::test]
async fn test_unique_constraint_maps_to_username_taken() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;

    create_test_user(&pool, "testuser", "password123")
        .await
        .expect("Failed to create test user");

    let user_repo = UserRepository::new(pool);
    let result = user_repo.create("testuser", "another-hash").await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));
}

#[tokio::test]
async fn test_ids_are_generated() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let user_repo = UserRepository::new(pool);

    let first = user_repo.create("alice", "h").await.unwrap();
    let second = user_repo.create("bob", "h").await.unwrap();

    assert_ne!(first, second);
}
