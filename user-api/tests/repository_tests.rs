mod common;

use chrono::Utc;
use common::TestDb;
use user_api::domain::user::models::DisplayName;
use user_api::domain::user::models::EmailAddress;
use user_api::domain::user::models::PageRequest;
use user_api::domain::user::models::Roles;
use user_api::domain::user::models::SortDirection;
use user_api::domain::user::models::SortField;
use user_api::domain::user::models::User;
use user_api::domain::user::models::UserId;
use user_api::domain::user::models::UserSort;
use user_api::domain::user::ports::UserRepository;
use user_api::outbound::repositories::PostgresUserRepository;
use user_api::user::errors::UserError;

fn user(name: &str, email: &str, roles: &[&str]) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        name: DisplayName::new(name.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        roles: Roles::new(roles.iter().map(|r| r.to_string())).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

async fn count(db: &TestDb) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&db.pool)
        .await
        .expect("Failed to count users")
}

#[tokio::test]
async fn test_create_and_find_user() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let alice = user("Alice", "alice@example.com", &["ROLE_USER", "ROLE_ADMIN"]);
    repository.create(alice.clone()).await.unwrap();

    let by_id = repository
        .find_by_id(&alice.id)
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(by_id.email, alice.email);
    assert_eq!(by_id.name, alice.name);
    assert_eq!(by_id.password_hash, alice.password_hash);
    assert_eq!(by_id.roles, alice.roles);

    let by_email = repository
        .find_by_email(&alice.email)
        .await
        .unwrap()
        .expect("User should exist");
    assert_eq!(by_email.id, alice.id);

    let missing = EmailAddress::new("nobody@example.com".to_string()).unwrap();
    assert!(repository.find_by_email(&missing).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_maps_to_conflict() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("Alice", "alice@example.com", &["ROLE_USER"]))
        .await
        .unwrap();

    let result = repository
        .create(user("Alice Two", "alice@example.com", &["ROLE_USER"]))
        .await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists(email)) if email == "alice@example.com"));
}

#[tokio::test]
async fn test_create_many_rolls_back_on_conflict() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("Alice", "alice@example.com", &["ROLE_USER"]))
        .await
        .unwrap();

    let batch = vec![
        user("Carol", "carol@example.com", &["ROLE_USER"]),
        user("Dave", "dave@example.com", &["ROLE_USER"]),
        user("Alice Again", "alice@example.com", &["ROLE_USER"]),
    ];
    let result = repository.create_many(batch).await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));

    // Carol and Dave were inserted before the failure and must be gone
    assert_eq!(count(&db).await, 1);
    let carol = EmailAddress::new("carol@example.com".to_string()).unwrap();
    assert!(repository.find_by_email(&carol).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_many_rejects_duplicates_within_batch() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let batch = vec![
        user("Carol", "carol@example.com", &["ROLE_USER"]),
        user("Carol Two", "carol@example.com", &["ROLE_USER"]),
    ];
    assert!(matches!(
        repository.create_many(batch).await,
        Err(UserError::EmailAlreadyExists(_))
    ));
    assert_eq!(count(&db).await, 0);
}

#[tokio::test]
async fn test_find_page_totals_and_order() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let batch = (0..5)
        .map(|i| {
            user(
                &format!("User {}", i),
                &format!("user{}@example.com", i),
                &["ROLE_USER"],
            )
        })
        .collect();
    repository.create_many(batch).await.unwrap();

    let sort = UserSort {
        field: SortField::Email,
        direction: SortDirection::Descending,
    };
    let page = repository
        .find_page(&PageRequest::new(1, 2, sort).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.size, 2);
    let emails: Vec<&str> = page.items.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["user2@example.com", "user1@example.com"]);

    let last = repository
        .find_page(&PageRequest::new(2, 2, sort).unwrap())
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].email.as_str(), "user0@example.com");

    let beyond = repository
        .find_page(&PageRequest::new(10, 2, sort).unwrap())
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_items, 5);
}

#[tokio::test]
async fn test_update_and_delete() {
    let Some(db) = TestDb::try_new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let alice = user("Alice", "alice@example.com", &["ROLE_USER"]);
    let bob = user("Bob", "bob@example.com", &["ROLE_USER"]);
    repository.create(alice.clone()).await.unwrap();
    repository.create(bob.clone()).await.unwrap();

    let mut renamed = bob.clone();
    renamed.name = DisplayName::new("Robert".to_string()).unwrap();
    renamed.roles = Roles::new(vec!["ROLE_ADMIN".to_string()]).unwrap();
    repository.update(renamed).await.unwrap();

    let stored = repository.find_by_id(&bob.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_str(), "Robert");
    assert!(stored.roles.contains("ROLE_ADMIN"));

    let mut stealing = bob.clone();
    stealing.email = alice.email.clone();
    assert!(matches!(
        repository.update(stealing).await,
        Err(UserError::EmailAlreadyExists(_))
    ));

    let ghost = user("Ghost", "ghost@example.com", &["ROLE_USER"]);
    assert!(matches!(
        repository.update(ghost.clone()).await,
        Err(UserError::NotFound(_))
    ));

    repository.delete(&bob.id).await.unwrap();
    assert!(repository.find_by_id(&bob.id).await.unwrap().is_none());
    assert!(matches!(
        repository.delete(&bob.id).await,
        Err(UserError::NotFound(_))
    ));
}
