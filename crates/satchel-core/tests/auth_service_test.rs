//! Integration tests for AuthService against in-memory repositories

mod common;

use std::sync::Arc;
use std::time::Duration;

use mockall::mock;
use satchel_core::repositories::UserRepository;
use satchel_core::{
    AuthConfig, AuthService, CreateUserParams, CredentialsProvider, DomainError, Role,
    StaticCredentials, UpdatePasswordParams,
};
use satchel_security::{PasswordError, PasswordHashing};

use common::{harness, MockSessionRepository, MockUserRepository, T0};

mock! {
    pub Hasher {}

    impl PasswordHashing for Hasher {
        fn hash(&self, password: &str) -> Result<String, PasswordError>;
        fn verify(&self, password: &str, hash: &str) -> bool;
    }
}

struct PanickingProvider;

impl CredentialsProvider for PanickingProvider {
    fn credentials(&self) -> Result<CreateUserParams, DomainError> {
        panic!("provider must not be consulted when users exist");
    }
}

async fn seed_user(service: &AuthService, username: &str, password: &str) -> String {
    service
        .create_user(CreateUserParams::new(username, password))
        .await
        .expect("seed user")
        .id
}

// ---------------------------------------------------------------------------
// Sign in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_user_and_wrong_password_fail_identically() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "correct-horse").await;

    let unknown = h.service.sign_in("bob", "correct-horse").await;
    let wrong = h.service.sign_in("alice", "battery-staple").await;

    assert!(matches!(unknown, Err(DomainError::InvalidCredentials)));
    assert!(matches!(wrong, Err(DomainError::InvalidCredentials)));
    assert_eq!(
        unknown.unwrap_err().to_string(),
        wrong.unwrap_err().to_string()
    );
    assert_eq!(h.sessions.len(), 0);
}

#[tokio::test]
async fn test_sign_in_creates_session_with_configured_expiry() {
    let config = AuthConfig {
        session_duration: Duration::from_secs(15 * 60),
        ..AuthConfig::default()
    };
    let h = harness(config);
    let user_id = seed_user(&h.service, "alice", "secret1").await;

    let result = h.service.sign_in("alice", "secret1").await.unwrap();

    assert_eq!(result.user.id, user_id);
    assert_eq!(result.session.user_id, user_id);
    assert_eq!(result.session.expires_at, T0 + 15 * 60);
    assert!(h.sessions.contains(&result.session.token));
}

#[tokio::test]
async fn test_multiple_sessions_per_user_coexist() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "secret1").await;

    let first = h.service.sign_in("alice", "secret1").await.unwrap();
    let second = h.service.sign_in("alice", "secret1").await.unwrap();

    assert_ne!(first.session.token, second.session.token);
    assert!(h.service.verify_token(&first.session.token).await.is_ok());
    assert!(h.service.verify_token(&second.session.token).await.is_ok());
}

// ---------------------------------------------------------------------------
// Verify / sign out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_session_expires_rather_than_disappears() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "secret1").await;
    let token = h.service.sign_in("alice", "secret1").await.unwrap().session.token;

    assert!(h.service.verify_token(&token).await.is_ok());

    // Still valid exactly at expiry
    h.clock.advance(30 * 60);
    assert!(h.service.verify_token(&token).await.is_ok());

    h.clock.advance(1);
    let result = h.service.verify_token(&token).await;
    assert!(matches!(result, Err(DomainError::SessionExpired)));
    // Verification leaves the row for the sweep
    assert!(h.sessions.contains(&token));
}

#[tokio::test]
async fn test_sign_out_then_verify_is_not_found() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "secret1").await;
    let token = h.service.sign_in("alice", "secret1").await.unwrap().session.token;

    h.service.sign_out(&token).await.unwrap();

    let result = h.service.verify_token(&token).await;
    assert!(matches!(result, Err(DomainError::SessionNotFound)));
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let h = harness(AuthConfig::default());
    assert!(h.service.sign_out("never-issued").await.is_ok());
    assert!(h.service.sign_out("never-issued").await.is_ok());
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bootstrap_creates_admin_once() {
    let h = harness(AuthConfig::default());
    let seed = StaticCredentials::new("admin", "secret1");

    let created = h.service.bootstrap(&seed).await.unwrap();
    let admin = created.expect("admin created on empty store");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(h.users.len(), 1);

    let again = h.service.bootstrap(&seed).await.unwrap();
    assert!(again.is_none());
    assert_eq!(h.users.len(), 1);
}

#[tokio::test]
async fn test_bootstrap_skips_provider_when_users_exist() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "secret1").await;

    let result = h.service.bootstrap(&PanickingProvider).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_bootstrap_validates_credentials() {
    let h = harness(AuthConfig::default());

    let empty = h.service.bootstrap(&StaticCredentials::new("", "secret1")).await;
    assert!(matches!(empty, Err(DomainError::ValidationError(_))));

    let short = h.service.bootstrap(&StaticCredentials::new("admin", "12345")).await;
    assert!(matches!(short, Err(DomainError::PasswordTooShort { min: 6 })));

    assert_eq!(h.users.len(), 0);
}

// ---------------------------------------------------------------------------
// Password and username updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_password_policy_boundary() {
    let h = harness(AuthConfig::default());
    let user_id = seed_user(&h.service, "alice", "secret1").await;

    let too_short = h
        .service
        .update_password(UpdatePasswordParams {
            user_id: user_id.clone(),
            password: "12345".into(),
            keep_token: None,
        })
        .await;
    assert!(matches!(too_short, Err(DomainError::PasswordTooShort { min: 6 })));

    h.service
        .update_password(UpdatePasswordParams {
            user_id,
            password: "123456".into(),
            keep_token: None,
        })
        .await
        .unwrap();
    assert!(h.service.sign_in("alice", "123456").await.is_ok());
    assert!(h.service.sign_in("alice", "secret1").await.is_err());
}

#[tokio::test]
async fn test_password_change_revokes_other_sessions() {
    let h = harness(AuthConfig::default());
    let user_id = seed_user(&h.service, "alice", "secret1").await;
    let current = h.service.sign_in("alice", "secret1").await.unwrap().session.token;
    let other = h.service.sign_in("alice", "secret1").await.unwrap().session.token;

    h.service
        .update_password(UpdatePasswordParams {
            user_id,
            password: "new-secret".into(),
            keep_token: Some(current.clone()),
        })
        .await
        .unwrap();

    assert!(h.service.verify_token(&current).await.is_ok());
    assert!(matches!(
        h.service.verify_token(&other).await,
        Err(DomainError::SessionNotFound)
    ));
}

#[tokio::test]
async fn test_password_change_can_keep_sessions() {
    let config = AuthConfig {
        revoke_sessions_on_password_change: false,
        ..AuthConfig::default()
    };
    let h = harness(config);
    let user_id = seed_user(&h.service, "alice", "secret1").await;
    let token = h.service.sign_in("alice", "secret1").await.unwrap().session.token;

    h.service
        .update_password(UpdatePasswordParams {
            user_id,
            password: "new-secret".into(),
            keep_token: None,
        })
        .await
        .unwrap();

    assert!(h.service.verify_token(&token).await.is_ok());
}

#[tokio::test]
async fn test_password_update_for_unknown_user() {
    let h = harness(AuthConfig::default());
    let result = h
        .service
        .update_password(UpdatePasswordParams {
            user_id: "missing".into(),
            password: "secret1".into(),
            keep_token: None,
        })
        .await;
    assert!(matches!(result, Err(DomainError::UserNotFound)));
}

#[tokio::test]
async fn test_username_collision_is_surfaced() {
    let h = harness(AuthConfig::default());
    seed_user(&h.service, "alice", "secret1").await;
    let bob = seed_user(&h.service, "bob", "secret1").await;

    let result = h.service.update_username(&bob, "alice").await;
    assert!(matches!(result, Err(DomainError::UsernameTaken(name)) if name == "alice"));

    let invalid = h.service.update_username(&bob, "b o b").await;
    assert!(matches!(invalid, Err(DomainError::ValidationError(_))));

    h.service.update_username(&bob, "robert").await.unwrap();
    assert_eq!(h.service.get_user_by_id(&bob).await.unwrap().username, "robert");
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_user_defaults_to_user_role() {
    let h = harness(AuthConfig::default());
    let user = h
        .service
        .create_user(CreateUserParams::new("carol", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.role, Role::User);

    let dup = h
        .service
        .create_user(CreateUserParams::new("carol", "secret2"))
        .await;
    assert!(matches!(dup, Err(DomainError::UsernameTaken(_))));
}

#[tokio::test]
async fn test_list_users_is_ordered_by_username() {
    let h = harness(AuthConfig::default());
    for name in ["mallory", "alice", "bob"] {
        seed_user(&h.service, name, "secret1").await;
    }

    let names: Vec<String> = h
        .service
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["alice", "bob", "mallory"]);
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let h = harness(AuthConfig::default());
    let result = h.service.get_user_by_id("missing").await;
    assert!(matches!(result, Err(DomainError::UserNotFound)));
}

#[tokio::test]
async fn test_delete_user_revokes_sessions() {
    let h = harness(AuthConfig::default());
    let alice = seed_user(&h.service, "alice", "secret1").await;
    seed_user(&h.service, "bob", "secret1").await;
    let alice_token = h.service.sign_in("alice", "secret1").await.unwrap().session.token;
    let bob_token = h.service.sign_in("bob", "secret1").await.unwrap().session.token;

    h.service.delete_user_by_id(&alice).await.unwrap();

    assert!(h.users.find_by_id(&alice).await.unwrap().is_none());
    assert!(!h.sessions.contains(&alice_token));
    assert!(h.sessions.contains(&bob_token));
}

// ---------------------------------------------------------------------------
// Hasher failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_hash_failure_maps_to_password_hash_error() {
    let mut hasher = MockHasher::new();
    hasher
        .expect_hash()
        .returning(|_| Err(PasswordError::HashError("out of memory".into())));
    hasher.expect_verify().never();

    let service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockSessionRepository::new()),
        AuthConfig::default(),
    )
    .with_hasher(Arc::new(hasher));

    let result = service
        .create_user(CreateUserParams::new("alice", "secret1"))
        .await;
    assert!(matches!(result, Err(DomainError::PasswordHashError(_))));
}

#[tokio::test]
async fn test_unknown_user_pays_for_one_verification() {
    let mut hasher = MockHasher::new();
    // The stand-in hash is prepared once and reused
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Ok("stand-in-hash".into()));
    hasher
        .expect_verify()
        .withf(|password, hash| password == "whatever" && hash == "stand-in-hash")
        .times(2)
        .returning(|_, _| false);

    let service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockSessionRepository::new()),
        AuthConfig::default(),
    )
    .with_hasher(Arc::new(hasher));

    for _ in 0..2 {
        let result = service.sign_in("ghost", "whatever").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }
}

#[tokio::test]
async fn test_unknown_user_rejected_when_stand_in_hash_fails() {
    let mut hasher = MockHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Err(PasswordError::HashError("out of memory".into())));
    hasher.expect_verify().never();

    let service = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockSessionRepository::new()),
        AuthConfig::default(),
    )
    .with_hasher(Arc::new(hasher));

    let result = service.sign_in("ghost", "whatever").await;
    assert!(matches!(result, Err(DomainError::InvalidCredentials)));
}

#[tokio::test]
async fn test_expiry_overflow_is_an_error_not_a_panic() {
    // Far past chrono's maximum date when added to the clock
    let config = AuthConfig {
        session_duration: Duration::from_secs(400_000 * 365 * 86_400),
        ..AuthConfig::default()
    };
    let h = harness(config);
    seed_user(&h.service, "alice", "secret1").await;

    let result = h.service.sign_in("alice", "secret1").await;

    assert!(matches!(result, Err(DomainError::InternalError(_))));
    assert_eq!(h.sessions.len(), 0);
}
