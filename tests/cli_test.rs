// Integration tests for the administrative CLI commands

mod common;

use clap::Parser;
use common::setup_app_data;
use linkstash_rbac::cli::{execute_command, Cli};
use linkstash_rbac::config::MapEnvironment;
use linkstash_rbac::providers::FixedUser;
use linkstash_rbac::AppData;

async fn run(app: &AppData, args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::try_parse_from(std::iter::once("linkstash-rbac").chain(args.iter().copied()))
        .expect("Failed to parse command line");
    execute_command(cli, app).await
}

#[tokio::test]
async fn test_create_user_with_explicit_role() {
    let app = setup_app_data(MapEnvironment::empty()).await;

    run(&app, &["create-user", "alice", "--email", "alice@example.com", "--role", "Editor", "--password", "s3cret"])
        .await
        .unwrap();

    let db = &app.db;
    let user = app.user_store.find_by_username(db, "alice").await.unwrap().unwrap();
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));
    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["editor"]);
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["all"]);
    assert!(user.verify_password(&app.password_provider, "s3cret"));
}

#[tokio::test]
async fn test_create_user_without_roles_uses_defaults() {
    let app = setup_app_data(MapEnvironment::empty()).await;

    run(&app, &["create-user", "bob"]).await.unwrap();

    let db = &app.db;
    let user = app.user_store.find_by_username(db, "bob").await.unwrap().unwrap();
    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["user"]);
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["all"]);
    assert!(user.password_hash.is_none());
}

#[tokio::test]
async fn test_create_duplicate_user_fails() {
    let app = setup_app_data(MapEnvironment::empty()).await;

    run(&app, &["create-user", "carol"]).await.unwrap();
    let result = run(&app, &["create-user", "carol"]).await;

    let error = result.unwrap_err();
    assert_eq!(error.to_string(), "Duplicate user: carol");
}

#[tokio::test]
async fn test_grant_and_revoke_roles() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    run(&app, &["create-user", "dana", "--role", "editor"]).await.unwrap();

    run(&app, &["grant-role", "dana", "admin", "editor"]).await.unwrap();
    let db = &app.db;
    let user = app.user_store.find_by_username(db, "dana").await.unwrap().unwrap();
    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["admin", "editor"]);

    run(&app, &["revoke-role", "dana", "editor", "ghost"]).await.unwrap();
    assert_eq!(app.user_store.role_names(db, &user).await.unwrap(), vec!["admin"]);
    assert!(app.role_store.find_by_name(db, "editor").await.unwrap().is_some());
}

#[tokio::test]
async fn test_grant_role_to_unknown_user_fails() {
    let app = setup_app_data(MapEnvironment::empty()).await;

    let error = run(&app, &["grant-role", "nobody", "admin"]).await.unwrap_err();
    assert_eq!(error.to_string(), "User not found: nobody");
}

#[tokio::test]
async fn test_join_and_leave_containers() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    run(&app, &["create-user", "erin"]).await.unwrap();

    run(&app, &["join-container", "erin", "Sales", "eu"]).await.unwrap();
    let db = &app.db;
    let user = app.user_store.find_by_username(db, "erin").await.unwrap().unwrap();
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["Sales", "all", "eu"]);

    run(&app, &["leave-container", "erin", "all"]).await.unwrap();
    assert_eq!(app.user_store.container_names(db, &user).await.unwrap(), vec!["Sales", "eu"]);
}

#[tokio::test]
async fn test_add_and_remove_abilities() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    let db = &app.db;

    run(&app, &["add-abilities", "editor", "publish", "edit"]).await.unwrap();
    let role = app.role_store.find_by_name(db, "editor").await.unwrap().unwrap();
    assert_eq!(app.role_store.ability_names(db, &role).await.unwrap(), vec!["edit", "publish"]);

    run(&app, &["remove-abilities", "editor", "edit", "unknown"]).await.unwrap();
    assert_eq!(app.role_store.ability_names(db, &role).await.unwrap(), vec!["publish"]);
    assert!(app.ability_store.find_by_name(db, "edit").await.unwrap().is_some());
}

#[tokio::test]
async fn test_remove_abilities_from_missing_role_is_noop() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    let db = &app.db;

    run(&app, &["remove-abilities", "ghost", "publish"]).await.unwrap();

    assert!(app.role_store.find_by_name(db, "ghost").await.unwrap().is_none());
    assert!(app.role_store.list(db).await.unwrap().is_empty());
    assert!(app.ability_store.list(db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_granted_ability_is_visible_to_check() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    run(&app, &["add-abilities", "editor", "publish"]).await.unwrap();
    run(&app, &["create-user", "fred", "--role", "editor"]).await.unwrap();

    run(&app, &["check", "fred", "publish"]).await.unwrap();
    run(&app, &["show-user", "fred"]).await.unwrap();
    run(&app, &["list-roles"]).await.unwrap();

    let db = &app.db;
    let user = app.user_store.find_by_username(db, "fred").await.unwrap();
    let current = FixedUser(user);
    assert!(app.permission_service.user_has_ability(db, "publish", &current).await.unwrap());
    assert!(!app.permission_service.user_has_ability(db, "delete", &current).await.unwrap());
}

#[tokio::test]
async fn test_set_password_replaces_hash() {
    let app = setup_app_data(MapEnvironment::empty()).await;
    run(&app, &["create-user", "gina", "--password", "old-password"]).await.unwrap();

    run(&app, &["set-password", "gina", "new-password"]).await.unwrap();
    run(&app, &["verify-password", "gina", "new-password"]).await.unwrap();

    let user = app.user_store.find_by_username(&app.db, "gina").await.unwrap().unwrap();
    assert!(user.verify_password(&app.password_provider, "new-password"));
    assert!(!user.verify_password(&app.password_provider, "old-password"));
}
