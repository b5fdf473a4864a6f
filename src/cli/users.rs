use sea_orm::ConnectionTrait;

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::providers::FixedUser;
use crate::types::db::user;
use crate::types::NewUser;

async fn require_user(
    app_data: &AppData,
    conn: &impl ConnectionTrait,
    username: &str,
) -> Result<user::Model, InternalError> {
    app_data
        .user_store
        .find_by_username(conn, username)
        .await?
        .ok_or_else(|| {
            UserError::UserNotFound {
                username: username.to_owned(),
            }
            .into()
        })
}

pub async fn create_user(app_data: &AppData, new_user: NewUser) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;

    let user = app_data
        .user_store
        .create_user(&txn, &app_data.password_provider, new_user)
        .await?;
    let roles = app_data.user_store.role_names(&txn, &user).await?;
    let containers = app_data.user_store.container_names(&txn, &user).await?;

    commit_transaction(txn).await?;

    println!("✓ Created user '{}' (id {})", user.username, user.id);
    println!("  roles:      {}", roles.join(", "));
    println!("  containers: {}", containers.join(", "));
    Ok(())
}

pub async fn show_user(app_data: &AppData, username: &str) -> Result<(), InternalError> {
    let db = &app_data.db;
    let user = require_user(app_data, db, username).await?;

    let roles = app_data.user_store.role_names(db, &user).await?;
    let containers = app_data.user_store.container_names(db, &user).await?;
    let abilities: Vec<String> = app_data
        .permission_service
        .abilities_for_user(db, &user)
        .await?
        .into_iter()
        .map(|a| a.name)
        .collect();

    println!("User '{}' (id {})", user.username, user.id);
    if let Some(name) = &user.name {
        println!("  name:       {}", name);
    }
    if let Some(email) = &user.email {
        println!("  email:      {}", email);
    }
    println!("  password:   {}", if user.password_hash.is_some() { "set" } else { "not set" });
    println!("  roles:      {}", roles.join(", "));
    println!("  containers: {}", containers.join(", "));
    println!("  abilities:  {}", abilities.join(", "));
    Ok(())
}

pub async fn grant_roles(app_data: &AppData, username: &str, roles: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let user = require_user(app_data, &txn, username).await?;
    app_data.user_store.add_roles(&txn, &user, roles).await?;
    let current = app_data.user_store.role_names(&txn, &user).await?;
    commit_transaction(txn).await?;

    println!("✓ Roles for '{}': {}", username, current.join(", "));
    Ok(())
}

pub async fn revoke_roles(app_data: &AppData, username: &str, roles: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let user = require_user(app_data, &txn, username).await?;
    app_data.user_store.remove_roles(&txn, &user, roles).await?;
    let current = app_data.user_store.role_names(&txn, &user).await?;
    commit_transaction(txn).await?;

    println!("✓ Roles for '{}': {}", username, current.join(", "));
    Ok(())
}

pub async fn join_containers(app_data: &AppData, username: &str, containers: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let user = require_user(app_data, &txn, username).await?;
    app_data.user_store.add_containers(&txn, &user, containers).await?;
    let current = app_data.user_store.container_names(&txn, &user).await?;
    commit_transaction(txn).await?;

    println!("✓ Containers for '{}': {}", username, current.join(", "));
    Ok(())
}

pub async fn leave_containers(app_data: &AppData, username: &str, containers: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let user = require_user(app_data, &txn, username).await?;
    app_data.user_store.remove_containers(&txn, &user, containers).await?;
    let current = app_data.user_store.container_names(&txn, &user).await?;
    commit_transaction(txn).await?;

    println!("✓ Containers for '{}': {}", username, current.join(", "));
    Ok(())
}

pub async fn check_ability(app_data: &AppData, username: &str, ability: &str) -> Result<(), InternalError> {
    let db = &app_data.db;
    let user = require_user(app_data, db, username).await?;

    let granted = app_data
        .permission_service
        .user_has_ability(db, ability, &FixedUser(Some(user)))
        .await?;

    if granted {
        println!("✓ '{}' has ability '{}'", username, ability);
    } else {
        println!("✗ '{}' does not have ability '{}'", username, ability);
    }
    Ok(())
}

pub async fn set_password(app_data: &AppData, username: &str, password: &str) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let user = require_user(app_data, &txn, username).await?;
    app_data
        .user_store
        .hash_password(&txn, &app_data.password_provider, &user, password)
        .await?;
    commit_transaction(txn).await?;

    println!("✓ Password updated for '{}'", username);
    Ok(())
}

pub async fn verify_password(app_data: &AppData, username: &str, password: &str) -> Result<(), InternalError> {
    let user = require_user(app_data, &app_data.db, username).await?;

    if user.verify_password(&app_data.password_provider, password) {
        println!("✓ Password matches");
    } else {
        println!("✗ Password does not match");
    }
    Ok(())
}
