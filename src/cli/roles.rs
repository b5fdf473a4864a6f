use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;

pub async fn add_abilities(app_data: &AppData, role: &str, abilities: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let role = app_data.role_store.find_or_create(&txn, role).await?;
    app_data.role_store.add_abilities(&txn, &role, abilities).await?;
    let current = app_data.role_store.ability_names(&txn, &role).await?;
    commit_transaction(txn).await?;

    println!("✓ Abilities for role '{}': {}", role.name, current.join(", "));
    Ok(())
}

pub async fn remove_abilities(app_data: &AppData, role: &str, abilities: &[String]) -> Result<(), InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let Some(role) = app_data.role_store.find_by_name(&txn, role).await? else {
        println!("Role '{}' does not exist; nothing to remove", role);
        return Ok(());
    };
    app_data.role_store.remove_abilities(&txn, &role, abilities).await?;
    let current = app_data.role_store.ability_names(&txn, &role).await?;
    commit_transaction(txn).await?;

    println!("✓ Abilities for role '{}': {}", role.name, current.join(", "));
    Ok(())
}

pub async fn list_roles(app_data: &AppData) -> Result<(), InternalError> {
    let db = &app_data.db;
    let roles = app_data.role_store.list(db).await?;

    if roles.is_empty() {
        println!("No roles defined");
        return Ok(());
    }

    for role in roles {
        let abilities = app_data.role_store.ability_names(db, &role).await?;
        println!("{}: {}", role, abilities.join(", "));
    }
    Ok(())
}
