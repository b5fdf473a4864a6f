// CLI module for administrative operations on users, roles and abilities

pub mod roles;
pub mod users;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Linkstash RBAC administration
#[derive(Parser)]
#[command(name = "linkstash-rbac")]
#[command(about = "Manage users, roles, abilities and containers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a user with initial roles and containers
    CreateUser {
        username: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Role to assign (repeatable); the default role applies when omitted
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Container to join (repeatable); the default container applies when omitted
        #[arg(long = "container")]
        containers: Vec<String>,
    },

    /// Show a user's roles, containers and effective abilities
    ShowUser { username: String },

    /// Assign roles to a user
    GrantRole {
        username: String,
        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Remove roles from a user
    RevokeRole {
        username: String,
        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Add a user to containers
    JoinContainer {
        username: String,
        #[arg(required = true)]
        containers: Vec<String>,
    },

    /// Remove a user from containers
    LeaveContainer {
        username: String,
        #[arg(required = true)]
        containers: Vec<String>,
    },

    /// Grant abilities to a role (role is created if missing)
    AddAbilities {
        role: String,
        #[arg(required = true)]
        abilities: Vec<String>,
    },

    /// Revoke abilities from a role
    RemoveAbilities {
        role: String,
        #[arg(required = true)]
        abilities: Vec<String>,
    },

    /// List roles with their abilities
    ListRoles,

    /// Check whether a user has an ability
    Check { username: String, ability: String },

    /// Replace a user's password
    SetPassword { username: String, password: String },

    /// Check a password against the stored hash
    VerifyPassword { username: String, password: String },
}

/// Route the parsed command to its handler
pub async fn execute_command(cli: Cli, app_data: &AppData) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::CreateUser {
            username,
            name,
            email,
            password,
            roles,
            containers,
        } => {
            let mut new_user = app_data.settings.new_user(username).roles(roles).containers(containers);
            if let Some(name) = name {
                new_user = new_user.name(name);
            }
            if let Some(email) = email {
                new_user = new_user.email(email);
            }
            if let Some(password) = password {
                new_user = new_user.password(password);
            }
            users::create_user(app_data, new_user).await?;
        }
        Commands::ShowUser { username } => users::show_user(app_data, &username).await?,
        Commands::GrantRole { username, roles } => users::grant_roles(app_data, &username, &roles).await?,
        Commands::RevokeRole { username, roles } => users::revoke_roles(app_data, &username, &roles).await?,
        Commands::JoinContainer { username, containers } => {
            users::join_containers(app_data, &username, &containers).await?
        }
        Commands::LeaveContainer { username, containers } => {
            users::leave_containers(app_data, &username, &containers).await?
        }
        Commands::AddAbilities { role, abilities } => roles::add_abilities(app_data, &role, &abilities).await?,
        Commands::RemoveAbilities { role, abilities } => {
            roles::remove_abilities(app_data, &role, &abilities).await?
        }
        Commands::ListRoles => roles::list_roles(app_data).await?,
        Commands::Check { username, ability } => users::check_ability(app_data, &username, &ability).await?,
        Commands::SetPassword { username, password } => users::set_password(app_data, &username, &password).await?,
        Commands::VerifyPassword { username, password } => {
            users::verify_password(app_data, &username, &password).await?
        }
    }

    Ok(())
}
