use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use fetchwrap_lib::users::{self, NewUser, UserPatch};
use fetchwrap_lib::ApiClient;

use crate::output::{print_user, print_users, OutputFormat};

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all users
    List,
    /// Fetch one user by ID
    Get {
        id: i64,
    },
    /// Create a user
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
    },
    /// Replace a user (PUT)
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change some fields of a user (PATCH)
    Patch {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user
    Delete {
        id: i64,
    },
    /// Upload an avatar image for a user
    Avatar {
        id: i64,
        /// Image file to upload
        file: PathBuf,
    },
}

pub async fn run(args: &UsersArgs, client: &ApiClient, format: &OutputFormat) -> Result<()> {
    match &args.command {
        UsersCommand::List => {
            let list = users::list_users(client).await?;
            eprintln!("{} users", list.len());
            print_users(&list, format);
        }
        UsersCommand::Get { id } => {
            let user = users::get_user(client, *id).await?;
            print_user(&user, format);
        }
        UsersCommand::Create { name, email } => {
            let new_user = NewUser {
                name: name.clone(),
                email: email.clone(),
            };
            let user = users::create_user(client, &new_user).await?;
            print_user(&user, format);
        }
        UsersCommand::Update { id, name, email } => {
            let replacement = NewUser {
                name: name.clone(),
                email: email.clone(),
            };
            let user = users::update_user(client, *id, &replacement).await?;
            print_user(&user, format);
        }
        UsersCommand::Patch { id, name, email } => {
            let patch = UserPatch {
                name: name.clone(),
                email: email.clone(),
            };
            if patch.is_empty() {
                bail!("nothing to change: pass --name and/or --email");
            }
            let user = users::patch_user(client, *id, &patch).await?;
            print_user(&user, format);
        }
        UsersCommand::Delete { id } => {
            users::delete_user(client, *id).await?;
            eprintln!("Deleted user {}", id);
        }
        UsersCommand::Avatar { id, file } => {
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "avatar".to_string());
            let user = users::upload_avatar(client, *id, &file_name, bytes).await?;
            print_user(&user, format);
        }
    }

    Ok(())
}
