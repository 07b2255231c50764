//! Administrative command line for blog-service.
//!
//! Groups and users are managed here rather than over the API. Uses the same
//! `DATABASE_URL` / `DB_*` settings as the service.

use anyhow::Context;
use blog_service::db::MIGRATOR;
use blog_service::serializers::group::{GroupUpdate, NewGroup};
use blog_service::services::{FollowService, GroupService, UserService};
use clap::{Parser, Subcommand};
use db_pool::{create_pool, DbConfig};
use tracing_subscriber::EnvFilter;

/// blog-admin - manage groups, users and subscriptions
#[derive(Parser, Debug)]
#[command(name = "blog-admin")]
#[command(about = "Administrative tasks for blog-service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Community group management
    #[command(subcommand)]
    Group(GroupCommands),

    /// List everyone subscribed to a user
    Followers {
        /// Username of the followed author
        username: String,
    },

    /// Remove a subscription
    Unfollow {
        /// Username of the follower
        user: String,
        /// Username of the followed author
        following: String,
    },

    /// Delete a user with all of their posts, comments and subscriptions
    DeleteUser { username: String },
}

#[derive(Subcommand, Debug)]
enum GroupCommands {
    /// Create a group
    Create {
        #[arg(long)]
        title: String,
        /// Letters, digits, underscores and hyphens
        #[arg(long)]
        slug: String,
        #[arg(long)]
        description: String,
    },

    /// Update fields of the group with the given slug
    Update {
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "new-slug")]
        new_slug: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a group; its posts are kept without a group
    Delete { slug: String },

    /// List all groups
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,blog_service=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut db_cfg = DbConfig::from_env("blog-admin")
        .map_err(anyhow::Error::msg)
        .context("Failed to load database configuration")?;
    db_cfg.max_connections = 2;
    db_cfg.min_connections = 1;
    let pool = create_pool(db_cfg)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            MIGRATOR
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            println!("Migrations applied");
        }
        Commands::Group(command) => run_group_command(GroupService::new(pool.clone()), command).await?,
        Commands::Followers { username } => {
            let followers = FollowService::new(pool.clone())
                .list_followers(&username)
                .await?;
            if followers.is_empty() {
                println!("{} has no followers", username);
            }
            for follow in followers {
                println!("{}", follow.user_username);
            }
        }
        Commands::Unfollow { user, following } => {
            FollowService::new(pool.clone())
                .unfollow(&user, &following)
                .await?;
            println!("{} no longer follows {}", user, following);
        }
        Commands::DeleteUser { username } => {
            let user = UserService::new(pool.clone()).delete_user(&username).await?;
            println!("Deleted user {} ({})", user.username, user.id);
        }
    }

    pool.close().await;
    Ok(())
}

async fn run_group_command(service: GroupService, command: GroupCommands) -> anyhow::Result<()> {
    match command {
        GroupCommands::Create {
            title,
            slug,
            description,
        } => {
            let group = service
                .create_group(NewGroup {
                    title,
                    slug,
                    description,
                })
                .await?;
            println!("Created group #{} ({})", group.id, group.slug);
        }
        GroupCommands::Update {
            slug,
            title,
            new_slug,
            description,
        } => {
            let group = service
                .update_group(
                    &slug,
                    GroupUpdate {
                        title,
                        slug: new_slug,
                        description,
                    },
                )
                .await?;
            println!("Updated group #{} ({})", group.id, group.slug);
        }
        GroupCommands::Delete { slug } => {
            let group = service.delete_group(&slug).await?;
            println!("Deleted group #{} ({})", group.id, group.slug);
        }
        GroupCommands::List => {
            for group in service.list_groups().await? {
                println!("{:>5}  {:<50}  {}", group.id, group.slug, group.title);
            }
        }
    }
    Ok(())
}
