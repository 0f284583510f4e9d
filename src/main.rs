//! CLI entry point for blog-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-rs")]
#[command(version)]
#[command(about = "A small file-backed personal blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List posts, newest first
    #[command(alias = "ls")]
    List,

    /// Show one post
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        #[arg(short, long)]
        title: String,

        /// Markdown body
        #[arg(long)]
        content: Option<String>,

        /// Read the markdown body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Cover emoji
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Rewrite an existing post (unset fields revert to defaults)
    Edit {
        /// Slug of the post
        slug: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New markdown body
        #[arg(long)]
        content: Option<String>,

        /// Read the new markdown body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Cover emoji
        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Delete a post permanently
    #[command(alias = "rm")]
    Delete {
        /// Slug of the post
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_rs=debug,info"
    } else {
        "blog_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog_rs::server::start(&blog, &ip, port).await?;
        }

        Commands::List => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::list::run(&blog)?;
        }

        Commands::Show { slug } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::show::run(&blog, &slug)?;
        }

        Commands::New {
            title,
            content,
            file,
            tags,
            emoji,
        } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blog_rs::commands::new::create_post(
                &blog,
                &title,
                content,
                file.as_deref(),
                tags,
                emoji,
            )?;
        }

        Commands::Edit {
            slug,
            title,
            content,
            file,
            tags,
            emoji,
        } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::edit::run(
                &blog,
                &slug,
                title,
                content,
                file.as_deref(),
                tags,
                emoji,
            )?;
        }

        Commands::Delete { slug } => {
            let blog = blog_rs::Blog::new(&base_dir)?;
            blog_rs::commands::delete::run(&blog, &slug)?;
        }

        Commands::Version => {
            println!("blog-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
