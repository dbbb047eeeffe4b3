use std::{sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use log::{debug, info};
use reqwest::Method;

use github_pager::{
    ClientConfig, GITHUB_API_ENDPOINT, Paginator, PreflightLister, Repository, RestExecutor,
    StdResult,
};

/// Command line arguments for the GitHub pager
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// GitHub username
    #[arg(short, long, env = "GITHUB_USER")]
    user: String,

    /// GitHub access token or password
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_ENDPOINT)]
    api_url: String,

    /// Maximum number of seconds to wait on 202 Accepted responses
    #[arg(long, default_value_t = 30)]
    max_wait: u64,

    /// Log URLs as they're requested
    #[arg(long)]
    debug_url: bool,

    /// Log the body of responses
    #[arg(long)]
    debug_body: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Request a single endpoint and print the decoded JSON
    Get {
        /// Relative or absolute URL
        url: String,
    },

    /// Fetch the pages of an index endpoint and print them as one JSON array
    Paginate {
        /// Relative or absolute URL of the index endpoint
        url: String,

        /// Number of pages to fetch concurrently, 0 to fetch serially until an empty page
        #[arg(short, long, default_value_t = 0)]
        pages: u32,

        /// Number of items per page
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// List every repository of a user or organization (e.g. users/octocat)
    Repos {
        /// The resource owning the repositories
        resource: String,
    },
}

#[tokio::main]
async fn main() -> StdResult<()> {
    env_logger::init();
    let args = Args::parse();
    debug!("Command: {:?}", args.command);

    let executor = Arc::new(RestExecutor::try_new(build_config(&args))?);
    match args.command {
        Command::Get { url } => {
            let mut value = serde_json::Value::Null;
            let meta = executor.execute(&mut value, Method::GET, &url).await?;
            info!("{meta}");
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Paginate {
            url,
            pages,
            per_page,
        } => {
            let paginator = match per_page {
                Some(per_page) => Paginator::new(executor).with_per_page(per_page),
                None => Paginator::new(executor),
            };
            let mut items: Vec<serde_json::Value> = Vec::new();
            let result = paginator.paginate(&mut items, Method::GET, &url, pages).await;
            println!("{}", serde_json::to_string_pretty(&items)?);
            result?;
        }
        Command::Repos { resource } => {
            let listing = PreflightLister::new(executor)
                .list_all::<Repository>(&resource)
                .await;
            let (repositories, error) = listing.into_parts();
            for repository in &repositories {
                println!("{}", repository.full_name);
            }
            info!("Listed {} repositories", repositories.len());
            if let Some(error) = error {
                return Err(error.into());
            }
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> ClientConfig {
    ClientConfig::new(&args.user, &args.token)
        .with_api_base(&args.api_url)
        .with_max_wait(Duration::from_secs(args.max_wait))
        .with_debug_url(args.debug_url)
        .with_debug_body(args.debug_body)
}
