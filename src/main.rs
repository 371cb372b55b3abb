use anyhow::Result;
use clap::Parser;
use gitget::application::{InstallOptions, RemoveOptions};
use gitget::commands::{self, Config};
use std::path::PathBuf;

/// gitget - a local package manager for git repositories
///
/// Clone repositories, keep track of where they live, and update them all
/// at once. The package list is a YAML file, ~/.gitget.yaml by default.
///
/// Examples:
///   gitget setup                        # Create an empty package list
///   gitget install owner/repo           # Clone from the default host
///   gitget install ~/src/tools --local  # Track an existing checkout
///   gitget update                       # Pull every package
#[derive(Parser, Debug)]
#[command(author, version = env!("GITGET_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show diagnostic log output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Package list file (defaults to ~/.gitget.yaml; also via GITGET_REGISTRY)
    #[arg(long, env = "GITGET_REGISTRY", value_name = "PATH", global = true)]
    pub registry: Option<PathBuf>,

    /// Host used for owner/repo shorthands (defaults to https://github.com)
    #[arg(long, env = "GITGET_HOST", value_name = "URL", global = true)]
    pub host: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Clone a repository and add it to the package list
    Install(InstallArgs),

    /// Remove a package and delete its working copy
    Remove(RemoveArgs),

    /// Pull every package in the list
    Update,

    /// Move a package's working copy into another directory
    Move(MoveArgs),

    /// List all packages
    List,

    /// Check that every package still exists on disk
    Doctor,

    /// Open the package list in your editor
    Edit,

    /// Create an empty package list
    Setup,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// A URL, "owner/repo", or with --local a directory
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Package name to use instead of the derived one
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Track an existing local directory instead of cloning
    #[arg(long)]
    pub local: bool,

    /// Directory to clone into
    #[arg(long, value_name = "PATH", conflicts_with = "local")]
    pub dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Package name
    pub name: String,

    /// Only remove the package from the list, keep the files
    #[arg(long)]
    pub soft: bool,

    /// Do not ask for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct MoveArgs {
    /// Package name
    pub name: String,

    /// Existing directory to move the working copy into
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let runtime = gitget::runtime::RealRuntime;
    let config = Config::new(&runtime, cli.registry, cli.host)?;

    match cli.command {
        Commands::Install(args) => {
            let options = InstallOptions {
                name: args.name,
                target_dir: args.dir,
            };
            commands::install(runtime, &args.source, args.local, options, config).await?
        }
        Commands::Remove(args) => {
            let options = RemoveOptions {
                soft: args.soft,
                yes: args.yes,
            };
            commands::remove(runtime, &args.name, options, config)?
        }
        Commands::Update => commands::update(runtime, config)?,
        Commands::Move(args) => commands::relocate(runtime, &args.name, &args.destination, config)?,
        Commands::List => commands::list(runtime, config)?,
        Commands::Doctor => commands::doctor(runtime, config)?,
        Commands::Edit => commands::edit(runtime, config)?,
        Commands::Setup => commands::setup(runtime, config)?,
    }
    Ok(())
}
