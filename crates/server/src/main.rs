use std::fmt;
use std::path::PathBuf;

use memcard_core::ResourceLayout;
use services::CatalogService;
use storage::repository::Storage;
use tracing::info;

mod site;

const DEFAULT_PORT: u16 = 54321;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPort { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p server -- serve [--site-root <dir>] [--resource-root <dir>] [--port <port>]"
    );
    eprintln!("  cargo run -p server -- init  [--site-root <dir>] [--resource-root <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --site-root .");
    eprintln!("  --resource-root <site-root>/MemCard-resource");
    eprintln!("  --port {DEFAULT_PORT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MEMCARD_SITE_ROOT, MEMCARD_RESOURCE_ROOT, MEMCARD_PORT");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Init,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "init" => Some(Self::Init),
            _ => None,
        }
    }
}

struct Args {
    site_root: PathBuf,
    resource_root: Option<PathBuf>,
    port: u16,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut site_root = std::env::var("MEMCARD_SITE_ROOT")
            .ok()
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut resource_root = std::env::var("MEMCARD_RESOURCE_ROOT").ok().map(PathBuf::from);
        let mut port = std::env::var("MEMCARD_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--site-root" => {
                    site_root = PathBuf::from(require_value(args, "--site-root")?);
                }
                "--resource-root" => {
                    resource_root = Some(PathBuf::from(require_value(args, "--resource-root")?));
                }
                "--port" => {
                    let value = require_value(args, "--port")?;
                    port = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            site_root,
            resource_root,
            port,
        })
    }

    fn layout(&self) -> ResourceLayout {
        match &self.resource_root {
            Some(root) => ResourceLayout::new(root.clone()),
            None => ResourceLayout::under_site_root(&self.site_root),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: serve when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let layout = parsed.layout();
    let storage = Storage::filesystem(&layout);

    // Rebuild the runtime resources before anything is served. A broken card
    // list should stop the server here, not surface as missing files later.
    let catalog_svc = CatalogService::new(storage.catalog.clone(), storage.runtime.clone());
    let catalog = catalog_svc.initialize().await?;
    info!(
        "Prepared {} cards from {}",
        catalog.len(),
        layout.card_list_file().display()
    );

    match cmd {
        Command::Init => Ok(()),
        Command::Serve => {
            site::serve(parsed.site_root, parsed.port).await?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
