use std::fmt;
use std::net::{IpAddr, SocketAddr};

use api::AppState;
use course_core::Clock;
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBind { raw: String },
    InvalidPort { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
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
    eprintln!("  cargo run -p app -- serve [--bind <addr>] [--port <port>] [--empty]");
    eprintln!();
    eprintln!("Defaults for serve:");
    eprintln!("  --bind {DEFAULT_BIND}");
    eprintln!("  --port {DEFAULT_PORT}");
    eprintln!("  the built-in course catalog is loaded unless --empty is given");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSES_BIND, COURSES_PORT, COURSES_EMPTY=1, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    addr: SocketAddr,
    seed: bool,
}

impl Args {
    fn parse_serve(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bind = match std::env::var("COURSES_BIND") {
            Ok(raw) => parse_bind(raw)?,
            Err(_) => parse_bind(DEFAULT_BIND.to_owned())?,
        };
        let mut port = match std::env::var("COURSES_PORT") {
            Ok(raw) => parse_port(raw)?,
            Err(_) => DEFAULT_PORT,
        };
        let mut seed = !std::env::var("COURSES_EMPTY").is_ok_and(|v| v == "1" || v == "true");

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bind" => bind = parse_bind(require_value(args, "--bind")?)?,
                "--port" => port = parse_port(require_value(args, "--port")?)?,
                "--empty" => seed = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            addr: SocketAddr::new(bind, port),
            seed,
        })
    }
}

fn parse_bind(raw: String) -> Result<IpAddr, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidBind { raw })
}

fn parse_port(raw: String) -> Result<u16, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidPort { raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: serving when no subcommand is provided.
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
    let parsed = match cmd {
        Command::Serve => Args::parse_serve(&mut iter),
    }
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let storage = if parsed.seed {
        Storage::seeded()
    } else {
        Storage::in_memory()
    };
    let state = AppState::new(&storage, Clock::default_clock());

    let listener = tokio::net::TcpListener::bind(parsed.addr).await?;
    let api_url = format!("http://{}/api/courses", parsed.addr);
    info!(
        %api_url,
        seeded = parsed.seed,
        "course tracker starting"
    );
    api::serve(listener, state).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
