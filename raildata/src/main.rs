use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use raildata::catalog::{Catalogs, SearchQuery};
use raildata::config::PRODUCTION_BASE_URL;
use raildata::domain::{LineCode, StationCode};
use raildata::{Client, ClientConfig, RailDataError, RequestContext, TokenFile};

#[derive(Parser, Debug)]
#[command(name = "raildata")]
#[command(about = "Query NJ Transit's RailData API")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Token to start with
    #[arg(long, env = "RAILDATA_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// File holding the token; refreshed tokens are written back to it
    #[arg(
        long = "tokenfile",
        env = "RAILDATA_TOKEN_FILE",
        value_name = "PATH",
        global = true
    )]
    token_file: Option<PathBuf>,

    /// Username used to obtain new tokens (requires --password)
    #[arg(long, env = "RAILDATA_USERNAME", global = true)]
    username: Option<String>,

    /// Password used to obtain new tokens (requires --username)
    #[arg(long, env = "RAILDATA_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Use the test endpoint instead of production
    #[arg(
        long,
        env = "RAILDATA_TEST_ENDPOINT",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    use_test_endpoint: bool,

    /// Override the endpoint entirely
    #[arg(long, env = "RAILDATA_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "RAILDATA_TIMEOUT_SECS", value_name = "SECS", global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List all stations
    Stations,
    /// Station messages and alerts
    Messages {
        #[arg(long)]
        station: Option<String>,
        #[arg(long)]
        line: Option<String>,
    },
    /// Next departures from a station, with stops
    Schedule { station: String },
    /// Next departures from a station, optionally for one line
    Schedule19 {
        station: String,
        #[arg(long)]
        line: Option<String>,
    },
    /// Stops of one train
    Stops { train: String },
    /// Positions of active trains
    Vehicles,
    /// Check the token (10 calls per day)
    Validate,
    /// 27-hour schedule of a station (5 calls per day)
    StationSchedule {
        station: String,
        /// Include Amtrak trains
        #[arg(long)]
        all: bool,
    },
    /// Resolve a station name without calling the API
    FindStation { name: String },
    /// Resolve a line name without calling the API
    FindLine { name: String },
}

impl Args {
    fn client_config(&self) -> Result<ClientConfig, RailDataError> {
        let mut config = ClientConfig::new().with_test_endpoint(self.use_test_endpoint);

        if let Some(token) = &self.token {
            config = config.with_token(token.trim());
        }

        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                config = config.with_credentials(username, password);
            }
            (None, None) => {}
            _ => {
                return Err(RailDataError::Configuration(
                    "--username and --password must be given together".to_string(),
                ));
            }
        }

        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(secs);
        }

        if let Some(path) = &self.token_file {
            let file = TokenFile::new(path);
            match file.load() {
                Some(token) => {
                    info!(path = %file.path().display(), "using stored token");
                    config = config.with_token(token);
                }
                None => warn!(path = %file.path().display(), "no stored token"),
            }
            config = config.with_token_listener(file.listener());
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("raildata=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), RailDataError> {
    // Offline commands never need a client.
    match &args.command {
        Command::FindStation { name } => {
            let catalogs = Catalogs::builtin();
            println!(
                "{:#?}",
                catalogs.stations.resolve_detailed(SearchQuery::with_name(name))
            );
            return Ok(());
        }
        Command::FindLine { name } => {
            let catalogs = Catalogs::builtin();
            println!(
                "{:#?}",
                catalogs.lines.resolve_detailed(SearchQuery::with_name(name))
            );
            return Ok(());
        }
        _ => {}
    }

    let config = args.client_config()?;
    if config.base_url == PRODUCTION_BASE_URL {
        info!("using production endpoint");
    }
    let client = Client::new(config)?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });
    let ctx = RequestContext::new().with_cancellation(cancel);

    match args.command {
        Command::Stations => {
            for station in client.get_station_list(&ctx).await? {
                println!("{}\t{}", station.code, station.name);
            }
        }
        Command::Messages { station, line } => {
            let station = station.map(StationCode::new);
            let line = line.map(LineCode::new);
            let messages = client
                .get_station_msg(station.as_ref(), line.as_ref(), &ctx)
                .await?;
            println!("{messages:#?}");
        }
        Command::Schedule { station } => {
            let schedule = client
                .get_train_schedule(&StationCode::new(station), &ctx)
                .await?;
            println!("{schedule:#?}");
        }
        Command::Schedule19 { station, line } => {
            let line = line.map(LineCode::new);
            let schedule = client
                .get_train_schedule_19_records(&StationCode::new(station), line.as_ref(), &ctx)
                .await?;
            println!("{schedule:#?}");
        }
        Command::Stops { train } => match client.get_train_stop_list(&train, &ctx).await? {
            Some(stops) => println!("{stops:#?}"),
            None => println!("No such train: {train}"),
        },
        Command::Vehicles => {
            println!("{:#?}", client.get_vehicle_data(&ctx).await?);
        }
        Command::Validate => {
            println!("{:#?}", client.rate_limited().is_valid_token(&ctx).await?);
        }
        Command::StationSchedule { station, all } => {
            let schedules = client
                .rate_limited()
                .get_station_schedule(&StationCode::new(station), !all, &ctx)
                .await?;
            println!("{schedules:#?}");
        }
        Command::FindStation { .. } | Command::FindLine { .. } => {}
    }

    Ok(())
}
