use std::io::BufReader;

use clap::{Arg, Command};
use friends_server::{
    config::{parse_channel_buffer_size, FriendsCliConfig},
    error::CliError,
    managers::in_mem::DEFAULT_CHANNEL_BUFFER_SIZE,
    server::{start_server, FriendsConfig},
    state::{FriendsState, InMemoryStateType, PostgresStateType},
};
use log::{debug, error, info};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

fn welcome(config: &FriendsCliConfig) {
    let addr = config.address.clone().unwrap_or(DEFAULT_ADDR.to_string());
    let channel_buffer = config
        .channel_buffer_size
        .unwrap_or(DEFAULT_CHANNEL_BUFFER_SIZE);
    info!("*********Configuration*********");
    info!("Addr: {addr}");
    info!("Channel Buffer size: {channel_buffer}");
    if config.database_url.is_some() {
        info!("Relationship Store: Postgres");
    } else {
        info!("Relationship Store: In Memory");
    }
    if let Some(tls) = &config.tls {
        info!("Certificate: {}", tls.cert_path);
        info!("Key: {}", tls.key_path);
    } else {
        info!("Connection: Insecure")
    }
    info!("*******************************");
}

async fn cli() -> Result<(), CliError> {
    let matches = Command::new("friends_server")
        .arg(
            Arg::new("address")
                .short('a')
                .long("address")
                .required(false)
                .help("Address to run the friends server on")
                .default_value(DEFAULT_ADDR)
                .conflicts_with("config"),
        )
        .arg(
            Arg::new("database_url")
                .short('d')
                .long("database-url")
                .required(false)
                .help("Postgres connection string. Relationships are kept in memory if omitted")
                .conflicts_with("config"),
        )
        .arg(
            Arg::new("buffer_size")
                .short('b')
                .long("buffer-size")
                .required(false)
                .help("How many events a session can queue before new ones are dropped")
                .default_value(DEFAULT_CHANNEL_BUFFER_SIZE.to_string())
                .conflicts_with("config"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .required(false)
                .help("JSON Config path"),
        )
        .get_matches();

    let config = if let Some(config_path) = matches.get_one::<String>("config") {
        let file = std::fs::File::open(config_path)?;
        let reader = BufReader::new(file);
        FriendsCliConfig::load(reader)?
    } else {
        let addr = matches
            .get_one::<String>("address")
            .ok_or(CliError::ArgumentError("Expected Address".to_string()))?;
        let buffer_size = matches
            .get_one::<String>("buffer_size")
            .ok_or(CliError::ArgumentError("Expected buffer size".to_string()))
            .and_then(|value| parse_channel_buffer_size(value))?;

        FriendsCliConfig::new(
            Some(addr.to_string()),
            matches.get_one::<String>("database_url").cloned(),
            Some(buffer_size),
            None,
        )
    };

    welcome(&config);
    let tls_config = if let Some(tls_config) = config.tls {
        let _ = rustls::crypto::ring::default_provider().install_default();
        Some(tls_config.create().await?)
    } else {
        None
    };

    let addr = config
        .address
        .unwrap_or(DEFAULT_ADDR.to_string())
        .parse()
        .inspect_err(|e| debug!("{e}"))
        .map_err(|_| CliError::AddressParseError)?;
    let channel_buffer_size = config
        .channel_buffer_size
        .unwrap_or(DEFAULT_CHANNEL_BUFFER_SIZE);

    let started = if let Some(database_url) = config.database_url {
        let state =
            FriendsState::<PostgresStateType>::postgres(&database_url, channel_buffer_size).await?;
        start_server(
            FriendsConfig::builder()
                .state(state)
                .addr(addr)
                .maybe_tls_config(tls_config)
                .build(),
        )
        .await
    } else {
        let state = FriendsState::<InMemoryStateType>::in_memory(channel_buffer_size);
        start_server(
            FriendsConfig::builder()
                .state(state)
                .addr(addr)
                .maybe_tls_config(tls_config)
                .build(),
        )
        .await
    };

    started
        .inspect_err(|e| debug!("{e}"))
        .map_err(|_| CliError::FailedToStartServer)
}

#[tokio::main]
async fn main() {
    env_logger::init();
    match cli().await {
        Ok(_) => info!("Goodbye!"),
        Err(e) => error!("Fatal Server Error: {}", e),
    }
}
