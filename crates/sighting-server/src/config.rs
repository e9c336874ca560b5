//! Server configuration (command line flags with environment fallbacks)

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_FILE: &str = "sightings.sqlite3";

#[derive(Debug, Clone, Parser)]
#[command(name = "sighting-server")]
#[command(version, about = "Records geolocated sightings and serves them back over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Directory holding the database file
    #[arg(long, env = "DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Database file (defaults to sightings.sqlite3 inside the data directory)
    #[arg(long, env = "DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    pub bind_address: SocketAddr,

    /// Directory with index.html and page assets served at /
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Keep sightings in memory only
    #[arg(long, env = "SIGHTINGS_EPHEMERAL")]
    pub ephemeral: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_DATABASE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["sighting-server"]).unwrap();
        assert_eq!(config.bind_address.port(), 8000);
        assert!(!config.ephemeral);
        assert_eq!(
            config.database_path(),
            PathBuf::from(".").join("sightings.sqlite3")
        );
    }

    #[test]
    fn test_data_dir_and_explicit_path() {
        let config =
            ServerConfig::try_parse_from(["sighting-server", "--data-dir", "/var/data"]).unwrap();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/data/sightings.sqlite3")
        );

        let config = ServerConfig::try_parse_from([
            "sighting-server",
            "--data-dir",
            "/var/data",
            "--database-path",
            "/tmp/other.db",
        ])
        .unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/other.db"));
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        assert!(
            ServerConfig::try_parse_from(["sighting-server", "--bind-address", "nope"]).is_err()
        );
    }
}
