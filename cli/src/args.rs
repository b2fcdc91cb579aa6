use std::time::Duration;

use clap::{Parser, Subcommand};

use control::{parse_http_base_url, ClientConfig};

pub const DEFAULT_URL: &str = "http://localhost:8089";

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long = "url", value_name = "url", default_value = DEFAULT_URL, value_parser = is_url_valid, env = "LOCUST_URL")]
    pub base_url: String,
    #[arg(short = 't', long = "timeout-ms", value_parser = clap::value_parser!(u64).range(1..), env = "LOCUST_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Command {
    /// Start the swarm, or change the number of users of a running one
    Start {
        #[arg(short = 'u', long = "users", default_value_t = 10)]
        users: u64,
        /// Users started per second
        #[arg(short = 'r', long = "spawn-rate", default_value_t = 1.0)]
        spawn_rate: f64,
    },
    /// Stop the running test
    Stop,
    /// Print the current statistics
    Stats,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default();
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

fn is_url_valid(s: &str) -> Result<String, String> {
    parse_http_base_url(s)
        .map(|_| s.to_string())
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::{Args, Command, DEFAULT_URL};

    #[test]
    fn test_defaults() {
        std::env::remove_var("LOCUST_URL");
        std::env::remove_var("LOCUST_TIMEOUT_MS");
        let args = Args::try_parse_from(["locustctl", "stats"]).expect("valid arguments");
        assert_eq!(args.base_url, DEFAULT_URL);
        assert_eq!(args.command, Command::Stats);
        assert_eq!(args.client_config().timeout, None);
    }

    #[test]
    fn test_start_arguments() {
        let args = Args::try_parse_from([
            "locustctl",
            "--url",
            "http://10.0.0.1:8089/locust",
            "-t",
            "1500",
            "start",
            "-u",
            "50",
            "-r",
            "2.5",
        ])
        .expect("valid arguments");
        assert_eq!(args.base_url, "http://10.0.0.1:8089/locust");
        assert_eq!(args.client_config().timeout, Some(Duration::from_millis(1500)));
        assert_eq!(
            args.command,
            Command::Start {
                users: 50,
                spawn_rate: 2.5
            }
        );
    }
}
