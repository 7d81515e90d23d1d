use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct StakeboardCli {
    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub api_port: u16,

    /// ether.fi subgraph endpoint
    #[arg(
        long,
        env = "ETHERFI_SUBGRAPH_URL",
        default_value = "https://api.thegraph.com/subgraphs/name/etherfi-protocol/etherfi-mainnet"
    )]
    pub etherfi_subgraph_url: Url,

    /// Lido subgraph endpoint
    #[arg(
        long,
        env = "LIDO_SUBGRAPH_URL",
        default_value = "https://api.thegraph.com/subgraphs/name/lidofinance/lido"
    )]
    pub lido_subgraph_url: Url,

    /// Seconds between two protocol statistics refreshes
    #[arg(
        long,
        env = "STATS_REFRESH_INTERVAL_SECS",
        default_value = "900",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub stats_refresh_interval_secs: u64,

    /// Timeout of a single subgraph request, in seconds
    #[arg(
        long,
        env = "SUBGRAPH_TIMEOUT_SECS",
        default_value = "15",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub subgraph_timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = StakeboardCli::try_parse_from([
            "stakeboard",
            "--database-url",
            "postgres://localhost/stakeboard",
        ])
        .unwrap();

        assert_eq!(cli.api_port, 8080);
        assert_eq!(cli.stats_refresh_interval_secs, 900);
        assert_eq!(cli.subgraph_timeout_secs, 15);
        assert_eq!(cli.lido_subgraph_url.host_str(), Some("api.thegraph.com"));
    }

    #[test]
    fn test_rejects_invalid_subgraph_url() {
        let result = StakeboardCli::try_parse_from([
            "stakeboard",
            "--database-url",
            "postgres://localhost/stakeboard",
            "--etherfi-subgraph-url",
            "not a url",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_durations() {
        for flag in ["--stats-refresh-interval-secs", "--subgraph-timeout-secs"] {
            let result = StakeboardCli::try_parse_from([
                "stakeboard",
                "--database-url",
                "postgres://localhost/stakeboard",
                flag,
                "0",
            ]);
            assert!(result.is_err(), "{flag} accepted 0");
        }

        let cli = StakeboardCli::try_parse_from([
            "stakeboard",
            "--database-url",
            "postgres://localhost/stakeboard",
            "--stats-refresh-interval-secs",
            "1",
            "--subgraph-timeout-secs",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.stats_refresh_interval_secs, 1);
        assert_eq!(cli.subgraph_timeout_secs, 1);
    }
}
