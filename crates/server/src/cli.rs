use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "exercise tracker server")]
pub struct Cli {
    #[clap(long, env, default_value = "exercise-tracker.db")]
    pub sqlite_connection_string: String,
    /// Maximum number of pooled sqlite connections
    #[clap(long, env, default_value = "16")]
    pub database_pool_size: usize,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "exercise-tracker",
            "--sqlite-connection-string",
            "other.db",
            "--port",
            "3000",
            "--database-pool-size",
            "4",
        ]);
        assert_eq!(cli.sqlite_connection_string, "other.db");
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.database_pool_size, 4);
    }
}
