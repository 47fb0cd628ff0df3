//! Service configuration.

use clap::Parser;

/// User registry command line arguments.
#[derive(Debug, Parser)]
#[command(name = "user_registry")]
#[command(about = "In-memory user registry with live change subscriptions")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// Capacity of the request channel into the user actor.
    #[arg(long, default_value_t = 100)]
    pub channel_buffer: usize,

    /// Snapshots queued per subscriber before it is considered unresponsive
    /// and dropped.
    #[arg(long, default_value_t = 64)]
    pub subscriber_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub channel_buffer: usize,
    pub subscriber_capacity: usize,
}

impl From<&Args> for ServiceConfig {
    fn from(args: &Args) -> Self {
        Self {
            listen_addr: args.listen.clone(),
            channel_buffer: args.channel_buffer.max(1),
            subscriber_capacity: args.subscriber_capacity.max(1),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            channel_buffer: 100,
            subscriber_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults_match_config_default() {
        let args = Args::parse_from(["user_registry"]);
        let config = ServiceConfig::from(&args);
        let default = ServiceConfig::default();

        assert_eq!(config.listen_addr, default.listen_addr);
        assert_eq!(config.channel_buffer, default.channel_buffer);
        assert_eq!(config.subscriber_capacity, default.subscriber_capacity);
    }

    #[test]
    fn test_zero_sizes_are_clamped() {
        let args = Args::parse_from([
            "user_registry",
            "--listen",
            "127.0.0.1:9999",
            "--channel-buffer",
            "0",
            "--subscriber-capacity",
            "0",
        ]);
        let config = ServiceConfig::from(&args);

        assert_eq!(config.listen_addr, "127.0.0.1:9999");
        assert_eq!(config.channel_buffer, 1);
        assert_eq!(config.subscriber_capacity, 1);
    }
}
