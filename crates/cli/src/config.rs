//! CLI configuration and dispatch.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ringcore::{HashAlgorithm, RingConfig};

use crate::commands::Command;

/// Top-level CLI: ring options apply to every subcommand.
#[derive(Debug, Parser)]
#[command(name = "ringctl", about = "Inspect and exercise a consistent-hash ring", version)]
pub struct CliConfig {
    /// Number of positions on the ring.
    #[arg(long, global = true, default_value_t = 256)]
    pub ring_size: u64,

    /// Virtual nodes per server per replica slot.
    #[arg(long, global = true, default_value_t = 3)]
    pub vnodes: u32,

    /// Replica slots per key.
    #[arg(long, global = true, default_value_t = 1)]
    pub replicas: u32,

    /// Position hash algorithm (md5, xxh3, sip13).
    #[arg(long, global = true, default_value = "md5")]
    pub algorithm: String,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Run the selected command and print its result.
    pub fn run(self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();

        let ring_config = self.ring_config()?;
        let result = self.command.execute(ring_config)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{result}");
        }
        Ok(())
    }

    fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let algorithm: HashAlgorithm = self.algorithm.parse()?;
        Ok(RingConfig {
            ring_size: self.ring_size,
            vnodes: self.vnodes,
            replicas: self.replicas,
            algorithm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_demo_command() {
        let config = CliConfig::try_parse_from(["ringctl", "demo"]).unwrap();
        assert_eq!(config.ring_size, 256);
        assert_eq!(config.vnodes, 3);
        assert!(matches!(config.command, Command::Demo));
    }

    #[test]
    fn test_unknown_algorithm_rejected_at_build() {
        let config =
            CliConfig::try_parse_from(["ringctl", "--algorithm", "sha256", "demo"]).unwrap();
        assert!(config.ring_config().is_err());
    }

    #[test]
    fn test_lookup_args() {
        let config = CliConfig::try_parse_from([
            "ringctl",
            "lookup",
            "--servers",
            "a,b,c",
            "key1",
            "key2",
        ])
        .unwrap();
        match config.command {
            Command::Lookup { servers, keys, slot } => {
                assert_eq!(servers, vec!["a", "b", "c"]);
                assert_eq!(keys, vec!["key1", "key2"]);
                assert_eq!(slot, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
