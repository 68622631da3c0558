//! Command-line interface for inspecting LogFeeder configuration
//!
//! `describe` prints the documented property table, `show` resolves the
//! configuration the way the shipper would at startup and prints it.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::{docs, ConfigLoader, ConfigResult, SubConfigs};

/// LogFeeder configuration CLI tool
#[derive(Parser)]
#[command(name = "logfeeder-config")]
#[command(about = "Configuration utilities for LogFeeder")]
#[command(version)]
pub struct ConfigCli {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Available configuration commands
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print documentation of every supported property
    Describe {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DocFormat::Markdown)]
        format: DocFormat,
    },

    /// Resolve and print the configuration
    Show {
        /// Directory to search for logfeeder.properties (repeatable, in order)
        #[arg(short, long = "conf-dir")]
        conf_dirs: Vec<PathBuf>,

        /// System property override, e.g. -D cluster.name=cl1
        #[arg(short = 'D', value_name = "KEY=VALUE")]
        defines: Vec<String>,

        /// Print the raw properties snapshot instead of the typed settings
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocFormat {
    Json,
    Markdown,
}

/// CLI application runner
pub struct ConfigCliRunner;

impl ConfigCliRunner {
    /// Run the CLI application
    pub fn run(cli: ConfigCli) -> ConfigResult<()> {
        match cli.command {
            ConfigCommand::Describe { format } => Self::describe(format),
            ConfigCommand::Show {
                conf_dirs,
                defines,
                raw,
            } => Self::show(conf_dirs, defines, raw),
        }
    }

    fn describe(format: DocFormat) -> ConfigResult<()> {
        match format {
            DocFormat::Json => println!("{}", docs::to_json()?),
            DocFormat::Markdown => print!("{}", docs::to_markdown()),
        }
        Ok(())
    }

    fn show(conf_dirs: Vec<PathBuf>, defines: Vec<String>, raw: bool) -> ConfigResult<()> {
        let mut loader = ConfigLoader::new();
        if !conf_dirs.is_empty() {
            loader = loader.with_search_path(conf_dirs);
        }
        for define in &defines {
            loader = loader.with_system_property_arg(define)?;
        }

        let props = loader.load(SubConfigs::default())?;

        if raw {
            for (key, value) in props.raw_properties() {
                println!("{}={}", key, value);
            }
        } else {
            for (key, value) in props.resolved_settings() {
                println!("{} = {}", key, value);
            }
            if let Some(urls) = props.solr_urls() {
                println!("# solr urls: {}", urls.join(" "));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_arguments() {
        let cli = ConfigCli::try_parse_from([
            "logfeeder-config",
            "show",
            "--conf-dir",
            "/etc/logfeeder",
            "-D",
            "cluster.name=cl1",
            "-D",
            "logfeeder.cloud.storage.mode=cloud",
            "--raw",
        ])
        .unwrap();

        match cli.command {
            ConfigCommand::Show {
                conf_dirs,
                defines,
                raw,
            } => {
                assert_eq!(conf_dirs, vec![PathBuf::from("/etc/logfeeder")]);
                assert_eq!(defines.len(), 2);
                assert!(raw);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_describe_defaults_to_markdown() {
        let cli = ConfigCli::try_parse_from(["logfeeder-config", "describe"]).unwrap();
        assert!(matches!(
            cli.command,
            ConfigCommand::Describe {
                format: DocFormat::Markdown
            }
        ));
    }
}
