#![deny(missing_docs)]

//! # prisma-patch
//!
//! Inserts field declarations into a Prisma schema and writes the result to a
//! new file. Diagnostics go to stderr; stdout carries one confirmation line.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod error;
mod inject;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Insert fields into a Prisma schema")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(flatten)]
    inject: inject::InjectArgs,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("prisma_patch_core=info,prisma_patch=info"),
        2 => EnvFilter::new("prisma_patch_core=debug,prisma_patch=debug"),
        _ => EnvFilter::new("prisma_patch_core=trace,prisma_patch=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match inject::execute(&cli.inject) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "prisma-patch",
            "-vv",
            "--source",
            "backup/schema.prisma",
            "--strategy",
            "pattern",
            "--line-ending",
            "crlf",
            "--field",
            "locale:String:@default(\"en\")",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.inject.source,
            Some(std::path::PathBuf::from("backup/schema.prisma"))
        );
        assert_eq!(
            cli.inject.strategy,
            Some(prisma_patch_core::StrategyKind::Pattern)
        );
        assert_eq!(cli.inject.fields.len(), 1);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        let res = Cli::try_parse_from(["prisma-patch", "--model", "User", "--any-model"]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["prisma-patch", "--encoding", "latin-1"]);
        assert!(res.is_err());
    }
}
