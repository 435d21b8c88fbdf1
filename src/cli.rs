use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nba-odds-sync")]
#[command(version)]
#[command(about = "Sync NBA game and player-prop odds into a local JSON file", long_about = None)]
pub struct Cli {
    /// Config directory (default.toml plus an optional per-environment file)
    #[arg(short, long, default_value = "config")]
    pub config: PathBuf,

    /// Output file, overrides output.path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_arguments() {
        let cli = Cli::try_parse_from(["nba-odds-sync"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "nba-odds-sync",
            "--config",
            "/etc/nba-odds-sync",
            "-o",
            "public/nba_data.json",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/nba-odds-sync"));
        assert_eq!(cli.output, Some(PathBuf::from("public/nba_data.json")));
    }
}
