// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cozy-room")]
#[command(about = "Interactive cozy room scene", long_about = None)]
pub struct Cli {
    /// Disable the debug panel and on-screen controls
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// JSON scene configuration; missing fields keep their defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model file to load instead of the configured one
    #[arg(long, value_name = "PATH", env = "COZY_ROOM_MODEL")]
    pub model: Option<PathBuf>,

    /// Start in night mode
    #[arg(long, conflicts_with = "day")]
    pub night: bool,

    /// Start in day mode
    #[arg(long)]
    pub day: bool,

    /// Render directly without the post-processing chain
    #[arg(long = "no-post")]
    pub no_post: bool,
}

impl Cli {
    /// Theme forced from the command line, if any
    pub fn theme_override(&self) -> Option<bool> {
        match (self.night, self.day) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cozy-room"]).unwrap();
        assert!(!cli.no_ui);
        assert!(!cli.no_post);
        assert_eq!(cli.theme_override(), None);
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["cozy-room", "--no-ui", "--night", "--config", "room.json"])
                .unwrap();
        assert!(cli.no_ui);
        assert_eq!(cli.theme_override(), Some(true));
        assert_eq!(cli.config, Some(PathBuf::from("room.json")));
    }

    #[test]
    fn test_night_and_day_conflict() {
        assert!(Cli::try_parse_from(["cozy-room", "--night", "--day"]).is_err());
    }
}
