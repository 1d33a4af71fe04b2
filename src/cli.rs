//! Command-line interface definitions and parsing
//!
//! This module defines the CLI for the `gallerist` binary using the `clap` crate.
//! The binary hosts the gallery in a terminal; `--list` prints the projection
//! instead.
//!
//! # Examples
//!
//! ```
//! use gallerist::cli::Cli;
//!
//! let cli = Cli::parse_from_args(["gallerist", "--data", "media.json", "--item", "a.jpg"]);
//! assert_eq!(cli.location_token(), "item/a.jpg");
//! ```

use crate::collection::FilterMode;
use crate::location::LocationToken;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "gallerist")]
#[command(about = "Browse a media collection with filters and a deep-linkable viewer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file with the media collection (overrides config)
    #[arg(short = 'd', long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Preference file to use instead of the default location
    #[arg(long = "prefs", value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    /// Select a filter before showing the gallery (popular, new, discussed)
    #[arg(short = 'f', long = "filter", value_name = "MODE")]
    pub filter: Option<FilterMode>,

    /// Open the item with this url on startup
    #[arg(short = 'i', long = "item", value_name = "URL")]
    pub item: Option<String>,

    /// Print the filtered collection and exit
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list
    #[must_use]
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// Location token the gallery should start at
    #[must_use]
    pub fn location_token(&self) -> String {
        self.item
            .as_ref()
            .map_or(LocationToken::Base, LocationToken::item)
            .encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from_args(["gallerist"]);
        assert!(cli.data.is_none());
        assert!(cli.filter.is_none());
        assert!(!cli.list);
        assert_eq!(cli.location_token(), "");
    }

    #[test]
    fn test_filter_aliases() {
        let cli = Cli::parse_from_args(["gallerist", "--filter", "discussed"]);
        assert_eq!(cli.filter, Some(FilterMode::MostDiscussed));

        let cli = Cli::parse_from_args(["gallerist", "-f", "filter-new"]);
        assert_eq!(cli.filter, Some(FilterMode::MostRecent));
    }

    #[test]
    fn test_item_deep_link() {
        let cli = Cli::parse_from_args(["gallerist", "-l", "--item", "photos/a.jpg"]);
        assert!(cli.list);
        assert_eq!(cli.location_token(), "item/photos/a.jpg");
    }

    #[test]
    fn test_item_with_spaces_is_encoded() {
        let cli = Cli::parse_from_args(["gallerist", "--item", "my photo.jpg"]);
        assert_eq!(cli.location_token(), "item/my%20photo.jpg");
    }
}
