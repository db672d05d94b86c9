// CLI module for the places binary
// Author: kelexine (https://github.com/kelexine)

use crate::places::InputType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// places - query the Google Places API from the command line
#[derive(Parser, Debug)]
#[command(name = "places", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Places API key (overrides the configuration file)
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Bypass the response cache even if it is configured
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Extra request parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param, global = true)]
    pub params: Vec<(String, String)>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a place from a name, address or phone number
    Find {
        input: String,
        #[arg(long, value_enum, default_value = "textquery")]
        input_type: InputKind,
    },
    /// Search for places around a location
    Nearby {
        /// Location as "lat,lng"
        #[arg(allow_hyphen_values = true)]
        location: String,
        /// Search radius in metres (omit with -p rankby=distance)
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Free text search
    Text { query: String },
    /// Details for a place ID
    Details { place_id: String },
    /// Place predictions for partial input
    Autocomplete { input: String },
    /// Query predictions for partial input
    QueryAutocomplete { input: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum InputKind {
    Textquery,
    Phonenumber,
}

impl From<InputKind> for InputType {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Textquery => InputType::TextQuery,
            InputKind::Phonenumber => InputType::PhoneNumber,
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("rankby=distance").unwrap(),
            ("rankby".to_string(), "distance".to_string())
        );
        assert_eq!(
            parse_param("fields=name,geometry=x").unwrap(),
            ("fields".to_string(), "name,geometry=x".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_nearby_args() {
        let args = Args::try_parse_from([
            "places", "nearby", "-33.86,151.19", "--radius", "500", "-p", "type=cafe",
        ])
        .unwrap();

        assert_eq!(args.params, vec![("type".to_string(), "cafe".to_string())]);
        match args.command {
            Command::Nearby { location, radius } => {
                assert_eq!(location, "-33.86,151.19");
                assert_eq!(radius, Some(500));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
