use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "suburb-scout", about = "Scrape multiple Perth suburbs into one CSV")]
pub struct Args {
    /// List of suburbs to scrape
    #[arg(long, num_args = 1.., required = true)]
    pub suburbs: Vec<String>,

    /// Number of pages per suburb
    #[arg(long, default_value_t = 3)]
    pub pages: u32,

    /// Output CSV filename
    #[arg(long, default_value = "all_perth.csv")]
    pub output: PathBuf,
}

/// Which page fetcher to run with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    Chrome,
    Http,
}

impl FromStr for FetcherKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "http" => Ok(Self::Http),
            other => bail!("unknown fetcher '{}', expected 'chrome' or 'http'", other),
        }
    }
}

/// Settings read from the environment (or a `.env` file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fetcher: FetcherKind,
    pub headless: bool,
    pub render_wait: Duration,
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetcher: FetcherKind::Chrome,
            headless: false,
            render_wait: Duration::from_secs(5),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            fetcher: parse_var(&lookup, "SCOUT_FETCHER")?.unwrap_or(defaults.fetcher),
            headless: parse_var(&lookup, "SCOUT_HEADLESS")?.unwrap_or(defaults.headless),
            render_wait: parse_var(&lookup, "SCOUT_RENDER_WAIT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.render_wait),
            http_timeout: parse_var(&lookup, "SCOUT_HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid value '{}' for {}", raw, key)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(settings(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("SCOUT_FETCHER", "HTTP"),
            ("SCOUT_HEADLESS", "true"),
            ("SCOUT_RENDER_WAIT_SECS", "8"),
        ])
        .unwrap();

        assert_eq!(s.fetcher, FetcherKind::Http);
        assert!(s.headless);
        assert_eq!(s.render_wait, Duration::from_secs(8));
        assert_eq!(s.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_bad_values() {
        let err = settings(&[("SCOUT_RENDER_WAIT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SCOUT_RENDER_WAIT_SECS"));
        assert!(settings(&[("SCOUT_FETCHER", "firefox")]).is_err());
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from(["suburb-scout", "--suburbs", "Morley", "Mount Lawley"]).unwrap();
        assert_eq!(args.suburbs, vec!["Morley", "Mount Lawley"]);
        assert_eq!(args.pages, 3);
        assert_eq!(args.output, PathBuf::from("all_perth.csv"));

        let args = Args::try_parse_from([
            "suburb-scout", "--suburbs", "Perth", "--pages", "1", "--output", "out.csv",
        ])
        .unwrap();
        assert_eq!(args.pages, 1);
        assert_eq!(args.output, PathBuf::from("out.csv"));

        assert!(Args::try_parse_from(["suburb-scout"]).is_err());
    }
}
