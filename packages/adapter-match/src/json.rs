//! JSON (de)serialization helpers. Trimmed to the in-memory string/bytes operations this crate
//! needs: configuration, statistics, and match reports flow through library calls, not files, so
//! there is no file-writing counterpart here.

use eyre::{Report, WrapErr};
use serde::{Deserialize, Serialize};

pub fn json_parse<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Report> {
  serde_json::from_str(s).wrap_err("When parsing JSON")
}

pub fn json_parse_bytes<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, Report> {
  serde_json::from_slice(bytes).wrap_err("When parsing JSON")
}

pub fn json_stringify<T: Serialize>(obj: &T) -> Result<String, Report> {
  serde_json::to_string_pretty(obj).wrap_err("When converting to a JSON string")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SingleAdapterConfig;
  use pretty_assertions::assert_eq;

  #[test]
  fn config_round_trips_through_json() {
    let config = SingleAdapterConfig { max_error_rate: 0.2, min_overlap: 5, ..SingleAdapterConfig::default() };
    let json = json_stringify(&config).unwrap();
    let parsed: SingleAdapterConfig = json_parse(&json).unwrap();
    assert_eq!(config, parsed);
  }

  #[test]
  fn malformed_json_reports_an_error() {
    let result: Result<SingleAdapterConfig, Report> = json_parse("{ not json");
    assert!(result.is_err());
  }
}
