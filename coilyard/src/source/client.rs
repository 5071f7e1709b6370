//! Arrival feed trait and its HTTP implementation.
//!
//! [`CoilFeed`] abstracts the backend that announces new coils so the
//! source and the poll loop can be driven by a mock in tests.
//! [`HttpCoilFeed`] issues `GET <api_url>/checkForNewCoil` via `reqwest`.

use std::future::Future;

use serde::Deserialize;

use super::config::SourceConfig;
use super::error::SourceError;
use crate::layout::SlotCoord;
use crate::registry::CoilId;

/// A server-announced coil waiting for the operator's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCoil {
    /// Slot chosen by the server; `None` means "next free slot".
    pub slot: Option<SlotCoord>,
    /// Server-assigned id, stored as-is on commit.
    pub id: Option<CoilId>,
}

/// Body of the arrival check endpoint.
///
/// Only `newCoil` is required; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub new_coil: bool,
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub column: Option<i64>,
    #[serde(default)]
    pub layer: Option<i64>,
    #[serde(default)]
    pub id: Option<FeedId>,
}

/// The feed sends ids either as numbers or as strings.
///
/// JSON producers that only have doubles send whole ids as `17.0`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeedId {
    Number(i64),
    Float(f64),
    Text(String),
}

impl CheckResponse {
    /// Interprets the response. `Ok(None)` when no coil is waiting.
    ///
    /// Coordinates must be all present or all absent, and each must be a
    /// positive integer. An id must be a positive integer, a whole-valued
    /// float, or a string holding a positive integer.
    pub fn into_pending(self) -> Result<Option<PendingCoil>, SourceError> {
        if !self.new_coil {
            return Ok(None);
        }

        let slot = match (self.row, self.column, self.layer) {
            (None, None, None) => None,
            (Some(row), Some(column), Some(layer)) => Some(SlotCoord {
                row: positive("row", row)?,
                column: positive("column", column)?,
                layer: positive("layer", layer)?,
            }),
            _ => {
                return Err(SourceError::Malformed(
                    "row, column and layer must be given together".to_string(),
                ))
            }
        };

        let id = match self.id {
            None => None,
            Some(FeedId::Number(n)) => Some(positive("id", n)?),
            Some(FeedId::Float(f)) => Some(positive("id", whole("id", f)?)?),
            Some(FeedId::Text(text)) => {
                let n: i64 = text.trim().parse().map_err(|_| {
                    SourceError::Malformed(format!("id '{}' is not a number", text))
                })?;
                Some(positive("id", n)?)
            }
        };

        Ok(Some(PendingCoil { slot, id }))
    }
}

fn positive(field: &str, value: i64) -> Result<u32, SourceError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| {
            SourceError::Malformed(format!(
                "{} must be a positive integer, got {}",
                field, value
            ))
        })
}

fn whole(field: &str, value: f64) -> Result<i64, SourceError> {
    // Anything past 2^53 is already beyond a u32 id.
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= 9_007_199_254_740_992.0 {
        Ok(value as i64)
    } else {
        Err(SourceError::Malformed(format!(
            "{} must be a positive integer, got {}",
            field, value
        )))
    }
}

/// Backend that announces coil arrivals.
pub trait CoilFeed: Send + Sync {
    /// Ask the backend whether a new coil is waiting.
    fn check_for_new_coil(
        &self,
    ) -> impl Future<Output = Result<CheckResponse, SourceError>> + Send;
}

/// [`CoilFeed`] over HTTP.
///
/// Holds a reusable `reqwest::Client` with the configured timeout.
pub struct HttpCoilFeed {
    http: reqwest::Client,
    url: String,
}

impl HttpCoilFeed {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            http,
            url: config.check_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CoilFeed for HttpCoilFeed {
    async fn check_for_new_coil(&self) -> Result<CheckResponse, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| SourceError::Json(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Option<PendingCoil>, SourceError> {
        let response: CheckResponse = serde_json::from_str(json).unwrap();
        response.into_pending()
    }

    #[test]
    fn test_no_new_coil() {
        assert_eq!(parse(r#"{"newCoil": false}"#).unwrap(), None);
        // Coordinates are ignored when the flag is false.
        assert_eq!(parse(r#"{"newCoil": false, "row": 0}"#).unwrap(), None);
    }

    #[test]
    fn test_new_coil_with_slot() {
        let pending = parse(r#"{"newCoil": true, "row": 1, "column": 2, "layer": 3}"#)
            .unwrap()
            .unwrap();
        assert_eq!(pending.slot, Some(SlotCoord { row: 1, column: 2, layer: 3 }));
        assert_eq!(pending.id, None);
    }

    #[test]
    fn test_new_coil_without_slot() {
        let pending = parse(r#"{"newCoil": true}"#).unwrap().unwrap();
        assert_eq!(pending, PendingCoil { slot: None, id: None });
    }

    #[test]
    fn test_id_as_number_or_string() {
        let pending = parse(r#"{"newCoil": true, "id": 17}"#).unwrap().unwrap();
        assert_eq!(pending.id, Some(17));

        let pending = parse(r#"{"newCoil": true, "id": " 23 "}"#).unwrap().unwrap();
        assert_eq!(pending.id, Some(23));

        let pending = parse(r#"{"newCoil": true, "id": null}"#).unwrap().unwrap();
        assert_eq!(pending.id, None);
    }

    #[test]
    fn test_whole_float_id_accepted() {
        let pending = parse(r#"{"newCoil": true, "id": 17.0}"#).unwrap().unwrap();
        assert_eq!(pending.id, Some(17));
    }

    #[test]
    fn test_fractional_or_non_positive_float_id_rejected() {
        for body in [
            r#"{"newCoil": true, "id": 17.5}"#,
            r#"{"newCoil": true, "id": 0.0}"#,
            r#"{"newCoil": true, "id": -4.0}"#,
            r#"{"newCoil": true, "id": 1e300}"#,
        ] {
            assert!(
                matches!(parse(body), Err(SourceError::Malformed(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn test_rejects_bad_id() {
        assert!(matches!(
            parse(r#"{"newCoil": true, "id": "C-17"}"#),
            Err(SourceError::Malformed(_))
        ));
        assert!(matches!(
            parse(r#"{"newCoil": true, "id": 0}"#),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_partial_or_non_positive_slot() {
        assert!(matches!(
            parse(r#"{"newCoil": true, "row": 1, "column": 2}"#),
            Err(SourceError::Malformed(_))
        ));
        assert!(matches!(
            parse(r#"{"newCoil": true, "row": 0, "column": 1, "layer": 1}"#),
            Err(SourceError::Malformed(_))
        ));
        assert!(matches!(
            parse(r#"{"newCoil": true, "row": -3, "column": 1, "layer": 1}"#),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_flag_fails_to_deserialize() {
        let result: Result<CheckResponse, _> = serde_json::from_str(r#"{"row": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let pending = parse(r#"{"newCoil": true, "grade": "S355", "weightKg": 21000}"#)
            .unwrap()
            .unwrap();
        assert_eq!(pending.slot, None);
    }

    #[test]
    fn test_http_feed_url() {
        let feed = HttpCoilFeed::new(&SourceConfig::new("http://127.0.0.1:9/api")).unwrap();
        assert_eq!(feed.url(), "http://127.0.0.1:9/api/checkForNewCoil");
    }
}
