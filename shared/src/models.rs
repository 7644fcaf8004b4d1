//! Request envelope and result projection models.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Actions a request can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    NextPage,
    Photo,
}

impl Verb {
    /// Resolve a verb string, if recognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "create" => Some(Verb::Create),
            "nextpage" => Some(Verb::NextPage),
            "photo" => Some(Verb::Photo),
            _ => None,
        }
    }
}

/// Parameters of one inbound request, before per-verb validation.
///
/// Deserialized from the JSON request body, or assembled from
/// query-string parameters for deployments that pass arguments in the
/// URL instead.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestEnvelope {
    pub verb: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub radius: Option<u32>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<i64>,
    #[serde(rename = "pageToken", alias = "pagetoken")]
    pub page_token: Option<String>,
    #[serde(rename = "photoRef", alias = "photoref")]
    pub photo_ref: Option<String>,
}

impl RequestEnvelope {
    /// Parse the envelope out of a JSON request body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::Validation(format!("invalid body: {}", e)))
    }

    /// Assemble the envelope from query-string parameters.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            verb: params.get("verb").cloned().unwrap_or_default(),
            lat: parse_param(params, "lat")?,
            long: parse_param(params, "long")?,
            radius: parse_param(params, "radius")?,
            min_price: parse_param(params, "minPrice")?,
            max_price: parse_param(params, "maxPrice")?,
            page_token: string_param(params, &["pageToken", "pagetoken"]),
            photo_ref: string_param(params, &["photoRef", "photoref"]),
        })
    }
}

fn parse_param<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<Option<T>> {
    match params.get(key) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Validation(format!("parameter {} is not numeric", key))),
        _ => Ok(None),
    }
}

fn string_param(params: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| params.get(*key).cloned())
}

/// One page of restaurant results.
///
/// Stable projection of the provider's nearby-search response; fields
/// the provider adds beyond it are not passed through.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BitePage {
    pub results: Vec<Bite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// A single restaurant result.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Bite {
    pub place_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    pub location: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub photos: Vec<BitePhoto>,
}

/// Geographic point.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Photo descriptor attached to a result; the reference feeds the
/// photo verb.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BitePhoto {
    pub photo_reference: String,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_envelope_from_query() {
        let envelope = RequestEnvelope::from_query(&params(&[
            ("verb", "create"),
            ("lat", "37.7749"),
            ("long", "-122.4194"),
            ("radius", "1000"),
            ("minPrice", "1"),
            ("maxPrice", "3"),
        ]))
        .unwrap();

        assert_eq!(envelope.verb, "create");
        assert_eq!(envelope.lat, Some(37.7749));
        assert_eq!(envelope.long, Some(-122.4194));
        assert_eq!(envelope.radius, Some(1000));
        assert_eq!(envelope.min_price, Some(1));
        assert_eq!(envelope.max_price, Some(3));
    }

    #[test]
    fn test_envelope_from_query_rejects_non_numeric() {
        let result = RequestEnvelope::from_query(&params(&[("verb", "create"), ("lat", "north")]));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_envelope_accepts_lowercase_token_keys() {
        let envelope = RequestEnvelope::from_query(&params(&[
            ("verb", "nextpage"),
            ("pagetoken", "ABC123"),
        ]))
        .unwrap();
        assert_eq!(envelope.page_token.as_deref(), Some("ABC123"));

        let envelope =
            RequestEnvelope::from_query(&params(&[("verb", "photo"), ("photoref", "ref1")]))
                .unwrap();
        assert_eq!(envelope.photo_ref.as_deref(), Some("ref1"));
    }

    #[test]
    fn test_envelope_from_json_aliases() {
        let envelope =
            RequestEnvelope::from_json(r#"{"verb":"nextpage","pagetoken":"tok"}"#).unwrap();
        assert_eq!(envelope.page_token.as_deref(), Some("tok"));

        let envelope =
            RequestEnvelope::from_json(r#"{"verb":"photo","photoRef":"ref1"}"#).unwrap();
        assert_eq!(envelope.photo_ref.as_deref(), Some("ref1"));
    }

    #[test]
    fn test_envelope_from_json_rejects_garbage() {
        assert!(matches!(
            RequestEnvelope::from_json("not json"),
            Err(Error::Validation(_))
        ));
    }
}
