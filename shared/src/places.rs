//! Client for the Google Places web service.

use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Bite, BitePage, BitePhoto, Coordinates};

/// Pixel cap sent to the photo endpoint.
const PHOTO_MAX_WIDTH: u32 = 1600;

/// Category forwarded on every fresh search.
const PLACE_TYPE_RESTAURANT: &str = "restaurant";

/// Price tiers understood by the places provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLevel {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl PriceLevel {
    /// Map an integer price tier onto a provider price level.
    ///
    /// Tiers outside 0..=4 fall back to the free tier.
    pub fn from_tier(tier: i64) -> Self {
        match tier {
            0 => PriceLevel::Free,
            1 => PriceLevel::Inexpensive,
            2 => PriceLevel::Moderate,
            3 => PriceLevel::Expensive,
            4 => PriceLevel::VeryExpensive,
            _ => PriceLevel::Free,
        }
    }

    /// Wire value for the provider's minprice/maxprice parameters.
    pub fn as_param(self) -> u8 {
        match self {
            PriceLevel::Free => 0,
            PriceLevel::Inexpensive => 1,
            PriceLevel::Moderate => 2,
            PriceLevel::Expensive => 3,
            PriceLevel::VeryExpensive => 4,
        }
    }
}

/// Parameters of a fresh nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub lat: f64,
    pub long: f64,
    pub radius: u32,
    pub open_now: bool,
    pub min_price: Option<PriceLevel>,
    pub max_price: Option<PriceLevel>,
}

impl SearchCriteria {
    /// Criteria for an open-now restaurant search around a point.
    pub fn restaurants(lat: f64, long: f64, radius: u32, min_price: i64, max_price: i64) -> Self {
        Self {
            lat,
            long,
            radius,
            open_now: true,
            min_price: (min_price > 0).then(|| PriceLevel::from_tier(min_price)),
            max_price: (max_price < 5).then(|| PriceLevel::from_tier(max_price)),
        }
    }
}

/// A fetched place photo.
#[derive(Debug, PartialEq)]
pub struct Photo {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Nearby-search response as the provider serializes it.
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
    #[serde(default)]
    photos: Vec<PhotoResult>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct PhotoResult {
    photo_reference: String,
    width: u32,
    height: u32,
}

impl NearbySearchResponse {
    fn into_page(self) -> BitePage {
        BitePage {
            results: self.results.into_iter().map(PlaceResult::into_bite).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

impl PlaceResult {
    fn into_bite(self) -> Bite {
        Bite {
            place_id: self.place_id,
            name: self.name,
            vicinity: self.vicinity,
            location: Coordinates {
                lat: self.geometry.location.lat,
                lng: self.geometry.location.lng,
            },
            rating: self.rating,
            price_level: self.price_level,
            open_now: self.opening_hours.and_then(|hours| hours.open_now),
            photos: self
                .photos
                .into_iter()
                .map(|photo| BitePhoto {
                    photo_reference: photo.photo_reference,
                    width: photo.width,
                    height: photo.height,
                })
                .collect(),
        }
    }
}

/// Client for the places provider.
pub struct PlacesClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl PlacesClient {
    /// Create a client from the application configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.places_base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Run a fresh nearby search for the given criteria.
    pub async fn nearby_search(&self, criteria: &SearchCriteria) -> Result<BitePage> {
        let mut query: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("location", format!("{},{}", criteria.lat, criteria.long)),
            ("radius", criteria.radius.to_string()),
            ("type", PLACE_TYPE_RESTAURANT.to_string()),
        ];
        if criteria.open_now {
            query.push(("opennow", "true".to_string()));
        }
        if let Some(min) = criteria.min_price {
            query.push(("minprice", min.as_param().to_string()));
        }
        if let Some(max) = criteria.max_price {
            query.push(("maxprice", max.as_param().to_string()));
        }

        info!(radius = criteria.radius, "nearby search");
        self.search(&query).await
    }

    /// Fetch the next page of an earlier search.
    ///
    /// The provider keeps the original criteria on its side of the
    /// token, so the token is the only search parameter sent.
    pub async fn next_page(&self, page_token: &str) -> Result<BitePage> {
        let query = vec![
            ("key", self.api_key.clone()),
            ("pagetoken", page_token.to_string()),
        ];

        info!("next page search");
        self.search(&query).await
    }

    async fn search(&self, query: &[(&str, String)]) -> Result<BitePage> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let payload: NearbySearchResponse = response.json().await?;
        match payload.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(payload.into_page()),
            status => Err(Error::Upstream(format!(
                "provider returned {}: {}",
                status,
                payload.error_message.unwrap_or_default()
            ))),
        }
    }

    /// Fetch raw image bytes for a photo reference.
    pub async fn fetch_photo(&self, photo_ref: &str) -> Result<Photo> {
        let url = format!("{}/photo", self.base_url);
        let query = vec![
            ("key", self.api_key.clone()),
            ("photoreference", photo_ref.to_string()),
            ("maxwidth", PHOTO_MAX_WIDTH.to_string()),
        ];

        info!("photo fetch");
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;

        Ok(Photo {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
