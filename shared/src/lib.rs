//! Shared library for the BiteFinder Lambda.
//!
//! This crate provides the configuration, error, HTTP, and places-provider
//! types used by the Lambda entry point.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod places;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{ApiGatewayRequest, ApiGatewayResponse};
pub use models::{Bite, BitePage, BitePhoto, Coordinates, RequestEnvelope, Verb};
pub use places::{Photo, PlacesClient, PriceLevel, SearchCriteria};
