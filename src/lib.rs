// places-api - Typed Google Places API client with pluggable response caching
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod places;
pub mod utils;

pub use cache::{CacheProvider, MemoryProvider, RedisProvider};
pub use error::{PlacesError, Result};
pub use places::{ClientBuilder, Endpoint, InputType, LatLng, Method, Params, PlacesClient, PlacesResponse};
