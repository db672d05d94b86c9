// Places API client module
// Author: kelexine (https://github.com/kelexine)

mod client;
mod params;
mod types;

pub use client::{ClientBuilder, PlacesClient};
pub use params::{nearby_search_params, Params};
pub use types::{Endpoint, InputType, LatLng, Method, PlacesResponse};
