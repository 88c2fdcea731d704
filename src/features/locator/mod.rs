//! Hospital locator: the static/live merge, distance filtering and map state.
//!
//! The pipeline is pure: [`dataset::merge`] builds the visible set,
//! [`filter::apply_filters`] narrows and orders it, [`map_view::MapView`]
//! derives markers and popups. [`feed::HospitalFeed`] keeps the merged set
//! fresh in the background.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/locator` | Public | Filtered hospitals and map view |
//! | GET | `/api/locator/options` | Public | Service and distance options |

pub mod dataset;
pub mod dtos;
pub mod feed;
pub mod filter;
pub mod geo;
pub mod geolocation;
pub mod handlers;
pub mod map_view;
pub mod page_state;
pub mod routes;
pub mod services;

pub use feed::{HospitalFeed, HospitalSource};
pub use services::LocatorService;
