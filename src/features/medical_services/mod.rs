//! Medical service catalog and hospital/service links.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/services` | Public | Catalog with hospital counts |
//! | GET | `/api/services/by-hospital` | Public | Hospitals with their services |
//! | POST | `/api/admin/services` | Admin | Attach a service by name |
//! | PUT | `/api/admin/services` | Admin | Update an attached service |
//! | DELETE | `/api/admin/services` | Admin | Detach a service |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CatalogService;
