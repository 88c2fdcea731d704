//! Hospital records: public listing and admin maintenance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/hospitals` | Public | Hospitals inside the bounding box |
//! | GET | `/api/hospitals/{code}` | Public | Hospital detail |
//! | POST | `/api/admin/hospitals` | Admin | Create hospital |
//! | PUT | `/api/admin/hospitals/{code}` | Admin | Update hospital |
//! | DELETE | `/api/admin/hospitals/{code}` | Admin | Delete hospital |
//! | POST | `/api/admin/hospitals/import` | Admin | Upsert the static dataset |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::HospitalService;
