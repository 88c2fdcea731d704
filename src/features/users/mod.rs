//! User accounts managed from the admin panel.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/users` | Admin | List users |
//! | POST | `/api/admin/users` | Admin | Create user |
//! | GET | `/api/admin/users/{id}` | Admin | Get user |
//! | PUT | `/api/admin/users/{id}` | Admin | Update user |
//! | DELETE | `/api/admin/users/{id}` | Admin | Delete user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
