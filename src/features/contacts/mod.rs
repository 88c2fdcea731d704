//! Contact form messages.
//!
//! Submissions are stored as `UNREAD`; the admin notification and the sender
//! confirmation are sent in the background and never fail the request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/contact` | Public | Submit a message |
//! | GET | `/api/admin/contacts` | Admin | List messages |
//! | PATCH | `/api/admin/contacts/{id}/status` | Admin | Mark read/unread |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ContactService;
