pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod hospitals;
pub mod locator;
pub mod medical_services;
pub mod users;
