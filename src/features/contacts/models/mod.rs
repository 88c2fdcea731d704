mod contact;

pub use contact::{Contact, ContactStatus};
