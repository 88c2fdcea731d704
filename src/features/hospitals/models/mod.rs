mod hospital;

pub use hospital::{Hospital, HospitalRow};
