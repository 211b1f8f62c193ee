pub mod appointments;
pub mod availability;
