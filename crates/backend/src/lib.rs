//! Typed access to the upstream booking backend.
//!
//! [`BookingBackend`] is the seam the API layer depends on. [`HttpBackend`]
//! talks to the real service over HTTP; [`mock::MockBackend`] stands in for
//! it in tests.

pub mod client;
pub mod mock;

use std::time::Duration;

use async_trait::async_trait;
use barbershop_core::models::{
    appointment::{Appointment, NewAppointment},
    auth::{LoginRequest, LoginResponse},
    availability::BarberAvailability,
    catalog::{Barber, Product, ServiceType},
};
use chrono::NaiveDate;
use eyre::Result;

pub use client::HttpBackend;

#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Working hours and open start times of every barber on `date`.
    async fn availability_for_date(&self, date: NaiveDate) -> Result<Vec<BarberAvailability>>;

    /// The barber's appointments on `date`, in any status.
    async fn appointments_for_barber(
        &self,
        barber_id: i64,
        date: NaiveDate,
        bearer: Option<String>,
    ) -> Result<Vec<Appointment>>;

    async fn service_types(&self) -> Result<Vec<ServiceType>>;

    async fn barbers(&self) -> Result<Vec<Barber>>;

    async fn products(&self) -> Result<Vec<Product>>;

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
        bearer: &str,
    ) -> Result<Appointment>;

    /// Moves an appointment to `time` (`"HH:MM"`) on its current date.
    async fn reschedule_appointment(
        &self,
        appointment_id: i64,
        time: &str,
        bearer: &str,
    ) -> Result<Appointment>;

    /// The backend answers a cancellation with an empty body.
    async fn cancel_appointment(&self, appointment_id: i64, bearer: &str) -> Result<()>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
}

pub fn create_client(base_url: &str, timeout_seconds: u64) -> Result<HttpBackend> {
    HttpBackend::new(base_url, Duration::from_secs(timeout_seconds))
}
