use async_trait::async_trait;
use barbershop_core::models::{
    appointment::{Appointment, NewAppointment},
    auth::{LoginRequest, LoginResponse},
    availability::BarberAvailability,
    catalog::{Barber, Product, ServiceType},
};
use chrono::NaiveDate;
use mockall::mock;

use crate::BookingBackend;

// Mock backend for handler tests
mock! {
    pub Backend {}

    #[async_trait]
    impl BookingBackend for Backend {
        async fn availability_for_date(
            &self,
            date: NaiveDate,
        ) -> eyre::Result<Vec<BarberAvailability>>;

        async fn appointments_for_barber(
            &self,
            barber_id: i64,
            date: NaiveDate,
            bearer: Option<String>,
        ) -> eyre::Result<Vec<Appointment>>;

        async fn service_types(&self) -> eyre::Result<Vec<ServiceType>>;

        async fn barbers(&self) -> eyre::Result<Vec<Barber>>;

        async fn products(&self) -> eyre::Result<Vec<Product>>;

        async fn create_appointment(
            &self,
            appointment: &NewAppointment,
            bearer: &str,
        ) -> eyre::Result<Appointment>;

        async fn reschedule_appointment(
            &self,
            appointment_id: i64,
            time: &str,
            bearer: &str,
        ) -> eyre::Result<Appointment>;

        async fn cancel_appointment(
            &self,
            appointment_id: i64,
            bearer: &str,
        ) -> eyre::Result<()>;

        async fn login(&self, request: &LoginRequest) -> eyre::Result<LoginResponse>;
    }
}
