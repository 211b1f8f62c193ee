use std::time::Duration;

use async_trait::async_trait;
use barbershop_core::models::{
    appointment::{Appointment, NewAppointment, RescheduleRequest},
    auth::{LoginRequest, LoginResponse},
    availability::BarberAvailability,
    catalog::{Barber, Product, ServiceType},
};
use chrono::NaiveDate;
use eyre::{eyre, Result, WrapErr};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::BookingBackend;

/// Paths the backend serves without a bearer token.
const PUBLIC_ENDPOINTS: &[&str] = &[
    "/auth/login",
    "/api/tipos-corte",
    "/api/barberos",
    "/barberos",
    "/productos",
    "/api/citas/disponibilidad",
];

pub fn is_public_endpoint(path: &str) -> bool {
    PUBLIC_ENDPOINTS
        .iter()
        .any(|endpoint| path.starts_with(endpoint))
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a JSON request, attaching the bearer token unless the path is
    /// public.
    fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");

        if is_public_endpoint(path) {
            return builder;
        }
        match bearer {
            Some(token) => builder.bearer_auth(token),
            None => {
                warn!(path, "No token available for protected backend request");
                builder
            }
        }
    }

    /// Sends the request and fails on a non-2xx status.
    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .wrap_err_with(|| format!("Request to {path} failed"))?;

        let status = response.status();
        debug!(path, %status, "Backend responded");
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(eyre!("Backend returned {} for {}: {}", status, path, error_text));
        }

        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> Result<T> {
        self.execute(builder, path)
            .await?
            .json::<T>()
            .await
            .wrap_err_with(|| format!("Unexpected response body from {path}"))
    }

    /// For endpoints that reply without a body.
    async fn send_empty(&self, builder: RequestBuilder, path: &str) -> Result<()> {
        self.execute(builder, path).await.map(drop)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, bearer: Option<&str>) -> Result<T> {
        self.send(self.request(Method::GET, path, bearer), path).await
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn availability_for_date(&self, date: NaiveDate) -> Result<Vec<BarberAvailability>> {
        self.get(&format!("/api/citas/disponibilidad/{date}"), None)
            .await
    }

    async fn appointments_for_barber(
        &self,
        barber_id: i64,
        date: NaiveDate,
        bearer: Option<String>,
    ) -> Result<Vec<Appointment>> {
        self.get(
            &format!("/api/citas/barbero/{barber_id}/fecha/{date}"),
            bearer.as_deref(),
        )
        .await
    }

    async fn service_types(&self) -> Result<Vec<ServiceType>> {
        self.get("/api/tipos-corte", None).await
    }

    async fn barbers(&self) -> Result<Vec<Barber>> {
        self.get("/barberos", None).await
    }

    async fn products(&self) -> Result<Vec<Product>> {
        self.get("/productos", None).await
    }

    async fn create_appointment(
        &self,
        appointment: &NewAppointment,
        bearer: &str,
    ) -> Result<Appointment> {
        let path = "/api/citas";
        let builder = self
            .request(Method::POST, path, Some(bearer))
            .json(appointment);
        self.send(builder, path).await
    }

    async fn reschedule_appointment(
        &self,
        appointment_id: i64,
        time: &str,
        bearer: &str,
    ) -> Result<Appointment> {
        let path = format!("/api/citas/{appointment_id}/hora");
        let body = RescheduleRequest {
            time: time.to_string(),
        };
        let builder = self.request(Method::PUT, &path, Some(bearer)).json(&body);
        self.send(builder, &path).await
    }

    async fn cancel_appointment(&self, appointment_id: i64, bearer: &str) -> Result<()> {
        let path = format!("/api/citas/{appointment_id}/cancelar");
        self.send_empty(self.request(Method::PUT, &path, Some(bearer)), &path)
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let path = "/auth/login";
        let builder = self.request(Method::POST, path, None).json(request);
        self.send(builder, path).await
    }
}
