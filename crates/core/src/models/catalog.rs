use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barber {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "correo", alias = "email", default)]
    pub email: Option<String>,
}

/// A haircut or grooming service offered by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "tiempoMinutos", alias = "durationMinutes")]
    pub duration_minutes: u32,
    #[serde(rename = "precio", alias = "price")]
    pub price: f64,
    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
    #[serde(rename = "barberoId", default, skip_serializing_if = "Option::is_none")]
    pub barber_id: Option<i64>,
    #[serde(rename = "barberoNombre", default, skip_serializing_if = "Option::is_none")]
    pub barber_name: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    pub stock: u32,
    #[serde(rename = "precioVenta", alias = "price")]
    pub price: f64,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
