//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del catálogo y sus partes
//! (condición y detalles). El precio y la dirección enriquecida son campos
//! derivados: nunca se guardan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::location::Location;
use super::manufacturer::Manufacturer;

/// Estado del vehículo - se guarda como texto NEW / USED
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Used => "USED",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Condition::New),
            "USED" => Ok(Condition::Used),
            other => Err(format!("Unknown vehicle condition '{}'", other)),
        }
    }
}

/// Detalles estáticos del vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[validate(length(min = 1, max = 50))]
    pub body: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate]
    pub manufacturer: Manufacturer,

    #[validate(range(min = 1, max = 10))]
    pub number_of_doors: Option<i32>,

    pub fuel_type: Option<String>,
    pub engine: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(range(min = 1886, max = 2100))]
    pub model_year: Option<i32>,

    #[validate(range(min = 1886, max = 2100))]
    pub production_year: Option<i32>,

    pub external_color: Option<String>,
}

/// Vehicle principal del catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub condition: Condition,
    pub details: Details,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl Vehicle {
    pub fn new(condition: Condition, details: Details, location: Location) -> Self {
        Self {
            id: None,
            created_at: None,
            modified_at: None,
            condition,
            details,
            location,
            price: None,
        }
    }

    /// Copia sin campos derivados (precio y dirección enriquecida)
    pub fn persistable(&self) -> Self {
        Self {
            location: self.location.coordinates_only(),
            price: None,
            ..self.clone()
        }
    }
}
