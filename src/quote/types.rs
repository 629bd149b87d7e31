//! Caller-facing request types and the parsed quote
//!
//! `Quote` mirrors the declarative tree in `schema.rs`. Fields the schema
//! marks required are plain values here, everything else is optional.
//! Keys the model adds beyond the schema are kept in `extra` and echoed back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of a message participant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A chat message with role and content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST` requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Detected project profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectType {
    #[serde(rename = "toronto_standard")]
    TorontoStandard,
    #[serde(rename = "toronto_festival")]
    TorontoFestival,
    #[serde(rename = "outoftown")]
    OutOfTown,
    #[serde(rename = "fabrication_only")]
    FabricationOnly,
}

/// Pricing confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One itemized cost line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,
    pub extended: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Booth facts extracted from the source document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoothSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fabrication costs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Materials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walls_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flooring: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flooring_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphics_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_lighting: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_lighting_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furniture_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_line_items: Option<Vec<LineItem>>,
    pub subtotal: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Labour, management and logistics costs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Services {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_pm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_pm_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_pm_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dismantle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dismantle_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dismantle_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistics_line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_line_items: Option<Vec<LineItem>>,
    pub subtotal: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A booth cost quote as returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booth_specs: Option<BoothSpecs>,
    pub project_type: ProjectType,
    pub materials: Materials,
    pub services: Services,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contingency: Option<f64>,
    pub subtotal_before_tax: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful relay response
///
/// `quote` is the recovered object as the model produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteResponse {
    pub quote: Value,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
}
