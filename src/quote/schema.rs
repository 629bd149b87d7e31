//! Declarative quote schema
//!
//! One field tree drives both renderings handed to providers: the JSON Schema
//! used for schema-constrained decoding and the textual JSON shape appended
//! to prompts for text-only models.

use serde_json::{json, Map, Value};

/// Allowed `project_type` values
pub const PROJECT_TYPES: &[&str] = &[
    "toronto_standard",
    "toronto_festival",
    "outoftown",
    "fabrication_only",
];

/// Allowed confidence tags
pub const CONFIDENCE_LEVELS: &[&str] = &["high", "medium", "low"];

/// Type of a schema node
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Number,
    Enum(&'static [&'static str]),
    Object(&'static [Field]),
    Array(&'static FieldKind),
}

/// A named property of an object node
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    /// Replaces the bare type placeholder in the text rendering
    pub hint: Option<&'static str>,
}

const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Field {
    Field {
        name,
        kind,
        description,
        required: false,
        hint: None,
    }
}

const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Field {
    Field {
        name,
        kind,
        description,
        required: true,
        hint: None,
    }
}

const LINE_ITEM_FIELDS: &[Field] = &[
    required("item", FieldKind::String, "Line item description"),
    optional("qty", FieldKind::Number, "Quantity"),
    optional(
        "dimensions",
        FieldKind::String,
        "Dimensions (e.g., \"8'x8'\" or \"200 sqft\")",
    ),
    optional(
        "unit_price",
        FieldKind::String,
        "Unit price with unit (e.g., \"$68.75/sqft\" or \"$4,400 each\")",
    ),
    required("extended", FieldKind::Number, "Extended price (qty × unit price)"),
    optional(
        "confidence",
        FieldKind::Enum(CONFIDENCE_LEVELS),
        "Pricing confidence",
    ),
];

const LINE_ITEM: FieldKind = FieldKind::Object(LINE_ITEM_FIELDS);
const LINE_ITEMS: FieldKind = FieldKind::Array(&LINE_ITEM);

const BOOTH_SPEC_FIELDS: &[Field] = &[
    optional(
        "dimensions",
        FieldKind::String,
        "Booth dimensions (e.g., '20ft x 30ft')",
    ),
    optional("square_footage", FieldKind::Number, "Total square footage"),
    optional("location", FieldKind::String, "Event location/city"),
    optional("event_name", FieldKind::String, "Event or show name if mentioned"),
    optional("duration_days", FieldKind::Number, "Event duration in days"),
];

const MATERIAL_FIELDS: &[Field] = &[
    optional("walls", FieldKind::Number, "Wall fabrication cost"),
    optional("walls_line_items", LINE_ITEMS, "Itemized wall/structure costs"),
    optional("flooring", FieldKind::Number, "Flooring cost"),
    optional("flooring_line_items", LINE_ITEMS, "Itemized flooring costs"),
    optional("graphics", FieldKind::Number, "Graphics/signage cost"),
    optional("graphics_line_items", LINE_ITEMS, "Itemized graphics/signage costs"),
    optional("av_lighting", FieldKind::Number, "AV and lighting cost"),
    optional("av_lighting_line_items", LINE_ITEMS, "Itemized AV/lighting costs"),
    optional("furniture", FieldKind::Number, "Furniture cost"),
    optional("furniture_line_items", LINE_ITEMS, "Itemized furniture costs"),
    optional("other", FieldKind::Number, "Other materials"),
    optional("other_line_items", LINE_ITEMS, "Other itemized costs"),
    required("subtotal", FieldKind::Number, "Materials subtotal"),
];

const SERVICE_FIELDS: &[Field] = &[
    optional("design_pm", FieldKind::Number, "Design and project management"),
    optional(
        "design_pm_percent",
        FieldKind::Number,
        "Design/PM as % of fabrication subtotal",
    ),
    Field {
        hint: Some("string explaining basis (e.g., '7.2% of fabrication subtotal, quoted as lump sum')"),
        ..optional(
            "design_pm_note",
            FieldKind::String,
            "Basis for design/PM calculation",
        )
    },
    optional(
        "install_dismantle",
        FieldKind::Number,
        "Installation and dismantling labor",
    ),
    optional(
        "install_dismantle_percent",
        FieldKind::Number,
        "I&D as % of fabrication subtotal",
    ),
    optional(
        "install_dismantle_line_items",
        LINE_ITEMS,
        "Itemized I&D costs (crew, days, rates)",
    ),
    optional("logistics", FieldKind::Number, "Shipping and drayage"),
    optional(
        "logistics_percent",
        FieldKind::Number,
        "Logistics as % of fabrication subtotal",
    ),
    optional("logistics_line_items", LINE_ITEMS, "Itemized logistics costs"),
    optional("storage", FieldKind::Number, "Storage costs if applicable"),
    optional("storage_line_items", LINE_ITEMS, "Itemized storage costs"),
    required("subtotal", FieldKind::Number, "Services subtotal"),
];

const QUOTE_FIELDS: &[Field] = &[
    optional(
        "booth_specs",
        FieldKind::Object(BOOTH_SPEC_FIELDS),
        "Booth specifications extracted from quote/PDF",
    ),
    required(
        "project_type",
        FieldKind::Enum(PROJECT_TYPES),
        "Detected project profile",
    ),
    required(
        "materials",
        FieldKind::Object(MATERIAL_FIELDS),
        "Fabrication material costs",
    ),
    required(
        "services",
        FieldKind::Object(SERVICE_FIELDS),
        "Design, labor and logistics costs",
    ),
    optional("contingency", FieldKind::Number, "Contingency amount (5-10%)"),
    required("subtotal_before_tax", FieldKind::Number, "Subtotal before tax"),
    required(
        "tax_rate",
        FieldKind::Number,
        "Tax rate (e.g., 0.13 for HST, 0.14975 for QST+GST)",
    ),
    required("tax_amount", FieldKind::Number, "Calculated tax amount"),
    required("total", FieldKind::Number, "Final total including tax"),
    required(
        "confidence",
        FieldKind::Enum(CONFIDENCE_LEVELS),
        "Confidence level in the estimate",
    ),
    optional(
        "notes",
        FieldKind::Array(&FieldKind::String),
        "Important notes, assumptions, or caveats",
    ),
];

/// Root of the quote schema
pub const QUOTE_SCHEMA: FieldKind = FieldKind::Object(QUOTE_FIELDS);

impl FieldKind {
    /// Render as a JSON Schema node
    pub fn to_json_schema(&self) -> Value {
        match self {
            FieldKind::String => json!({"type": "string"}),
            FieldKind::Number => json!({"type": "number"}),
            FieldKind::Enum(values) => json!({"type": "string", "enum": values}),
            FieldKind::Array(items) => json!({"type": "array", "items": items.to_json_schema()}),
            FieldKind::Object(fields) => {
                let mut properties = Map::new();
                for field in fields.iter() {
                    let mut node = field.kind.to_json_schema();
                    node["description"] = Value::from(field.description);
                    properties.insert(field.name.to_string(), node);
                }

                let mut schema = json!({"type": "object", "properties": properties});
                let required = required_names(fields);
                if !required.is_empty() {
                    schema["required"] = json!(required);
                }
                schema
            }
        }
    }

    /// Render as a compact JSON-shape example
    pub fn render_shape(&self) -> String {
        match self {
            FieldKind::String => "\"string\"".to_string(),
            FieldKind::Number => "number".to_string(),
            FieldKind::Enum(values) => values
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(" | "),
            FieldKind::Array(items) => format!("[{}, ...]", items.render_shape()),
            FieldKind::Object(fields) => {
                let body = fields
                    .iter()
                    .map(render_field)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {} }}", body)
            }
        }
    }
}

fn render_field(field: &Field) -> String {
    let placeholder = match field.hint {
        Some(hint) => format!("\"{}\"", hint),
        None => field.kind.render_shape(),
    };
    format!("\"{}\": {}", field.name, placeholder)
}

fn required_names(fields: &[Field]) -> Vec<&'static str> {
    fields.iter().filter(|f| f.required).map(|f| f.name).collect()
}

/// JSON Schema for schema-constrained decoding
pub fn quote_json_schema() -> Value {
    QUOTE_SCHEMA.to_json_schema()
}

/// Multi-line JSON shape of the full quote, one top-level field per line
pub fn quote_shape_text() -> String {
    let lines = QUOTE_FIELDS
        .iter()
        .map(|field| format!("  {}", render_field(field)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{}\n}}", lines)
}

/// Names of the top-level fields a quote must carry
pub fn required_quote_fields() -> Vec<&'static str> {
    required_names(QUOTE_FIELDS)
}

/// Check that the generated schema is itself a valid JSON Schema
pub fn validate_schema_document() -> Result<(), String> {
    jsonschema::draft202012::new(&quote_json_schema())
        .map(|_| ())
        .map_err(|e| format!("Invalid quote schema: {}", e))
}
