//! Backend Response Normalization
//!
//! The prediction and chat endpoints return loosely shaped JSON: field names
//! vary between backend versions and values are sometimes the wrong type.
//! Each field is read into a [`Field`] so callers see "missing" and "wrong
//! type" explicitly instead of probing for nulls.

use crate::explanation::selection::ExplanationSelector;
use crate::explanation::types::{ExplanationView, Section, Segment};
use crate::explanation::renderer::ExplanationRenderer;
use crate::explanation::sections::split_sections;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const DISEASE_KEYS: &[&str] = &["disease", "prediction", "predicted_disease", "label"];
const CONFIDENCE_KEYS: &[&str] = &["confidence", "probability", "score"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "details", "analysis"];
const REMEDY_KEYS: &[&str] = &["remedies", "ayurvedic_remedies", "remedy"];
const REPLY_KEYS: &[&str] = &["response", "reply", "answer", "message"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("response has none of the fields: {0}")]
    NoUsableField(String),
}

/// One field of a backend payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Present(T),
    Missing,
    /// Key exists but holds the wrong JSON type
    Invalid(&'static str),
}

impl<T> Field<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// Parsed prediction endpoint response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub disease: Field<String>,
    /// Fraction in `[0, 1]`; percentages are scaled down
    pub confidence: Field<f64>,
    pub explanation: Field<String>,
    pub remedies: Field<String>,
}

impl PredictionResponse {
    pub fn from_value(value: &Value) -> Result<Self, ResponseError> {
        let obj = as_object(value)?;

        let response = Self {
            disease: string_field(obj, DISEASE_KEYS),
            confidence: confidence_field(obj),
            explanation: string_field(obj, EXPLANATION_KEYS),
            remedies: string_field(obj, REMEDY_KEYS),
        };

        if !response.disease.is_present()
            && !response.explanation.is_present()
            && !response.remedies.is_present()
        {
            let keys = [DISEASE_KEYS, EXPLANATION_KEYS, REMEDY_KEYS].concat();
            return Err(ResponseError::NoUsableField(keys.join(", ")));
        }

        Ok(response)
    }

    /// Names of fields that were absent or unusable
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.disease.is_present() {
            missing.push("disease");
        }
        if !self.confidence.is_present() {
            missing.push("confidence");
        }
        if !self.explanation.is_present() {
            missing.push("explanation");
        }
        if !self.remedies.is_present() {
            missing.push("remedies");
        }
        missing
    }
}

/// Parsed chat endpoint response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub reply: Field<String>,
}

impl ChatResponse {
    /// Accepts an object with a reply field, or a bare JSON string
    pub fn from_value(value: &Value) -> Result<Self, ResponseError> {
        if let Value::String(s) = value {
            return Ok(Self {
                reply: Field::Present(s.clone()),
            });
        }

        let obj = as_object(value)?;
        let reply = string_field(obj, REPLY_KEYS);
        if !reply.is_present() {
            return Err(ResponseError::NoUsableField(REPLY_KEYS.join(", ")));
        }
        Ok(Self { reply })
    }
}

/// Prediction response ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub disease: Option<String>,
    pub confidence: Option<f64>,
    pub explanation: ExplanationView,
    /// Rendered from a dedicated remedies field, when the backend sends one
    pub remedies: Vec<Segment>,
    pub missing_fields: Vec<&'static str>,
}

impl PredictionReport {
    pub fn build(response: &PredictionResponse, selector: &ExplanationSelector<'_>) -> Self {
        let explanation = selector.build(response.explanation.present().map(String::as_str));
        let remedies = selector
            .renderer()
            .render(response.remedies.present().map(String::as_str));

        Self {
            disease: response.disease.present().cloned(),
            confidence: response.confidence.present().copied(),
            explanation,
            remedies,
            missing_fields: response.missing_fields(),
        }
    }
}

/// Chat reply ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Populated when the reply uses `## **Title**` headings
    pub sections: Vec<Section>,
    pub segments: Vec<Segment>,
}

impl ChatReply {
    pub fn build(response: &ChatResponse, renderer: &ExplanationRenderer) -> Self {
        let text = response.reply.present().map(String::as_str);
        Self {
            sections: split_sections(text),
            segments: renderer.render(text),
        }
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ResponseError> {
    value
        .as_object()
        .ok_or_else(|| ResponseError::NotAnObject(json_type(value)))
}

/// First alias holding a non-null, non-blank value
fn pick_alias<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

/// A usable alias of the wrong JSON type is `Invalid`
fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Field<String> {
    match pick_alias(obj, keys) {
        None => Field::Missing,
        Some(Value::String(s)) => Field::Present(s.clone()),
        Some(other) => Field::Invalid(json_type(other)),
    }
}

fn confidence_field(obj: &Map<String, Value>) -> Field<f64> {
    let fraction = match pick_alias(obj, CONFIDENCE_KEYS) {
        None => return Field::Missing,
        Some(Value::Number(n)) => n.as_f64().and_then(normalize_confidence),
        Some(Value::String(s)) => parse_confidence_str(s),
        Some(other) => return Field::Invalid(json_type(other)),
    };

    match fraction {
        Some(c) => Field::Present(c),
        None => Field::Invalid("number"),
    }
}

/// "87%", "87.5 %", "0.87"; a `%` value must lie in `[0, 100]`
fn parse_confidence_str(s: &str) -> Option<f64> {
    let s = s.trim();
    match s.strip_suffix('%') {
        Some(pct) => {
            let pct = pct.trim().parse::<f64>().ok()?;
            (pct.is_finite() && (0.0..=100.0).contains(&pct)).then(|| pct / 100.0)
        }
        None => s.parse::<f64>().ok().and_then(normalize_confidence),
    }
}

/// Bare values above 1 are read as percentages
fn normalize_confidence(value: f64) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    (fraction <= 1.0).then_some(fraction)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
