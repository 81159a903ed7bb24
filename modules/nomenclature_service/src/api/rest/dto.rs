//! REST DTOs with serde derives for HTTP API
//!
//! Field names follow the established wire format: `_id`, PascalCase entity
//! fields, camelCase timestamps. Request fields all default so that missing
//! values reach the validation gate and produce its messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Activity DTOs =====

/// Activity response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    #[schema(example = "Калибриране")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    #[schema(example = "Calibration")]
    pub name_en: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Activity create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ActivityRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    /// Older clients spell the key with a Cyrillic `Е`
    #[serde(rename = "NameEN", alias = "NameЕN", default, deserialize_with = "text")]
    pub name_en: String,
}

// ===== PT Scheme Object DTOs =====

/// PT scheme object response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PtSchemeObjectDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    pub name_en: String,

    #[serde(rename = "ActivityId")]
    pub activity_id: Uuid,

    /// Data URL, empty when no image was uploaded
    #[serde(rename = "ImageBase64", default)]
    pub image_base64: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// PT scheme object create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PtSchemeObjectRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    #[serde(rename = "NameEN", default, deserialize_with = "text")]
    pub name_en: String,

    #[serde(rename = "ActivityId", default, deserialize_with = "reference")]
    pub activity_id: Option<String>,

    /// Omit on update to keep the stored image
    #[serde(
        rename = "ImageBase64",
        default,
        deserialize_with = "attachment",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_base64: Option<String>,
}

// ===== Characteristic DTOs =====

/// Characteristic response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacteristicDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    pub name_en: String,

    #[serde(rename = "Unit")]
    #[schema(example = "kg")]
    pub unit: String,

    #[serde(rename = "PtSchemeObjectId")]
    pub pt_scheme_object_id: Uuid,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Characteristic create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CharacteristicRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    #[serde(rename = "NameEN", default, deserialize_with = "text")]
    pub name_en: String,

    #[serde(rename = "Unit", default, deserialize_with = "text")]
    pub unit: String,

    #[serde(rename = "PtSchemeObjectId", default, deserialize_with = "reference")]
    pub pt_scheme_object_id: Option<String>,
}

// ===== Quantity DTOs =====

/// Quantity response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuantityDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    pub name_en: String,

    #[serde(rename = "Unit")]
    pub unit: String,

    #[serde(rename = "PtSchemeObjectId")]
    pub pt_scheme_object_id: Uuid,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Quantity create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct QuantityRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    #[serde(rename = "NameEN", default, deserialize_with = "text")]
    pub name_en: String,

    #[serde(rename = "Unit", default, deserialize_with = "text")]
    pub unit: String,

    #[serde(rename = "PtSchemeObjectId", default, deserialize_with = "reference")]
    pub pt_scheme_object_id: Option<String>,
}

// ===== Standard DTOs =====

/// Standard response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StandardDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    pub name_en: String,

    #[serde(rename = "CharacteristicId")]
    pub characteristic_id: Uuid,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Standard create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StandardRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    #[serde(rename = "NameEN", default, deserialize_with = "text")]
    pub name_en: String,

    #[serde(rename = "CharacteristicId", default, deserialize_with = "reference")]
    pub characteristic_id: Option<String>,
}

// ===== Subcontractor DTOs =====

/// Subcontractor response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubcontractorDto {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "NameBG")]
    pub name_bg: String,

    #[serde(rename = "NameEN")]
    pub name_en: String,

    /// Data URL, empty when no logo was uploaded
    #[serde(rename = "LogoBase64", default)]
    pub logo_base64: String,

    #[serde(rename = "PtSchemeObjectIds")]
    pub pt_scheme_object_ids: Vec<Uuid>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Subcontractor create/update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubcontractorRequest {
    #[serde(rename = "NameBG", default, deserialize_with = "text")]
    pub name_bg: String,

    #[serde(rename = "NameEN", default, deserialize_with = "text")]
    pub name_en: String,

    /// Omit on update to keep the stored logo
    #[serde(
        rename = "LogoBase64",
        default,
        deserialize_with = "attachment",
        skip_serializing_if = "Option::is_none"
    )]
    pub logo_base64: Option<String>,

    #[serde(rename = "PtSchemeObjectIds", default, deserialize_with = "id_list")]
    pub pt_scheme_object_ids: Vec<String>,
}

/// Error body shared by every failing request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessage {
    pub message: String,
}

/// Attachment fields only count when they carry a string; `null`, numbers
/// or objects leave the stored attachment untouched.
fn attachment<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(data_url) => Ok(Some(data_url)),
        _ => Ok(None),
    }
}

/// Text fields that are not strings read as empty and fail validation
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

fn reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(Some(id)),
        _ => Ok(None),
    }
}

/// A non-array reads as no ids; non-string entries read as blanks
fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(id) => id,
                _ => String::new(),
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

// Note: Conversion implementations live in mapper.rs
