//! Entity to document mappers
//!
//! Conversions between SeaORM rows, stored documents and contract models.
//! Document bodies use the same field names as the REST payloads.

use super::entity;
use crate::contract::{
    Activity, Characteristic, PtSchemeObject, Quantity, Standard, Subcontractor,
};
use crate::domain::repository::{DocumentCodec, StoredDocument};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

impl From<entity::Model> for StoredDocument {
    fn from(model: entity::Model) -> Self {
        Self {
            id: model.id.into(),
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn to_body<J: Serialize>(json: J) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(json)?)
}

fn from_body<J: DeserializeOwned>(body: serde_json::Value) -> Result<J> {
    Ok(serde_json::from_value(body)?)
}

// ===== JSON document shapes =====

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActivityJson {
    #[serde(rename = "NameBG")]
    name_bg: String,
    #[serde(rename = "NameEN")]
    name_en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PtSchemeObjectJson {
    #[serde(rename = "NameBG")]
    name_bg: String,
    #[serde(rename = "NameEN")]
    name_en: String,
    #[serde(rename = "ActivityId")]
    activity_id: Uuid,
    #[serde(rename = "ImageBase64", default)]
    image: String,
}

/// Characteristics and quantities share a shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeasuredJson {
    #[serde(rename = "NameBG")]
    name_bg: String,
    #[serde(rename = "NameEN")]
    name_en: String,
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "PtSchemeObjectId")]
    pt_scheme_object_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StandardJson {
    #[serde(rename = "NameBG")]
    name_bg: String,
    #[serde(rename = "NameEN")]
    name_en: String,
    #[serde(rename = "CharacteristicId")]
    characteristic_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubcontractorJson {
    #[serde(rename = "NameBG")]
    name_bg: String,
    #[serde(rename = "NameEN")]
    name_en: String,
    #[serde(rename = "LogoBase64", default)]
    logo: String,
    #[serde(rename = "PtSchemeObjectIds", default)]
    pt_scheme_object_ids: Vec<Uuid>,
}

// ===== Codecs =====

impl DocumentCodec for Activity {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(ActivityJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: ActivityJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
        })
    }
}

impl DocumentCodec for PtSchemeObject {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(PtSchemeObjectJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            activity_id: self.activity_id.as_uuid(),
            image: self.image.clone(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: PtSchemeObjectJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
            activity_id: json.activity_id.into(),
            image: json.image,
        })
    }
}

impl DocumentCodec for Characteristic {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(MeasuredJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            unit: self.unit.clone(),
            pt_scheme_object_id: self.pt_scheme_object_id.as_uuid(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: MeasuredJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
            unit: json.unit,
            pt_scheme_object_id: json.pt_scheme_object_id.into(),
        })
    }
}

impl DocumentCodec for Quantity {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(MeasuredJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            unit: self.unit.clone(),
            pt_scheme_object_id: self.pt_scheme_object_id.as_uuid(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: MeasuredJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
            unit: json.unit,
            pt_scheme_object_id: json.pt_scheme_object_id.into(),
        })
    }
}

impl DocumentCodec for Standard {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(StandardJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            characteristic_id: self.characteristic_id.as_uuid(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: StandardJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
            characteristic_id: json.characteristic_id.into(),
        })
    }
}

impl DocumentCodec for Subcontractor {
    fn encode(&self) -> Result<serde_json::Value> {
        to_body(SubcontractorJson {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            logo: self.logo.clone(),
            pt_scheme_object_ids: self.pt_scheme_object_ids.iter().map(|id| id.as_uuid()).collect(),
        })
    }

    fn decode(body: serde_json::Value) -> Result<Self> {
        let json: SubcontractorJson = from_body(body)?;
        Ok(Self {
            name_bg: json.name_bg,
            name_en: json.name_en,
            logo: json.logo,
            pt_scheme_object_ids: json.pt_scheme_object_ids.into_iter().map(Into::into).collect(),
        })
    }
}
