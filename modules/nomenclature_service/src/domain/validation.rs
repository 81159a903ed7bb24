//! Validation gate for create/update payloads
//!
//! Each entity has a static rule set evaluated in field order; the first
//! failing rule produces the error. Reference fields must be present and
//! well-formed, but their existence in the store is not checked.

use crate::contract::{
    Activity, ActivityDraft, Characteristic, CharacteristicDraft, Entity, NomenclatureError,
    PtSchemeObject, PtSchemeObjectDraft, Quantity, QuantityDraft, RecordId, Standard,
    StandardDraft, Subcontractor, SubcontractorDraft,
};

/// Turns an unvalidated draft into an entity, or rejects it
pub trait Validate: Entity {
    fn validate(draft: &Self::Draft) -> Result<Self, NomenclatureError>;
}

/// Non-empty after trimming; returns the trimmed value
pub fn required_text(value: &str, message: &str) -> Result<String, NomenclatureError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NomenclatureError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Present and parseable as a record key
pub fn required_reference(
    value: &str,
    field: &str,
    message: &str,
) -> Result<RecordId, NomenclatureError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NomenclatureError::validation(message));
    }
    trimmed
        .parse()
        .map_err(|_| NomenclatureError::validation(format!("{} is not a valid identifier", field)))
}

impl Validate for Activity {
    fn validate(draft: &ActivityDraft) -> Result<Self, NomenclatureError> {
        Ok(Self {
            name_bg: required_text(&draft.name_bg, "Наименование is required")?,
            name_en: required_text(&draft.name_en, "Name is required")?,
        })
    }
}

impl Validate for PtSchemeObject {
    fn validate(draft: &PtSchemeObjectDraft) -> Result<Self, NomenclatureError> {
        Ok(Self {
            name_bg: required_text(&draft.name_bg, "NameBG is required")?,
            name_en: required_text(&draft.name_en, "NameEN is required")?,
            activity_id: required_reference(
                &draft.activity_id,
                "ActivityId",
                "Activity is required",
            )?,
            image: draft.image.clone().unwrap_or_default(),
        })
    }
}

impl Validate for Characteristic {
    fn validate(draft: &CharacteristicDraft) -> Result<Self, NomenclatureError> {
        Ok(Self {
            name_bg: required_text(&draft.name_bg, "NameBG is required")?,
            name_en: required_text(&draft.name_en, "NameEN is required")?,
            unit: required_text(&draft.unit, "Unit is required")?,
            pt_scheme_object_id: required_reference(
                &draft.pt_scheme_object_id,
                "PtSchemeObjectId",
                "Object is required",
            )?,
        })
    }
}

impl Validate for Quantity {
    fn validate(draft: &QuantityDraft) -> Result<Self, NomenclatureError> {
        Ok(Self {
            name_bg: required_text(&draft.name_bg, "NameBG is required")?,
            name_en: required_text(&draft.name_en, "NameEN is required")?,
            unit: required_text(&draft.unit, "Unit is required")?,
            pt_scheme_object_id: required_reference(
                &draft.pt_scheme_object_id,
                "PtSchemeObjectId",
                "Object is required",
            )?,
        })
    }
}

impl Validate for Standard {
    fn validate(draft: &StandardDraft) -> Result<Self, NomenclatureError> {
        Ok(Self {
            name_bg: required_text(&draft.name_bg, "NameBG is required")?,
            name_en: required_text(&draft.name_en, "NameEN is required")?,
            characteristic_id: required_reference(
                &draft.characteristic_id,
                "CharacteristicId",
                "Characteristic is required",
            )?,
        })
    }
}

impl Validate for Subcontractor {
    fn validate(draft: &SubcontractorDraft) -> Result<Self, NomenclatureError> {
        let name_bg = required_text(&draft.name_bg, "NameBG is required")?;
        let name_en = required_text(&draft.name_en, "NameEN is required")?;

        let mut pt_scheme_object_ids: Vec<RecordId> =
            Vec::with_capacity(draft.pt_scheme_object_ids.len());
        for raw in draft.pt_scheme_object_ids.iter().filter(|raw| !raw.trim().is_empty()) {
            let id = required_reference(raw, "PtSchemeObjectIds", "PT scheme object is required")?;
            if !pt_scheme_object_ids.contains(&id) {
                pt_scheme_object_ids.push(id);
            }
        }
        if pt_scheme_object_ids.is_empty() {
            return Err(NomenclatureError::validation(
                "At least one PT scheme object is required",
            ));
        }

        Ok(Self {
            name_bg,
            name_en,
            logo: draft.logo.clone().unwrap_or_default(),
            pt_scheme_object_ids,
        })
    }
}
