//! Mapper implementations for converting between DTOs and contract models
//!
//! `RestEntity` ties each entity to its response and request DTOs so that
//! handlers, routes and the HTTP client can be written once for all six
//! collections.

use super::dto::*;
use crate::contract::{
    Activity, ActivityDraft, Characteristic, CharacteristicDraft, Entity, PtSchemeObject,
    PtSchemeObjectDraft, Quantity, QuantityDraft, Record, Standard, StandardDraft, Subcontractor,
    SubcontractorDraft,
};
use serde::{de::DeserializeOwned, Serialize};

/// Wire representation of an entity
pub trait RestEntity: Entity {
    /// Response body for one record
    type Dto: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Create/update request body
    type Request: Serialize + DeserializeOwned + Send + Sync + 'static;

    fn to_dto(record: Record<Self>) -> Self::Dto;

    fn from_dto(dto: Self::Dto) -> Record<Self>;

    fn into_draft(request: Self::Request) -> Self::Draft;

    fn to_request(draft: &Self::Draft) -> Self::Request;
}

// ===== Activity conversions =====

impl RestEntity for Activity {
    type Dto = ActivityDto;
    type Request = ActivityRequest;

    fn to_dto(record: Record<Self>) -> ActivityDto {
        ActivityDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: ActivityDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: Activity {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: ActivityRequest) -> ActivityDraft {
        ActivityDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
        }
    }

    fn to_request(draft: &ActivityDraft) -> ActivityRequest {
        ActivityRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
        }
    }
}

// ===== PT Scheme Object conversions =====

impl RestEntity for PtSchemeObject {
    type Dto = PtSchemeObjectDto;
    type Request = PtSchemeObjectRequest;

    fn to_dto(record: Record<Self>) -> PtSchemeObjectDto {
        PtSchemeObjectDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            activity_id: record.data.activity_id.as_uuid(),
            image_base64: record.data.image,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: PtSchemeObjectDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: PtSchemeObject {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
                activity_id: dto.activity_id.into(),
                image: dto.image_base64,
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: PtSchemeObjectRequest) -> PtSchemeObjectDraft {
        PtSchemeObjectDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
            activity_id: request.activity_id.unwrap_or_default(),
            image: request.image_base64,
        }
    }

    fn to_request(draft: &PtSchemeObjectDraft) -> PtSchemeObjectRequest {
        PtSchemeObjectRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
            activity_id: Some(draft.activity_id.clone()),
            image_base64: draft.image.clone(),
        }
    }
}

// ===== Characteristic conversions =====

impl RestEntity for Characteristic {
    type Dto = CharacteristicDto;
    type Request = CharacteristicRequest;

    fn to_dto(record: Record<Self>) -> CharacteristicDto {
        CharacteristicDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            unit: record.data.unit,
            pt_scheme_object_id: record.data.pt_scheme_object_id.as_uuid(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: CharacteristicDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: Characteristic {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
                unit: dto.unit,
                pt_scheme_object_id: dto.pt_scheme_object_id.into(),
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: CharacteristicRequest) -> CharacteristicDraft {
        CharacteristicDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
            unit: request.unit,
            pt_scheme_object_id: request.pt_scheme_object_id.unwrap_or_default(),
        }
    }

    fn to_request(draft: &CharacteristicDraft) -> CharacteristicRequest {
        CharacteristicRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
            unit: draft.unit.clone(),
            pt_scheme_object_id: Some(draft.pt_scheme_object_id.clone()),
        }
    }
}

// ===== Quantity conversions =====

impl RestEntity for Quantity {
    type Dto = QuantityDto;
    type Request = QuantityRequest;

    fn to_dto(record: Record<Self>) -> QuantityDto {
        QuantityDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            unit: record.data.unit,
            pt_scheme_object_id: record.data.pt_scheme_object_id.as_uuid(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: QuantityDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: Quantity {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
                unit: dto.unit,
                pt_scheme_object_id: dto.pt_scheme_object_id.into(),
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: QuantityRequest) -> QuantityDraft {
        QuantityDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
            unit: request.unit,
            pt_scheme_object_id: request.pt_scheme_object_id.unwrap_or_default(),
        }
    }

    fn to_request(draft: &QuantityDraft) -> QuantityRequest {
        QuantityRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
            unit: draft.unit.clone(),
            pt_scheme_object_id: Some(draft.pt_scheme_object_id.clone()),
        }
    }
}

// ===== Standard conversions =====

impl RestEntity for Standard {
    type Dto = StandardDto;
    type Request = StandardRequest;

    fn to_dto(record: Record<Self>) -> StandardDto {
        StandardDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            characteristic_id: record.data.characteristic_id.as_uuid(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: StandardDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: Standard {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
                characteristic_id: dto.characteristic_id.into(),
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: StandardRequest) -> StandardDraft {
        StandardDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
            characteristic_id: request.characteristic_id.unwrap_or_default(),
        }
    }

    fn to_request(draft: &StandardDraft) -> StandardRequest {
        StandardRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
            characteristic_id: Some(draft.characteristic_id.clone()),
        }
    }
}

// ===== Subcontractor conversions =====

impl RestEntity for Subcontractor {
    type Dto = SubcontractorDto;
    type Request = SubcontractorRequest;

    fn to_dto(record: Record<Self>) -> SubcontractorDto {
        SubcontractorDto {
            id: record.id.as_uuid(),
            name_bg: record.data.name_bg,
            name_en: record.data.name_en,
            logo_base64: record.data.logo,
            pt_scheme_object_ids: record
                .data
                .pt_scheme_object_ids
                .iter()
                .map(|id| id.as_uuid())
                .collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn from_dto(dto: SubcontractorDto) -> Record<Self> {
        Record {
            id: dto.id.into(),
            data: Subcontractor {
                name_bg: dto.name_bg,
                name_en: dto.name_en,
                logo: dto.logo_base64,
                pt_scheme_object_ids: dto
                    .pt_scheme_object_ids
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }

    fn into_draft(request: SubcontractorRequest) -> SubcontractorDraft {
        SubcontractorDraft {
            name_bg: request.name_bg,
            name_en: request.name_en,
            logo: request.logo_base64,
            pt_scheme_object_ids: request.pt_scheme_object_ids,
        }
    }

    fn to_request(draft: &SubcontractorDraft) -> SubcontractorRequest {
        SubcontractorRequest {
            name_bg: draft.name_bg.clone(),
            name_en: draft.name_en.clone(),
            logo_base64: draft.logo.clone(),
            pt_scheme_object_ids: draft.pt_scheme_object_ids.clone(),
        }
    }
}
