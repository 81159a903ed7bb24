//! Contract models for the nomenclature service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - wire and storage shapes live in their own layers.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record key assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh record key
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The six nomenclature collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Activity,
    PtSchemeObject,
    Characteristic,
    Quantity,
    Standard,
    Subcontractor,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Activity,
        EntityKind::PtSchemeObject,
        EntityKind::Characteristic,
        EntityKind::Quantity,
        EntityKind::Standard,
        EntityKind::Subcontractor,
    ];

    /// Collection name used in storage and in REST paths
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Activity => "activities",
            EntityKind::PtSchemeObject => "ptschemeobjects",
            EntityKind::Characteristic => "characteristics",
            EntityKind::Quantity => "quantities",
            EntityKind::Standard => "standards",
            EntityKind::Subcontractor => "subcontractors",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// A stored record: store-assigned identity plus the entity fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<E> {
    pub id: RecordId,
    pub data: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Common shape of every nomenclature entity.
///
/// `Draft` is the unvalidated form/request payload. Entities are produced
/// from drafts by the validation gate and turned back into drafts when a
/// record is loaded into an edit form.
pub trait Entity: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const KIND: EntityKind;

    type Draft: Clone + fmt::Debug + Default + PartialEq + Send + Sync + 'static;

    /// Prefill an edit form from the stored fields
    fn to_draft(&self) -> Self::Draft;

    /// Carry fields the draft left out over from the previously stored value.
    ///
    /// Updates replace every field except optional binary payloads, which
    /// keep their old value unless the draft supplies a new one.
    fn retain_omitted(&mut self, _previous: &Self, _draft: &Self::Draft) {}

    /// Slot for a data-URL attachment (image or logo), if the entity has one
    fn attachment_mut(_draft: &mut Self::Draft) -> Option<&mut Option<String>> {
        None
    }
}

// ===== Activity =====

/// Top-level classification (Calibration, Testing, Sampling, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name_bg: String,
    pub name_en: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDraft {
    pub name_bg: String,
    pub name_en: String,
}

impl Entity for Activity {
    const KIND: EntityKind = EntityKind::Activity;
    type Draft = ActivityDraft;

    fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
        }
    }
}

// ===== PT scheme object =====

/// Certified testing/reference object belonging to one activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtSchemeObject {
    pub name_bg: String,
    pub name_en: String,
    pub activity_id: RecordId,
    /// Data URL, empty when no image was uploaded
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PtSchemeObjectDraft {
    pub name_bg: String,
    pub name_en: String,
    pub activity_id: String,
    /// `None` keeps the stored image on update
    pub image: Option<String>,
}

impl Entity for PtSchemeObject {
    const KIND: EntityKind = EntityKind::PtSchemeObject;
    type Draft = PtSchemeObjectDraft;

    fn to_draft(&self) -> PtSchemeObjectDraft {
        PtSchemeObjectDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            activity_id: self.activity_id.to_string(),
            image: None,
        }
    }

    fn retain_omitted(&mut self, previous: &Self, draft: &PtSchemeObjectDraft) {
        if draft.image.is_none() {
            self.image = previous.image.clone();
        }
    }

    fn attachment_mut(draft: &mut PtSchemeObjectDraft) -> Option<&mut Option<String>> {
        Some(&mut draft.image)
    }
}

// ===== Characteristic =====

/// Measurable property of a PT scheme object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characteristic {
    pub name_bg: String,
    pub name_en: String,
    pub unit: String,
    pub pt_scheme_object_id: RecordId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacteristicDraft {
    pub name_bg: String,
    pub name_en: String,
    pub unit: String,
    pub pt_scheme_object_id: String,
}

impl Entity for Characteristic {
    const KIND: EntityKind = EntityKind::Characteristic;
    type Draft = CharacteristicDraft;

    fn to_draft(&self) -> CharacteristicDraft {
        CharacteristicDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            unit: self.unit.clone(),
            pt_scheme_object_id: self.pt_scheme_object_id.to_string(),
        }
    }
}

// ===== Quantity =====

/// Measurable value type tied to a calibration object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub name_bg: String,
    pub name_en: String,
    pub unit: String,
    pub pt_scheme_object_id: RecordId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityDraft {
    pub name_bg: String,
    pub name_en: String,
    pub unit: String,
    pub pt_scheme_object_id: String,
}

impl Entity for Quantity {
    const KIND: EntityKind = EntityKind::Quantity;
    type Draft = QuantityDraft;

    fn to_draft(&self) -> QuantityDraft {
        QuantityDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            unit: self.unit.clone(),
            pt_scheme_object_id: self.pt_scheme_object_id.to_string(),
        }
    }
}

// ===== Standard =====

/// Reference standard tied to one characteristic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standard {
    pub name_bg: String,
    pub name_en: String,
    pub characteristic_id: RecordId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardDraft {
    pub name_bg: String,
    pub name_en: String,
    pub characteristic_id: String,
}

impl Entity for Standard {
    const KIND: EntityKind = EntityKind::Standard;
    type Draft = StandardDraft;

    fn to_draft(&self) -> StandardDraft {
        StandardDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            characteristic_id: self.characteristic_id.to_string(),
        }
    }
}

// ===== Subcontractor =====

/// External party associated with one or more PT scheme objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcontractor {
    pub name_bg: String,
    pub name_en: String,
    /// Data URL, empty when no logo was uploaded
    pub logo: String,
    pub pt_scheme_object_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcontractorDraft {
    pub name_bg: String,
    pub name_en: String,
    /// `None` keeps the stored logo on update
    pub logo: Option<String>,
    pub pt_scheme_object_ids: Vec<String>,
}

impl Entity for Subcontractor {
    const KIND: EntityKind = EntityKind::Subcontractor;
    type Draft = SubcontractorDraft;

    fn to_draft(&self) -> SubcontractorDraft {
        SubcontractorDraft {
            name_bg: self.name_bg.clone(),
            name_en: self.name_en.clone(),
            logo: None,
            pt_scheme_object_ids: self
                .pt_scheme_object_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    fn retain_omitted(&mut self, previous: &Self, draft: &SubcontractorDraft) {
        if draft.logo.is_none() {
            self.logo = previous.logo.clone();
        }
    }

    fn attachment_mut(draft: &mut SubcontractorDraft) -> Option<&mut Option<String>> {
        Some(&mut draft.logo)
    }
}
