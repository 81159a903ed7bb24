//! Read-time reference resolution over the nomenclature graph
//!
//! Builds id indexes from the latest list results, resolves display labels
//! (degrading to [`UNKNOWN`] for dangling references) and computes the option
//! sets of dependent dropdowns, including the filters that walk one extra
//! reference hop to the owning activity.

use crate::contract::{
    Activity, Characteristic, Entity, EntityKind, PtSchemeObject, Quantity, Record, RecordId,
    Standard, Subcontractor,
};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Placeholder shown when a reference cannot be resolved
pub const UNKNOWN: &str = "—";

/// Activity name that admits objects into the quantity form
pub const CALIBRATION_ACTIVITY: &str = "Калибриране";

/// Activity names that admit characteristics into the standard form
pub const STANDARD_ACTIVITIES: [&str; 2] = ["Вземане на проба", "Изпитване"];

/// Activity names the dropdown filters match against.
///
/// Matching is an exact comparison with the activity's Bulgarian name, so
/// renaming an activity changes which records the filters admit.
// TODO: key the filters off a stable category field on Activity once the data model carries one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    pub calibration_activity: String,
    pub standard_activities: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            calibration_activity: CALIBRATION_ACTIVITY.to_string(),
            standard_activities: STANDARD_ACTIVITIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilterPolicy {
    pub fn admits_quantity_activity(&self, activity_name: &str) -> bool {
        activity_name == self.calibration_activity
    }

    pub fn admits_standard_activity(&self, activity_name: &str) -> bool {
        self.standard_activities.iter().any(|name| name == activity_name)
    }
}

/// The reference collections a page resolves labels against
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub activities: Vec<Record<Activity>>,
    pub objects: Vec<Record<PtSchemeObject>>,
    pub characteristics: Vec<Record<Characteristic>>,
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: RecordId,
    pub label: String,
}

/// Id lookups over a [`Snapshot`]
pub struct ReferenceIndex<'a> {
    snapshot: &'a Snapshot,
    activities: HashMap<RecordId, &'a Activity>,
    objects: HashMap<RecordId, &'a PtSchemeObject>,
    characteristics: HashMap<RecordId, &'a Characteristic>,
}

impl<'a> ReferenceIndex<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            activities: snapshot.activities.iter().map(|r| (r.id, &r.data)).collect(),
            objects: snapshot.objects.iter().map(|r| (r.id, &r.data)).collect(),
            characteristics: snapshot.characteristics.iter().map(|r| (r.id, &r.data)).collect(),
        }
    }

    fn resolved_activity_name(&self, id: RecordId) -> Option<&'a str> {
        self.activities.get(&id).map(|a| a.name_bg.as_str())
    }

    /// Bulgarian name of the activity behind an object, if both resolve
    fn object_activity_name(&self, object_id: RecordId) -> Option<&'a str> {
        let object = self.objects.get(&object_id)?;
        self.resolved_activity_name(object.activity_id)
    }

    pub fn activity_name(&self, id: RecordId) -> &'a str {
        non_empty_or_unknown(self.resolved_activity_name(id))
    }

    /// "{Object} – {Activity}"; an unknown activity degrades only its segment
    pub fn object_label(&self, id: RecordId) -> String {
        match self.objects.get(&id) {
            Some(object) => compose_object_label(object, self.activity_name(object.activity_id)),
            None => UNKNOWN.to_string(),
        }
    }

    /// Comma-joined object labels; [`UNKNOWN`] for an empty list
    pub fn object_labels(&self, ids: &[RecordId]) -> String {
        if ids.is_empty() {
            return UNKNOWN.to_string();
        }
        ids.iter()
            .map(|id| self.object_label(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn characteristic_name(&self, id: RecordId) -> &'a str {
        non_empty_or_unknown(self.characteristics.get(&id).map(|c| c.name_bg.as_str()))
    }

    pub fn characteristic_unit(&self, id: RecordId) -> &'a str {
        non_empty_or_unknown(self.characteristics.get(&id).map(|c| c.unit.as_str()))
    }

    /// "{Characteristic} ({Unit})"
    pub fn characteristic_label(&self, id: RecordId) -> String {
        match self.characteristics.get(&id) {
            Some(characteristic) => compose_characteristic_label(characteristic),
            None => UNKNOWN.to_string(),
        }
    }

    /// Activities for the object form, by name
    pub fn activity_options(&self) -> Vec<SelectOption> {
        sorted(
            self.snapshot
                .activities
                .iter()
                .map(|r| SelectOption {
                    id: r.id,
                    label: r.data.name_bg.clone(),
                })
                .collect(),
        )
    }

    /// Every object, labelled with its activity
    pub fn object_options(&self) -> Vec<SelectOption> {
        sorted(
            self.snapshot
                .objects
                .iter()
                .map(|r| SelectOption {
                    id: r.id,
                    label: self.object_label(r.id),
                })
                .collect(),
        )
    }

    /// Objects whose activity is the calibration activity
    pub fn quantity_object_options(&self, policy: &FilterPolicy) -> Vec<SelectOption> {
        sorted(
            self.snapshot
                .objects
                .iter()
                .filter(|r| {
                    self.resolved_activity_name(r.data.activity_id)
                        .is_some_and(|name| policy.admits_quantity_activity(name))
                })
                .map(|r| SelectOption {
                    id: r.id,
                    label: self.object_label(r.id),
                })
                .collect(),
        )
    }

    /// Characteristics whose object belongs to a sampling or testing activity
    pub fn standard_characteristic_options(&self, policy: &FilterPolicy) -> Vec<SelectOption> {
        sorted(
            self.snapshot
                .characteristics
                .iter()
                .filter(|r| {
                    self.object_activity_name(r.data.pt_scheme_object_id)
                        .is_some_and(|name| policy.admits_standard_activity(name))
                })
                .map(|r| SelectOption {
                    id: r.id,
                    label: compose_characteristic_label(&r.data),
                })
                .collect(),
        )
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

fn compose_object_label(object: &PtSchemeObject, activity_name: &str) -> String {
    format!("{} – {}", object.name_bg, activity_name)
}

fn compose_characteristic_label(characteristic: &Characteristic) -> String {
    format!("{} ({})", characteristic.name_bg, characteristic.unit)
        .trim()
        .to_string()
}

fn sorted(mut options: Vec<SelectOption>) -> Vec<SelectOption> {
    options.sort_by(|a, b| collate(&a.label, &b.label));
    options
}

// ===== Bulgarian collation =====

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Base letter without diacritics. Cyrillic keeps its marks since й is a
/// letter of its own; ѝ is a graphical variant of и.
fn fold(c: char) -> char {
    match c {
        'ѝ' => 'и',
        'Ѝ' => 'И',
        c if is_cyrillic(c) => c,
        c => std::iter::once(c).nfd().next().unwrap_or(c),
    }
}

/// Primary collation weight of one character
fn primary_weight(c: char) -> (u8, char) {
    let lower = fold(c).to_lowercase().next().unwrap_or(c);
    let class = if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if !c.is_alphanumeric() {
        1
    } else if is_cyrillic(lower) {
        3
    } else if lower.is_ascii_alphabetic() {
        4
    } else {
        5
    };
    (class, lower)
}

/// Compare two labels the way a Bulgarian-locale UI orders them.
///
/// Spaces, punctuation and digits sort before letters and Cyrillic sorts
/// before Latin. Accents and case are ignored at the primary level; among
/// otherwise equal labels the unaccented one wins, then lowercase.
/// Code point order of the lowercase Bulgarian alphabet already matches the
/// alphabet order, so no per-letter table is needed.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| {
            let accented = |c: char| fold(c) != c;
            a.chars().map(accented).cmp(b.chars().map(accented))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

// ===== Per-entity views =====

/// Reference-derived columns and form options of an entity page
pub trait Resolve: Entity {
    /// Collections the page must load to resolve its references
    const REFERENCES: &'static [EntityKind];

    /// Table cells derived from this record's references
    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String>;

    /// Options of the form's reference dropdown
    fn form_options(index: &ReferenceIndex<'_>, policy: &FilterPolicy) -> Vec<SelectOption>;
}

impl Resolve for Activity {
    const REFERENCES: &'static [EntityKind] = &[];

    fn reference_columns(&self, _index: &ReferenceIndex<'_>) -> Vec<String> {
        Vec::new()
    }

    fn form_options(_index: &ReferenceIndex<'_>, _policy: &FilterPolicy) -> Vec<SelectOption> {
        Vec::new()
    }
}

impl Resolve for PtSchemeObject {
    const REFERENCES: &'static [EntityKind] = &[EntityKind::Activity];

    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String> {
        vec![index.activity_name(self.activity_id).to_string()]
    }

    fn form_options(index: &ReferenceIndex<'_>, _policy: &FilterPolicy) -> Vec<SelectOption> {
        index.activity_options()
    }
}

impl Resolve for Characteristic {
    const REFERENCES: &'static [EntityKind] = &[EntityKind::PtSchemeObject, EntityKind::Activity];

    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String> {
        vec![index.object_label(self.pt_scheme_object_id)]
    }

    fn form_options(index: &ReferenceIndex<'_>, _policy: &FilterPolicy) -> Vec<SelectOption> {
        index.object_options()
    }
}

impl Resolve for Quantity {
    const REFERENCES: &'static [EntityKind] = &[EntityKind::PtSchemeObject, EntityKind::Activity];

    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String> {
        vec![index.object_label(self.pt_scheme_object_id)]
    }

    fn form_options(index: &ReferenceIndex<'_>, policy: &FilterPolicy) -> Vec<SelectOption> {
        index.quantity_object_options(policy)
    }
}

impl Resolve for Standard {
    const REFERENCES: &'static [EntityKind] = &[
        EntityKind::Characteristic,
        EntityKind::PtSchemeObject,
        EntityKind::Activity,
    ];

    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String> {
        vec![
            index.characteristic_name(self.characteristic_id).to_string(),
            index.characteristic_unit(self.characteristic_id).to_string(),
        ]
    }

    fn form_options(index: &ReferenceIndex<'_>, policy: &FilterPolicy) -> Vec<SelectOption> {
        index.standard_characteristic_options(policy)
    }
}

impl Resolve for Subcontractor {
    const REFERENCES: &'static [EntityKind] = &[EntityKind::PtSchemeObject, EntityKind::Activity];

    fn reference_columns(&self, index: &ReferenceIndex<'_>) -> Vec<String> {
        vec![index.object_labels(&self.pt_scheme_object_ids)]
    }

    fn form_options(index: &ReferenceIndex<'_>, _policy: &FilterPolicy) -> Vec<SelectOption> {
        index.object_options()
    }
}
