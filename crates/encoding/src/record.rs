use serde::{Deserialize, Serialize};

/// The six categorical attributes of an event, in feature-vector block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    EventType,
    Venue,
    ScheduleSlot,
    Catering,
    Music,
    Decor,
}

/// The two numeric attributes, in feature-vector column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    GuestCount,
    Budget,
}

pub const CATEGORICAL_FIELDS: [CategoricalField; 6] = [
    CategoricalField::EventType,
    CategoricalField::Venue,
    CategoricalField::ScheduleSlot,
    CategoricalField::Catering,
    CategoricalField::Music,
    CategoricalField::Decor,
];

pub const NUMERIC_FIELDS: [NumericField; 2] = [NumericField::GuestCount, NumericField::Budget];

/// One event, as seen by the encoder. Categorical values are open-vocabulary
/// strings; unknown values are handled at transform time, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_type: String,
    pub venue: String,
    pub schedule_slot: String,
    pub catering: String,
    pub music: String,
    pub decor: String,
    pub guest_count: f64,
    pub budget: f64,
}

impl EventRecord {
    pub fn categorical(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::EventType => &self.event_type,
            CategoricalField::Venue => &self.venue,
            CategoricalField::ScheduleSlot => &self.schedule_slot,
            CategoricalField::Catering => &self.catering,
            CategoricalField::Music => &self.music,
            CategoricalField::Decor => &self.decor,
        }
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::GuestCount => self.guest_count,
            NumericField::Budget => self.budget,
        }
    }
}

/// A training row: the event plus its observed cost label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub record: EventRecord,
    pub actual_cost: f64,
}
