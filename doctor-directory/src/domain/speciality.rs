use serde::{Deserialize, Serialize};

/// Specialties offered by the filter panel, in display order.
pub const SPECIALTY_CATALOGUE: [&str; 24] = [
    "General Physician",
    "Dentist",
    "Dermatologist",
    "Paediatrician",
    "Gynaecologist",
    "ENT",
    "Diabetologist",
    "Cardiologist",
    "Physiotherapist",
    "Endocrinologist",
    "Orthopaedic",
    "Ophthalmologist",
    "Gastroenterologist",
    "Pulmonologist",
    "Psychiatrist",
    "Urologist",
    "Dietitian/Nutritionist",
    "Psychologist",
    "Sexologist",
    "Nephrologist",
    "Neurologist",
    "Oncologist",
    "Ayurveda",
    "Homeopath",
];

/// A specialty attached to a doctor.
///
/// The listing serves these as `{ "name": "Dentist" }` objects; bare strings
/// are accepted too. Names are trimmed so they compare equal to the names a
/// filter selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireSpeciality")]
pub struct Speciality {
    pub name: String,
}

impl Speciality {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireSpeciality {
    Named { name: String },
    Bare(String),
}

impl From<WireSpeciality> for Speciality {
    fn from(wire: WireSpeciality) -> Self {
        match wire {
            WireSpeciality::Named { name } | WireSpeciality::Bare(name) => Self {
                name: name.trim().to_string(),
            },
        }
    }
}
