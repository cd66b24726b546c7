use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::{leading_magnitude, Speciality};

/// Photo values the listing uses to mean "no photo".
const PHOTO_NULL_MARKERS: [&str; 3] = ["", "null", "undefined"];

/// A doctor as served by the directory listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DoctorRecord {
    #[serde(deserialize_with = "id_from_wire")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fees: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_clinic: bool,
    #[serde(default, deserialize_with = "photo_from_wire")]
    pub photo: Option<String>,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub clinic: Option<Clinic>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ClinicAddress>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ClinicAddress {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl DoctorRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialities: Vec::new(),
            experience: String::new(),
            fees: String::new(),
            video_consult: false,
            in_clinic: false,
            photo: None,
            name_initials: None,
            doctor_introduction: None,
            languages: Vec::new(),
            clinic: None,
        }
    }

    pub fn with_fees(mut self, fees: impl Into<String>) -> Self {
        self.fees = fees.into();
        self
    }

    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = experience.into();
        self
    }

    pub fn with_specialities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialities = names.into_iter().map(Speciality::new).collect();
        self
    }

    pub fn with_modes(mut self, video_consult: bool, in_clinic: bool) -> Self {
        self.video_consult = video_consult;
        self.in_clinic = in_clinic;
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = normalize_photo(Some(photo.into()));
        self
    }

    pub fn with_clinic(mut self, name: impl Into<String>, locality: impl Into<String>) -> Self {
        self.clinic = Some(Clinic {
            name: Some(name.into()),
            address: Some(ClinicAddress {
                locality: Some(locality.into()),
                city: None,
            }),
        });
        self
    }

    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    /// True if any of this doctor's specialties is in `selected`.
    pub fn has_any_speciality(&self, selected: &BTreeSet<String>) -> bool {
        self.speciality_names().any(|name| selected.contains(name))
    }

    pub fn fee_magnitude(&self) -> u64 {
        leading_magnitude(&self.fees)
    }

    pub fn experience_magnitude(&self) -> u64 {
        leading_magnitude(&self.experience)
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    /// Initials to show in place of a missing photo.
    pub fn initials(&self) -> String {
        if let Some(initials) = self.name_initials.as_deref().map(str::trim) {
            if !initials.is_empty() {
                return initials.to_string();
            }
        }

        self.name
            .split_whitespace()
            .filter(|word| !word.eq_ignore_ascii_case("dr.") && !word.eq_ignore_ascii_case("dr"))
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// "Clinic name, Locality" when the listing carries clinic details.
    pub fn clinic_summary(&self) -> Option<String> {
        let clinic = self.clinic.as_ref()?;
        let locality = clinic
            .address
            .as_ref()
            .and_then(|a| a.locality.as_deref().or(a.city.as_deref()));
        match (clinic.name.as_deref(), locality) {
            (Some(name), Some(locality)) => Some(format!("{}, {}", name, locality)),
            (Some(name), None) => Some(name.to_string()),
            (None, Some(locality)) => Some(locality.to_string()),
            (None, None) => None,
        }
    }
}

fn normalize_photo(photo: Option<String>) -> Option<String> {
    photo
        .map(|p| p.trim().to_string())
        .filter(|p| !PHOTO_NULL_MARKERS.contains(&p.as_str()))
}

fn photo_from_wire<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(normalize_photo)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

fn id_from_wire<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireId::deserialize(deserializer)? {
        WireId::Text(id) => id,
        WireId::Number(id) => id.to_string(),
    })
}
