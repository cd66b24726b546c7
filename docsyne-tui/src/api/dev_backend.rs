use doctor_directory::{DirectoryFetchError, DoctorRecord, FetchFailure};
use std::time::Duration;

/// Delay before the sample listing "arrives", so the loading state shows.
const DEV_LATENCY: Duration = Duration::from_millis(600);

/// Sample listing in the same shape the real endpoint serves, quirks included:
/// numeric ids, bare-string specialties, textual null photos and one
/// duplicated id.
const SAMPLE_LISTING: &str = r#"[
  {
    "id": "111",
    "name": "Dr. Anita Sharma",
    "name_initials": "AS",
    "photo": "null",
    "doctor_introduction": "Family dentist with a focus on painless procedures.",
    "specialities": [{ "name": "Dentist" }],
    "fees": "₹ 500",
    "experience": "13 Years of experience",
    "languages": ["English", "Hindi"],
    "clinic": { "name": "Smile Care Clinic", "address": { "locality": "Koramangala", "city": "Bangalore" } },
    "video_consult": true,
    "in_clinic": true
  },
  {
    "id": 112,
    "name": "Dr. Vikram Rao",
    "specialities": [{ "name": "Cardiologist" }, { "name": "General Physician" }],
    "fees": "₹ 800",
    "experience": "22 Years of experience",
    "languages": ["English", "Kannada"],
    "clinic": { "name": "Heartline Hospital", "address": { "locality": "Jayanagar", "city": "Bangalore" } },
    "video_consult": false,
    "in_clinic": true
  },
  {
    "id": "113",
    "name": "Dr. Meera Nair",
    "photo": "https://example.org/photos/meera-nair.jpg",
    "specialities": [{ "name": "Dermatologist" }],
    "fees": "₹ 650",
    "experience": "9 Years of experience",
    "video_consult": true,
    "in_clinic": false
  },
  {
    "id": "114",
    "name": "Dr. Arjun Mehta",
    "specialities": ["Paediatrician", "General Physician"],
    "fees": "₹ 400",
    "experience": "6 Years of experience",
    "clinic": { "name": "Little Steps", "address": { "locality": "Indiranagar", "city": "Bangalore" } },
    "video_consult": true,
    "in_clinic": true
  },
  {
    "id": "115",
    "name": "Dr. Shanti Iyer",
    "photo": "",
    "specialities": [{ "name": "Homeopath" }, { "name": "Reiki" }],
    "fees": "₹ 300",
    "experience": "17 Years of experience",
    "video_consult": false,
    "in_clinic": true
  },
  {
    "id": "116",
    "name": "Dr. Rahul Verma",
    "photo": "undefined",
    "specialities": [{ "name": "Orthopaedic" }],
    "fees": "₹ 900",
    "experience": "25 Years of experience",
    "video_consult": true,
    "in_clinic": true
  },
  {
    "id": "117",
    "name": "Dr. Kavya Reddy",
    "specialities": [{ "name": "Gynaecologist" }, { "name": "Endocrinologist" }],
    "fees": "₹ 700",
    "experience": "11 Years of experience",
    "video_consult": true,
    "in_clinic": false
  },
  {
    "id": "118",
    "name": "Dr. Sanjay Gupta",
    "specialities": [{ "name": "ENT" }],
    "fees": "Free first visit",
    "experience": "4 Years of experience",
    "video_consult": false,
    "in_clinic": true
  },
  {
    "id": "119",
    "name": "Dr. Priya Menon",
    "specialities": [{ "name": "Psychiatrist" }, { "name": "Psychologist" }],
    "fees": "₹ 1200",
    "experience": "15 Years of experience",
    "video_consult": true,
    "in_clinic": true
  },
  {
    "id": "120",
    "name": "Dr. Farhan Qureshi",
    "specialities": [{ "name": "Ayurveda" }, { "name": "Dietitian/Nutritionist" }],
    "fees": "₹ 350",
    "experience": "8 Years of experience",
    "video_consult": true,
    "in_clinic": false
  },
  {
    "id": "113",
    "name": "Dr. Meera Nair",
    "specialities": [{ "name": "Dermatologist" }],
    "fees": "₹ 650",
    "experience": "9 Years of experience",
    "video_consult": true,
    "in_clinic": false
  }
]"#;

#[derive(Debug, Clone, Default)]
pub struct DevBackend;

impl DevBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn fetch_doctors(&self) -> Result<Vec<DoctorRecord>, FetchFailure> {
        tokio::time::sleep(DEV_LATENCY).await;
        sample_doctors().map_err(|error| FetchFailure { error, attempts: 1 })
    }
}

fn sample_doctors() -> Result<Vec<DoctorRecord>, DirectoryFetchError> {
    serde_json::from_str(SAMPLE_LISTING)
        .map_err(|e| DirectoryFetchError::Parsing(format!("Invalid sample listing: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_listing_parses() {
        let doctors = sample_doctors().unwrap();
        assert_eq!(doctors.len(), 11);
        assert_eq!(doctors[1].id, "112");
        assert_eq!(doctors[0].photo_url(), None);
        assert_eq!(doctors[2].photo_url(), Some("https://example.org/photos/meera-nair.jpg"));
        assert_eq!(
            doctors[3].speciality_names().collect::<Vec<_>>(),
            vec!["Paediatrician", "General Physician"]
        );
    }
}
