use std::fmt;

use chrono::NaiveDate;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

/// Candidate submission snapshot edited by the caller and read by the rule engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub dob: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub qualification: Option<Qualification>,
    #[serde(deserialize_with = "deserialize_optional_year")]
    pub graduation_year: Option<i32>,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub score: Option<f64>,
    pub score_mode: ScoreMode,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub screening_score: Option<f64>,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub interview_status: Option<InterviewStatus>,
    pub aadhaar_number: String,
    pub offer_letter_sent: bool,
}

/// Degrees accepted by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Qualification {
    #[serde(rename = "B.Tech")]
    BTech,
    #[serde(rename = "B.E.")]
    BE,
    #[serde(rename = "B.Sc")]
    BSc,
    #[serde(rename = "BCA")]
    Bca,
    #[serde(rename = "M.Tech")]
    MTech,
    #[serde(rename = "M.Sc")]
    MSc,
    #[serde(rename = "MCA")]
    Mca,
    #[serde(rename = "MBA")]
    Mba,
}

impl Qualification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BTech => "B.Tech",
            Self::BE => "B.E.",
            Self::BSc => "B.Sc",
            Self::Bca => "BCA",
            Self::MTech => "M.Tech",
            Self::MSc => "M.Sc",
            Self::Mca => "MCA",
            Self::Mba => "MBA",
        }
    }
}

/// Scale the academic score is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreMode {
    #[default]
    Percentage,
    #[serde(rename = "CGPA")]
    Cgpa,
}

/// Interview outcome recorded by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewStatus {
    Cleared,
    Waitlisted,
    Rejected,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleared => "Cleared",
            Self::Waitlisted => "Waitlisted",
            Self::Rejected => "Rejected",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Cleared" => Some(Self::Cleared),
            "Waitlisted" => Some(Self::Waitlisted),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Statuses that allow an offer letter to go out.
    pub const fn permits_offer(self) -> bool {
        matches!(self, Self::Cleared | Self::Waitlisted)
    }
}

/// Form fields that can carry a hard error or a policy exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Dob,
    Qualification,
    GraduationYear,
    Score,
    ScreeningScore,
    InterviewStatus,
    AadhaarNumber,
    OfferLetterSent,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::Qualification => "qualification",
            Self::GraduationYear => "graduationYear",
            Self::Score => "score",
            Self::ScreeningScore => "screeningScore",
            Self::InterviewStatus => "interviewStatus",
            Self::AadhaarNumber => "aadhaarNumber",
            Self::OfferLetterSent => "offerLetterSent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loosely typed numeric input: the form may send numbers or their text.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericInput {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

/// Parses the `YYYY-MM-DD` form used by record dates and CLI date flags.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(value) if !value.trim().is_empty() => parse_date(&value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Unset select inputs arrive as an empty string.
fn deserialize_optional_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let inner: serde::de::value::StringDeserializer<D::Error> =
                value.trim().to_string().into_deserializer();
            T::deserialize(inner).map(Some)
        }
        _ => Ok(None),
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumericInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumericInput::Integer(value)) => Ok(Some(value as f64)),
        Some(NumericInput::Decimal(value)) => Ok(Some(value)),
        Some(NumericInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a number")))
        }
    }
}

fn deserialize_optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumericInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumericInput::Integer(value)) => i32::try_from(value)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("year {value} out of range"))),
        Some(NumericInput::Decimal(value)) => Err(serde::de::Error::custom(format!(
            "year {value} must be a whole number"
        ))),
        Some(NumericInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i32>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a year")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_date_accepts_only_iso_dates() {
        assert_eq!(
            parse_date(" 2026-06-15 "),
            Ok(NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date"))
        );
        assert!(parse_date("15/06/2026").is_err());
    }

    #[test]
    fn record_accepts_numeric_text_and_blank_fields() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "fullName": "Asha Verma",
            "dob": "2001-04-12",
            "qualification": "B.Tech",
            "graduationYear": "2024",
            "score": "59.9",
            "scoreMode": "Percentage",
            "screeningScore": "",
            "interviewStatus": "Waitlisted",
            "offerLetterSent": true
        }))
        .expect("record deserializes");

        assert_eq!(record.full_name, "Asha Verma");
        assert_eq!(record.dob, NaiveDate::from_ymd_opt(2001, 4, 12));
        assert_eq!(record.qualification, Some(Qualification::BTech));
        assert_eq!(record.graduation_year, Some(2024));
        assert_eq!(record.score, Some(59.9));
        assert_eq!(record.screening_score, None);
        assert_eq!(record.interview_status, Some(InterviewStatus::Waitlisted));
        assert!(record.email.is_empty());
    }

    #[test]
    fn record_rejects_unknown_qualification() {
        let result = serde_json::from_value::<ApplicationRecord>(json!({
            "qualification": "PhD"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn record_rejects_non_numeric_score() {
        let result = serde_json::from_value::<ApplicationRecord>(json!({
            "score": "sixty"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_selects_read_as_unset() {
        let record: ApplicationRecord = serde_json::from_value(json!({
            "qualification": "",
            "interviewStatus": " "
        }))
        .expect("record deserializes");
        assert_eq!(record.qualification, None);
        assert_eq!(record.interview_status, None);
    }

    #[test]
    fn cgpa_mode_uses_uppercase_wire_name() {
        let mode: ScoreMode = serde_json::from_value(json!("CGPA")).expect("mode parses");
        assert_eq!(mode, ScoreMode::Cgpa);
        assert_eq!(Field::AadhaarNumber.to_string(), "aadhaarNumber");
    }
}
