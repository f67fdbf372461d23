use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::super::domain::{ApplicationRecord, Field, InterviewStatus, ScoreMode};
use super::policy::PolicyConfig;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn hard_errors(record: &ApplicationRecord) -> BTreeMap<Field, String> {
    let mut errors = BTreeMap::new();

    if let Some(message) = full_name_error(&record.full_name) {
        errors.insert(Field::FullName, message);
    }
    if let Some(message) = email_error(&record.email) {
        errors.insert(Field::Email, message);
    }
    if let Some(message) = phone_error(&record.phone) {
        errors.insert(Field::Phone, message);
    }
    if record.qualification.is_none() {
        errors.insert(Field::Qualification, "Qualification is required".to_string());
    }
    if let Some(message) = aadhaar_error(&record.aadhaar_number) {
        errors.insert(Field::AadhaarNumber, message);
    }

    if record.offer_letter_sent
        && !record
            .interview_status
            .map(InterviewStatus::permits_offer)
            .unwrap_or(false)
    {
        errors.insert(
            Field::OfferLetterSent,
            "Offer letter can only be sent to Cleared or Waitlisted candidates".to_string(),
        );
    }

    if record.interview_status == Some(InterviewStatus::Rejected) {
        errors.insert(
            Field::InterviewStatus,
            "Rejected candidates cannot be admitted".to_string(),
        );
    }

    errors
}

fn full_name_error(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        Some("Full name is required".to_string())
    } else if name.chars().count() < 2 {
        Some("Full name must be at least 2 characters".to_string())
    } else if name.chars().any(|c| c.is_ascii_digit()) {
        Some("Full name must not contain digits".to_string())
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !email_pattern().is_match(email) {
        Some("Enter a valid email address".to_string())
    } else {
        None
    }
}

fn phone_error(phone: &str) -> Option<String> {
    if phone.trim().is_empty() {
        Some("Phone number is required".to_string())
    } else if !is_digits(phone, 10) {
        Some("Phone number must be exactly 10 digits".to_string())
    } else if !matches!(phone.as_bytes()[0], b'6'..=b'9') {
        Some("Phone number must start with 6, 7, 8 or 9".to_string())
    } else {
        None
    }
}

fn aadhaar_error(aadhaar: &str) -> Option<String> {
    if aadhaar.trim().is_empty() {
        Some("Aadhaar number is required".to_string())
    } else if !is_digits(aadhaar, 12) {
        Some("Aadhaar number must be exactly 12 digits".to_string())
    } else {
        None
    }
}

pub(crate) fn policy_exceptions(
    record: &ApplicationRecord,
    policy: &PolicyConfig,
    today: NaiveDate,
) -> BTreeMap<Field, String> {
    let mut exceptions = BTreeMap::new();

    if let Some(dob) = record.dob {
        let age = age_on(dob, today);
        if age < i64::from(policy.min_age) {
            exceptions.insert(
                Field::Dob,
                format!(
                    "Candidate is {age} years old, below the minimum age of {}",
                    policy.min_age
                ),
            );
        }
    }

    if let Some(year) = record.graduation_year {
        let latest = i64::from(today.year()) + i64::from(policy.max_future_grad_years);
        if i64::from(year) > latest {
            exceptions.insert(
                Field::GraduationYear,
                format!(
                    "Graduation year {year} is more than {} year(s) ahead (latest allowed {latest})",
                    policy.max_future_grad_years
                ),
            );
        }
    }

    if let Some(score) = record.score {
        match record.score_mode {
            ScoreMode::Percentage if score < policy.min_percentage => {
                exceptions.insert(
                    Field::Score,
                    format!(
                        "Percentage {score} is below the minimum of {}%",
                        policy.min_percentage
                    ),
                );
            }
            ScoreMode::Cgpa if score < policy.min_cgpa => {
                exceptions.insert(
                    Field::Score,
                    format!("CGPA {score} is below the minimum of {}", policy.min_cgpa),
                );
            }
            _ => {}
        }
    }

    if let Some(score) = record.screening_score {
        if score < policy.min_screening_score {
            exceptions.insert(
                Field::ScreeningScore,
                format!(
                    "Screening score {score} is below the minimum of {}",
                    policy.min_screening_score
                ),
            );
        }
    }

    exceptions
}

/// Whole years elapsed between `dob` and `today`, negative for future dates.
pub(crate) fn age_on(dob: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
