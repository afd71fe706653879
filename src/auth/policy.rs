use lazy_static::lazy_static;
use regex::Regex;
use time::Date;

use crate::auth::dto::SignupRequest;
use crate::auth::repo::{Gender, MembershipStatus, DATE_FORMAT};
use crate::error::ApiError;

/// Signup payload after validation, with enums and dates parsed.
#[derive(Debug)]
pub struct ValidSignup {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone_number: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub membership_status: MembershipStatus,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn require(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::Validation(message.to_string())),
    }
}

fn check_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ApiError::Validation(
            "Password must contain an uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Password must contain a digit".to_string(),
        ));
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ApiError::Validation(
            "Password must contain a special character".to_string(),
        ));
    }
    Ok(())
}

/// Checks every signup field and normalizes the ones we store.
/// Emails are compared and persisted in trimmed lowercase form.
pub fn validate_signup(req: SignupRequest) -> Result<ValidSignup, ApiError> {
    let email = require(req.email, "Email is required")?.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email".to_string()));
    }

    let password = req.password.unwrap_or_default();
    check_password(&password)?;

    let name = require(req.name, "Name is required")?.trim().to_string();

    let phone_number = require(req.phone_number, "Phone number is required")?
        .trim()
        .to_string();
    if phone_number.len() < 10 || !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::Validation(
            "Phone number must be at least 10 digits".to_string(),
        ));
    }

    let gender_raw = require(req.gender, "Gender is required")?;
    let gender = Gender::parse(gender_raw.trim()).ok_or_else(|| {
        ApiError::Validation("Gender must be one of: male, female, other".to_string())
    })?;

    let dob_raw = require(req.date_of_birth, "Date of birth is required")?;
    let date_of_birth = Date::parse(dob_raw.trim(), DATE_FORMAT).map_err(|_| {
        ApiError::Validation("Date of birth must be a valid date (YYYY-MM-DD)".to_string())
    })?;

    let membership_status = match req.membership_status {
        Some(raw) => MembershipStatus::parse(raw.trim()).ok_or_else(|| {
            ApiError::Validation("Membership status must be one of: standard, premium".to_string())
        })?,
        None => MembershipStatus::default(),
    };

    Ok(ValidSignup {
        email,
        password,
        name,
        phone_number,
        gender,
        date_of_birth,
        membership_status,
    })
}
