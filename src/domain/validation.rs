//! Client-side checks for the registration form.
//!
//! The server validates again; these checks exist so the form can
//! refuse a submission early with the same messages the portal uses.

use super::models::{CollegeSelection, SignupPayload};

const NMAMIT_COLLEGE_ID: u64 = 1;
const MIN_GRADUATION_YEAR: u32 = 1950;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub selection: Option<CollegeSelection>,
    pub college_id: Option<u64>,
    pub year_of_graduation: String,
}

/// Validates the form and builds the signup payload.
///
/// All failing fields are reported at once. `current_year` bounds the
/// graduation year for alumni; callers outside tests pass
/// [`current_year`]'s value.
pub fn validate_registration(
    form: &RegistrationForm,
    current_year: u32,
) -> Result<SignupPayload, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    let email = form.email.trim();
    if !is_plausible_email(email) {
        errors.push(FieldError::new("email", "Invalid email"));
    }

    if form.password.len() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if form.confirm_password != form.password {
        errors.push(FieldError::new("confirmPassword", "Passwords must match"));
    }

    let phone = form.phone_number.trim();
    if phone.len() < 7 {
        errors.push(FieldError::new("phoneNumber", "Phone number is required"));
    }

    let selection = match form.selection {
        Some(selection) => selection,
        None => {
            errors.push(FieldError::new("selection", "Choose a category"));
            return Err(errors);
        }
    };

    let mut college_id = NMAMIT_COLLEGE_ID;
    let mut year_of_graduation = None;

    match selection {
        CollegeSelection::Nmamit => {}
        CollegeSelection::Other => match form.college_id {
            Some(id) if id != NMAMIT_COLLEGE_ID => college_id = id,
            _ => {
                errors.push(FieldError::new(
                    "collegeId",
                    "Select a college other than NMAMIT",
                ));
            }
        },
        CollegeSelection::Alumni => {
            let raw = form.year_of_graduation.trim();
            if raw.is_empty() {
                errors.push(FieldError::new(
                    "yearOfGraduation",
                    "Year of graduation is required",
                ));
            } else {
                match raw.parse::<u32>() {
                    Ok(year) if (MIN_GRADUATION_YEAR..=current_year + 10).contains(&year) => {
                        year_of_graduation = Some(year);
                    }
                    _ => {
                        errors.push(FieldError::new(
                            "yearOfGraduation",
                            format!(
                                "Year of graduation must be between {} and {}",
                                MIN_GRADUATION_YEAR,
                                current_year + 10
                            ),
                        ));
                    }
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SignupPayload {
        name: name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
        phone_number: phone.to_string(),
        college_id,
        year_of_graduation,
    })
}

/// Current calendar year approximated from the system clock.
///
/// Accurate to within hours of new year, which is enough for the
/// graduation year bound.
pub fn current_year() -> u32 {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    1970 + (secs / 31_557_600) as u32
}

fn is_plausible_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
