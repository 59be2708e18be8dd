use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

const INVALID_PHONE: &str = "Nomor telepon harus berupa angka.";

/// The contact form as posted by the browser. Missing inputs arrive empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub phone: String,

    /// Shown on the form only; the `person` table has no column for it.
    pub subject: String,

    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub phone: i32,
    pub message: String,
}

impl TryFrom<ContactForm> for ContactInsert {
    type Error = AppError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let phone = parse_phone(&form.phone).ok_or_else(|| AppError::ValidationError {
            message: INVALID_PHONE.into(),
            detail: Some(format!("phone: {}", form.phone)),
        })?;

        Ok(ContactInsert {
            name: form.name,
            email: form.email,
            phone,
            message: form.message,
        })
    }
}

/// Reads a leading base-10 integer the way browsers' `parseInt` does:
/// surrounding whitespace and trailing garbage are ignored, an optional sign
/// is honoured, and input without leading digits is rejected. Values outside
/// the `INTEGER` column range are rejected too.
pub fn parse_phone(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}
