use crate::MAX_IMAGE_SIZE;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const NAME_MAX_LEN: usize = 100;
pub const ADDRESS_MAX_LEN: usize = 255;
pub const IMAGE_URL_MAX_LEN: usize = 2000;

/// Non-negative amount with at most two decimal places, as the backend
/// validates water and electricity fees.
static MONEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());

/// Whether `value` is a money amount the backend will accept, e.g. `12` or
/// `12.50`. Signs, exponents and more than two decimals are rejected.
pub fn is_money_amount(value: &str) -> bool {
    MONEY_PATTERN.is_match(value)
}

/// Parse a coordinate and check it lies within `-limit..=limit`.
pub fn parse_coordinate(value: &str, limit: f64) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    (parsed.is_finite() && parsed.abs() <= limit).then_some(parsed)
}

pub fn parse_latitude(value: &str) -> Option<f64> {
    parse_coordinate(value, 90.0)
}

pub fn parse_longitude(value: &str) -> Option<f64> {
    parse_coordinate(value, 180.0)
}

/// Body for both creating and updating a renthouse.
///
/// Water and electricity fees go over the wire as strings because the
/// backend pattern-checks them; base rent is a plain JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRenthouse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_rent: Decimal,
    pub water_fee: Decimal,
    pub electricity_fee: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
}

/// A file picked by the user, ready to send to the upload endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Result of checking a selected file before it is uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageValidation {
    Valid,
    NotAnImage,
    TooLarge,
}

impl ImageValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::NotAnImage => Some("Please select a valid image file"),
            Self::TooLarge => Some("Image size must be less than 5MB"),
        }
    }
}

/// Validate a file by its reported MIME type and size in bytes.
///
/// Rules:
/// - MIME type must start with `image/`
/// - At most [`MAX_IMAGE_SIZE`] bytes
pub fn validate_image(content_type: &str, size: u64) -> ImageValidation {
    if !content_type.starts_with("image/") {
        return ImageValidation::NotAnImage;
    }
    if size > MAX_IMAGE_SIZE {
        return ImageValidation::TooLarge;
    }
    ImageValidation::Valid
}
