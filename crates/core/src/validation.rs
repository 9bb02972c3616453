//! # Form Validation
//!
//! Field rules shared by the public forms. Each rule records at most one
//! message per field into a [`FieldErrors`] map keyed by the field's wire
//! name, which the API returns verbatim so the front end can show messages
//! beside the matching inputs.
//!
//! The booking, inquiry and newsletter forms differ only in which rules they
//! run and what they say on success; [`FormVariant`] carries those
//! differences.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::gallery::{cdn_url, CreateGalleryItemRequest, UpdateGalleryItemRequest};
use crate::models::inquiry::CreateInquiryRequest;

pub const MAX_INSPIRATION_PHOTOS: usize = 3;
pub const MIN_PHONE_DIGITS: usize = 10;
pub const MIN_DESIGN_DESCRIPTION_CHARS: usize = 10;

static FORM_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"));
static NEWSLETTER_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn extend(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn check_name(errors: &mut FieldErrors, name: &str) {
    if name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
}

pub fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !FORM_EMAIL.is_match(email) {
        errors.add("email", "Valid email is required");
    }
}

/// Phone numbers are accepted in any punctuation as long as enough digits remain
pub fn check_phone(errors: &mut FieldErrors, phone: &str) {
    if phone.trim().is_empty() {
        errors.add("phone", "Phone number is required");
        return;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        errors.add("phone", "Valid phone number is required");
    }
}

pub fn check_photos(errors: &mut FieldErrors, photos: &[String]) {
    if photos.len() > MAX_INSPIRATION_PHOTOS {
        errors.add("inspiration_photos", "Maximum 3 photos allowed");
    }
}

pub fn check_design_description(errors: &mut FieldErrors, description: &str) {
    if description.trim().is_empty() {
        errors.add("design_description", "Design description is required");
    } else if description.chars().count() < MIN_DESIGN_DESCRIPTION_CHARS {
        errors.add(
            "design_description",
            "Please provide more details about your design",
        );
    }
}

pub fn check_newsletter_email(errors: &mut FieldErrors, email: &str) {
    if !NEWSLETTER_EMAIL.is_match(email) {
        errors.add("email", "Please enter a valid email address");
    }
}

/// The public forms, with the configuration that sets them apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    Booking,
    Inquiry,
    Newsletter,
}

impl FormVariant {
    /// Wire names of the fields the form collects
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Booking => &[
                "name",
                "email",
                "phone",
                "service_tier",
                "nail_shape",
                "nail_length",
                "date",
                "time",
                "inspiration_photos",
                "notes",
            ],
            Self::Inquiry => &["name", "email", "design_description", "inspiration_photos"],
            Self::Newsletter => &["email"],
        }
    }

    pub fn accepts_photos(&self) -> bool {
        !matches!(self, Self::Newsletter)
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Booking => {
                "Thank you for your booking request. We'll review your preferred date and time \
                 and get back to you within 24 hours to confirm your appointment."
            }
            Self::Inquiry => {
                "Thank you for your interest in a custom nail design. Kizko will review your \
                 request and contact you within 48 hours to discuss your design in more detail."
            }
            Self::Newsletter => "Thank you for subscribing!",
        }
    }
}

pub fn validate_inquiry(request: &CreateInquiryRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &request.name);
    check_email(&mut errors, &request.email);
    check_design_description(&mut errors, &request.design_description);
    check_photos(&mut errors, &request.inspiration_photos);
    errors.into_result()
}

pub fn validate_subscription(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_newsletter_email(&mut errors, email);
    errors.into_result()
}

/// Validates a new gallery entry and resolves the URL it will be served from
pub fn validate_gallery_item(
    request: &CreateGalleryItemRequest,
    cloud_name: &str,
) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();
    if request.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }

    let explicit_url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let cdn_asset = request
        .public_id
        .as_deref()
        .zip(request.version.as_deref())
        .filter(|(id, version)| !id.trim().is_empty() && !version.trim().is_empty());

    let url = match (explicit_url, cdn_asset) {
        (Some(url), _) => Some(url.to_string()),
        (None, Some((public_id, version))) => Some(cdn_url(
            cloud_name,
            request.resource_type,
            version.trim(),
            public_id.trim(),
        )),
        (None, None) => {
            errors.add("url", "Please upload an image");
            None
        }
    };

    errors.into_result()?;
    Ok(url.unwrap_or_default())
}

pub fn validate_gallery_update(request: &UpdateGalleryItemRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if request.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.add("title", "Title is required");
    }
    if request.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
        errors.add("url", "Please upload an image");
    }
    errors.into_result()
}
