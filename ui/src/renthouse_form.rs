//! State behind the renthouse editor form.
//!
//! Inputs are kept as the strings the user typed. Nothing is converted to a
//! number until [`RenthouseForm::validate`] produces a
//! [`requests::CreateRenthouse`], so a half-typed value like `12.` never
//! gets silently rewritten.

use payloads::{
    Renthouse,
    requests::{self, ADDRESS_MAX_LEN, IMAGE_URL_MAX_LEN, NAME_MAX_LEN},
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    Latitude,
    Longitude,
    Address,
    BaseRent,
    WaterFee,
    ElectricityFee,
    ImageUrl,
    QrCodeImage,
}

/// Raw form values, one string per input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenthouseForm {
    pub name: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub base_rent: String,
    pub water_fee: String,
    pub electricity_fee: String,
    pub image_url: String,
    pub qr_code_image: String,
}

impl RenthouseForm {
    /// Form values for an existing renthouse, numbers in their string form.
    pub fn from_renthouse(renthouse: &Renthouse) -> Self {
        Self {
            name: renthouse.name.clone(),
            description: renthouse.description.clone().unwrap_or_default(),
            latitude: renthouse.latitude.to_string(),
            longitude: renthouse.longitude.to_string(),
            address: renthouse.address.clone(),
            base_rent: renthouse.base_rent.to_string(),
            water_fee: renthouse.water_fee.to_string(),
            electricity_fee: renthouse.electricity_fee.to_string(),
            image_url: renthouse.image_url.clone().unwrap_or_default(),
            qr_code_image: renthouse.qr_code_image.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
            Field::Address => &mut self.address,
            Field::BaseRent => &mut self.base_rent,
            Field::WaterFee => &mut self.water_fee,
            Field::ElectricityFee => &mut self.electricity_fee,
            Field::ImageUrl => &mut self.image_url,
            Field::QrCodeImage => &mut self.qr_code_image,
        };
        *slot = value;
    }

    /// Check every field and build the request body, or collect one error
    /// per failing field.
    pub fn validate(&self) -> Result<requests::CreateRenthouse, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(Field::Name, "Property name is required");
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.insert(Field::Name, "Name too long");
        }

        let latitude = required(
            &mut errors,
            Field::Latitude,
            &self.latitude,
            "Latitude is required",
        )
        .and_then(|value| {
            let parsed = requests::parse_latitude(value);
            if parsed.is_none() {
                errors.insert(Field::Latitude, "Invalid latitude");
            }
            parsed
        });

        let longitude = required(
            &mut errors,
            Field::Longitude,
            &self.longitude,
            "Longitude is required",
        )
        .and_then(|value| {
            let parsed = requests::parse_longitude(value);
            if parsed.is_none() {
                errors.insert(Field::Longitude, "Invalid longitude");
            }
            parsed
        });

        let address = self.address.trim();
        if address.is_empty() {
            errors.insert(Field::Address, "Address is required");
        } else if address.chars().count() > ADDRESS_MAX_LEN {
            errors.insert(Field::Address, "Address too long");
        }

        let base_rent = money(
            &mut errors,
            Field::BaseRent,
            &self.base_rent,
            "Base rent is required",
            "Invalid base rent format",
        );
        let water_fee = money(
            &mut errors,
            Field::WaterFee,
            &self.water_fee,
            "Water fee is required",
            "Invalid water fee format",
        );
        let electricity_fee = money(
            &mut errors,
            Field::ElectricityFee,
            &self.electricity_fee,
            "Electricity fee is required",
            "Invalid electricity fee format",
        );

        if self.image_url.chars().count() > IMAGE_URL_MAX_LEN {
            errors.insert(Field::ImageUrl, "Image URL too long");
        }
        if self.qr_code_image.chars().count() > IMAGE_URL_MAX_LEN {
            errors.insert(Field::QrCodeImage, "QR Code image URL too long");
        }

        match (latitude, longitude, base_rent, water_fee, electricity_fee) {
            (
                Some(latitude),
                Some(longitude),
                Some(base_rent),
                Some(water_fee),
                Some(electricity_fee),
            ) if errors.is_empty() => Ok(requests::CreateRenthouse {
                name: name.to_string(),
                description: non_empty(&self.description),
                latitude,
                longitude,
                address: address.to_string(),
                base_rent,
                water_fee,
                electricity_fee,
                image_url: non_empty(&self.image_url),
                qr_code_image: non_empty(&self.qr_code_image),
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    errors: &mut FieldErrors,
    field: Field,
    value: &'a str,
    message: &'static str,
) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(value)
    }
}

fn money(
    errors: &mut FieldErrors,
    field: Field,
    value: &str,
    missing: &'static str,
    invalid: &'static str,
) -> Option<Decimal> {
    let value = required(errors, field, value, missing)?;
    let parsed = requests::is_money_amount(value)
        .then(|| value.parse::<Decimal>().ok())
        .flatten();
    if parsed.is_none() {
        errors.insert(field, invalid);
    }
    parsed
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Inline error text, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

/// The two independent image uploads on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Property,
    QrCode,
}

impl ImageSlot {
    /// Form field holding the uploaded path for this slot.
    pub fn field(self) -> Field {
        match self {
            Self::Property => Field::ImageUrl,
            Self::QrCode => Field::QrCodeImage,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Property => "Property Image (Optional)",
            Self::QrCode => "QR Code Image (Optional)",
        }
    }

    pub fn upload_label(self) -> &'static str {
        match self {
            Self::Property => "Upload Property Image",
            Self::QrCode => "Upload QR Code Image",
        }
    }

    pub fn alt_text(self) -> &'static str {
        match self {
            Self::Property => "Property preview",
            Self::QrCode => "QR Code preview",
        }
    }

    pub fn input_id(self) -> &'static str {
        match self {
            Self::Property => "property-image-upload",
            Self::QrCode => "qr-image-upload",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageState {
    pub preview_url: Option<String>,
    pub uploading: bool,
}

/// Everything the editor page renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    pub form: RenthouseForm,
    pub errors: FieldErrors,
    pub property_image: ImageState,
    pub qr_code_image: ImageState,
    pub saving: bool,
}

impl EditorState {
    /// Prefilled state for an existing renthouse. `asset_url` turns stored
    /// image paths into preview URLs.
    pub fn from_renthouse(
        renthouse: &Renthouse,
        asset_url: impl Fn(&str) -> String,
    ) -> Self {
        let preview = |path: &Option<String>| {
            path.as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| asset_url(p))
        };

        Self {
            form: RenthouseForm::from_renthouse(renthouse),
            property_image: ImageState {
                preview_url: preview(&renthouse.image_url),
                uploading: false,
            },
            qr_code_image: ImageState {
                preview_url: preview(&renthouse.qr_code_image),
                uploading: false,
            },
            ..Self::default()
        }
    }

    pub fn image(&self, slot: ImageSlot) -> &ImageState {
        match slot {
            ImageSlot::Property => &self.property_image,
            ImageSlot::QrCode => &self.qr_code_image,
        }
    }

    fn image_mut(&mut self, slot: ImageSlot) -> &mut ImageState {
        match slot {
            ImageSlot::Property => &mut self.property_image,
            ImageSlot::QrCode => &mut self.qr_code_image,
        }
    }

    pub fn uploading(&self) -> bool {
        self.property_image.uploading || self.qr_code_image.uploading
    }

    /// Inputs and buttons are locked while a save or any upload is running.
    pub fn controls_disabled(&self) -> bool {
        self.saving || self.uploading()
    }
}

pub enum EditorAction {
    /// Replace everything, e.g. once an existing renthouse has loaded.
    Reset(EditorState),
    Edit(Field, String),
    Invalid(FieldErrors),
    SaveStarted,
    SaveFinished,
    UploadStarted(ImageSlot),
    Uploaded {
        slot: ImageSlot,
        path: String,
        preview_url: String,
    },
    UploadFailed(ImageSlot),
    RemoveImage(ImageSlot),
    LocationDetected {
        latitude: f64,
        longitude: f64,
    },
}

impl Reducible for EditorState {
    type Action = EditorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();

        match action {
            EditorAction::Reset(new_state) => state = new_state,
            EditorAction::Edit(field, value) => {
                state.form.set(field, value);
                state.errors.clear(field);
            }
            EditorAction::Invalid(errors) => state.errors = errors,
            EditorAction::SaveStarted => state.saving = true,
            EditorAction::SaveFinished => state.saving = false,
            EditorAction::UploadStarted(slot) => {
                state.image_mut(slot).uploading = true;
            }
            EditorAction::Uploaded {
                slot,
                path,
                preview_url,
            } => {
                state.form.set(slot.field(), path);
                state.errors.clear(slot.field());
                let image = state.image_mut(slot);
                image.preview_url = Some(preview_url);
                image.uploading = false;
            }
            EditorAction::UploadFailed(slot) => {
                state.image_mut(slot).uploading = false;
            }
            EditorAction::RemoveImage(slot) => {
                state.form.set(slot.field(), String::new());
                state.image_mut(slot).preview_url = None;
            }
            EditorAction::LocationDetected {
                latitude,
                longitude,
            } => {
                state.form.latitude = latitude.to_string();
                state.form.longitude = longitude.to_string();
                state.form.address.clear();
                state.errors.clear(Field::Latitude);
                state.errors.clear(Field::Longitude);
            }
        }

        Rc::new(state)
    }
}
