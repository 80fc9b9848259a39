use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

/// Largest image the upload endpoint accepts (5MB).
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

/// Id type wrapper helps ensure we don't mix up ids for different resources.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RenthouseId(pub i64);

impl std::str::FromStr for RenthouseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A rental property as stored by the backend.
///
/// Image fields hold paths returned by the upload endpoint, not full URLs.
/// Use [`APIClient::asset_url`] to turn them into something displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renthouse {
    pub id: RenthouseId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub base_rent: Decimal,
    pub water_fee: Decimal,
    pub electricity_fee: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub qr_code_image: Option<String>,
}
