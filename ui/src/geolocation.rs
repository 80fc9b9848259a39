//! Device location through the browser's Geolocation API.

use js_sys::{Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// `PositionError.PERMISSION_DENIED`
const PERMISSION_DENIED: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by this browser")]
    Unsupported,
    #[error("Unable to get your location")]
    Denied,
    #[error("Unable to get your location")]
    Unavailable,
}

impl GeolocationError {
    /// Map a `PositionError.code` onto an error.
    pub fn from_code(code: u16) -> Self {
        if code == PERMISSION_DENIED {
            Self::Denied
        } else {
            Self::Unavailable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Ask the browser for the current position. Resolves once the user answers
/// the permission prompt and a fix is available.
pub async fn current_position() -> Result<Coordinates, GeolocationError> {
    let navigator = web_sys::window()
        .ok_or(GeolocationError::Unsupported)?
        .navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("geolocation"))
        .unwrap_or(false)
    {
        return Err(GeolocationError::Unsupported);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation
            .get_current_position_with_error_callback(&resolve, Some(&reject))
        {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let position = JsFuture::from(promise).await.map_err(|e| {
        let code = number_field(&e, "code").unwrap_or_default() as u16;
        tracing::warn!(code, "Geolocation request failed");
        GeolocationError::from_code(code)
    })?;

    let coords = Reflect::get(&position, &JsValue::from_str("coords"))
        .map_err(|_| GeolocationError::Unavailable)?;
    let latitude = number_field(&coords, "latitude")
        .ok_or(GeolocationError::Unavailable)?;
    let longitude = number_field(&coords, "longitude")
        .ok_or(GeolocationError::Unavailable)?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

fn number_field(value: &JsValue, name: &str) -> Option<f64> {
    Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
}
