use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::{ActivityId, CategoryId, UserId};

/// A logged eco-friendly action.
///
/// Created through the submission pipeline and immutable afterwards from the
/// client's perspective. The history endpoint joins in `category_name` and
/// `user_name`; both are absent on other payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub description: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    pub points: u32,
    /// Kilograms of CO2 offset by this action.
    pub carbon_offset: f64,
    pub date_time: NaiveDateTime,
    /// Attached photo, base64-encoded by the backend.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub image_content_type: Option<String>,
}

impl Activity {
    /// Decode the attached photo, if any.
    ///
    /// Returns `None` both when no image was attached and when the payload
    /// is not valid base64.
    pub fn image_bytes(&self) -> Option<Vec<u8>> {
        let data = self.image_data.as_deref()?;
        BASE64.decode(data).ok()
    }
}

/// A catalog entry users pick when logging an activity.
///
/// `points_per_unit` and `carbon_per_unit` are suggested rates for one unit
/// of the activity; the submitted totals remain free-form.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub points_per_unit: f64,
    #[serde(default)]
    pub carbon_per_unit: f64,
}

/// Acknowledgement returned by the submit-activity endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReceipt {
    pub message: String,
    pub activity_id: ActivityId,
}
