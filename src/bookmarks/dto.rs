use serde::Deserialize;

/// Request body for saving a newsletter. The front end sends camelCase.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(rename = "newsletterId")]
    pub newsletter_id: i32,
}
