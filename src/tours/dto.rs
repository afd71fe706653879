use serde::Deserialize;

/// Request body for creating a tour. Fields arrive optional so a missing
/// one answers with a field-level message instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTourRequest {
    pub name: Option<String>,
    pub info: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}

/// Request body for updating a tour; omitted fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTourRequest {
    pub name: Option<String>,
    pub info: Option<String>,
    pub image: Option<String>,
    pub price: Option<String>,
}
