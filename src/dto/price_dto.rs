use serde::Deserialize;

// Query de `GET /services/price?vehicleId=`
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    #[serde(rename = "vehicleId")]
    pub vehicle_id: Option<i64>,
}
