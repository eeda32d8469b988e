//! Price override domain model

use serde::{Deserialize, Serialize};

use super::SeatType;

/// A per-seat-type price override consulted before the seance's own prices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: i64,
    pub seat_type: SeatType,
    pub price: f64,
}

/// Request to create a price override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceRequest {
    pub seat_type: SeatType,
    pub price: f64,
}

/// Request to update a price override
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    pub seat_type: Option<SeatType>,
    pub price: Option<f64>,
}

/// Price quoted for a concrete seat at a concrete seance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub seance_id: i64,
    pub seat_id: i64,
    pub seat_type: SeatType,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serialization() {
        let price = Price {
            id: 1,
            seat_type: SeatType::Vip,
            price: 750.0,
        };

        let json = serde_json::to_string(&price).unwrap();
        assert!(json.contains("\"seatType\":\"vip\""));
        assert!(json.contains("\"price\":750.0"));
    }

    #[test]
    fn test_price_quote_serialization() {
        let quote = PriceQuote {
            seance_id: 4,
            seat_id: 9,
            seat_type: SeatType::Standard,
            price: 300.0,
        };

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"seanceId\":4"));
        assert!(json.contains("\"seatId\":9"));
    }
}
