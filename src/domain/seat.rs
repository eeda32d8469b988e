//! Seat domain model

use serde::{Deserialize, Serialize};

/// Seat class used for pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatType {
    Standard,
    Vip,
}

impl std::fmt::Display for SeatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatType::Standard => write!(f, "standard"),
            SeatType::Vip => write!(f, "vip"),
        }
    }
}

impl std::str::FromStr for SeatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(SeatType::Standard),
            "vip" => Ok(SeatType::Vip),
            _ => Err(format!("Unknown seat type: {}", s)),
        }
    }
}

/// A single seat in a hall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: i64,
    pub hall_id: i64,
    pub row_number: i64,
    pub seat_number: i64,
    pub seat_type: SeatType,
}

/// Request to create a seat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeatRequest {
    pub hall_id: i64,
    pub row_number: i64,
    pub seat_number: i64,
    pub seat_type: Option<SeatType>,
}

/// Request to update a seat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeatRequest {
    pub hall_id: Option<i64>,
    pub row_number: Option<i64>,
    pub seat_number: Option<i64>,
    pub seat_type: Option<SeatType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_type_round_trip() {
        assert_eq!("vip".parse::<SeatType>().unwrap(), SeatType::Vip);
        assert_eq!(SeatType::Standard.to_string(), "standard");
        assert!("balcony".parse::<SeatType>().is_err());
    }

    #[test]
    fn test_seat_serialization() {
        let seat = Seat {
            id: 7,
            hall_id: 1,
            row_number: 2,
            seat_number: 5,
            seat_type: SeatType::Vip,
        };

        let json = serde_json::to_string(&seat).unwrap();
        assert!(json.contains("\"hallId\":1"));
        assert!(json.contains("\"seatType\":\"vip\""));
    }

    #[test]
    fn test_create_seat_request_default_type() {
        let json = r#"{"hallId": 1, "rowNumber": 3, "seatNumber": 4}"#;
        let req: CreateSeatRequest = serde_json::from_str(json).unwrap();
        assert!(req.seat_type.is_none());
    }
}
