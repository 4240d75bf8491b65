use serde::{Deserialize, Serialize};
use crate::models::{LineId, Station, StationId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRequest {
    pub name: String,
}

/// A new line together with its first section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: u64,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUpdateRequest {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: u64,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: LineId,
    pub name: String,
    pub color: String,
    /// Stations from head to tail
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    pub stations: Vec<Station>,
    pub distance: u64,
    /// Reported for every mode, summed along the chosen route
    pub duration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_request_defaults() {
        let json = r#"{"name":"Line 2","upStationId":1,"downStationId":2,"distance":10}"#;
        let request: LineRequest = serde_json::from_str(json).expect("deserializes");

        assert_eq!(request.color, "");
        assert_eq!(request.duration, 0);
        assert_eq!(request.up_station_id, StationId(1));
    }

    #[test]
    fn test_path_response_field_names() {
        let response = PathResponse {
            stations: vec![Station { id: StationId(1), name: "Gangnam".to_string() }],
            distance: 10,
            duration: 2,
        };
        let value = serde_json::to_value(&response).expect("serializes");

        assert_eq!(value["stations"][0]["name"], "Gangnam");
        assert_eq!(value["distance"], 10);
        assert_eq!(value["duration"], 2);
    }
}
