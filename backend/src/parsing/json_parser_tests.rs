#[cfg(test)]
mod tests {
    use crate::models::MovementKind;
    use crate::parsing::json_parser::{
        movements_to_json, parse_movements_json, parse_movements_json_str,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ENDPOINT_JSON: &str = r#"{
        "movements": [
            {
                "date": "2024-06-02T18:30:00Z",
                "type": "consumo",
                "quantity_change": 1,
                "quantity_before": 6,
                "quantity_after": 5
            },
            {
                "date": "2024-06-01 09:00:00",
                "type": "rifornimento",
                "quantity_change": 6,
                "quantity_before": 0,
                "quantity_after": 6
            }
        ]
    }"#;

    /// Test parsing the inventory endpoint shape
    #[test]
    fn test_parse_endpoint_shape() {
        let result = parse_movements_json_str(ENDPOINT_JSON);
        assert!(result.is_ok(), "Should parse: {:?}", result.err());

        let movements = result.unwrap();
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].kind, MovementKind::Consumption);
        assert_eq!(movements[1].kind, MovementKind::Replenishment);
        assert_eq!(movements[1].quantity_after, Some(6.0));
    }

    /// Test parsing a bare array
    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"date": "2024-06-01", "type": "consumption", "quantity_change": 2}]"#;
        let movements = parse_movements_json_str(json).unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].quantity_before, None);
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_movements_json_str(r#"{"movements": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_movements_key() {
        let err = parse_movements_json_str(r#"{"items": []}"#).unwrap_err();
        assert!(err.to_string().contains("'movements'"), "{}", err);
    }

    #[test]
    fn test_invalid_syntax() {
        let err = parse_movements_json_str("{not json").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON syntax"), "{}", err);
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        let err = parse_movements_json_str("42").unwrap_err();
        assert!(err.to_string().contains("a number"), "{}", err);
    }

    /// Errors point at the offending record
    #[test]
    fn test_error_reports_record_path() {
        let json = r#"{"movements": [
            {"date": "2024-06-01", "type": "consumo"},
            {"date": "someday", "type": "consumo"}
        ]}"#;
        let err = parse_movements_json_str(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("[1]"), "{}", message);
        assert!(message.contains("someday"), "{}", message);
    }

    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ENDPOINT_JSON.as_bytes()).unwrap();

        let movements = parse_movements_json(file.path()).unwrap();
        assert_eq!(movements.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movements_json(std::path::Path::new("/nonexistent/movements.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read JSON file"), "{}", err);
    }

    #[test]
    fn test_written_json_parses_back() {
        let movements = parse_movements_json_str(ENDPOINT_JSON).unwrap();
        let json = movements_to_json(&movements).unwrap();

        assert!(json.contains("\"movements\""));
        assert_eq!(parse_movements_json_str(&json).unwrap(), movements);
    }
}
