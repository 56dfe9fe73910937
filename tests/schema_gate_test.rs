use mahjong_tiles::adapter::protocol::{create_error, create_initialized, create_tiles, ErrorCode};
use mahjong_tiles::core::generate;

fn load_schema() -> serde_json::Value {
    let s = std::fs::read_to_string("docs/tile-protocol.schema.json")
        .expect("read docs/tile-protocol.schema.json");
    serde_json::from_str(&s).expect("schema must be valid json")
}

fn required_fields(schema: &serde_json::Value, def: &str) -> Vec<String> {
    schema["definitions"][def]["required"]
        .as_array()
        .unwrap_or_else(|| panic!("definition {} has no required list", def))
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn tile_protocol_schema_is_valid_json() {
    let v = load_schema();
    assert_eq!(v["title"], "Mahjong Tile Protocol");
    assert!(v.get("definitions").is_some());
}

#[test]
fn tile_protocol_responses_carry_required_fields() {
    let schema = load_schema();

    let tiles = generate();
    let responses = [
        ("tiles", serde_json::to_value(create_tiles(1, &tiles)).unwrap()),
        (
            "initialized",
            serde_json::to_value(create_initialized(2, 136, 136)).unwrap(),
        ),
        (
            "error",
            serde_json::to_value(create_error(3, ErrorCode::StorageError, "down")).unwrap(),
        ),
    ];

    for (def, value) in responses.iter() {
        assert_eq!(value["type"], *def);
        for field in required_fields(&schema, def) {
            assert!(
                value.get(&field).is_some(),
                "{} response is missing {}",
                def,
                field
            );
        }
    }

    let record = &responses[0].1["tiles"][0];
    for field in required_fields(&schema, "tile_record") {
        assert!(record.get(&field).is_some(), "tile record is missing {}", field);
    }
}
