use tpq_core::provenance::{RunProvenance, SchemaVersion};

#[test]
fn provenance_round_trip_json() {
    let provenance = RunProvenance {
        schema_version: SchemaVersion::new(1, 0, 0),
        config_hash: "deadbeef".into(),
        input_root: "runs/L16".into(),
        seed: 99,
        seed_label: Some("L16-production".into()),
        created_at: "2024-02-01T00:00:00Z".into(),
        tool_versions: [("tpq-ensemble".into(), "0.1.0".into())]
            .into_iter()
            .collect(),
    };

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, provenance);
}
