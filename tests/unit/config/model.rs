use super::*;

use crate::catalog::store::Trait;

const MINIMAL: &str = r#"{
  "rarities": [
    { "name": "common", "chance": 70 },
    { "name": "rare", "chance": 30 }
  ],
  "metadata": { "name": "Layer #", "description": "layered collectibles" },
  "canvas": { "width": 600, "height": 600 }
}"#;

const FULL: &str = r#"{
  "rarities": [{ "name": "common", "chance": 100 }],
  "metadata": { "name": "Layer #", "description": "layered collectibles" },
  "canvas": { "width": 600, "height": 600 },
  "types": [
    { "name": "background" },
    {
      "name": "hat",
      "chance": 60,
      "rarities": [{ "name": "rare", "chance": 100 }],
      "requires": [{ "type": "background", "values": ["red", "none"] }],
      "affinities": [{ "type": "background", "exist": true }]
    }
  ],
  "traits": [
    { "type": "hat", "name": "crown", "order": { "after": "background" } }
  ]
}"#;

#[test]
fn minimal_config_parses_with_defaults() {
    let config = CollectionConfig::from_json(MINIMAL).unwrap();
    assert!(config.types.is_empty());
    assert!(config.traits.is_empty());
    assert_eq!(config.canvas.width, 600);
}

#[test]
fn full_config_parses_rule_fields() {
    let config = CollectionConfig::from_json(FULL).unwrap();
    assert_eq!(config.types.len(), 2);

    let hat = &config.types[1];
    assert_eq!(hat.chance_percent(), 60);
    assert!(hat.rarities.is_some());
    let requires = hat.requires.as_ref().unwrap();
    assert_eq!(requires[0].trait_type, "background");
    assert_eq!(requires[0].values, ["red", "none"]);
    let affinities = hat.affinities.as_ref().unwrap();
    assert!(affinities[0].exist);

    let order = &config.traits[0];
    assert_eq!(order.trait_type, "hat");
    assert_eq!(order.order.after.as_deref(), Some("background"));
}

#[test]
fn chance_defaults_to_100() {
    let config = CollectionConfig::from_json(FULL).unwrap();
    assert_eq!(config.types[0].chance_percent(), 100);
}

#[test]
fn rarity_sums_of_99_and_101_are_rejected() {
    for (a, b) in [(69, 30), (71, 30)] {
        let raw = format!(
            r#"{{
              "rarities": [
                {{ "name": "common", "chance": {a} }},
                {{ "name": "rare", "chance": {b} }}
              ],
              "metadata": {{ "name": "x", "description": "y" }},
              "canvas": {{ "width": 4, "height": 4 }}
            }}"#
        );
        let err = CollectionConfig::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("must equal 100"), "{err}");
    }
}

#[test]
fn override_rarity_sum_is_validated() {
    let raw = r#"{
      "rarities": [{ "name": "common", "chance": 100 }],
      "metadata": { "name": "x", "description": "y" },
      "canvas": { "width": 4, "height": 4 },
      "types": [
        { "name": "hat", "rarities": [{ "name": "rare", "chance": 95 }] }
      ]
    }"#;
    let err = CollectionConfig::from_json(raw).unwrap_err();
    assert!(err.to_string().contains("hat"), "{err}");
}

#[test]
fn chance_above_100_is_rejected() {
    let raw = r#"{
      "rarities": [{ "name": "common", "chance": 100 }],
      "metadata": { "name": "x", "description": "y" },
      "canvas": { "width": 4, "height": 4 },
      "types": [{ "name": "hat", "chance": 101 }]
    }"#;
    assert!(CollectionConfig::from_json(raw).is_err());
}

#[test]
fn zero_canvas_is_rejected() {
    let raw = r#"{
      "rarities": [{ "name": "common", "chance": 100 }],
      "metadata": { "name": "x", "description": "y" },
      "canvas": { "width": 0, "height": 4 }
    }"#;
    assert!(CollectionConfig::from_json(raw).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = CollectionConfig::from_json("{").unwrap_err();
    assert!(err.to_string().contains("serialization error:"), "{err}");
}

#[test]
fn validate_against_checks_types_and_order_rules() {
    let config = CollectionConfig::from_json(FULL).unwrap();

    let mut catalog = TraitCatalog::default();
    for (trait_type, name) in [("background", "red"), ("hat", "crown")] {
        catalog.insert(Trait {
            name: name.to_string(),
            file_name: format!("{name}.png"),
            trait_type: trait_type.to_string(),
            rarity: "common".to_string(),
            labels: Vec::new(),
        });
    }
    assert!(config.validate_against(&catalog).is_ok());

    let mut missing_type = TraitCatalog::default();
    missing_type.insert(Trait {
        name: "red".to_string(),
        file_name: "red.png".to_string(),
        trait_type: "background".to_string(),
        rarity: "common".to_string(),
        labels: Vec::new(),
    });
    assert!(config.validate_against(&missing_type).is_err());
}

#[test]
fn config_round_trips_through_json() {
    let config = CollectionConfig::from_json(FULL).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back = CollectionConfig::from_json(&json).unwrap();
    assert_eq!(back.types.len(), config.types.len());
    assert_eq!(back.traits[0].trait_type, "hat");
}
