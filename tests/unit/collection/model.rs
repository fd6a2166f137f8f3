use super::*;

fn sample() -> Vec<Collectible> {
    vec![
        Collectible {
            id: 1,
            attributes: vec![
                Attribute {
                    name: "background".to_string(),
                    rarity: "common".to_string(),
                    value: "red".to_string(),
                },
                Attribute {
                    name: "hat".to_string(),
                    rarity: "rare".to_string(),
                    value: "crown".to_string(),
                },
            ],
        },
        Collectible {
            id: 2,
            attributes: Vec::new(),
        },
    ]
}

#[test]
fn collection_round_trips_through_file() {
    let dir = std::env::temp_dir().join(format!(
        "layerforge_collection_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("out/collectibles.json");

    let collectibles = sample();
    save_collection(&collectibles, &path).unwrap();
    let loaded = load_collection(&path).unwrap();
    assert_eq!(loaded, collectibles);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn attribute_order_survives_serialization() {
    let collectibles = sample();
    let json = serde_json::to_string(&collectibles).unwrap();
    let back: Vec<Collectible> = serde_json::from_str(&json).unwrap();
    let pairs: Vec<(&str, &str)> = back[0]
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(pairs, [("background", "red"), ("hat", "crown")]);
}

#[test]
fn load_rejects_malformed_collection() {
    let dir = std::env::temp_dir().join(format!(
        "layerforge_badcoll_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("collectibles.json");
    std::fs::write(&path, "not json").unwrap();

    let err = load_collection(&path).unwrap_err();
    assert!(err.to_string().contains("serialization error:"), "{err}");

    std::fs::remove_dir_all(&dir).ok();
}
