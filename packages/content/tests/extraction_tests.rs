//! Extraction over decoded content trees

use copyedit_content::{extract, ContentNode};
use serde_json::json;

fn fixtures() -> Vec<ContentNode> {
    vec![
        ContentNode::from_json(&json!("Sell More")),
        ContentNode::from_json(&json!(["Line one", { "type": "br" }, "Line two"])),
        ContentNode::from_json(&json!([
            "Trusted by ",
            { "tag": "strong", "children": [120, "+"] },
            " brands",
            { "tag": "br" },
            { "tag": "span", "children": [{ "tag": "em", "children": ["worldwide"] }] }
        ])),
        ContentNode::from_json(&json!([null, "kept", { "icon": "arrow" }, false])),
    ]
}

#[test]
fn test_extraction_is_deterministic() {
    for node in fixtures() {
        let first = extract(&node);
        let second = extract(&node);
        assert_eq!(first, second);
    }
}

#[test]
fn test_extraction_does_not_mutate_tree() {
    for node in fixtures() {
        let before = node.clone();
        let _ = extract(&node);
        assert_eq!(node, before);
    }
}

#[test]
fn test_extracted_fixture_text() {
    let texts: Vec<String> = fixtures().iter().map(extract).collect();

    assert_eq!(
        texts,
        vec![
            "Sell More".to_string(),
            "Line one\nLine two".to_string(),
            "Trusted by 120+ brands\nworldwide".to_string(),
            "kept".to_string(),
        ]
    );
}

#[test]
fn test_malformed_nodes_never_panic() {
    let node: ContentNode = serde_json::from_str(r#"{"children": [{"unknown": 1}, [[["deep"]]], {"tag": 5}]}"#).unwrap();
    assert_eq!(extract(&node), "deep");
}
