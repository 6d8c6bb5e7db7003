use layered_graph::AnnotationGraph;

use crate::{parse_document, ConverterConfig, StreusleMapper};

fn convert(json: &str) -> AnnotationGraph {
    let document = parse_document(json).expect("Failed to parse document");
    StreusleMapper::new().convert(&document).expect("Failed to convert document")
}

fn surface(graph: &AnnotationGraph, rel: &layered_graph::Relation) -> (String, String) {
    (
        graph.token_text(rel.source).unwrap().to_string(),
        graph.token_text(rel.target).unwrap().to_string(),
    )
}

#[test]
fn test_enhanced_edge_closing_mixed_cycle_is_retyped() {
    // A -> B primary, B -> C enhanced, then C -> A enhanced closes the cycle
    let graph = convert(
        r##"[{
            "sent_id": "t-1",
            "text": "C B A",
            "toks": [
                {"#": 1, "word": "C", "edeps": "2:dep"},
                {"#": 2, "word": "B", "head": 3, "deprel": "dep", "edeps": "3:dep"},
                {"#": 3, "word": "A", "head": 0, "deprel": "root", "edeps": "0:root|1:dep"}
            ]
        }]"##,
    );

    let primary: Vec<_> = graph.relations().iter().map(|rel| surface(&graph, rel)).collect();
    assert_eq!(primary, vec![("A".to_string(), "B".to_string())]);

    let enhanced = graph.layer("edeps").unwrap();
    assert_eq!(enhanced.len(), 1);
    assert_eq!(surface(&graph, &enhanced.relations[0]), ("B".to_string(), "C".to_string()));
    assert_eq!(enhanced.relations[0].kind, "ude");

    let cycle = graph.layer("cycle").unwrap();
    assert_eq!(cycle.len(), 1);
    assert_eq!(surface(&graph, &cycle.relations[0]), ("C".to_string(), "A".to_string()));
    assert_eq!(cycle.relations[0].kind, "udecycle");
    assert_eq!(cycle.relations[0].id, "t-1_extdep_1-udecycle->2");
}

#[test]
fn test_cycle_broken_edges_are_not_followed() {
    let graph = convert(
        r##"[{
            "sent_id": "t-1",
            "text": "a b c",
            "toks": [
                {"#": 1, "word": "a", "edeps": "1:self|2:dep|3:dep"},
                {"#": 2, "word": "b", "edeps": "1:dep"},
                {"#": 3, "word": "c", "edeps": "2:dep"}
            ]
        }]"##,
    );

    let pairs = |name: &str| -> Vec<(String, String)> {
        graph
            .layer(name)
            .unwrap()
            .relations
            .iter()
            .map(|rel| surface(&graph, rel))
            .collect()
    };
    let pair = |source: &str, target: &str| (source.to_string(), target.to_string());

    // a self edge always closes a cycle; a -> b closes b -> a
    assert_eq!(pairs("cycle"), vec![pair("a", "a"), pair("a", "b")]);
    // b -> c would close c -> a -> b if a -> b were followed
    assert_eq!(pairs("edeps"), vec![pair("b", "a"), pair("c", "a"), pair("b", "c")]);
}

#[test]
fn test_enhanced_edges_go_to_configured_layers() {
    let document = parse_document(
        r##"[{
            "sent_id": "t-1",
            "text": "a b",
            "toks": [
                {"#": 1, "word": "a", "edeps": "2:dep"},
                {"#": 2, "word": "b", "edeps": "1:dep"}
            ]
        }]"##,
    )
    .unwrap();
    let config = ConverterConfig::from_toml_str(
        r#"
        edeps_layer = "enhanced"
        cycle_layer = "enhanced-cycles"
        "#,
    )
    .unwrap();
    let graph = StreusleMapper::with_config(config).convert(&document).unwrap();

    let names: Vec<_> = graph.layers().iter().map(|layer| layer.name.as_str()).collect();
    assert_eq!(names, vec!["enhanced", "enhanced-cycles"]);
    assert_eq!(graph.layer("enhanced").unwrap().len(), 1);
    assert_eq!(graph.layer("enhanced-cycles").unwrap().len(), 1);
}

#[test]
fn test_primary_edges_unique_per_token() {
    let graph = convert(
        r##"[{
            "sent_id": "t-1",
            "text": "the cat saw the dog",
            "toks": [
                {"#": 1, "word": "the", "head": 2, "deprel": "det", "edeps": "2:det"},
                {"#": 2, "word": "cat", "head": 3, "deprel": "nsubj", "edeps": "3:nsubj"},
                {"#": 3, "word": "saw", "head": 0, "deprel": "root", "edeps": "0:root"},
                {"#": 4, "word": "the", "head": 5, "deprel": "det", "edeps": "5:det"},
                {"#": 5, "word": "dog", "head": 3, "deprel": "obj", "edeps": "3:obj"}
            ]
        }]"##,
    );

    let mut targets: Vec<_> = graph.relations().iter().map(|rel| rel.target).collect();
    let total = targets.len();
    targets.sort();
    targets.dedup();
    assert_eq!(total, 4);
    assert_eq!(targets.len(), total);
    // every edeps entry repeats its primary edge
    assert!(graph.layers().iter().all(|layer| layer.is_empty()));
}
