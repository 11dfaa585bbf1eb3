//! Integration tests for navigation over whole documents.

use proptest::prelude::*;

use xmigraph::{
    Document, Entity, ReportBuilder,
    config::{AppConfig, ReportConfig, ReportFormat},
};
use xmigraph_parser::Element;

const SCENARIO: &str = r#"
<root>
  <State id="m1" relid="a" isMeta="true" atr-name="StateA"/>
  <State id="i1" relid="b" base="m1" atr-name="s1" rel-next-0="i2"/>
  <State id="i2" relid="c"/>
</root>"#;

/// Shape of a generated tree: each node lists its children.
#[derive(Debug, Clone)]
struct Shape(Vec<Shape>);

fn arb_shape() -> impl Strategy<Value = Shape> {
    Just(Shape(Vec::new())).prop_recursive(4, 40, 4, |inner| {
        proptest::collection::vec(inner, 0..4).prop_map(Shape)
    })
}

/// Build an element tree with pre-order guids and sibling-index relids.
fn build(shape: &Shape, relid: Option<usize>, counter: &mut usize) -> Element {
    let guid = format!("g{counter}");
    *counter += 1;
    let mut element = Element::new("node").with_attribute("id", guid);
    if let Some(relid) = relid {
        element = element.with_attribute("relid", relid.to_string());
    }
    for (index, child) in shape.0.iter().enumerate() {
        element = element.with_child(build(child, Some(index), counter));
    }
    element
}

fn every_entity(document: &Document) -> Vec<Entity<'_>> {
    let mut out = Vec::new();
    let mut stack = vec![document.root()];
    while let Some(entity) = stack.pop() {
        out.push(entity);
        stack.extend(entity.children(None).into_iter().rev());
    }
    out
}

#[test]
fn test_scenario_meta_pointer_and_paths() {
    let doc = Document::parse(SCENARIO).unwrap();
    let b = doc.node_by_guid("i1").unwrap();
    let c = doc.node_by_guid("i2").unwrap();

    assert_eq!(b.meta_node().unwrap().attribute("name"), Some("StateA"));
    assert_eq!(b.pointer("next").unwrap().guid(), Some("i2"));
    assert_eq!(b.path(), "/b");
    assert_eq!(c.path(), "/c");
}

#[test]
fn test_disambiguated_collection_keys_do_not_collapse() {
    let doc = Document::parse(
        r#"<root>
             <n id="t" relid="t" invrel-incoming-0="x" invrel-incoming-1="y"/>
             <n id="x" relid="x"/>
             <n id="y" relid="y"/>
           </root>"#,
    )
    .unwrap();
    let target = doc.node_by_guid("t").unwrap();

    assert_eq!(target.collection_nodes().len(), 2);
    assert_eq!(target.collection_paths(), vec!["/x", "/y"]);
}

#[test]
fn test_dangling_collection_members_are_skipped() {
    let doc = Document::parse(
        r#"<root>
             <n id="t" relid="t" invrel-incoming-0="x" invrel-lost-0="lost" invrel-incoming-1="y"/>
             <n id="x" relid="x"/>
             <n id="y" relid="y"/>
           </root>"#,
    )
    .unwrap();
    let target = doc.node_by_guid("t").unwrap();

    assert_eq!(target.collection_guids(), vec!["x", "y", "lost"]);
    assert_eq!(target.collection_nodes().len(), 2);
    assert_eq!(target.collection_paths(), vec!["/x", "/y"]);
    assert!(target.collection("lost").is_empty());
}

#[test]
fn test_empty_base_resolves_to_nothing() {
    let doc = Document::parse(
        r#"<root><n relid="a" base=""/><m id="" atr-name="ghost"/></root>"#,
    )
    .unwrap();
    let entity = doc.node_by_path("a").unwrap();

    assert!(entity.base().is_none());
    assert!(entity.meta_node().is_none());
}

#[test]
fn test_pointer_and_set_lookup_match_name_prefix() {
    let doc = Document::parse(
        r#"<root><n id="a" relid="a" rel-next-0="b" set-roles-1="b"/><n id="b" relid="b"/></root>"#,
    )
    .unwrap();
    let a = doc.node_by_guid("a").unwrap();

    assert_eq!(a.pointer("next").unwrap().guid(), Some("b"));
    assert_eq!(a.pointer("nex").unwrap().guid(), Some("b"));
    assert_eq!(a.pointer_path("next-0").as_deref(), Some("/b"));
    assert_eq!(a.set_members_paths("role").unwrap(), vec!["/b"]);
}

#[test]
fn test_set_member_order_and_duplicates() {
    let doc = Document::parse(r#"<root><n relid="e" set-roles-1="g1 g2 g3 g2"/></root>"#).unwrap();
    let entity = doc.node_by_path("e").unwrap();

    assert_eq!(
        entity.set_members_guids("roles").unwrap(),
        vec!["g1", "g2", "g3", "g2"]
    );
    assert!(entity.set_members_guids("other").is_none());
}

#[test]
fn test_pointer_names_agree_with_pointer() {
    let doc = Document::parse(
        r#"<root>
             <n id="a" relid="a" rel-left-0="b" rel-right-0="c" rel-up-0="dangling"/>
             <n id="b" relid="b"/>
             <n id="c" relid="c"/>
           </root>"#,
    )
    .unwrap();
    let a = doc.node_by_guid("a").unwrap();

    let resolved: Vec<_> = a
        .pointer_names()
        .into_iter()
        .filter(|name| a.pointer(name).is_some())
        .collect();
    assert_eq!(resolved, vec!["left", "right"]);
    assert!(a.pointer("up").is_none());
}

#[test]
fn test_references_reach_outside_the_subtree() {
    let doc = Document::parse(
        r#"<root>
             <n id="deep" relid="1"><n id="leaf" relid="2" base="top" rel-owner-0="deep"/></n>
             <n id="top" relid="3" isMeta="true"/>
           </root>"#,
    )
    .unwrap();
    let leaf = doc.node_by_path("/1/2").unwrap();

    assert_eq!(leaf.base().unwrap().guid(), Some("top"));
    assert_eq!(leaf.pointer("owner").unwrap().guid(), Some("deep"));
    assert!(leaf.node_by_guid("top").is_none());
}

#[test]
fn test_all_meta_nodes_includes_root() {
    let doc = Document::parse(
        r#"<root isMeta="true"><a isMeta="true"><b isMeta="yes"/><c isMeta="true"/></a></root>"#,
    )
    .unwrap();
    let metas = doc.all_meta_nodes();

    assert_eq!(metas.len(), 3);
    assert!(metas[0].is_root());
    assert_eq!(metas[2].tag(), "c");
}

#[test]
fn test_entities_are_shareable_across_threads() {
    let doc = Document::parse(SCENARIO).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| doc.node_by_guid("i1").unwrap().path()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "/b");
        }
    });
}

#[test]
fn test_report_builder_json_and_tree() {
    let builder = ReportBuilder::default();
    let doc = builder.parse(SCENARIO).unwrap();

    let json: serde_json::Value = serde_json::from_str(&builder.render(&doc).unwrap()).unwrap();
    assert_eq!(json["structure"]["name"], "ROOT");
    assert_eq!(json["structure"]["children"][1]["pointers"]["next"], serde_json::Value::Null);
    assert_eq!(json["meta"][0]["path"], "/a");

    let tree = ReportBuilder::new(AppConfig::default().with_report_format(ReportFormat::Tree));
    assert!(tree.render(&doc).unwrap().starts_with("StateA\n  relid /a\n"));
}

#[test]
fn test_report_without_meta_listing() {
    let config = AppConfig::new(ReportConfig::new(ReportFormat::Json, "Model", false));
    let builder = ReportBuilder::new(config);
    let doc = builder.parse(SCENARIO).unwrap();
    let report = builder.report(&doc);

    assert_eq!(report.structure.name, "Model");
    assert!(report.meta.is_none());
}

#[test]
fn test_report_builder_parse_error_keeps_source() {
    let source = "<root><unclosed></root>";
    let err = ReportBuilder::default().parse(source).unwrap_err();

    match err {
        xmigraph::XmiGraphError::Parse { src, .. } => assert_eq!(src, source),
        other => panic!("expected parse error, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_guid_lookup_from_root_finds_entity(shape in arb_shape()) {
        let doc = Document::from_element(build(&shape, None, &mut 0));
        for entity in every_entity(&doc) {
            let guid = entity.guid().unwrap();
            prop_assert_eq!(doc.root().node_by_guid(guid), Some(entity));
        }
    }

    #[test]
    fn prop_relid_lookup_from_parent_round_trips(shape in arb_shape()) {
        let doc = Document::from_element(build(&shape, None, &mut 0));
        for entity in every_entity(&doc).into_iter().filter(|entity| !entity.is_root()) {
            let parent = entity.parent().unwrap();
            let relid = entity.relid().unwrap();
            prop_assert_eq!(parent.node_by_relative_path(&relid), Some(entity));
        }
    }

    #[test]
    fn prop_path_resolves_back_to_entity(shape in arb_shape()) {
        let doc = Document::from_element(build(&shape, None, &mut 0));
        for entity in every_entity(&doc) {
            prop_assert_eq!(doc.root().node_by_relative_path(&entity.path()), Some(entity));
        }
    }
}
