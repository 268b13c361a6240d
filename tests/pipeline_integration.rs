//! End-to-end tests driving the public library API from raw keys to dataset.

use stat_key_browser::categories::{DEFAULT_CATEGORY, categorize};
use stat_key_browser::keys::{KeyTable, StatKey, normalize, parse_key_dump};
use stat_key_browser::mapping::{key_id, map_ids};
use stat_key_browser::pipeline::{ClusterInfo, Pipeline, build_dataset};
use stat_key_browser::rules::rule_stanza::{KEYS_FIELD, PATTERNS_FIELD, SUB_FIELD, SUPER_FIELD, TAGS_FIELD};
use stat_key_browser::rules::{ConfigurationError, RuleStanza, load_rule_stanzas};
use stat_key_browser::search::extract_search_terms;
use stat_key_browser::tagging::tag;

fn disk_keys() -> KeyTable {
    [
        StatKey::new("node.disk.busy.0", Some("Disk 0 busy percent")),
        StatKey::new("node.disk.busy.1", Some("Disk 1 busy percent")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_squash_then_tag_then_categorize() {
    let table = normalize(disk_keys());
    assert_eq!(table.names().collect::<Vec<_>>(), ["node.disk.busy.N"]);
    assert_eq!(table.get("node.disk.busy.N").unwrap().description.as_deref(), Some("Disk N busy percent"));

    let table = tag(
        table,
        &[RuleStanza::new().with(KEYS_FIELD, ["node.disk.busy.N"]).with(TAGS_FIELD, ["disk", "performance"])],
    )
    .unwrap();
    assert_eq!(table.get("node.disk.busy.N").unwrap().tags, ["disk", "performance"]);

    let (table, tree) = categorize(
        table,
        &[RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(KEYS_FIELD, ["node.disk.busy.N"])],
    )
    .unwrap();

    let key = table.get("node.disk.busy.N").unwrap();
    assert_eq!(key.super_category.as_deref(), Some("Disk"));
    assert!(key.sub.is_none());
    assert_eq!(tree.get("Disk").unwrap().keys, ["node.disk.busy.N"]);

    insta::assert_json_snapshot!(tree, @r#"
    {
      "Disk": {
        "categories": {},
        "keys": [
          "node.disk.busy.N"
        ],
        "description": ""
      },
      "Uncategorized": {
        "categories": {},
        "keys": [],
        "description": "Statistics that have not been assigned a category."
      }
    }
    "#);
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize(disk_keys());
    let twice = normalize(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_tag_union_independent_of_rule_order() {
    let table: KeyTable = ["node.disk.busy.N", "node.net.iface.N"].into_iter().map(|n| StatKey::new(n, None)).collect();
    let a = RuleStanza::new().with(PATTERNS_FIELD, ["^node"]).with(TAGS_FIELD, ["node"]);
    let b = RuleStanza::new().with(PATTERNS_FIELD, ["disk"]).with(TAGS_FIELD, ["disk", "node"]);

    let forward = tag(table.clone(), &[a.clone(), b.clone()]).unwrap();
    let backward = tag(table, &[b, a]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.get("node.disk.busy.N").unwrap().tags, ["disk", "node"]);
}

#[test]
fn test_category_precedence_and_default_bucket() {
    let table: KeyTable = ["node.disk.busy.N", "node.disk.xfers.N", "cluster.health"]
        .into_iter()
        .map(|n| StatKey::new(n, None))
        .collect();

    let stanzas = [
        RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(SUB_FIELD, ["Busy"]).with(KEYS_FIELD, ["node.disk.busy.N"]),
        RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(PATTERNS_FIELD, ["^node\\.disk"]),
    ];
    let (table, tree) = categorize(table, &stanzas).unwrap();

    assert_eq!(table.get("node.disk.busy.N").unwrap().sub.as_deref(), Some("Busy"));
    assert!(table.get("node.disk.xfers.N").unwrap().sub.is_none());
    assert_eq!(table.get("cluster.health").unwrap().super_category.as_deref(), Some(DEFAULT_CATEGORY));

    let disk = tree.get("Disk").unwrap();
    assert_eq!(disk.keys, ["node.disk.xfers.N"]);
    assert_eq!(disk.categories["Busy"].keys, ["node.disk.busy.N"]);
    assert_eq!(tree.get(DEFAULT_CATEGORY).unwrap().keys, ["cluster.health"]);
}

#[test]
fn test_structural_errors_reported_before_processing() {
    let bad_tags = [RuleStanza::new().with(TAGS_FIELD, ["x"]).with("owner", ["a", "b"])];
    assert!(matches!(
        tag(disk_keys(), &bad_tags).unwrap_err(),
        ConfigurationError::NotSingleValued { .. }
    ));

    let bad_categories = [RuleStanza::new().with(SUPER_FIELD, ["A", "B"])];
    assert!(matches!(
        categorize(disk_keys(), &bad_categories).unwrap_err(),
        ConfigurationError::InvalidSuper { .. }
    ));

    let err = Pipeline::new(&[], &[RuleStanza::new().with(SUPER_FIELD, ["A"]).with(PATTERNS_FIELD, ["("])]).unwrap_err();
    assert_eq!(err.position(), 1);
}

#[test]
fn test_ids_are_stable_across_runs() {
    let stanzas = [RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(PATTERNS_FIELD, ["disk"])];
    let (first, _) = categorize(normalize(disk_keys()), &stanzas).unwrap();
    let (second, _) = categorize(normalize(disk_keys()), &stanzas).unwrap();

    let first_ids = map_ids(&first);
    assert_eq!(first_ids, map_ids(&second));
    assert_eq!(first_ids.keys["node.disk.busy.N"], key_id("node.disk.busy.N"));
    assert!(first_ids.categories["Disk"].starts_with("cat_"));
}

#[test]
fn test_manual_stages_match_pipeline() {
    let tag_stanzas = [RuleStanza::new().with(PATTERNS_FIELD, ["disk"]).with(TAGS_FIELD, ["disk"])];
    let category_stanzas = [RuleStanza::new().with(SUPER_FIELD, ["Disk"]).with(PATTERNS_FIELD, ["disk"])];

    let table = tag(normalize(disk_keys()), &tag_stanzas).unwrap();
    let table = extract_search_terms(table);
    let (table, tree) = categorize(table, &category_stanzas).unwrap();
    let ids = map_ids(&table);
    let manual = build_dataset(table, tree, ids, ClusterInfo::default());

    let pipeline = Pipeline::new(&tag_stanzas, &category_stanzas).unwrap();
    assert_eq!(pipeline.run(disk_keys(), ClusterInfo::default()), manual);
}

#[test]
fn test_shipped_rules_are_valid() {
    let root = camino::Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let tag_stanzas = load_rule_stanzas(&root.join("rules/key_tags.hexa")).unwrap();
    let category_stanzas = load_rule_stanzas(&root.join("rules/key_cats.hexa")).unwrap();
    let pipeline = Pipeline::new(&tag_stanzas, &category_stanzas).unwrap();

    let raw = parse_key_dump(
        r#"{"keys": [
            {"key": "node.disk.busy.0", "description": "Disk 0 busy percent"},
            {"key": "node.net.iface.bytes.in.rate.3", "description": "Bytes received on interface 3"},
            {"key": "node.cpu.user.avg", "description": "CPU user time", "aggregation_type": "avg"},
            {"key": "cluster.health", "description": "Overall cluster health"}
        ]}"#,
    )
    .unwrap();

    let dataset = pipeline.run(raw, ClusterInfo::new(Some("9.5.0.0"), None));

    let busy = dataset.keys.get("node.disk.busy.N").unwrap();
    assert_eq!(busy.sub.as_deref(), Some("Activity"));
    assert_eq!(busy.tags, ["disk", "performance"]);

    let iface = dataset.keys.get("node.net.iface.bytes.in.rate.N").unwrap();
    assert_eq!(iface.description.as_deref(), Some("Bytes received on interface N"));
    assert_eq!(iface.sub.as_deref(), Some("Interfaces"));

    let cpu = dataset.keys.get("node.cpu.user.avg").unwrap();
    assert_eq!(cpu.field_str("aggregation_type"), Some("average"));
    assert_eq!(cpu.tags, ["cpu", "performance"]);

    assert_eq!(dataset.keys.get("cluster.health").unwrap().super_category.as_deref(), Some(DEFAULT_CATEGORY));
    assert!(dataset.tags.contains(&"protocol".to_string()));
    assert!(dataset.categories.get("Protocols").unwrap().categories["NFS"].categories.contains_key("Operations"));
}
