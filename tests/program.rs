//! Tests for loading saved programs, templates and event records.
mod common;
use common::*;
use loyalty_dryrun::prelude::*;
use loyalty_dryrun::program::Complexity;

#[test]
fn test_saved_program_converts_every_node() {
    let program = ProgramDefinition::from_json(WEB_BONUS_PROGRAM_JSON).expect("valid program");
    assert_eq!(program.nodes.len(), 5);
    assert_eq!(program.edges.len(), 4);

    let distribution = program.node("distribution-1").expect("present");
    let NodeKind::Distribution(data) = &distribution.kind else {
        panic!("expected a distribution, got {:?}", distribution.kind);
    };
    assert_eq!(
        data.point_mapping_type,
        Setting::Known(PointMappingType::FixedAmount)
    );
    assert_eq!(data.fixed_amount, Some(50.0));
    assert_eq!(data.distribution_type.as_deref(), Some("BONUS_POINTS"));
}

#[test]
fn test_missing_is_active_means_inactive() {
    let json = r#"{ "nodes": [ { "id": "r", "type": "rule", "data": { "label": "R", "ruleType": "CONDITIONAL" } } ] }"#;
    let program = ProgramDefinition::from_json(json).expect("valid program");
    assert!(!program.nodes[0].is_active);
    assert!(program.edges.is_empty());
}

#[test]
fn test_unknown_type_and_settings_are_preserved() {
    let json = r#"{
      "nodes": [
        { "id": "x", "type": "webhook", "data": { "label": "Hook", "isActive": true } },
        { "id": "r", "type": "rule", "data": { "label": "R", "isActive": true, "ruleType": "WEIGHTED" } }
      ],
      "edges": []
    }"#;
    let program = ProgramDefinition::from_json(json).expect("valid program");
    assert_eq!(
        program.nodes[0].kind,
        NodeKind::Unrecognized {
            type_name: "webhook".to_string()
        }
    );
    assert_eq!(program.nodes[0].type_name(), "webhook");
    assert_eq!(
        program.nodes[1].kind,
        NodeKind::Rule(RuleData {
            rule_type: Setting::Unrecognized("WEIGHTED".to_string()),
            threshold: None,
        })
    );
}

#[test]
fn test_duplicate_node_ids_are_rejected() {
    let json = r#"{
      "nodes": [
        { "id": "a", "type": "rule", "data": {} },
        { "id": "a", "type": "operator", "data": {} }
      ],
      "edges": []
    }"#;
    let err = ProgramDefinition::from_json(json).expect_err("duplicate id");
    assert!(matches!(err, ProgramConversionError::DuplicateNodeId(ref id) if id == "a"));
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let err = ProgramDefinition::from_json("{ nodes: ").expect_err("not json");
    assert!(matches!(err, ProgramConversionError::JsonParseError(_)));
}

#[test]
fn test_event_data_accepts_strings_and_numbers() {
    let event = EventData::from_json(r#"{ "value": 150, "location": "web", "coupon": null }"#)
        .expect("valid event");
    assert_eq!(event.get("value"), Some(&Value::Number(150.0)));
    assert_eq!(event.get("location"), Some(&Value::from("web")));
    assert_eq!(event.get("coupon"), Some(&Value::Null));
    assert_eq!(event.get("missing"), None);

    let collected: EventData = [("value", 10), ("count", 2)].into_iter().collect();
    assert_eq!(collected.len(), 2);
}

const TEMPLATE_CATALOGUE_JSON: &str = r#"
{
  "templates": [
    {
      "id": "spend-threshold",
      "name": "Spend threshold bonus",
      "description": "Fixed bonus for baskets of 100 or more",
      "category": "Spending",
      "tags": ["bonus", "basket"],
      "complexity": "basic",
      "nodes": [
        { "id": "c", "type": "constraint", "data": { "label": "Spend", "isActive": true, "parameter": "value", "comparisonOperator": "GREATER_OR_EQUAL", "value": 100 } },
        { "id": "r", "type": "rule", "data": { "label": "Rule", "isActive": true, "ruleType": "CONDITIONAL" } },
        { "id": "d", "type": "distribution", "data": { "label": "Bonus", "isActive": true, "pointMappingType": "FIXED_AMOUNT", "fixedAmount": 25, "distributionType": "POINTS" } }
      ],
      "edges": [
        { "id": "e1", "source": "c", "target": "r" },
        { "id": "e2", "source": "r", "target": "d" }
      ]
    },
    {
      "id": "empty",
      "name": "Blank canvas",
      "complexity": "advanced"
    }
  ]
}
"#;

#[test]
fn test_template_catalogue_loads_and_runs() {
    let templates = ProgramTemplate::catalogue_from_json(TEMPLATE_CATALOGUE_JSON)
        .expect("valid catalogue");
    assert_eq!(templates.len(), 2);

    let spend = &templates[0];
    assert_eq!(spend.complexity, Complexity::Basic);
    assert_eq!(spend.tags, vec!["bonus", "basket"]);

    let program = spend.clone().into_program().expect("converted");
    let result = dry_test_program(&program, &event_with_value(120)).expect("acyclic");
    assert_eq!(result.overall_program_result.total_calculated_points, 25.0);

    let blank = &templates[1];
    assert_eq!(blank.complexity, Complexity::Advanced);
    assert!(blank.program.nodes.is_empty());
    assert!(blank.description.is_empty());
}
