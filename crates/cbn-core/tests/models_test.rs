use cbn_core::models::NodeKind;

#[test]
fn known_kinds_parse_to_variants() {
    assert_eq!(NodeKind::from("trigger"), NodeKind::Trigger);
    assert_eq!(NodeKind::from("insufficiency"), NodeKind::Insufficiency);
    assert_eq!(NodeKind::from("malfunction"), NodeKind::Malfunction);
    assert_eq!(NodeKind::from("variable"), NodeKind::Variable);
}

#[test]
fn unknown_kind_round_trips_verbatim() {
    let kind: NodeKind = serde_json::from_str("\"Triggering Condition\"").unwrap();
    assert_eq!(kind, NodeKind::Other("Triggering Condition".into()));
    assert_eq!(
        serde_json::to_string(&kind).unwrap(),
        "\"Triggering Condition\""
    );
}

#[test]
fn relationship_rules() {
    assert!(NodeKind::Malfunction.edge_violation(&NodeKind::Variable).is_some());
    assert!(NodeKind::Insufficiency.edge_violation(&NodeKind::Trigger).is_some());
    assert!(NodeKind::Trigger.edge_violation(&NodeKind::Insufficiency).is_none());
    assert!(NodeKind::Insufficiency.edge_violation(&NodeKind::Malfunction).is_none());
    assert!(NodeKind::Variable.edge_violation(&NodeKind::Trigger).is_none());
}
