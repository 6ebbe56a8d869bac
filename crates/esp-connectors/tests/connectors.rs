// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end tests over real project documents.

use esp_connectors::{
    Connector, ConnectorError, ConnectorFactory, ConnectorSet, Direction, PropertyValue, Registry,
    SdkConfig, ValidationIssue, XmlOptions,
};

const WINDOW: &str = include_str!("data/window_connectors.xml");
const INVALID: &str = include_str!("data/invalid_values.xml");
const MALFORMED: &str = include_str!("data/malformed.xml");

#[test]
fn test_project_connectors_resolve() {
    let set = ConnectorSet::from_xml(WINDOW).unwrap();
    let types: Vec<_> = set.iter().map(Connector::type_name).collect();
    assert_eq!(
        types,
        ["FileSubscriber", "KafkaPublisher", "SocketPublisher", "Connector"]
    );

    let kafka = set.get("trades_out").unwrap();
    assert_eq!(kafka.direction(), Direction::Publish);
    assert_eq!(kafka.active(), Some(false));
    assert_eq!(kafka.get("blocksize"), Some(&PropertyValue::Int(64)));
    assert_eq!(kafka.get("publishwithupsert"), Some(&PropertyValue::Bool(true)));

    let vendor = set.get("vendor").unwrap();
    assert_eq!(vendor.class(), "custom");
    assert_eq!(vendor.get("endpoint"), Some(&PropertyValue::from("tcp://vendor")));
}

#[test]
fn test_project_connectors_are_valid() {
    let set = ConnectorSet::from_xml(WINDOW).unwrap();
    for connector in &set {
        assert!(
            connector.validate().is_empty(),
            "{}: {:?}",
            connector.name(),
            connector.validate()
        );
    }
}

#[test]
fn test_placeholder_survives_round_trip() {
    let set = ConnectorSet::from_xml(WINDOW).unwrap();
    let xml = set.to_xml_with(&XmlOptions::pretty());
    assert!(xml.contains("@DATA_DIR@/trades.csv"));
    let again = ConnectorSet::from_xml(&xml).unwrap();
    assert_eq!(
        again.get("trades_in").unwrap().get("fsname"),
        Some(&PropertyValue::from("@DATA_DIR@/trades.csv"))
    );
}

#[test]
fn test_normalized_output_is_stable() {
    let first = ConnectorSet::from_xml(WINDOW).unwrap().to_xml();
    let second = ConnectorSet::from_xml(&first).unwrap().to_xml();
    assert_eq!(first, second);
}

#[test]
fn test_content_problems_are_reported_not_raised() {
    let set = ConnectorSet::from_xml(INVALID).unwrap();

    let tick = set.get("tick").unwrap();
    let props: Vec<_> = tick.validate().iter().map(|i| i.property().to_string()).collect();
    assert_eq!(props, ["interval", "unit"]);

    let sensors = set.get("sensors").unwrap();
    assert_eq!(sensors.type_name(), "MQTTSubscriber");
    assert_eq!(
        sensors.validate(),
        vec![ValidationIssue::Missing {
            property: "mqttmsgtype".into()
        }]
    );
}

#[test]
fn test_strict_configuration_raises() {
    let config = SdkConfig::from_toml_str("[validation]\nstrict = true\n").unwrap();
    let factory = ConnectorFactory::with_config(Registry::global(), config);
    match factory.parse_set(INVALID) {
        Err(ConnectorError::InvalidValue { property, .. }) => assert_eq!(property, "interval"),
        other => panic!("expected an invalid value, got {other:?}"),
    }
}

#[test]
fn test_malformed_document_points_at_line() {
    match Connector::from_xml(MALFORMED) {
        Err(ConnectorError::MalformedDocument { line, snippet, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(snippet, r#"<property name="fsname">in.csv</propety>"#);
        }
        other => panic!("expected a malformed document, got {other:?}"),
    }
}

#[test]
fn test_catalog_covers_every_family() {
    let registry = Registry::global();
    let keys = [
        ("adapter", "pub"),
        ("adapter", "sub"),
        ("bacnet", "pub"),
        ("db", "pub"),
        ("db", "sub"),
        ("fs", "pub"),
        ("fs", "sub"),
        ("kafka", "pub"),
        ("kafka", "sub"),
        ("modbus", "pub"),
        ("modbus", "sub"),
        ("mqtt", "pub"),
        ("mqtt", "sub"),
        ("nurego", "sub"),
        ("opcua", "pub"),
        ("opcua", "sub"),
        ("pi", "pub"),
        ("pi", "sub"),
        ("project", "pub"),
        ("pylon", "pub"),
        ("rmq", "pub"),
        ("rmq", "sub"),
        ("smtp", "sub"),
        ("sniffer", "pub"),
        ("sol", "pub"),
        ("sol", "sub"),
        ("tdata", "sub"),
        ("tdlistener", "sub"),
        ("tervela", "sub"),
        ("tva", "pub"),
        ("tibrv", "pub"),
        ("tibrv", "sub"),
        ("timer", "pub"),
        ("url", "pub"),
        ("uvc", "pub"),
        ("websocket", "pub"),
        ("mq", "pub"),
        ("mq", "sub"),
    ];
    for (class, direction) in keys {
        assert!(
            !registry
                .candidates(class, Direction::from(direction))
                .is_empty(),
            "no variant for ({class}, {direction})"
        );
    }
}
