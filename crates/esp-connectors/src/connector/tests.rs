// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::value::{DirectionTokens, PropertyKind};

fn props(entries: &[(&str, PropertyValue)]) -> PropertyMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn variant(type_name: &str) -> Arc<Variant> {
    Registry::global()
        .get(type_name)
        .unwrap_or_else(|| panic!("{type_name} is not registered"))
}

fn file_subscriber() -> Connector {
    Connector::from_parameters(
        variant("FileSubscriber"),
        "fs",
        None,
        Some("reader"),
        None,
        props(&[("fsname", "in.csv".into()), ("fstype", "csv".into())]),
    )
    .unwrap()
}

fn strict() -> BuildOptions {
    BuildOptions {
        validation: ValidationOptions {
            strict: true,
            ..ValidationOptions::default()
        },
        ..BuildOptions::default()
    }
}

#[test]
fn test_type_property_selects_publisher() {
    let xml = r#"<connector class="fs" name="out">
      <properties>
        <property name="type">pub</property>
        <property name="fsname">out.csv</property>
        <property name="fstype">csv</property>
      </properties>
    </connector>"#;
    let c = Connector::from_xml(xml).unwrap();
    assert_eq!(c.type_name(), "FilePublisher");
    assert_eq!(c.direction(), Direction::Publish);
    assert!(!c.contains("type"));
}

#[test]
fn test_type_property_selects_subscriber() {
    let xml = r#"<connector class="fs" name="in">
      <properties>
        <property name="type">sub</property>
        <property name="fsname">in.csv</property>
        <property name="fstype">csv</property>
      </properties>
    </connector>"#;
    assert_eq!(Connector::from_xml(xml).unwrap().type_name(), "FileSubscriber");
}

#[test]
fn test_type_attribute_and_long_tokens() {
    let publish = r#"<connector class="fs" name="a" type="publish"><properties>
        <property name="fsname">a.csv</property><property name="fstype">csv</property>
      </properties></connector>"#;
    let subscribe = r#"<connector class="fs" name="b" type="subscribe"><properties>
        <property name="fsname">b.csv</property><property name="fstype">csv</property>
      </properties></connector>"#;
    assert_eq!(Connector::from_xml(publish).unwrap().type_name(), "FilePublisher");
    assert_eq!(Connector::from_xml(subscribe).unwrap().type_name(), "FileSubscriber");
}

#[test]
fn test_missing_direction_is_subscriber() {
    let xml = r#"<connector class="fs" name="in"><properties>
        <property name="fsname">in.csv</property><property name="fstype">csv</property>
      </properties></connector>"#;
    assert_eq!(Connector::from_xml(xml).unwrap().type_name(), "FileSubscriber");
}

#[test]
fn test_socket_address_selects_socket_variant() {
    let xml = r#"<connector class="fs" name="s" type="pub"><properties>
        <property name="fsname">:2900</property><property name="fstype">csv</property>
      </properties></connector>"#;
    let c = Connector::from_xml(xml).unwrap();
    assert_eq!(c.type_name(), "SocketPublisher");

    let xml = r#"<connector class="fs" name="s"><properties>
        <property name="fsname">esp-host.example:31417</property><property name="fstype">binary</property>
      </properties></connector>"#;
    assert_eq!(Connector::from_xml(xml).unwrap().type_name(), "SocketSubscriber");
}

#[test]
fn test_unknown_class_keeps_everything() {
    let xml = r#"<connector class="foo" name="x" type="pub"><properties>
        <property name="anything">goes</property>
      </properties></connector>"#;
    let c = Connector::from_xml(xml).unwrap();
    assert_eq!(c.type_name(), GENERIC_TYPE);
    assert!(c.variant().is_generic());
    assert_eq!(c.class(), "foo");
    assert_eq!(c.direction(), Direction::Publish);
    assert_eq!(c.get("anything"), Some(&PropertyValue::from("goes")));
}

const GENERIC_TYPE: &str = crate::registry::GENERIC_TYPE_NAME;

#[test]
fn test_from_parameters_assigns_positional_and_keywords() {
    let c = Connector::from_parameters(
        variant("FileSubscriber"),
        "fs",
        None,
        None,
        Some(true),
        props(&[
            ("fsname", "in.csv".into()),
            ("fstype", "csv".into()),
            ("header", "full".into()),
            ("type", "pub".into()),
        ]),
    )
    .unwrap();
    assert_eq!(c.len(), 3);
    assert_eq!(c.direction(), Direction::Subscribe);
    assert_eq!(c.active(), Some(true));
    assert!(c.name().starts_with(DEFAULT_NAME_PREFIX));
}

#[test]
fn test_unknown_parameter_is_rejected() {
    let err = Connector::from_parameters(
        variant("FileSubscriber"),
        "fs",
        None,
        None,
        None,
        props(&[("fsname", "in.csv".into()), ("foo", "bar".into())]),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "foo is not a valid parameter for FileSubscriber");
}

#[test]
fn test_set_property_semantics() {
    let mut c = file_subscriber();

    c.set_property("header", Some("full".into())).unwrap();
    assert_eq!(c.get("header"), Some(&PropertyValue::from("full")));
    c.set_property("header", None).unwrap();
    assert!(!c.contains("header"));

    c.set_property("name", Some("renamed".into())).unwrap();
    assert_eq!(c.name(), "renamed");
    assert!(!c.contains("name"));

    assert!(matches!(
        c.set_property("bogus", Some(1.into())),
        Err(ConnectorError::UnknownParameter { .. })
    ));
}

#[test]
fn test_type_key_renormalizes_direction() {
    let mut c = Connector::new("foo", None, Some("x"));
    assert_eq!(c.direction(), Direction::Subscribe);
    c.set_property("type", Some("publish".into())).unwrap();
    assert_eq!(c.direction(), Direction::Publish);
    assert!(c.is_empty());
}

#[test]
fn test_wrong_kind_is_a_type_mismatch() {
    let mut c = file_subscriber();
    let err = c.set_property("snapshot", Some("yes".into())).unwrap_err();
    match err {
        ConnectorError::TypeMismatch {
            property,
            expected,
            found,
        } => {
            assert_eq!(property, "snapshot");
            assert_eq!(expected, vec![PropertyKind::Bool]);
            assert_eq!(found, PropertyKind::String);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_numeric_slots_normalize() {
    let mut c = file_subscriber();
    c.set_property("periodicity", Some(5.0.into())).unwrap();
    assert_eq!(c.get("periodicity"), Some(&PropertyValue::Int(5)));
    assert!(matches!(
        c.set_property("periodicity", Some(2.5.into())),
        Err(ConnectorError::TypeMismatch { .. })
    ));

    let mut timer = Connector::from_parameters(
        variant("TimerPublisher"),
        "timer",
        None,
        Some("tick"),
        None,
        props(&[
            ("basetime", "2025-01-01 00:00:00".into()),
            ("interval", 5.into()),
            ("unit", "minute".into()),
        ]),
    )
    .unwrap();
    assert_eq!(timer.get("interval"), Some(&PropertyValue::Float(5.0)));
    timer.set_property("interval", Some(0.into())).unwrap();
    assert_eq!(timer.validate().len(), 1);
}

#[test]
fn test_placeholders_bypass_checks() {
    let mut c = file_subscriber();
    c.set_property("periodicity", Some("@PERIOD@".into())).unwrap();
    c.set_property("fstype", Some("@FSTYPE@".into())).unwrap();
    assert!(c.validate().is_empty());
}

#[test]
fn test_validate_reports_missing_and_invalid() {
    let mut c = Connector::from_parameters(
        variant("FileSubscriber"),
        "fs",
        None,
        Some("r"),
        None,
        PropertyMap::new(),
    )
    .unwrap();
    let issues = c.validate();
    let missing: Vec<_> = issues.iter().map(ValidationIssue::property).collect();
    assert_eq!(missing, ["fsname", "fstype"]);

    c.set_property("fsname", Some("in.csv".into())).unwrap();
    c.set_property("fstype", Some("parquet".into())).unwrap();
    assert_eq!(c.get("fstype"), Some(&PropertyValue::from("parquet")));
    assert_eq!(
        c.validate_all().unwrap_err(),
        vec![ValidationIssue::Invalid {
            property: "fstype".into(),
            value: "'parquet'".into(),
        }]
    );
}

#[test]
fn test_strict_mode_rejects() {
    let err = Connector::from_parameters_with(
        variant("FileSubscriber"),
        "fs",
        None,
        None,
        None,
        props(&[("fsname", "in.csv".into())]),
        &strict(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::MissingRequired { ref property, ref variant }
            if property == "fstype" && variant == "FileSubscriber"
    ));

    let err = Connector::from_parameters_with(
        variant("FileSubscriber"),
        "fs",
        None,
        None,
        None,
        props(&[("fsname", "in.csv".into()), ("fstype", "parquet".into())]),
        &strict(),
    )
    .unwrap_err();
    assert!(matches!(err, ConnectorError::InvalidValue { .. }));
}

#[test]
fn test_copy_rebuilds_same_state() {
    let mut c = file_subscriber();
    c.set_property("header", Some("full".into())).unwrap();
    c.set_active(Some(false));
    let copy = c.copy().unwrap();
    assert_eq!(copy.name(), c.name());
    assert_eq!(copy.type_name(), c.type_name());
    assert_eq!(copy.properties(), c.properties());
    assert_eq!(copy.to_xml(), c.to_xml());
}

#[test]
fn test_xml_property_order() {
    let mut c = file_subscriber();
    c.set_property("header", Some("full".into())).unwrap();
    c.set_property("configfilesection", Some("sec".into())).unwrap();
    assert_eq!(
        c.to_xml(),
        concat!(
            r#"<connector class="fs" name="reader" type="subscribe"><properties>"#,
            r#"<property name="snapshot">false</property>"#,
            r#"<property name="configfilesection">sec</property>"#,
            r#"<property name="fsname">in.csv</property>"#,
            r#"<property name="fstype">csv</property>"#,
            r#"<property name="header">full</property>"#,
            "</properties></connector>"
        )
    );
}

#[test]
fn test_defaults_follow_declaration_order() {
    let c = Connector::from_parameters(
        variant("KafkaSubscriber"),
        "kafka",
        None,
        Some("k"),
        None,
        props(&[
            ("kafkahostport", "broker:9092".into()),
            ("kafkatopic", "trades".into()),
            ("urlhostport", "esp:31415".into()),
        ]),
    )
    .unwrap();
    let element = c.to_element();
    let names: Vec<_> = element.properties.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        &names[..4],
        ["kafkapartition", "kafkatype", "numbufferedmsgs", "snapshot"]
    );
    assert_eq!(element.property("numbufferedmsgs"), Some("10000"));
}

#[test]
fn test_wire_names_map_both_ways() {
    let mut c = Connector::from_parameters(
        variant("KafkaSubscriber"),
        "kafka",
        None,
        Some("k"),
        None,
        props(&[
            ("kafkahostport", "broker:9092".into()),
            ("kafkatopic", "trades".into()),
            ("urlhostport", "esp:31415".into()),
        ]),
    )
    .unwrap();
    c.set_property("csvmsgperevent_block", Some(true.into())).unwrap();
    let xml = c.to_xml();
    assert!(xml.contains(r#"<property name="csvmsgpereventblock">true</property>"#));

    let back = Connector::from_xml(&xml).unwrap();
    assert_eq!(
        back.get("csvmsgperevent_block"),
        Some(&PropertyValue::Bool(true))
    );
}

#[test]
fn test_reparsed_connector_writes_identical_xml() {
    let first = file_subscriber().to_xml();
    let back = Connector::from_xml(&first).unwrap();
    assert_eq!(back.get("snapshot"), Some(&PropertyValue::Bool(false)));
    assert_eq!(back.to_xml(), first);

    let mut kafka = Connector::from_parameters(
        variant("KafkaSubscriber"),
        "kafka",
        None,
        Some("k"),
        None,
        props(&[
            ("kafkahostport", "broker:9092".into()),
            ("kafkatopic", "trades".into()),
            ("urlhostport", "esp:31415".into()),
        ]),
    )
    .unwrap();
    kafka.set_property("configfilesection", Some("sec".into())).unwrap();
    let first = kafka.to_xml();
    assert_eq!(Connector::from_xml(&first).unwrap().to_xml(), first);
}

#[test]
fn test_explicit_default_stays_in_defaults_block() {
    let mut explicit = file_subscriber();
    explicit.set_property("snapshot", Some(false.into())).unwrap();
    assert_eq!(explicit.to_xml(), file_subscriber().to_xml());

    explicit.set_property("snapshot", Some(true.into())).unwrap();
    let xml = explicit.to_xml();
    let snapshot = xml.find(r#"name="snapshot""#).unwrap();
    let fstype = xml.find(r#"name="fstype""#).unwrap();
    assert!(fstype < snapshot);
}

#[test]
fn test_empty_property_element_is_absent() {
    let c = Connector::from_xml(
        r#"<connector class="fs" name="in"><properties>
             <property name="fsname">in.csv</property>
             <property name="fstype">csv</property>
             <property name="snapshot"/>
             <property name="periodicity"></property>
           </properties></connector>"#,
    )
    .unwrap();
    assert_eq!(c.type_name(), "FileSubscriber");
    assert!(!c.contains("snapshot"));
    assert!(!c.contains("periodicity"));
    assert!(c.to_xml().contains(r#"<property name="snapshot">false</property>"#));
}

#[test]
fn test_huge_real_in_integer_slot_is_a_type_mismatch() {
    let mut c = file_subscriber();
    assert!(matches!(
        c.set_property("maxfilesize", Some(1e300.into())),
        Err(ConnectorError::TypeMismatch { .. })
    ));
    assert!(!c.contains("maxfilesize"));
}

#[test]
fn test_active_attribute() {
    let on = r#"<connector class="foo" name="a" active="1"><properties/></connector>"#;
    let odd = r#"<connector class="foo" name="a" active="maybe"><properties/></connector>"#;
    assert_eq!(Connector::from_xml(on).unwrap().active(), Some(true));
    assert_eq!(Connector::from_xml(odd).unwrap().active(), None);
}

#[test]
fn test_short_tokens_and_digit_bools() {
    let mut c = file_subscriber();
    c.set_active(Some(true));
    let options = XmlOptions {
        direction_tokens: DirectionTokens::Short,
        bool_format: BoolFormat::Digit,
        ..XmlOptions::default()
    };
    let xml = c.to_xml_with(&options);
    assert!(xml.starts_with(r#"<connector class="fs" name="reader" active="1" type="sub">"#));
    assert!(xml.contains(r#"<property name="snapshot">0</property>"#));
}

#[test]
fn test_display() {
    let mut c = Connector::new("foo", Some("pub"), Some("n"));
    c.set_property("a", Some(1.into())).unwrap();
    c.set_property("b", Some("x".into())).unwrap();
    assert_eq!(
        c.to_string(),
        "Connector('foo', name='n', type='publish', properties={'a': 1, 'b': 'x'})"
    );
}

#[test]
fn test_gen_name_shape() {
    let name = gen_name("c_");
    assert_eq!(name.len(), 10);
    assert!(name.starts_with("c_"));
    assert!(name[2..]
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
    assert_ne!(gen_name("c_"), gen_name("c_"));
}
