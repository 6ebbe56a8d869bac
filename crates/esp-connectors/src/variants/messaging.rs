// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message-bus connectors: Kafka, MQTT, RabbitMQ, Solace, Tervela,
//! TIBCO Rendezvous and WebSphere MQ.

use super::{
    boolean, config_section, count, csv_include_schema, csv_publisher, host_port, port,
    protobuf, publisher_common, string, subscriber_common,
};
use crate::error::Result;
use crate::registry::Variant;
use crate::schema::PropertyBuilder;
use crate::value::{Direction, PropertyKind};

/// Per-event CSV message splitting on bus subscribers.
fn csv_per_event() -> [PropertyBuilder; 2] {
    [count("csvmsgperevent"), count("csvmsgpereventblock")]
}

fn buffered_messages() -> PropertyBuilder {
    count("numbufferedmsgs").required()
}

pub(super) fn kafka_subscriber() -> Result<Variant> {
    Variant::builder("KafkaSubscriber", "kafka", Direction::Subscribe)
        .positional(&["kafkahostport", "kafkatopic", "urlhostport"])
        .properties([
            string("kafkahostport")
                .required()
                .matching(r"(\w[\w\-\.]*:\d+\s*,?\s*)+"),
            string("kafkatopic").required(),
            string("kafkapartition").required().default("0"),
            string("kafkatype").required().default("csv"),
            string("urlhostport").required(),
            buffered_messages().default(10_000),
        ])
        .properties(subscriber_common())
        .properties(protobuf())
        .properties([
            boolean("hotfailover"),
            csv_include_schema(),
            boolean("useclientmsgid"),
            string("zookeeperhostport").matching(r"\w[\w\-\.]*:\d+"),
            string("kafkaglobalconfig"),
            string("kafkatopicconfig"),
            boolean("csvmsgperevent"),
            boolean("csvmsgperevent_block").wire("csvmsgpereventblock"),
        ])
        .build()
}

pub(super) fn kafka_publisher() -> Result<Variant> {
    Variant::builder("KafkaPublisher", "kafka", Direction::Publish)
        .positional(&["kafkahostport", "kafkatopic", "urlhostport"])
        .properties([
            string("kafkahostport")
                .required()
                .matching(r"(.+?:.+?\s*,?\s*)+"),
            string("kafkatopic").required(),
            string("kafkapartition").required(),
            string("kafkatype").required(),
            string("urlhostport").required(),
            string("dateformat"),
            string("kafkainitialoffset").or_kind(PropertyKind::Int),
            string("kafkaglobalconfig"),
            string("kafkatopicconfig"),
            boolean("useclientmsgid"),
        ])
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties(protobuf())
        .build()
}

pub(super) fn mqtt_subscriber() -> Result<Variant> {
    Variant::builder("MQTTSubscriber", "mqtt", Direction::Subscribe)
        .positional(&["mqtthost", "mqttclientid", "mqtttopic", "mqttqos", "mqttmsgtype"])
        .properties(mqtt_connection())
        .properties(subscriber_common())
        .properties(protobuf())
        .properties(csv_per_event())
        .properties([
            boolean("mqttretainmsg"),
            boolean("mqttdonotcleansession"),
            count("mqttmsgmaxdeliveryattempts"),
            count("mqttmsgdelaydeliveryattempts"),
            count("mqttmsgwaitbeforeretry"),
            count("mqttmaxinflightmsg"),
            string("csvincludeschema"),
            boolean("addcsvopcode"),
            string("addcsvflags"),
        ])
        .build()
}

pub(super) fn mqtt_publisher() -> Result<Variant> {
    Variant::builder("MQTTPublisher", "mqtt", Direction::Publish)
        .positional(&["mqtthost", "mqttclientid", "mqtttopic", "mqttqos", "mqttmsgtype"])
        .properties(mqtt_connection())
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties(protobuf())
        .properties([
            boolean("mqttacceptretainedmsg"),
            boolean("mqttcleansession"),
            string("dateformat"),
        ])
        .build()
}

/// Broker, session and TLS settings shared by both MQTT directions.
fn mqtt_connection() -> Vec<PropertyBuilder> {
    vec![
        string("mqtthost").required(),
        string("mqttclientid").required(),
        string("mqtttopic").required(),
        string("mqttqos").required().matching(r"^[012]$"),
        string("mqttmsgtype").required(),
        string("mqttuserid"),
        string("mqttpassword"),
        boolean("mqttpasswordencrypted"),
        port("mqttport"),
        count("mqttkeepaliveinterval"),
        boolean("mqttssl"),
        string("mqttsslcafile"),
        string("mqttsslcapath"),
        string("mqttsslcertfile"),
        string("mqttsslkeyfile"),
        string("mqttsslpassword"),
    ]
}

/// Broker, exchange and TLS settings shared by both RabbitMQ directions.
fn rabbitmq_connection() -> Vec<PropertyBuilder> {
    vec![
        string("rmquserid").required(),
        string("rmqpassword").required(),
        string("rmqhost").required(),
        port("rmqport").required(),
        string("rmqexchange").required(),
        string("rmqtopic").required(),
        string("rmqtype").required(),
        string("urlhostport").required(),
        boolean("rmqpasswordencrypted"),
        string("rmqvhost"),
        boolean("rmqssl"),
        string("rmqsslcacert"),
        string("rmqsslkey"),
        string("rmqsslcert"),
    ]
}

const RABBITMQ_POSITIONAL: [&str; 8] = [
    "rmqhost",
    "rmqport",
    "rmquserid",
    "rmqpassword",
    "rmqexchange",
    "rmqtopic",
    "rmqtype",
    "urlhostport",
];

pub(super) fn rabbitmq_subscriber() -> Result<Variant> {
    Variant::builder("RabbitMQSubscriber", "rmq", Direction::Subscribe)
        .positional(&RABBITMQ_POSITIONAL)
        .properties(rabbitmq_connection())
        .property(buffered_messages())
        .properties(subscriber_common())
        .properties(protobuf())
        .properties(csv_per_event())
        .properties([
            boolean("hotfailover"),
            boolean("buspersistence"),
            csv_include_schema(),
            boolean("useclientmsgid"),
            string("rmqcontenttype"),
            string("rmqheaders"),
        ])
        .build()
}

pub(super) fn rabbitmq_publisher() -> Result<Variant> {
    Variant::builder("RabbitMQPublisher", "rmq", Direction::Publish)
        .positional(&RABBITMQ_POSITIONAL)
        .properties(rabbitmq_connection())
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties(protobuf())
        .properties([
            string("dateformat"),
            boolean("buspersistence"),
            string("buspersistencequeue"),
            count("ackwindow"),
            count("acktimer"),
            boolean("useclientmsgid"),
        ])
        .build()
}

fn solace_connection() -> Vec<PropertyBuilder> {
    vec![
        host_port("solhostport").required(),
        string("soluserid").required(),
        string("solpassword").required(),
        string("solvpn").required(),
        string("soltopic").required(),
        string("urlhostport").required(),
        boolean("solpasswordencrypted"),
        boolean("json"),
    ]
}

pub(super) fn solace_subscriber() -> Result<Variant> {
    Variant::builder("SolaceSubscriber", "sol", Direction::Subscribe)
        .positional(&[
            "solhostport",
            "soluserid",
            "solpassword",
            "solvpn",
            "soltopic",
            "urlhostport",
            "numbufferedmsgs",
        ])
        .properties(solace_connection())
        .property(buffered_messages())
        .properties(subscriber_common())
        .properties(protobuf())
        .properties([boolean("hotfailover"), boolean("buspersistence")])
        .build()
}

pub(super) fn solace_publisher() -> Result<Variant> {
    Variant::builder("SolacePublisher", "sol", Direction::Publish)
        .positional(&[
            "solhostport",
            "soluserid",
            "solpassword",
            "solvpn",
            "soltopic",
            "urlhostport",
        ])
        .properties(solace_connection())
        .properties(publisher_common())
        .properties(protobuf())
        .properties([
            string("dateformat"),
            boolean("buspersistence"),
            string("buspersistencequeue"),
            boolean("getmsgfromdestattr"),
        ])
        .build()
}

fn tervela_connection() -> Vec<PropertyBuilder> {
    vec![
        string("tvaprimarytmx").required(),
        string("tvauserid").required(),
        string("tvapassword").required(),
        string("tvatopic").required(),
        string("tvaclientname").required(),
        string("urlhostport").required(),
        string("tvasecondarytmx"),
        string("tvalogfile"),
        boolean("tvapasswordencrypted"),
        boolean("json"),
    ]
}

pub(super) fn tervela_subscriber() -> Result<Variant> {
    Variant::builder("TervelaSubscriber", "tervela", Direction::Subscribe)
        .positional(&[
            "tvaprimarytmx",
            "tvauserid",
            "tvapassword",
            "tvatopic",
            "tvaclientname",
            "tvamaxoutstand",
            "numbufferedmsgs",
            "urlhostport",
        ])
        .properties(tervela_connection())
        .properties([count("tvamaxoutstand").required(), buffered_messages()])
        .properties(subscriber_common())
        .properties(protobuf())
        .properties([
            boolean("hotfailover"),
            count("tvapubbwlimit"),
            count("tvapubrate"),
            count("tvapubmsgexp"),
        ])
        .build()
}

pub(super) fn tervela_publisher() -> Result<Variant> {
    Variant::builder("TervelaPublisher", "tva", Direction::Publish)
        .positional(&[
            "tvaprimarytmx",
            "tvauserid",
            "tvapassword",
            "tvatopic",
            "tvaclientname",
            "tvasubname",
            "urlhostport",
        ])
        .properties(tervela_connection())
        .property(string("tvasubname").required())
        .properties(protobuf())
        .properties([
            config_section(),
            boolean("publishwithupsert"),
            string("dateformat"),
            count("maxevents"),
        ])
        .build()
}

fn tibco_connection() -> Vec<PropertyBuilder> {
    vec![
        string("tibrvsubject").required(),
        string("tibrvtype").required(),
        string("tibrvservice"),
        string("tibrvnetwork"),
        string("tibrvdaemon"),
    ]
}

pub(super) fn tibco_subscriber() -> Result<Variant> {
    Variant::builder("TibcoSubscriber", "tibrv", Direction::Subscribe)
        .positional(&["tibrvsubject", "tibrvtype"])
        .properties(tibco_connection())
        .properties(subscriber_common())
        .properties(protobuf())
        .properties(csv_per_event())
        .build()
}

pub(super) fn tibco_publisher() -> Result<Variant> {
    Variant::builder("TibcoPublisher", "tibrv", Direction::Publish)
        .positional(&["tibrvsubject", "tibrvtype"])
        .properties(tibco_connection())
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties(protobuf())
        .property(string("dateformat"))
        .build()
}

fn websphere_queue() -> Vec<PropertyBuilder> {
    vec![
        string("mqtype").required(),
        string("mqtopic"),
        string("mqqueue"),
        string("queuemanager"),
        boolean("usecorrelid"),
    ]
}

pub(super) fn websphere_mq_subscriber() -> Result<Variant> {
    Variant::builder("WebSphereMQSubscriber", "mq", Direction::Subscribe)
        .positional(&["mqtype"])
        .properties(websphere_queue())
        .properties(subscriber_common())
        .properties(protobuf())
        .properties(csv_per_event())
        .build()
}

pub(super) fn websphere_mq_publisher() -> Result<Variant> {
    Variant::builder("WebSphereMQPublisher", "mq", Direction::Publish)
        .positional(&["mqtype"])
        .properties(websphere_queue())
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties(protobuf())
        .properties([
            string("mqsubname"),
            string("dateformat"),
            boolean("ignoremqmdformat"),
        ])
        .build()
}
