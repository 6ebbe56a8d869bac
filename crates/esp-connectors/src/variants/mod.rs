// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in connector catalog.
//!
//! Each entry is a declaration function; [`crate::Registry::builtin`] calls
//! them in table order. Registration order matters only as a tie-breaker
//! between candidates with the same number of selectors.

mod devices;
mod engine;
mod files;
mod messaging;
mod storage;
mod web;

use crate::error::Result;
use crate::registry::Variant;
use crate::schema::{prop, PropertyBuilder};
use crate::value::PropertyKind;

/// Every built-in variant, in registration order.
pub(crate) const BUILTIN: &[fn() -> Result<Variant>] = &[
    engine::adapter_subscriber,
    engine::adapter_publisher,
    engine::project_publisher,
    engine::timer_publisher,
    files::file_subscriber,
    files::socket_subscriber,
    files::file_publisher,
    files::socket_publisher,
    storage::database_subscriber,
    storage::database_publisher,
    storage::teradata_subscriber,
    storage::teradata_listener_subscriber,
    storage::pi_subscriber,
    storage::pi_publisher,
    messaging::kafka_subscriber,
    messaging::kafka_publisher,
    messaging::mqtt_subscriber,
    messaging::mqtt_publisher,
    messaging::rabbitmq_subscriber,
    messaging::rabbitmq_publisher,
    messaging::solace_subscriber,
    messaging::solace_publisher,
    messaging::tervela_subscriber,
    messaging::tervela_publisher,
    messaging::tibco_subscriber,
    messaging::tibco_publisher,
    messaging::websphere_mq_subscriber,
    messaging::websphere_mq_publisher,
    devices::bacnet_publisher,
    devices::modbus_subscriber,
    devices::modbus_publisher,
    devices::opcua_subscriber,
    devices::opcua_publisher,
    devices::pylon_publisher,
    devices::sniffer_publisher,
    devices::uvc_publisher,
    web::nurego_subscriber,
    web::smtp_subscriber,
    web::url_publisher,
    web::websocket_publisher,
];

fn string(name: &str) -> PropertyBuilder {
    prop(name, PropertyKind::String)
}

fn int(name: &str) -> PropertyBuilder {
    prop(name, PropertyKind::Int)
}

fn float(name: &str) -> PropertyBuilder {
    prop(name, PropertyKind::Float)
}

fn boolean(name: &str) -> PropertyBuilder {
    prop(name, PropertyKind::Bool)
}

/// Non-negative integer.
fn count(name: &str) -> PropertyBuilder {
    int(name).expr("value >= 0")
}

/// TCP/UDP port number.
fn port(name: &str) -> PropertyBuilder {
    int(name).expr("value > 0 and value <= 65535")
}

/// `host:port`.
fn host_port(name: &str) -> PropertyBuilder {
    string(name).matching(r"^[\w\-\.]+:\d+$")
}

/// Subscribers send the window snapshot unless told otherwise.
fn snapshot() -> PropertyBuilder {
    boolean("snapshot").required().default(false)
}

fn config_section() -> PropertyBuilder {
    string("configfilesection")
}

/// Options shared by most publishers.
fn publisher_common() -> Vec<PropertyBuilder> {
    vec![
        config_section(),
        string("transactional"),
        count("blocksize"),
        boolean("publishwithupsert"),
        count("maxevents"),
    ]
}

/// Options shared by most subscribers.
fn subscriber_common() -> Vec<PropertyBuilder> {
    vec![
        snapshot(),
        config_section(),
        string("collapse"),
        boolean("rmretdel"),
        string("dateformat"),
    ]
}

/// Protocol-buffer message selection.
fn protobuf() -> Vec<PropertyBuilder> {
    vec![string("protofile"), string("protomsg")]
}

/// CSV shaping on publishers fed from a message bus.
fn csv_publisher() -> Vec<PropertyBuilder> {
    vec![
        boolean("ignorecsvparseerrors"),
        string("csvfielddelimiter"),
        boolean("noautogenfield"),
        boolean("addcsvopcode"),
        string("addcsvflags"),
    ]
}

fn csv_include_schema() -> PropertyBuilder {
    string("csvincludeschema").one_of(["never", "once", "pereventblock"])
}
