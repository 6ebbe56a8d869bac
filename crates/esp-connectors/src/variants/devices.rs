// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Industrial protocols, cameras and packet capture.

use super::{boolean, config_section, count, float, int, port, publisher_common, snapshot, string};
use crate::error::Result;
use crate::registry::Variant;
use crate::value::Direction;

pub(super) fn bacnet_publisher() -> Result<Variant> {
    Variant::builder("BacnetPublisher", "bacnet", Direction::Publish)
        .positional(&["bacnetbbmdaddress", "bacnetbbmdport", "bacnetconfigfile"])
        .properties([
            string("bacnetbbmdaddress").required(),
            port("bacnetbbmdport").required(),
            string("bacnetconfigfile").required(),
            port("bacnetipport"),
            boolean("ignoretimeouts"),
        ])
        .properties(publisher_common())
        .build()
}

pub(super) fn modbus_subscriber() -> Result<Variant> {
    Variant::builder("ModbusSubscriber", "modbus", Direction::Subscribe)
        .positional(&["modbus"])
        .properties([string("modbus").required(), snapshot()])
        .build()
}

pub(super) fn modbus_publisher() -> Result<Variant> {
    Variant::builder("ModbusPublisher", "modbus", Direction::Publish)
        .positional(&["modbus"])
        .properties([string("modbus").required(), count("interval")])
        .build()
}

fn opcua_session() -> [crate::schema::PropertyBuilder; 6] {
    [
        string("opcuaendpoint").matching(r"^opc\.tcp://"),
        string("opcuanamespaceuri"),
        string("opcuausername"),
        string("opcuapassword"),
        string("opcuanodeids"),
        config_section(),
    ]
}

pub(super) fn opcua_subscriber() -> Result<Variant> {
    Variant::builder("OPCUASubscriber", "opcua", Direction::Subscribe)
        .properties(opcua_session())
        .build()
}

pub(super) fn opcua_publisher() -> Result<Variant> {
    Variant::builder("OPCUAPublisher", "opcua", Direction::Publish)
        .properties(opcua_session())
        .property(count("publishinterval"))
        .properties([
            string("transactional"),
            count("blocksize"),
            boolean("publishwithupsert"),
            count("maxevents"),
        ])
        .build()
}

pub(super) fn pylon_publisher() -> Result<Variant> {
    Variant::builder("PylonPublisher", "pylon", Direction::Publish)
        .properties([
            string("cameraipaddress"),
            count("maxnumframes"),
            count("maxframerate"),
            string("camerafeaturesfile"),
            count("camerawidth"),
            count("cameraheight"),
            string("camerapixelformat"),
            count("camerapacketsize"),
            int("cameraxoffset"),
            int("camerayoffset"),
            string("transactional"),
            config_section(),
            boolean("publishwithupsert"),
            count("maxevents"),
        ])
        .build()
}

pub(super) fn sniffer_publisher() -> Result<Variant> {
    Variant::builder("SnifferPublisher", "sniffer", Direction::Publish)
        .positional(&["interface", "protocol", "packetfields"])
        .properties([
            string("interface").required(),
            string("protocol").required(),
            string("packetfields").required(),
            boolean("addtimestamp"),
            string("vendorid"),
            string("vendortype"),
            string("indexfieldname"),
            string("pcapfilter"),
            string("httpports"),
            boolean("ignorenopayloadpackets"),
        ])
        .properties(publisher_common())
        .build()
}

pub(super) fn uvc_publisher() -> Result<Variant> {
    Variant::builder("UVCPublisher", "uvc", Direction::Publish)
        .properties([
            float("frame_rate").expr("value > 0"),
            string("format_in"),
            string("format_out"),
            count("width"),
            count("height"),
            string("brightness"),
            string("gain"),
            string("saturation"),
            string("contrast"),
            string("device"),
            boolean("blocking"),
            count("predelay"),
            count("maxevents"),
            string("cameraid"),
        ])
        .build()
}
