// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File and socket connectors (`class="fs"`).
//!
//! Both share the `fs` class; a socket is told apart by an `fsname` of the
//! form `[host]:port`.

use super::{
    boolean, config_section, count, csv_include_schema, csv_publisher, protobuf,
    publisher_common, snapshot, string,
};
use crate::error::Result;
use crate::registry::{Variant, VariantBuilder};
use crate::schema::PropertyBuilder;
use crate::value::Direction;

const SOCKET_ADDRESS: &str = r"[\w.\-]*:\d+$";

const FILE_TYPES: [&str; 8] = ["binary", "csv", "xml", "json", "html", "syslog", "hdat", "cef"];

fn fsname_and_type() -> [PropertyBuilder; 2] {
    [
        string("fsname").required(),
        string("fstype").required().one_of(FILE_TYPES),
    ]
}

fn subscriber(type_name: &str) -> VariantBuilder {
    Variant::builder(type_name, "fs", Direction::Subscribe)
        .positional(&["fsname", "fstype"])
        .properties(fsname_and_type())
        .properties([
            snapshot(),
            config_section(),
            string("collapse"),
            boolean("rmretdel"),
            string("dateformat"),
            string("header"),
            count("periodicity"),
            count("maxfilesize"),
            boolean("unbufferedoutputstreams"),
            boolean("addtimestamp"),
            string("cefsyslogprefix"),
            csv_include_schema(),
            boolean("useclientmsgid"),
            string("hdatfilename"),
            count("hdfsblocksize"),
            count("hdfsnumreplicas"),
            string("hdatlasrhostport"),
            string("hdatlasrkey"),
            count("rate"),
        ])
        .properties(protobuf())
}

fn publisher(type_name: &str) -> VariantBuilder {
    Variant::builder(type_name, "fs", Direction::Publish)
        .positional(&["fsname", "fstype"])
        .properties(fsname_and_type())
        .properties(publisher_common())
        .properties(csv_publisher())
        .properties([
            string("dateformat"),
            boolean("prebuffer"),
            count("repeatcount"),
            count("rate"),
            boolean("growinginputfile"),
            string("cefsyslogprefix"),
            string("header"),
        ])
        .properties(protobuf())
}

pub(super) fn file_subscriber() -> Result<Variant> {
    subscriber("FileSubscriber").build()
}

pub(super) fn socket_subscriber() -> Result<Variant> {
    subscriber("SocketSubscriber")
        .select_matching("fsname", SOCKET_ADDRESS)
        .build()
}

pub(super) fn file_publisher() -> Result<Variant> {
    publisher("FilePublisher").build()
}

pub(super) fn socket_publisher() -> Result<Variant> {
    publisher("SocketPublisher")
        .select_matching("fsname", SOCKET_ADDRESS)
        .build()
}
