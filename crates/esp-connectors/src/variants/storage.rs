// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Databases, Teradata and PI historian connectors.

use super::{boolean, config_section, count, int, publisher_common, snapshot, string};
use crate::error::Result;
use crate::registry::Variant;
use crate::value::Direction;

pub(super) fn database_subscriber() -> Result<Variant> {
    Variant::builder("DatabaseSubscriber", "db", Direction::Subscribe)
        .positional(&["connectstring", "desttablename"])
        .properties([
            string("connectstring").required(),
            string("desttablename").required(),
            snapshot(),
            config_section(),
            count("commitrows"),
            count("commitsecs"),
            boolean("ignoresqlerrors"),
            count("maxcolbinding"),
            boolean("pwdencrypted"),
            boolean("rmretdel"),
        ])
        .build()
}

pub(super) fn database_publisher() -> Result<Variant> {
    Variant::builder("DatabasePublisher", "db", Direction::Publish)
        .positional(&["connectstring"])
        .property(string("connectstring").required())
        .properties(publisher_common())
        .properties([
            boolean("greenplumlogminer"),
            string("logminerdbname"),
            string("logminerschemaowner"),
            string("logminerstartdatetime"),
            string("logminertablename"),
            count("maxcolbinding"),
            boolean("oraclelogminer"),
            boolean("pwdencrypted"),
            string("selectstatement"),
        ])
        .build()
}

pub(super) fn teradata_subscriber() -> Result<Variant> {
    Variant::builder("TeradataSubscriber", "tdata", Direction::Subscribe)
        .positional(&[
            "tdatatdpid",
            "desttablename",
            "tdatausername",
            "tdatauserpwd",
            "tdataminsessions",
            "tdatamaxsessions",
            "tdatadriver",
            "tdatainsertonly",
        ])
        .properties([
            string("tdatatdpid").required(),
            string("desttablename").required(),
            string("tdatausername").required(),
            string("tdatauserpwd").required(),
            count("tdatamaxsessions").required(),
            count("tdataminsessions").required(),
            string("tdatadriver")
                .required()
                .one_of(["stream", "update", "load"]),
            boolean("tdatainsertonly").required(),
            snapshot(),
            boolean("rmretdel"),
            count("tdatabatchperiod"),
            string("stage1tablename"),
            string("stage2tablename"),
            string("connectstring"),
            int("tdatatracelevel"),
            config_section(),
            boolean("tdatauserpwdencrypted"),
        ])
        .build()
}

pub(super) fn teradata_listener_subscriber() -> Result<Variant> {
    Variant::builder("TeradataListenerSubscriber", "tdlistener", Direction::Subscribe)
        .positional(&["ingestUrl", "SSLCert", "sourceKey"])
        .properties([
            string("ingestUrl").required(),
            string("SSLCert").required(),
            string("sourceKey").required(),
            snapshot(),
            count("ingestBlocksize"),
            string("contentType"),
            string("ingestDelim"),
        ])
        .build()
}

pub(super) fn pi_subscriber() -> Result<Variant> {
    Variant::builder("PISubscriber", "pi", Direction::Subscribe)
        .positional(&["afelement", "iselementtemplate"])
        .properties([
            string("afelement").required(),
            boolean("iselementtemplate").required(),
            snapshot(),
            boolean("rmretdel"),
            string("pisystem"),
            string("afdatabase"),
            string("afrootelement"),
            string("afattribute"),
            config_section(),
        ])
        .build()
}

pub(super) fn pi_publisher() -> Result<Variant> {
    Variant::builder("PIPublisher", "pi", Direction::Publish)
        .positional(&["afelement", "iselementtemplate"])
        .properties([
            string("afelement").required(),
            boolean("iselementtemplate").required(),
            string("pisystem"),
            string("afdatabase"),
            string("afrootelement"),
            string("afattribute"),
            boolean("archivetimestamp"),
            boolean("allvaluestostrings"),
        ])
        .properties(publisher_common())
        .build()
}
