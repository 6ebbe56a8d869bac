// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HTTP, WebSocket, e-mail and usage-metering connectors.

use super::{boolean, config_section, count, snapshot, string};
use crate::error::Result;
use crate::registry::Variant;
use crate::value::Direction;

pub(super) fn nurego_subscriber() -> Result<Variant> {
    Variant::builder("NuregoSubscriber", "nurego", Direction::Subscribe)
        .positional(&["serviceurl", "certificate", "username", "password", "instanceid"])
        .properties([
            string("serviceurl").required(),
            string("certificate").required(),
            string("username").required(),
            string("password").required(),
            string("instanceid").required(),
            snapshot(),
            string("certpassword"),
            string("collapse"),
            boolean("rmretdel"),
            config_section(),
        ])
        .build()
}

pub(super) fn smtp_subscriber() -> Result<Variant> {
    Variant::builder("SMTPSubscriber", "smtp", Direction::Subscribe)
        .positional(&["smtpserver", "sourceaddress", "destaddress"])
        .properties([
            string("smtpserver").required(),
            string("sourceaddress").required().matching("@"),
            string("destaddress").required().matching("@"),
            snapshot(),
            string("collapse"),
            boolean("emailperevent"),
            boolean("rmretdel"),
            config_section(),
            string("dateformat"),
        ])
        .build()
}

pub(super) fn url_publisher() -> Result<Variant> {
    Variant::builder("URLPublisher", "url", Direction::Publish)
        .positional(&["configUrl"])
        .properties([
            string("configUrl").required(),
            string("interval"),
            count("maxevents"),
            string("properties"),
        ])
        .build()
}

pub(super) fn websocket_publisher() -> Result<Variant> {
    Variant::builder("WebSocketPublisher", "websocket", Direction::Publish)
        .positional(&["url", "configUrl", "contentType"])
        .properties([
            string("url").required().matching(r"^wss?://"),
            string("configUrl").required(),
            string("contentType").required(),
            string("sslCertificate"),
            string("sslPassphrase"),
            string("requestHeaders"),
            count("maxevents"),
        ])
        .build()
}
