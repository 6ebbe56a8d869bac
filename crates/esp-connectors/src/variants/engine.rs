// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connectors served by the engine itself: external adapters, other
//! projects and timers.

use super::{boolean, config_section, count, float, string};
use crate::error::Result;
use crate::registry::Variant;
use crate::value::Direction;

pub(super) fn adapter_subscriber() -> Result<Variant> {
    Variant::builder("AdapterSubscriber", "adapter", Direction::Subscribe)
        .positional(&["command"])
        .properties([string("command").required(), string("url")])
        .build()
}

pub(super) fn adapter_publisher() -> Result<Variant> {
    Variant::builder("AdapterPublisher", "adapter", Direction::Publish)
        .positional(&["command"])
        .properties([string("command").required(), string("url")])
        .build()
}

pub(super) fn project_publisher() -> Result<Variant> {
    Variant::builder("ProjectPublisher", "project", Direction::Publish)
        .positional(&["srcproject", "srccontinuousquery", "srcwindow"])
        .properties([
            string("srcproject").required(),
            string("srccontinuousquery").required(),
            string("srcwindow").required(),
            count("maxevents"),
            config_section(),
        ])
        .build()
}

pub(super) fn timer_publisher() -> Result<Variant> {
    Variant::builder("TimerPublisher", "timer", Direction::Publish)
        .positional(&["basetime", "interval", "unit"])
        .properties([
            string("basetime").required(),
            float("interval").required().expr("value > 0"),
            string("unit")
                .required()
                .one_of(["second", "minute", "hour", "day", "week", "month", "year"]),
            string("label"),
            string("timeformat"),
            string("transactional"),
            config_section(),
            boolean("publishwithupsert"),
            count("maxevents"),
        ])
        .build()
}
