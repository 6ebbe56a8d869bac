// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use esp_connectors::ConnectorSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        // Parse -> resolve -> construct, then write back and reparse
        if let Ok(set) = ConnectorSet::from_xml(xml) {
            let out = set.to_xml();
            let again = ConnectorSet::from_xml(&out);
            assert!(again.is_ok(), "written connectors failed to reparse: {out}");
        }
    }
});
