// ABOUTME: Expands an Activity into its five heart-rate zone percentage records
// ABOUTME: Fixed A..E order, fraction x 100 rounded to one decimal, missing fractions stay missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::array;

use crate::constants::ZONE_LABELS;
use crate::models::{Activity, ZoneRecord};
use crate::normalizer::round_to;

/// Expand `activity` into exactly five zone records for `collection`
#[must_use]
pub fn expand_zones(activity: &Activity, collection: &str) -> [ZoneRecord; 5] {
    let fractions = activity.zone_fractions();
    array::from_fn(|i| ZoneRecord {
        collection: collection.to_owned(),
        timestamp: activity.timestamp,
        zone: ZONE_LABELS[i].to_owned(),
        value: fractions[i].map(|fraction| round_to(fraction * 100.0, 1)),
    })
}
