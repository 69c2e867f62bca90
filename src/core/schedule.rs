//! What is happening at a given instant
//!
//! Windows are half-open: a match is current from the start of its slot up
//! to, but not including, the end of its slot.

use chrono::{DateTime, Utc};

use crate::core::selector::select;
use crate::models::{CompState, Match, Timestamp};

/// Snapshot of the schedule at one instant
#[derive(Debug)]
pub struct CurrentState<'a> {
    /// The instant, in the venue's offset
    pub time: Timestamp,
    /// Accumulated delay in seconds
    pub delay: u32,
    pub matches: Vec<&'a Match>,
    pub staging_matches: Vec<&'a Match>,
    pub shepherding_matches: Vec<&'a Match>,
}

/// Sum of all delays that have taken effect by `now`
pub fn current_delay(state: &CompState, now: &Timestamp) -> u32 {
    state
        .delays
        .iter()
        .filter(|d| d.time <= *now)
        .map(|d| d.delay)
        .sum()
}

/// Matches whose slot contains `now`
pub fn current_matches<'a>(state: &'a CompState, now: &Timestamp) -> Vec<&'a Match> {
    select(&state.matches, |m| m.times.slot.contains(now), None)
}

/// Matches whose staging area is open at `now`
pub fn staging_matches<'a>(state: &'a CompState, now: &Timestamp) -> Vec<&'a Match> {
    select(
        &state.matches,
        |m| {
            let staging = &m.times.staging;
            staging.opens <= *now && *now < staging.closes
        },
        None,
    )
}

/// Matches whose teams are being gathered by shepherds at `now`
///
/// Shepherding starts at the earliest shepherd signal and ends when staging
/// closes. A match with no shepherd signals is never being shepherded.
pub fn shepherding_matches<'a>(state: &'a CompState, now: &Timestamp) -> Vec<&'a Match> {
    select(
        &state.matches,
        |m| {
            let staging = &m.times.staging;
            match staging.signal_shepherds.values().min() {
                Some(first) => first <= now && *now < staging.closes,
                None => false,
            }
        },
        None,
    )
}

pub fn current_state(state: &CompState, now: DateTime<Utc>) -> CurrentState<'_> {
    let now = now.with_timezone(&state.utc_offset());

    CurrentState {
        time: now,
        delay: current_delay(state, &now),
        matches: current_matches(state, &now),
        staging_matches: staging_matches(state, &now),
        shepherding_matches: shepherding_matches(state, &now),
    }
}
