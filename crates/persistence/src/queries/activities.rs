// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk_activity::{Activity, ActivityKind, Actor, RecordedActivity};
use std::collections::BTreeMap;
use tracing::debug;

use crate::diesel_schema::activities;
use crate::error::PersistenceError;

/// Diesel Queryable struct for activity rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = activities)]
struct ActivityRow {
    activity_id: i64,
    actor_id: String,
    actor_type: String,
    kind: String,
    description: String,
    employee_id: Option<i64>,
    lead_id: Option<i64>,
    metadata_json: String,
    created_at: String,
}

impl TryFrom<ActivityRow> for RecordedActivity {
    type Error = PersistenceError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let kind: ActivityKind = row
            .kind
            .parse::<ActivityKind>()
            .map_err(PersistenceError::CorruptRecord)?;
        let metadata: BTreeMap<String, String> = serde_json::from_str(&row.metadata_json)?;

        Ok(Self {
            activity_id: row.activity_id,
            activity: Activity {
                actor: Actor::new(row.actor_id, row.actor_type),
                kind,
                description: row.description,
                employee_id: row.employee_id,
                lead_id: row.lead_id,
                metadata,
            },
            created_at: row.created_at,
        })
    }
}

/// Returns the most recent activities, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn recent_activities(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<RecordedActivity>, PersistenceError> {
    debug!(limit, "Loading recent activities");

    activities::table
        .select(ActivityRow::as_select())
        .order((activities::created_at.desc(), activities::activity_id.desc()))
        .limit(limit)
        .load::<ActivityRow>(conn)?
        .into_iter()
        .map(RecordedActivity::try_from)
        .collect()
}

/// Returns the most recent activities concerning one employee, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn activities_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
    limit: i64,
) -> Result<Vec<RecordedActivity>, PersistenceError> {
    debug!(employee_id, limit, "Loading activities for employee");

    activities::table
        .filter(activities::employee_id.eq(employee_id))
        .select(ActivityRow::as_select())
        .order((activities::created_at.desc(), activities::activity_id.desc()))
        .limit(limit)
        .load::<ActivityRow>(conn)?
        .into_iter()
        .map(RecordedActivity::try_from)
        .collect()
}
