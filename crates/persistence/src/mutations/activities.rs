// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk_activity::Activity;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::activities;
use crate::error::PersistenceError;

/// Appends an activity to the log.
///
/// # Errors
///
/// Returns an error if the metadata cannot be serialized, a referenced
/// employee or lead does not exist, or the insert fails.
pub fn insert_activity(
    conn: &mut SqliteConnection,
    activity: &Activity,
    now: &str,
) -> Result<i64, PersistenceError> {
    let metadata_json: String = serde_json::to_string(&activity.metadata)?;

    diesel::insert_into(activities::table)
        .values((
            activities::actor_id.eq(&activity.actor.id),
            activities::actor_type.eq(&activity.actor.actor_type),
            activities::kind.eq(activity.kind.as_str()),
            activities::description.eq(&activity.description),
            activities::employee_id.eq(activity.employee_id),
            activities::lead_id.eq(activity.lead_id),
            activities::metadata_json.eq(&metadata_json),
            activities::created_at.eq(now),
        ))
        .execute(conn)?;

    let activity_id: i64 = get_last_insert_rowid(conn)?;
    info!(activity_id, kind = %activity.kind, "{}", activity.description);

    Ok(activity_id)
}
