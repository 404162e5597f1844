// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk::LeadMaterializer;
use lead_desk_activity::{Activity, ActivityKind, Actor, RecordedActivity};
use lead_desk_domain::{Employee, Role};

use super::{create_test_actor, create_test_employee, create_test_persistence};
use crate::{Persistence, PersistenceError};

#[test]
fn test_logged_activity_reads_back_with_metadata() {
    let mut persistence: Persistence = create_test_persistence();
    let asha: Employee = create_test_employee(&mut persistence, "Asha", Role::Sales, "English");
    let activity: Activity =
        Activity::employee_created(create_test_actor(), "Asha", "Tester", asha.employee_id)
            .with_metadata("language", "English");

    let activity_id: i64 = persistence.log_activity(&activity).unwrap();
    let feed: Vec<RecordedActivity> = persistence.recent_activities(7).unwrap();

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].activity_id, activity_id);
    assert_eq!(feed[0].activity, activity);
    assert!(!feed[0].created_at.is_empty());
}

#[test]
fn test_recent_activities_are_newest_first_and_limited() {
    let mut persistence: Persistence = create_test_persistence();
    for n in 0..10 {
        persistence
            .log_activity(&Activity::new(
                Actor::system(),
                ActivityKind::LeadUpdated,
                format!("entry {n}"),
                None,
                None,
            ))
            .unwrap();
    }

    let feed: Vec<RecordedActivity> = persistence.recent_activities(7).unwrap();

    assert_eq!(feed.len(), 7);
    assert_eq!(feed[0].activity.description, "entry 9");
    assert_eq!(feed[6].activity.description, "entry 3");
}

#[test]
fn test_activities_for_employee_only_returns_theirs() {
    let mut persistence: Persistence = create_test_persistence();
    let asha: Employee = create_test_employee(&mut persistence, "Asha", Role::Sales, "English");
    let ben: Employee = create_test_employee(&mut persistence, "Ben", Role::Sales, "English");
    persistence
        .log_activity(&Activity::employee_status_changed(
            create_test_actor(),
            "Asha Tester",
            "Inactive",
            asha.employee_id,
        ))
        .unwrap();
    persistence
        .log_activity(&Activity::employee_status_changed(
            create_test_actor(),
            "Ben Tester",
            "Inactive",
            ben.employee_id,
        ))
        .unwrap();

    let feed: Vec<RecordedActivity> =
        persistence.activities_for_employee(asha.employee_id, 7).unwrap();

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].activity.employee_id, Some(asha.employee_id));
}

#[test]
fn test_activity_for_missing_employee_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<i64, PersistenceError> = persistence.log_activity(
        &Activity::employee_created(create_test_actor(), "No", "One", 404),
    );

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}
