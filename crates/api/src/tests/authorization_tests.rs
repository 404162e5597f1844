// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_activity::Actor;
use lead_desk_domain::Role;

use super::helpers::{create_test_admin, create_test_sales, detached_lead};
use crate::{AuthError, AuthenticatedActor, AuthorizationService, authenticate_stub};

#[test]
fn test_admin_may_manage_directory_and_pool() {
    let admin: AuthenticatedActor = create_test_admin();

    assert!(AuthorizationService::authorize_create_employee(&admin).is_ok());
    assert!(AuthorizationService::authorize_list_employees(&admin).is_ok());
    assert!(AuthorizationService::authorize_set_employee_status(&admin).is_ok());
    assert!(AuthorizationService::authorize_create_lead(&admin).is_ok());
    assert!(AuthorizationService::authorize_import_leads(&admin).is_ok());
    assert!(AuthorizationService::authorize_reassign_lead(&admin).is_ok());
    assert!(AuthorizationService::authorize_list_all_leads(&admin).is_ok());
}

#[test]
fn test_sales_cannot_perform_admin_actions() {
    let sales: AuthenticatedActor = create_test_sales(7);

    let result: Result<(), AuthError> = AuthorizationService::authorize_import_leads(&sales);
    assert_eq!(
        result,
        Err(AuthError::Unauthorized {
            action: String::from("import_leads"),
            required_role: String::from("admin"),
        })
    );
    assert!(AuthorizationService::authorize_create_employee(&sales).is_err());
    assert!(AuthorizationService::authorize_reassign_lead(&sales).is_err());
    assert!(AuthorizationService::authorize_list_all_leads(&sales).is_err());
}

#[test]
fn test_update_lead_allowed_for_admin_and_assignee_only() {
    let admin: AuthenticatedActor = create_test_admin();
    let assignee: AuthenticatedActor = create_test_sales(7);
    let other: AuthenticatedActor = create_test_sales(8);

    assert!(AuthorizationService::authorize_update_lead(&admin, &detached_lead(Some(7))).is_ok());
    assert!(AuthorizationService::authorize_update_lead(&assignee, &detached_lead(Some(7))).is_ok());
    assert!(AuthorizationService::authorize_update_lead(&other, &detached_lead(Some(7))).is_err());
    assert!(AuthorizationService::authorize_update_lead(&other, &detached_lead(None)).is_err());
}

#[test]
fn test_authenticate_stub_parses_id_and_role() {
    let actor: AuthenticatedActor = authenticate_stub(" 12 ", "sales").unwrap();
    assert_eq!(actor, AuthenticatedActor::new(12, Role::Sales));

    let admin: AuthenticatedActor = authenticate_stub("3", "admin").unwrap();
    assert!(admin.is_admin());
}

#[test]
fn test_authenticate_stub_rejects_malformed_identity() {
    assert!(matches!(
        authenticate_stub("abc", "admin"),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        authenticate_stub("3", "manager"),
        Err(AuthError::AuthenticationFailed { .. })
    ));
    assert!(matches!(
        authenticate_stub("", ""),
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_activity_actor_carries_id_and_role() {
    let actor: Actor = create_test_sales(12).to_activity_actor();

    assert_eq!(actor.id, "12");
    assert_eq!(actor.actor_type, "sales");
}
