//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use worknest_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        calendar::{
            MockCalendarService,
            records::{EventRecord, EventSummaryRecord, EventType, EventUuid},
        },
        invitations::{
            MockInvitationsService,
            records::{InvitationRecord, InvitationStatus, InvitationUuid},
        },
        members::records::{MemberRecord, MemberRole, MemberUuid},
        organizations::{
            MockOrganizationsService,
            records::{OrganizationRecord, OrganizationUuid},
        },
        permissions::MockPermissionsService,
        recruitment::{
            MockRecruitmentService,
            records::{CandidateRecord, CandidateStatus, CandidateToken, CandidateUuid},
        },
        tasks::{
            MockTasksService,
            records::{TaskPriority, TaskRecord, TaskStatus, TaskSummaryRecord, TaskUuid},
        },
        teams::{
            MockTeamsService,
            records::{TeamRecord, TeamUuid},
        },
        users::{
            MockUsersService,
            records::{UserSummary, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) permissions: MockPermissionsService,
    pub(crate) organizations: MockOrganizationsService,
    pub(crate) invitations: MockInvitationsService,
    pub(crate) teams: MockTeamsService,
    pub(crate) tasks: MockTasksService,
    pub(crate) calendar: MockCalendarService,
    pub(crate) recruitment: MockRecruitmentService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            permissions: Arc::new(self.permissions),
            organizations: Arc::new(self.organizations),
            invitations: Arc::new(self.invitations),
            teams: Arc::new(self.teams),
            tasks: Arc::new(self.tasks),
            calendar: Arc::new(self.calendar),
            recruitment: Arc::new(self.recruitment),
        })
    }
}

/// Serve `route` as [`TEST_USER_UUID`].
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// Serve `route` without an authenticated user.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn make_user_summary(uuid: UserUuid) -> UserSummary {
    UserSummary {
        uuid,
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
    }
}

pub(crate) fn make_organization(uuid: OrganizationUuid) -> OrganizationRecord {
    OrganizationRecord {
        uuid,
        name: "Acme".to_string(),
        slug: "acme".to_string(),
        logo: None,
        metadata: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_member(organization: OrganizationUuid, role: MemberRole) -> MemberRecord {
    MemberRecord {
        uuid: MemberUuid::new(),
        organization_uuid: organization,
        user_uuid: TEST_USER_UUID,
        role,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_invitation(
    uuid: InvitationUuid,
    organization: OrganizationUuid,
    email: &str,
) -> InvitationRecord {
    InvitationRecord {
        uuid,
        organization_uuid: organization,
        email: email.to_string(),
        role: MemberRole::Member,
        status: InvitationStatus::Pending,
        inviter_uuid: TEST_USER_UUID,
        expires_at: Timestamp::UNIX_EPOCH,
        created_at: Timestamp::UNIX_EPOCH,
        accepted_at: None,
    }
}

pub(crate) fn make_team(uuid: TeamUuid) -> TeamRecord {
    TeamRecord {
        uuid,
        organization_uuid: OrganizationUuid::new(),
        name: "Design".to_string(),
        description: None,
        created_by: TEST_USER_UUID,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_task(uuid: TaskUuid) -> TaskRecord {
    TaskRecord {
        uuid,
        organization_uuid: OrganizationUuid::new(),
        team_uuid: None,
        title: "Ship it".to_string(),
        description: None,
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: None,
        assigned_to: None,
        created_by: TEST_USER_UUID,
        completed_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_task_summary(uuid: TaskUuid) -> TaskSummaryRecord {
    TaskSummaryRecord {
        task: make_task(uuid),
        assignee: None,
        creator: make_user_summary(TEST_USER_UUID),
    }
}

pub(crate) fn make_event(uuid: EventUuid) -> EventRecord {
    EventRecord {
        uuid,
        organization_uuid: OrganizationUuid::new(),
        team_uuid: None,
        title: "Standup".to_string(),
        description: None,
        start_time: Timestamp::UNIX_EPOCH,
        end_time: Timestamp::UNIX_EPOCH,
        location: None,
        color: "blue".to_string(),
        is_all_day: false,
        event_type: EventType::Meeting,
        created_by: TEST_USER_UUID,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_event_summary(uuid: EventUuid) -> EventSummaryRecord {
    EventSummaryRecord {
        event: make_event(uuid),
        creator: make_user_summary(TEST_USER_UUID),
        attendee_count: 0,
    }
}

pub(crate) fn make_candidate(uuid: CandidateUuid) -> CandidateRecord {
    CandidateRecord {
        uuid,
        organization_uuid: OrganizationUuid::new(),
        email: "cand@example.com".to_string(),
        position: Some("Engineer".to_string()),
        token: CandidateToken::new(),
        status: CandidateStatus::Invited,
        name: None,
        phone: None,
        date_of_birth: None,
        address: None,
        notes: None,
        invited_by: TEST_USER_UUID,
        invited_at: Timestamp::UNIX_EPOCH,
        expires_at: Timestamp::UNIX_EPOCH,
        submitted_at: None,
        reviewed_by: None,
        reviewed_at: None,
    }
}
