//! Calendar service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        calendar::{
            data::{EventRange, EventUpdate, NewEvent, unique_attendees},
            errors::CalendarServiceError,
            records::{
                AttendeeRecord, AttendeeResponse, EventDetailsRecord, EventRecord,
                EventSummaryRecord, EventUuid,
            },
            repository::PgCalendarRepository,
        },
        members::{
            records::{MemberRecord, MemberRole},
            repository::PgMembersRepository,
        },
        optional_text,
        organizations::records::OrganizationUuid,
        permissions::authorize,
        required_text,
        teams::{records::TeamUuid, repository::PgTeamsRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCalendarService {
    db: Db,
    repository: PgCalendarRepository,
    members: PgMembersRepository,
    teams: PgTeamsRepository,
}

impl PgCalendarService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCalendarRepository::new(),
            members: PgMembersRepository::new(),
            teams: PgTeamsRepository::new(),
        }
    }
}

/// Creators and organization owners/admins may change an event.
fn may_edit(event: &EventRecord, member: &MemberRecord) -> bool {
    event.created_by == member.user_uuid || member.role.is_privileged()
}

#[async_trait]
impl CalendarService for PgCalendarService {
    async fn create_event(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        event: NewEvent,
    ) -> Result<EventDetailsRecord, CalendarServiceError> {
        let title = required_text(&event.title).ok_or(CalendarServiceError::MissingTitle)?;

        if event.start_time >= event.end_time {
            return Err(CalendarServiceError::InvalidTimeRange);
        }

        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        if let Some(team) = event.team {
            let team = self
                .teams
                .get_team(&mut tx, team)
                .await
                .map_err(CalendarServiceError::from_team_lookup)?;

            if team.organization_uuid != organization {
                return Err(CalendarServiceError::TeamNotFound);
            }
        }

        let attendees = unique_attendees(&event.attendees);

        for attendee in &attendees {
            if self
                .members
                .find_membership(&mut tx, *attendee, organization)
                .await?
                .is_none()
            {
                return Err(CalendarServiceError::AttendeeNotMember);
            }
        }

        let created = self
            .repository
            .create_event(
                &mut tx,
                organization,
                &NewEvent {
                    title,
                    description: optional_text(event.description),
                    location: optional_text(event.location),
                    color: optional_text(event.color),
                    attendees: Vec::new(),
                    ..event
                },
                user,
            )
            .await?;

        let mut invited = Vec::with_capacity(attendees.len());

        for attendee in attendees {
            invited.push(
                self.repository
                    .create_attendee(&mut tx, created.uuid, attendee)
                    .await?,
            );
        }

        tx.commit().await?;

        info!(
            organization = %organization,
            event = %created.uuid,
            attendees = invited.len(),
            "event created"
        );

        Ok(EventDetailsRecord {
            event: created,
            attendees: invited,
        })
    }

    async fn list_organization_events(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let events = self
            .repository
            .list_organization_events(&mut tx, organization, range)
            .await?;

        tx.commit().await?;

        Ok(events)
    }

    async fn list_team_events(
        &self,
        user: UserUuid,
        team: TeamUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self
            .teams
            .get_team(&mut tx, team)
            .await
            .map_err(CalendarServiceError::from_team_lookup)?;

        authorize(
            self.members
                .find_membership(&mut tx, user, team.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let events = self
            .repository
            .list_team_events(&mut tx, team.uuid, range)
            .await?;

        tx.commit().await?;

        Ok(events)
    }

    async fn list_all_events_for_user(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let events = self
            .repository
            .list_all_events(&mut tx, organization, range)
            .await?;

        tx.commit().await?;

        Ok(events)
    }

    async fn get_event(
        &self,
        user: UserUuid,
        event: EventUuid,
    ) -> Result<EventDetailsRecord, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        let event = self.repository.get_event(&mut tx, event).await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, event.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let attendees = self.repository.list_attendees(&mut tx, event.uuid).await?;

        tx.commit().await?;

        Ok(EventDetailsRecord { event, attendees })
    }

    async fn update_event(
        &self,
        user: UserUuid,
        event: EventUuid,
        update: EventUpdate,
    ) -> Result<EventRecord, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_event(&mut tx, event).await?;

        let member = authorize(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        if !may_edit(&current, &member) {
            return Err(CalendarServiceError::UpdateForbidden);
        }

        let title = match update.title {
            Some(title) => required_text(&title).ok_or(CalendarServiceError::MissingTitle)?,
            None => current.title.clone(),
        };

        let merged = EventRecord {
            title,
            description: match update.description {
                Some(description) => optional_text(Some(description)),
                None => current.description.clone(),
            },
            start_time: update.start_time.unwrap_or(current.start_time),
            end_time: update.end_time.unwrap_or(current.end_time),
            location: match update.location {
                Some(location) => optional_text(Some(location)),
                None => current.location.clone(),
            },
            color: optional_text(update.color).unwrap_or_else(|| current.color.clone()),
            is_all_day: update.is_all_day.unwrap_or(current.is_all_day),
            event_type: update.event_type.unwrap_or(current.event_type),
            ..current
        };

        if merged.start_time >= merged.end_time {
            return Err(CalendarServiceError::InvalidTimeRange);
        }

        let updated = self.repository.update_event(&mut tx, &merged).await?;

        tx.commit().await?;

        info!(event = %event, "event updated");

        Ok(updated)
    }

    async fn delete_event(
        &self,
        user: UserUuid,
        event: EventUuid,
    ) -> Result<(), CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_event(&mut tx, event).await?;

        let member = authorize(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        if !may_edit(&current, &member) {
            return Err(CalendarServiceError::DeleteForbidden);
        }

        if self.repository.delete_event(&mut tx, event).await? == 0 {
            return Err(CalendarServiceError::NotFound);
        }

        tx.commit().await?;

        info!(organization = %current.organization_uuid, event = %event, "event deleted");

        Ok(())
    }

    async fn update_attendee_status(
        &self,
        user: UserUuid,
        event: EventUuid,
        response: AttendeeResponse,
    ) -> Result<AttendeeRecord, CalendarServiceError> {
        let mut tx = self.db.begin().await?;

        let event = self.repository.get_event(&mut tx, event).await?;

        let attendee = self
            .repository
            .update_attendee_status(&mut tx, event.uuid, user, response.into())
            .await
            .map_err(CalendarServiceError::from_attendee_lookup)?;

        tx.commit().await?;

        info!(event = %event.uuid, user = %user, status = %attendee.status, "attendee responded");

        Ok(attendee)
    }
}

#[automock]
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Creates an event and invites its attendees with a pending status.
    async fn create_event(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        event: NewEvent,
    ) -> Result<EventDetailsRecord, CalendarServiceError>;

    /// Organization-wide events (no team) within `range`, by start time.
    async fn list_organization_events(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError>;

    async fn list_team_events(
        &self,
        user: UserUuid,
        team: TeamUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError>;

    /// Every event of the organization, organization-wide and team alike.
    async fn list_all_events_for_user(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, CalendarServiceError>;

    async fn get_event(
        &self,
        user: UserUuid,
        event: EventUuid,
    ) -> Result<EventDetailsRecord, CalendarServiceError>;

    async fn update_event(
        &self,
        user: UserUuid,
        event: EventUuid,
        update: EventUpdate,
    ) -> Result<EventRecord, CalendarServiceError>;

    async fn delete_event(
        &self,
        user: UserUuid,
        event: EventUuid,
    ) -> Result<(), CalendarServiceError>;

    /// Records the caller's own answer to an event invitation.
    async fn update_attendee_status(
        &self,
        user: UserUuid,
        event: EventUuid,
        response: AttendeeResponse,
    ) -> Result<AttendeeRecord, CalendarServiceError>;
}
