//! Calendar Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{decode_text, decode_timestamp},
    domain::{
        calendar::{
            data::{DEFAULT_EVENT_COLOR, EventRange, NewEvent},
            records::{
                AttendeeRecord, AttendeeStatus, AttendeeUuid, EventRecord, EventSummaryRecord,
                EventUuid,
            },
        },
        organizations::records::OrganizationUuid,
        teams::records::TeamUuid,
        users::records::{UserSummary, UserUuid},
    },
};

const CREATE_EVENT_SQL: &str = include_str!("sql/create_event.sql");
const GET_EVENT_SQL: &str = include_str!("sql/get_event.sql");
const LOCK_EVENT_SQL: &str = include_str!("sql/lock_event.sql");
const LIST_ORGANIZATION_EVENTS_SQL: &str = include_str!("sql/list_organization_events.sql");
const LIST_TEAM_EVENTS_SQL: &str = include_str!("sql/list_team_events.sql");
const LIST_ALL_EVENTS_SQL: &str = include_str!("sql/list_all_events.sql");
const UPDATE_EVENT_SQL: &str = include_str!("sql/update_event.sql");
const DELETE_EVENT_SQL: &str = include_str!("sql/delete_event.sql");
const CREATE_ATTENDEE_SQL: &str = include_str!("sql/create_attendee.sql");
const LIST_ATTENDEES_SQL: &str = include_str!("sql/list_attendees.sql");
const UPDATE_ATTENDEE_STATUS_SQL: &str = include_str!("sql/update_attendee_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCalendarRepository;

impl PgCalendarRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        event: &NewEvent,
        created_by: UserUuid,
    ) -> Result<EventRecord, sqlx::Error> {
        query_as::<Postgres, EventRecord>(CREATE_EVENT_SQL)
            .bind(event.uuid.into_uuid())
            .bind(organization.into_uuid())
            .bind(event.team.map(TeamUuid::into_uuid))
            .bind(&event.title)
            .bind(event.description.as_deref())
            .bind(SqlxTimestamp::from(event.start_time))
            .bind(SqlxTimestamp::from(event.end_time))
            .bind(event.location.as_deref())
            .bind(event.color.as_deref().unwrap_or(DEFAULT_EVENT_COLOR))
            .bind(event.is_all_day)
            .bind(event.event_type.as_str())
            .bind(created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
    ) -> Result<EventRecord, sqlx::Error> {
        query_as::<Postgres, EventRecord>(GET_EVENT_SQL)
            .bind(event.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an event and hold a row lock until the transaction ends.
    pub(crate) async fn lock_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
    ) -> Result<EventRecord, sqlx::Error> {
        query_as::<Postgres, EventRecord>(LOCK_EVENT_SQL)
            .bind(event.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_organization_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, EventSummaryRecord>(LIST_ORGANIZATION_EVENTS_SQL)
            .bind(organization.into_uuid())
            .bind(range.from.map(SqlxTimestamp::from))
            .bind(range.to.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_team_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, EventSummaryRecord>(LIST_TEAM_EVENTS_SQL)
            .bind(team.into_uuid())
            .bind(range.from.map(SqlxTimestamp::from))
            .bind(range.to.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    /// Organization-wide and team events together.
    pub(crate) async fn list_all_events(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        range: EventRange,
    ) -> Result<Vec<EventSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, EventSummaryRecord>(LIST_ALL_EVENTS_SQL)
            .bind(organization.into_uuid())
            .bind(range.from.map(SqlxTimestamp::from))
            .bind(range.to.map(SqlxTimestamp::from))
            .fetch_all(&mut **tx)
            .await
    }

    /// Persist every mutable column of `event`.
    pub(crate) async fn update_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: &EventRecord,
    ) -> Result<EventRecord, sqlx::Error> {
        query_as::<Postgres, EventRecord>(UPDATE_EVENT_SQL)
            .bind(event.uuid.into_uuid())
            .bind(&event.title)
            .bind(event.description.as_deref())
            .bind(SqlxTimestamp::from(event.start_time))
            .bind(SqlxTimestamp::from(event.end_time))
            .bind(event.location.as_deref())
            .bind(&event.color)
            .bind(event.is_all_day)
            .bind(event.event_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_event(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_EVENT_SQL)
            .bind(event.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_attendee(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
        user: UserUuid,
    ) -> Result<AttendeeRecord, sqlx::Error> {
        query_as::<Postgres, AttendeeRecord>(CREATE_ATTENDEE_SQL)
            .bind(AttendeeUuid::new().into_uuid())
            .bind(event.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_attendees(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
    ) -> Result<Vec<AttendeeRecord>, sqlx::Error> {
        query_as::<Postgres, AttendeeRecord>(LIST_ATTENDEES_SQL)
            .bind(event.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_attendee_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: EventUuid,
        user: UserUuid,
        status: AttendeeStatus,
    ) -> Result<AttendeeRecord, sqlx::Error> {
        query_as::<Postgres, AttendeeRecord>(UPDATE_ATTENDEE_STATUS_SQL)
            .bind(event.into_uuid())
            .bind(user.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for EventRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: EventUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            team_uuid: row
                .try_get::<Option<Uuid>, _>("team_uuid")?
                .map(TeamUuid::from_uuid),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            start_time: decode_timestamp(row, "start_time")?,
            end_time: decode_timestamp(row, "end_time")?,
            location: row.try_get("location")?,
            color: row.try_get("color")?,
            is_all_day: row.try_get("is_all_day")?,
            event_type: decode_text(row, "event_type")?,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            created_at: decode_timestamp(row, "created_at")?,
            updated_at: decode_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for EventSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            event: EventRecord::from_row(row)?,
            creator: UserSummary::from_prefixed_row(row, "creator")?,
            attendee_count: row.try_get("attendee_count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AttendeeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AttendeeUuid::from_uuid(row.try_get("uuid")?),
            event_uuid: EventUuid::from_uuid(row.try_get("event_uuid")?),
            user: UserSummary::from_prefixed_row(row, "user")?,
            status: decode_text(row, "status")?,
            added_at: decode_timestamp(row, "added_at")?,
        })
    }
}
