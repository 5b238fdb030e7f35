//! Record store for achievement rows.
//!
//! Every operation is a single statement, so it is atomic at row granularity
//! on its own. The store borrows any [`ConnectionTrait`] implementor, which lets
//! read paths run on the pool while mutating requests pass their own
//! transaction in.

use sea_orm::*;
use tracing::info;

use crate::entity::achievement;

/// An achievement record before the database has assigned it an `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAchievement {
    pub name: String,
    pub usn: String,
    pub event_type: String,
    pub level: String,
    pub year: i32,
    pub prize: Option<String>,
}

impl NewAchievement {
    /// Every column set except `id`, which stays `NotSet`.
    fn into_active_model(self) -> achievement::ActiveModel {
        achievement::ActiveModel {
            name: Set(self.name),
            usn: Set(self.usn),
            event_type: Set(self.event_type),
            level: Set(self.level),
            year: Set(self.year),
            prize: Set(self.prize),
            ..Default::default()
        }
    }

    fn with_id(self, id: i32) -> achievement::Model {
        achievement::Model {
            id,
            name: self.name,
            usn: self.usn,
            event_type: self.event_type,
            level: self.level,
            year: self.year,
            prize: self.prize,
        }
    }
}

impl From<achievement::Model> for NewAchievement {
    fn from(m: achievement::Model) -> Self {
        Self {
            name: m.name,
            usn: m.usn,
            event_type: m.event_type,
            level: m.level,
            year: m.year,
            prize: m.prize,
        }
    }
}

/// Optional equality filters for [`AchievementStore::scan`].
///
/// Absent fields add no predicate; present fields are ANDed together and bound
/// as parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AchievementFilter {
    pub year: Option<i32>,
    pub event_type: Option<String>,
    pub usn: Option<String>,
}

impl AchievementFilter {
    pub fn student(usn: impl Into<String>) -> Self {
        Self {
            usn: Some(usn.into()),
            ..Default::default()
        }
    }

    pub fn apply(&self, mut select: Select<achievement::Entity>) -> Select<achievement::Entity> {
        if let Some(year) = self.year {
            select = select.filter(achievement::Column::Year.eq(year));
        }
        if let Some(ref event_type) = self.event_type {
            select = select.filter(achievement::Column::EventType.eq(event_type.as_str()));
        }
        if let Some(ref usn) = self.usn {
            select = select.filter(achievement::Column::Usn.eq(usn.as_str()));
        }
        select
    }
}

pub struct AchievementStore<'c, C> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> AchievementStore<'c, C> {
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }

    /// Insert a record and return its freshly assigned `id`.
    pub async fn create(&self, record: NewAchievement) -> Result<i32, DbErr> {
        let model = record.into_active_model().insert(self.db).await?;
        info!(id = model.id, usn = %model.usn, "Created achievement");
        Ok(model.id)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<achievement::Model>, DbErr> {
        achievement::Entity::find_by_id(id).one(self.db).await
    }

    /// All records for one student, oldest first. Empty if the USN is unknown.
    pub async fn get_by_student(&self, usn: &str) -> Result<Vec<achievement::Model>, DbErr> {
        self.scan(&AchievementFilter::student(usn)).await
    }

    pub async fn scan(&self, filter: &AchievementFilter) -> Result<Vec<achievement::Model>, DbErr> {
        filter
            .apply(achievement::Entity::find())
            .order_by_asc(achievement::Column::Id)
            .all(self.db)
            .await
    }

    /// Replace every field of the record at `id`.
    ///
    /// Returns `None` when no row has that `id`.
    pub async fn update(
        &self,
        id: i32,
        record: NewAchievement,
    ) -> Result<Option<achievement::Model>, DbErr> {
        let result = achievement::Entity::update_many()
            .set(record.clone().into_active_model())
            .filter(achievement::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        info!(id, "Updated achievement");
        Ok(Some(record.with_id(id)))
    }

    /// Delete the record at `id`. Deleting a missing row is not an error;
    /// the return value says whether anything was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = achievement::Entity::delete_by_id(id).exec(self.db).await?;
        let removed = result.rows_affected > 0;
        if removed {
            info!(id, "Deleted achievement");
        } else {
            info!(id, "Delete requested for missing achievement");
        }
        Ok(removed)
    }
}
