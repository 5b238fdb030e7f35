use serde::{Deserialize, Serialize};

use crate::aggregate::{EventCounts, Tally};
use crate::entity::achievement;
use crate::error::AppError;
use crate::store::{AchievementFilter, NewAchievement};

/// Fields posted by the add/edit HTML form.
///
/// Everything arrives as text so a bad `year` can be reported back on the
/// form instead of failing extraction.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AchievementForm {
    pub name: String,
    pub usn: String,
    pub event_type: String,
    pub level: String,
    pub year: String,
    pub prize: String,
}

impl AchievementForm {
    pub fn validate(&self) -> Result<NewAchievement, AppError> {
        let year = parse_year(&self.year)?;
        build_record(
            &self.name,
            &self.usn,
            &self.event_type,
            &self.level,
            year,
            Some(self.prize.as_str()),
        )
    }
}

impl From<&achievement::Model> for AchievementForm {
    fn from(m: &achievement::Model) -> Self {
        Self {
            name: m.name.clone(),
            usn: m.usn.clone(),
            event_type: m.event_type.clone(),
            level: m.level.clone(),
            year: m.year.to_string(),
            prize: m.prize.clone().unwrap_or_default(),
        }
    }
}

/// Lookup form used by the student pages.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentLookupForm {
    pub usn: String,
}

impl StudentLookupForm {
    pub fn validate(&self) -> Result<&str, AppError> {
        let usn = self.usn.trim();
        if usn.is_empty() {
            return Err(AppError::Validation("USN is required".into()));
        }
        Ok(usn)
    }
}

/// Optional filters shared by the dashboard and the list endpoint.
#[derive(Clone, Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AchievementQuery {
    /// Only records from this year.
    #[param(example = "2024")]
    pub year: Option<String>,
    /// Only records with exactly this event type.
    #[param(example = "Workshop")]
    pub event: Option<String>,
    /// Only records for this student.
    #[param(example = "1RV21CS001")]
    pub usn: Option<String>,
}

impl AchievementQuery {
    /// Blank values count as absent, the way an untouched filter box submits.
    pub fn to_filter(&self) -> Result<AchievementFilter, AppError> {
        let year = match non_blank(self.year.as_deref()) {
            Some(raw) => Some(parse_year(raw)?),
            None => None,
        };
        Ok(AchievementFilter {
            year,
            event_type: non_blank(self.event.as_deref()).map(str::to_string),
            usn: non_blank(self.usn.as_deref()).map(str::to_string),
        })
    }
}

/// Request body for creating or replacing an achievement.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AchievementRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "1RV21CS001")]
    pub usn: String,
    #[schema(example = "Hackathon")]
    pub event_type: String,
    #[schema(example = "National")]
    pub level: String,
    #[schema(example = 2024)]
    pub year: i32,
    /// Omitted, null or blank means no prize.
    #[schema(example = "First place")]
    pub prize: Option<String>,
}

impl AchievementRequest {
    pub fn validate(&self) -> Result<NewAchievement, AppError> {
        build_record(
            &self.name,
            &self.usn,
            &self.event_type,
            &self.level,
            self.year,
            self.prize.as_deref(),
        )
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AchievementResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "1RV21CS001")]
    pub usn: String,
    #[schema(example = "Hackathon")]
    pub event_type: String,
    #[schema(example = "National")]
    pub level: String,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = "First place")]
    pub prize: Option<String>,
}

impl From<achievement::Model> for AchievementResponse {
    fn from(m: achievement::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            usn: m.usn,
            event_type: m.event_type,
            level: m.level,
            year: m.year,
            prize: m.prize,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AchievementListResponse {
    pub data: Vec<AchievementResponse>,
    pub tally: Tally,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentSummaryResponse {
    #[schema(example = "1RV21CS001")]
    pub usn: String,
    #[schema(example = 3)]
    pub total: u64,
    pub counts: EventCounts,
    #[schema(
        example = "The student participated in 3 professional activities including 2 Workshop(s), 1 Hackathon(s)."
    )]
    pub summary: String,
}

/// Coerce a submitted year to an integer.
pub fn parse_year(raw: &str) -> Result<i32, AppError> {
    let raw = raw.trim();
    raw.parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Year must be a whole number, got '{raw}'")))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn build_record(
    name: &str,
    usn: &str,
    event_type: &str,
    level: &str,
    year: i32,
    prize: Option<&str>,
) -> Result<NewAchievement, AppError> {
    Ok(NewAchievement {
        name: required(name, "Name")?,
        usn: required(usn, "USN")?,
        event_type: required(event_type, "Event type")?,
        level: required(level, "Level")?,
        year,
        prize: non_blank(prize).map(str::to_string),
    })
}
