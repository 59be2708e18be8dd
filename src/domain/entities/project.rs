use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::{
    errors::AppError,
    utils::data_uri::{decode_image_data_uri, encode_image_data_uri},
};

const INVALID_IMAGE: &str = "Format gambar tidak valid.";
const INVALID_NEW_IMAGE: &str = "Format gambar baru tidak valid.";
const INVALID_DATE: &str = "Format tanggal tidak valid.";
const DAYS_PER_MONTH: f64 = 30.0;

// ───── Database Models ───────────────────────────────────────────────

/// A `project` row with its columns aliased to the client field names.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProjectRow {
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub desc: String,
    pub teknologi: bool,
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub desc: String,
    pub techs: TechStack,
    pub image: Vec<u8>,
    /// The data URI as submitted, echoed back in the create response.
    pub img: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub desc: String,
    pub techs: TechStack,
    /// `None` leaves the stored image untouched.
    pub image: Option<Vec<u8>>,
    pub img: Option<String>,
}

// ───── Shared Shapes ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStack {
    pub node: bool,
    pub react: bool,
    pub next: bool,
    pub typescript: bool,
}

impl TechStack {
    /// Storage keeps a single flag: true when any technology was ticked.
    pub fn any(&self) -> bool {
        self.node || self.react || self.next || self.typescript
    }

    /// Only `node` can be rebuilt from the stored flag.
    pub fn from_stored_flag(teknologi: bool) -> Self {
        TechStack {
            node: teknologi,
            ..Default::default()
        }
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProject {
    pub name: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub desc: String,
    pub img: Option<String>,
    pub duration: i64,
    pub techs: TechStack,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectMutationResponse {
    pub message: String,
    pub project: ClientProject,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<ProjectRow> for ClientProject {
    fn from(row: ProjectRow) -> Self {
        ClientProject {
            duration: duration_in_months(row.start, row.end),
            img: row.image.as_deref().map(encode_image_data_uri),
            techs: TechStack::from_stored_flag(row.teknologi),
            id: row.name.clone(),
            name: row.name,
            start: row.start,
            end: row.end,
            desc: row.desc,
        }
    }
}

impl ProjectInsert {
    pub fn teknologi(&self) -> bool {
        self.techs.any()
    }

    pub fn to_client(&self) -> ClientProject {
        ClientProject {
            name: self.name.clone(),
            start: Some(self.start),
            end: Some(self.end),
            desc: self.desc.clone(),
            img: Some(self.img.clone()),
            duration: duration_in_months(Some(self.start), Some(self.end)),
            techs: self.techs,
            id: self.name.clone(),
        }
    }
}

impl ProjectUpdate {
    pub fn teknologi(&self) -> bool {
        self.techs.any()
    }

    pub fn to_client(&self) -> ClientProject {
        ClientProject {
            name: self.name.clone(),
            start: Some(self.start),
            end: Some(self.end),
            desc: self.desc.clone(),
            img: self.img.clone(),
            duration: duration_in_months(Some(self.start), Some(self.end)),
            techs: self.techs,
            id: self.name.clone(),
        }
    }
}

/// Whole months between two dates, counting 30 days per month and rounding
/// halves up. Missing bounds yield zero.
pub fn duration_in_months(start: Option<NaiveDate>, end: Option<NaiveDate>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days() as f64;
            (days / DAYS_PER_MONTH + 0.5).floor() as i64
        }
        _ => 0,
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

/// A project bound as the browser sends it: `Date.parse` milliseconds, or a
/// date string from older forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectDate {
    Millis(i64),
    Text(String),
}

impl ProjectDate {
    fn is_blank(&self) -> bool {
        matches!(self, ProjectDate::Text(text) if text.trim().is_empty())
    }

    /// Resolves to a calendar date; epoch milliseconds are read as UTC.
    pub fn to_naive(&self, field: &str) -> Result<NaiveDate, AppError> {
        match self {
            ProjectDate::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| AppError::ValidationError {
                    message: INVALID_DATE.into(),
                    detail: Some(format!("{field}: {ms}")),
                }),
            ProjectDate::Text(text) => parse_project_date(text, field),
        }
    }
}

impl From<&str> for ProjectDate {
    fn from(text: &str) -> Self {
        ProjectDate::Text(text.to_string())
    }
}

impl From<i64> for ProjectDate {
    fn from(ms: i64) -> Self {
        ProjectDate::Millis(ms)
    }
}

// blank strings count as missing so presence validation reports them
fn non_blank_date<'de, D>(deserializer: D) -> Result<Option<ProjectDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ProjectDate>::deserialize(deserializer)?.filter(|date| !date.is_blank()))
}


#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "non_blank_date")]
    #[validate(required)]
    pub start: Option<ProjectDate>,

    #[serde(default, deserialize_with = "non_blank_date")]
    #[validate(required)]
    pub end: Option<ProjectDate>,

    #[validate(required, length(min = 1))]
    pub desc: Option<String>,

    #[validate(required)]
    pub techs: Option<TechStack>,

    #[validate(required, length(min = 1))]
    pub img: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "non_blank_date")]
    #[validate(required)]
    pub start: Option<ProjectDate>,

    #[serde(default, deserialize_with = "non_blank_date")]
    #[validate(required)]
    pub end: Option<ProjectDate>,

    #[validate(required, length(min = 1))]
    pub desc: Option<String>,

    #[validate(required)]
    pub techs: Option<TechStack>,

    pub img: Option<String>,
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = AppError;

    fn try_from(req: NewProjectRequest) -> Result<Self, Self::Error> {
        let img = take_required(req.img, "img")?;
        let image = decode_image_data_uri(&img).map_err(|e| AppError::ValidationError {
            message: INVALID_IMAGE.into(),
            detail: Some(e.to_string()),
        })?;

        Ok(ProjectInsert {
            start: take_date(req.start, "start")?,
            end: take_date(req.end, "end")?,
            name: take_required(req.name, "name")?,
            desc: take_required(req.desc, "desc")?,
            techs: req.techs.ok_or_else(|| missing("techs"))?,
            image,
            img,
        })
    }
}

impl TryFrom<UpdateProjectRequest> for ProjectUpdate {
    type Error = AppError;

    fn try_from(req: UpdateProjectRequest) -> Result<Self, Self::Error> {
        // an empty string means "keep the current image"
        let img = req.img.filter(|img| !img.is_empty());
        let image = img
            .as_deref()
            .map(decode_image_data_uri)
            .transpose()
            .map_err(|e| AppError::ValidationError {
                message: INVALID_NEW_IMAGE.into(),
                detail: Some(e.to_string()),
            })?;

        Ok(ProjectUpdate {
            start: take_date(req.start, "start")?,
            end: take_date(req.end, "end")?,
            name: take_required(req.name, "name")?,
            desc: take_required(req.desc, "desc")?,
            techs: req.techs.ok_or_else(|| missing("techs"))?,
            image,
            img,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::ValidationError {
        message: "Semua field wajib diisi.".into(),
        detail: Some(field.to_string()),
    }
}

fn take_required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| missing(field))
}

fn take_date(value: Option<ProjectDate>, field: &str) -> Result<NaiveDate, AppError> {
    value
        .filter(|date| !date.is_blank())
        .ok_or_else(|| missing(field))?
        .to_naive(field)
}

/// Accepts `YYYY-MM-DD` as sent by date inputs, or a full RFC 3339 timestamp.
pub fn parse_project_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::ValidationError {
            message: INVALID_DATE.into(),
            detail: Some(format!("{field}: {value}")),
        })
}
