//! # Admin List Views
//!
//! Filtering and pagination used by the admin panel. Users are fetched in full
//! and filtered here. Appointments are filtered by the backend, so for them this
//! module only builds the query, including the conversion of the selected
//! local days into UTC instants.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};
use crate::models::{appointment::AppointmentStatus, user::User};

pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl UserFilter {
    pub fn is_empty(&self) -> bool {
        non_empty(&self.email).is_none() && non_empty(&self.name).is_none() && non_empty(&self.role).is_none()
    }

    pub fn matches(&self, user: &User) -> bool {
        if let Some(email) = non_empty(&self.email) {
            if !user.email.to_lowercase().contains(&email) {
                return false;
            }
        }
        if let Some(name) = non_empty(&self.name) {
            if !user.first_name.to_lowercase().contains(&name)
                && !user.last_name.to_lowercase().contains(&name)
            {
                return false;
            }
        }
        if let Some(role) = non_empty(&self.role) {
            if user.role.as_str() != role {
                return false;
            }
        }
        true
    }
}

pub fn filter_users(users: &[User], filter: &UserFilter) -> Vec<User> {
    users.iter().filter(|user| filter.matches(user)).cloned().collect()
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Moves to `page` if it exists among `total_pages`.
    pub fn go_to(&self, page: usize, total_pages: usize) -> Option<Self> {
        (page >= 1 && page <= total_pages).then_some(Self { page, ..*self })
    }
}

pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

/// Slices `items` to the requested page. A page past the end is empty but
/// still reports the full total.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let request = PageRequest::new(request.page, request.per_page);
    let total = items.len();
    let start = (request.page - 1).saturating_mul(request.per_page);
    let items = items
        .into_iter()
        .skip(start)
        .take(request.per_page)
        .collect();

    Page {
        items,
        total,
        page: request.page,
        per_page: request.per_page,
        total_pages: total_pages(total, request.per_page),
    }
}

/// Filters for the admin appointment table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub patient_name: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl AppointmentListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// Backend query parameters, newest scheduled first.
    ///
    /// `dateFrom` is the first instant of the local day and `dateTo` the last
    /// millisecond of it, both sent as UTC.
    pub fn to_params<Tz: TimeZone>(&self, tz: &Tz) -> ClinicResult<Vec<(String, String)>> {
        let page = self.page_request();
        let mut params = vec![
            ("page".to_string(), page.page.to_string()),
            ("limit".to_string(), page.per_page.to_string()),
            ("sortBy".to_string(), "scheduledDateTime".to_string()),
            ("sortOrder".to_string(), "desc".to_string()),
        ];

        if let Some(name) = self.patient_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            params.push(("patientName".to_string(), name.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.to_string()));
        }
        if let Some(date) = self.date_from {
            let start = local_instant(tz, date, NaiveTime::MIN)?;
            params.push(("dateFrom".to_string(), to_iso(start)));
        }
        if let Some(date) = self.date_to {
            let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
            let end = local_instant(tz, date, end_of_day)?;
            params.push(("dateTo".to_string(), to_iso(end)));
        }

        Ok(params)
    }
}

fn local_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> ClinicResult<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            ClinicError::Validation(format!("{} {} does not exist in the clinic timezone", date, time))
        })
}

fn to_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
