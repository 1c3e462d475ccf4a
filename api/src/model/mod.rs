use garde::Validate;
use kernel::model::list::Pagination;
use serde::Deserialize;

pub mod booking;
pub mod item;
pub mod request;
pub mod user;

pub(crate) fn not_blank<T: AsRef<str>>(value: &T, _: &()) -> garde::Result {
    if value.as_ref().trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

// PATCH 用。値が送られてきた場合だけ検査する
pub(crate) fn not_blank_if_present<T: AsRef<str>>(value: &Option<T>, ctx: &()) -> garde::Result {
    match value {
        Some(value) => not_blank(value, ctx),
        None => Ok(()),
    }
}

fn default_from() -> i64 {
    0
}

fn default_size() -> i64 {
    Pagination::DEFAULT_SIZE
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaginationQuery {
    #[garde(range(min = 0))]
    #[serde(default = "default_from")]
    pub from: i64,
    #[garde(range(min = 1))]
    #[serde(default = "default_size")]
    pub size: i64,
}

impl From<PaginationQuery> for Pagination {
    fn from(value: PaginationQuery) -> Self {
        Pagination::new(value.from, value.size)
    }
}
