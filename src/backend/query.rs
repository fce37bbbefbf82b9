//! Query parameters for the `/filter` endpoint.

use crate::filters::{FilterField, FilterState};
use crate::sort::SortSpec;

/// Ordered parameters of one filtered request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    params: Vec<(&'static str, String)>,
}

impl FilterQuery {
    /// Build the query from resolved filter bounds and the sort spec.
    ///
    /// # Details
    /// Emits the six bounds in a fixed order followed by `sortBy` and `order`.
    /// Unset bounds are sent as their defaults, unbounded maxima as `Infinity`.
    pub fn new(filters: &FilterState, sort: SortSpec) -> Self {
        let mut params: Vec<(&'static str, String)> = FilterField::ALL
            .into_iter()
            .map(|field| (field.key(), filters.bound(field).to_string()))
            .collect();
        params.push(("sortBy", sort.column.key().to_string()));
        params.push(("order", sort.order.as_str().to_string()));
        Self { params }
    }

    /// Parameters in request order.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of one parameter.
    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `key=value&...` form, for log output.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}
