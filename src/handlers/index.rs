//! Index endpoint handler.
//!
//! Lists the route templates served by the API. No data access.
//! Routes are newline separated and served as `text/plain`, not HTML.

/// Route listing returned by `GET /`
pub const ROUTE_LISTING: &str = "Available Routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/YYYY-MM-DD\n\
/api/v1.0/YYYY-MM-DD/YYYY-MM-DD\n";

/// Handle GET / requests
pub async fn index_handler() -> &'static str {
    ROUTE_LISTING
}
