//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::ProblemDetails;

/// Upper bound on bins in a single picking-route request.
pub const MAX_ROUTE_BINS: usize = 500;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for ordering a set of bins into a picking route.
///
/// Missing fields deserialize to empty values so that validation, not JSON
/// rejection, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickingRouteRequest {
    /// Warehouse whose layout the bins belong to.
    #[serde(default)]
    pub warehouse_uid: String,

    /// Bins to visit; the first one is the starting point.
    #[serde(default)]
    pub bin_codes: Vec<String>,
}

impl Validate for PickingRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.warehouse_uid.trim().is_empty() || self.bin_codes.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'warehouse_uid' and 'bin_codes' fields are required",
                request_id,
            )));
        }

        if self.bin_codes.iter().any(|code| code.trim().is_empty()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'bin_codes' field cannot contain empty codes",
                request_id,
            )));
        }

        if self.bin_codes.len() > MAX_ROUTE_BINS {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'bin_codes' field cannot exceed {MAX_ROUTE_BINS} entries"),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Request for the shortest path between two bins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    #[serde(default)]
    pub warehouse_uid: String,

    #[serde(default)]
    pub start_bin: String,

    #[serde(default)]
    pub end_bin: String,
}

impl Validate for ShortestPathRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let missing: Vec<&str> = [
            ("warehouse_uid", &self.warehouse_uid),
            ("start_bin", &self.start_bin),
            ("end_bin", &self.end_bin),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "All fields are required; missing: {}",
                    missing.join(", ")
                ),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Request for bins holding stock of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableBinsRequest {
    #[serde(default)]
    pub sku: String,

    /// Quantity the caller wants to pick.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl Validate for AvailableBinsRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.sku.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'sku' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.quantity <= 0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'quantity' field must be a positive number",
                request_id,
            )));
        }

        Ok(())
    }
}
