//! Reformatting of solver responses into tables and printable text.
//!
//! The solver's JSON payload maps vehicle ids to ordered location
//! sequences, optionally tagged with per-stop type labels. Vehicles are
//! held in a sorted map so table and text output are deterministic;
//! within-route order is preserved exactly as solved.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One vehicle's solved route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoute {
    /// Location identifiers in visit order.
    pub route: Vec<u32>,
    /// Optional per-stop type labels, parallel to `route`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub stop_types: Option<Vec<String>>,
}

/// A routing solver's response, keyed by vehicle id.
///
/// # Examples
/// ```
/// use wayline_core::SolverResponse;
///
/// let response: SolverResponse = serde_json::from_str(
///     r#"{"vehicle_data": {"v1": {"route": [1, 2, 3]}, "v2": {"route": [4, 5]}}}"#,
/// )?;
/// let table = response.to_table()?;
/// assert_eq!(table.rows.len(), 5);
/// assert!(!table.has_types);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResponse {
    /// Per-vehicle routes, sorted by vehicle id.
    pub vehicle_data: BTreeMap<String, VehicleRoute>,
}

/// Errors from [`SolverResponse::to_table`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSolutionError {
    /// Some vehicles carry type labels and this one does not; emitting a
    /// partial types column would silently misalign rows.
    #[error("vehicle {vehicle} is missing type labels while other vehicles carry them")]
    MissingTypes {
        /// Vehicle without labels.
        vehicle: String,
    },
    /// A vehicle's type label count does not match its route length.
    #[error(
        "vehicle {vehicle} has {type_len} type labels for {route_len} route entries"
    )]
    TypeCountMismatch {
        /// Vehicle with mismatched labels.
        vehicle: String,
        /// Number of route entries.
        route_len: usize,
        /// Number of type labels.
        type_len: usize,
    },
}

/// One `(vehicle, visited location)` table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionRow {
    /// Vehicle identifier.
    pub truck_id: String,
    /// Visited location identifier.
    pub location: u32,
    /// Stop type label, present only when the response carries types.
    pub stop_type: Option<String>,
}

/// Flat tabular view of a solver response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionTable {
    /// Whether the `stop_type` column is populated.
    pub has_types: bool,
    /// Rows grouped by vehicle, within-route order preserved.
    pub rows: Vec<SolutionRow>,
}

impl SolverResponse {
    /// Flatten the response into one row per visited location.
    ///
    /// # Errors
    ///
    /// [`MalformedSolutionError`] when type labels are present for some
    /// vehicles but not all, or when a label vector does not match its
    /// route length.
    pub fn to_table(&self) -> Result<SolutionTable, MalformedSolutionError> {
        let has_types = self
            .vehicle_data
            .values()
            .any(|vehicle| vehicle.stop_types.is_some());

        let mut rows = Vec::new();
        for (vehicle_id, vehicle) in &self.vehicle_data {
            match &vehicle.stop_types {
                None if has_types => {
                    return Err(MalformedSolutionError::MissingTypes {
                        vehicle: vehicle_id.clone(),
                    });
                }
                Some(types) if types.len() != vehicle.route.len() => {
                    return Err(MalformedSolutionError::TypeCountMismatch {
                        vehicle: vehicle_id.clone(),
                        route_len: vehicle.route.len(),
                        type_len: types.len(),
                    });
                }
                _ => {}
            }
            for (position, location) in vehicle.route.iter().enumerate() {
                rows.push(SolutionRow {
                    truck_id: vehicle_id.clone(),
                    location: *location,
                    stop_type: vehicle
                        .stop_types
                        .as_ref()
                        .and_then(|types| types.get(position).cloned()),
                });
            }
        }

        Ok(SolutionTable { has_types, rows })
    }

    /// Render each vehicle's route as an arrow-joined line of location
    /// names.
    ///
    /// Names come from the caller-supplied lookup; identifiers without an
    /// entry fall back to their numeric form rather than failing.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use wayline_core::SolverResponse;
    ///
    /// let response: SolverResponse = serde_json::from_str(
    ///     r#"{"vehicle_data": {"v1": {"route": [1, 2]}}}"#,
    /// )?;
    /// let names = HashMap::from([(1, "Depot".to_string()), (2, "Cafe".to_string())]);
    /// assert_eq!(
    ///     response.to_text(&names),
    ///     vec!["For vehicle v1 route is: Depot->Cafe".to_string()],
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn to_text(&self, locations: &HashMap<u32, String>) -> Vec<String> {
        self.vehicle_data
            .iter()
            .map(|(vehicle_id, vehicle)| {
                let path = vehicle
                    .route
                    .iter()
                    .map(|id| {
                        locations
                            .get(id)
                            .cloned()
                            .unwrap_or_else(|| id.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join("->");
                format!("For vehicle {vehicle_id} route is: {path}")
            })
            .collect()
    }
}
