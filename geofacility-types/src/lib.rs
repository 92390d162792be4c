//! # geofacility-types
//!
//! Plain data types shared by the geofacility catalog and its spatial index.
//!
//! - **Records**: [`Facility`] and its synthetic identity [`FacilityId`]
//! - **Rectangles**: [`BoundingBox2D`], the axis-aligned box kept on every
//!   index node
//!
//! Coordinates follow the `geo` convention: `x` is longitude, `y` is latitude,
//! both in degrees.
//!
//! ## Examples
//!
//! ```rust
//! use geofacility_types::{BoundingBox2D, Facility};
//!
//! let clinic = Facility::new("Harbor Clinic", "1 Pier Rd, Boston, MA", 42.36, -71.05, 4.2, "555-0100");
//! let bbox = BoundingBox2D::from_point(&clinic.location());
//! assert!(bbox.contains_point(&clinic.location()));
//! ```

pub mod bbox;
pub mod facility;

pub use bbox::BoundingBox2D;
pub use facility::{Facility, FacilityId};
