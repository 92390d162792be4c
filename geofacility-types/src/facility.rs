use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Synthetic identity of a [`Facility`].
///
/// Records with identical visible fields are still distinct facilities, so
/// deletion and de-duplication go through this id rather than field matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacilityId(Uuid);

impl FacilityId {
    /// Fresh random (v4) id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FacilityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A geo-tagged facility record.
///
/// Latitude and longitude are stored in degrees. Records are not validated on
/// construction; the catalog and the spatial index reject invalid
/// coordinates when the record is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Assigned on construction; omitted ids are generated when deserializing
    #[serde(default)]
    pub id: FacilityId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    #[serde(default)]
    pub contact: String,
}

impl Facility {
    /// Create a facility with a fresh [`FacilityId`].
    ///
    /// # Examples
    ///
    /// ```
    /// use geofacility_types::Facility;
    ///
    /// let a = Facility::new("City Hospital", "123 Main St", 40.73061, -73.935242, 4.7, "555-1234");
    /// let b = Facility::new("City Hospital", "123 Main St", 40.73061, -73.935242, 4.7, "555-1234");
    /// assert_ne!(a, b); // different ids
    /// assert_eq!(a.location().y(), 40.73061);
    /// ```
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
        rating: f64,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: FacilityId::new(),
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
            rating,
            contact: contact.into(),
        }
    }

    pub fn id(&self) -> FacilityId {
        self.id
    }

    /// Location as a `geo::Point` (`x` = longitude, `y` = latitude).
    pub fn location(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    /// Same record under a different id. Used to model duplicates.
    pub fn with_id(mut self, id: FacilityId) -> Self {
        self.id = id;
        self
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Rating: {}", self.rating)?;
        writeln!(f, "Latitude: {}", self.latitude)?;
        writeln!(f, "Longitude: {}", self.longitude)?;
        write!(f, "Contact: {}", self.contact)
    }
}
