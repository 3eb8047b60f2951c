/// Geographic bounding box in lon/lat degrees.
///
/// The consumer fits the view to this after a document finishes loading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn from_point(lon_deg: f64, lat_deg: f64) -> Self {
        Self::new(lon_deg, lat_deg, lon_deg, lat_deg)
    }

    pub fn include(&mut self, lon_deg: f64, lat_deg: f64) {
        self.min_lon = self.min_lon.min(lon_deg);
        self.min_lat = self.min_lat.min(lat_deg);
        self.max_lon = self.max_lon.max(lon_deg);
        self.max_lat = self.max_lat.max(lat_deg);
    }

    pub fn union(&mut self, other: Extent) {
        self.include(other.min_lon, other.min_lat);
        self.include(other.max_lon, other.max_lat);
    }

    pub fn contains(&self, lon_deg: f64, lat_deg: f64) -> bool {
        lon_deg >= self.min_lon
            && lon_deg <= self.max_lon
            && lat_deg >= self.min_lat
            && lat_deg <= self.max_lat
    }
}
