use features::{AttrValue, Feature};
use serde_json::Value;

use crate::extent::Extent;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(GeoPoint),
    MultiPoint(Vec<GeoPoint>),
    LineString(Vec<GeoPoint>),
    MultiLineString(Vec<Vec<GeoPoint>>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
}

impl Geometry {
    fn for_each_point(&self, f: &mut impl FnMut(&GeoPoint)) {
        match self {
            Geometry::Point(p) => f(p),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.iter().for_each(f),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(f),
        }
    }

    /// Lon/lat bounds of the geometry, `None` for empty coordinate lists.
    pub fn bounds(&self) -> Option<Extent> {
        let mut out: Option<Extent> = None;
        self.for_each_point(&mut |p| match &mut out {
            Some(e) => e.include(p.lon_deg, p.lat_deg),
            none => *none = Some(Extent::from_point(p.lon_deg, p.lat_deg)),
        });
        out
    }
}

/// One parsed document feature: the attribute bag plus the geometry it was
/// digitized with. The geometry is only used for extent and hit bounds;
/// drawing stays with the rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFeature {
    pub attributes: Feature,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<DocumentFeature>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
        if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(GeoJsonError::NotAFeatureCollection);
        }
        let features_val = obj
            .get("features")
            .and_then(Value::as_array)
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            features.push(parse_feature(index, feat_val)?);
        }
        Ok(Self { features })
    }

    /// Union of all feature geometry bounds; `None` for an empty document.
    pub fn extent(&self) -> Option<Extent> {
        let mut out: Option<Extent> = None;
        for feat in &self.features {
            let Some(b) = feat.geometry.bounds() else {
                continue;
            };
            match &mut out {
                Some(e) => e.union(b),
                none => *none = Some(b),
            }
        }
        out
    }
}

fn parse_feature(index: usize, value: &Value) -> Result<DocumentFeature, GeoJsonError> {
    let invalid = |reason: String| GeoJsonError::InvalidFeature { index, reason };

    let obj = value
        .as_object()
        .ok_or_else(|| invalid("feature must be an object".to_string()))?;
    match obj.get("type").and_then(Value::as_str) {
        Some("Feature") => {}
        Some(other) => return Err(invalid(format!("unexpected feature type: {other}"))),
        None => return Err(invalid("feature missing type".to_string())),
    }

    // Properties flatten into the attribute bag in document order.
    let mut pairs: Vec<(String, AttrValue)> = Vec::new();
    if let Some(props) = obj.get("properties").and_then(Value::as_object) {
        for (key, val) in props {
            pairs.push((key.clone(), attr_value(val)));
        }
    }

    let geometry_val = obj
        .get("geometry")
        .ok_or_else(|| invalid("feature missing geometry".to_string()))?;
    let geometry = parse_geometry(geometry_val).map_err(invalid)?;

    Ok(DocumentFeature {
        attributes: Feature::new(pairs),
        geometry,
    })
}

/// Widens a JSON property value into the string|number|null variant.
/// Booleans, arrays and objects only matter for display, so they are
/// stringified.
fn attr_value(value: &Value) -> AttrValue {
    match value {
        Value::Null => AttrValue::Null,
        Value::String(s) => AttrValue::Str(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(x) => AttrValue::Num(x),
            None => AttrValue::Str(n.to_string()),
        },
        Value::Bool(b) => AttrValue::Str(b.to_string()),
        other => AttrValue::Str(other.to_string()),
    }
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| "geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "geometry missing type".to_string())?;
    let coords = obj
        .get("coordinates")
        .ok_or_else(|| "geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(position(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(positions(coords)?)),
        "LineString" => Ok(Geometry::LineString(positions(coords)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(nested(coords, positions)?)),
        "Polygon" => Ok(Geometry::Polygon(nested(coords, positions)?)),
        "MultiPolygon" => Ok(Geometry::MultiPolygon(nested(coords, |v| {
            nested(v, positions)
        })?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn position(value: &Value) -> Result<GeoPoint, String> {
    let arr = value
        .as_array()
        .ok_or_else(|| "position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position needs lon and lat".to_string());
    }
    let lon = arr[0]
        .as_f64()
        .ok_or_else(|| "longitude must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or_else(|| "latitude must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn positions(value: &Value) -> Result<Vec<GeoPoint>, String> {
    nested(value, position)
}

fn nested<T>(value: &Value, parse: impl Fn(&Value) -> Result<T, String>) -> Result<Vec<T>, String> {
    value
        .as_array()
        .ok_or_else(|| "expected coordinate array".to_string())?
        .iter()
        .map(parse)
        .collect()
}
