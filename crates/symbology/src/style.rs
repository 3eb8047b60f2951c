use features::Feature;

use crate::palette::{Color, ThemePalette};

/// Label font family; fixed, never theme-dependent.
pub const LABEL_FONT_FAMILY: &str = "monospace";

/// Basemap layers with a styling rule.
///
/// This is a closed set: the basemap schema is fixed, and unrecognized
/// layer names resolve to nothing rather than an open-ended rule table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    Boundaries,
    Earth,
    Water,
    Roads,
    Landuse,
    Places,
    PhysicalPoint,
}

impl LayerKind {
    pub fn from_name(name: &str) -> Option<LayerKind> {
        match name {
            "boundaries" => Some(LayerKind::Boundaries),
            "earth" => Some(LayerKind::Earth),
            "water" => Some(LayerKind::Water),
            "roads" => Some(LayerKind::Roads),
            "landuse" => Some(LayerKind::Landuse),
            "places" => Some(LayerKind::Places),
            "physical_point" => Some(LayerKind::PhysicalPoint),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width_px: f32,
    pub dash: Option<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub text: String,
    pub weight: u16,
    pub size_px: f32,
    pub italic: bool,
    pub color: Color,
    pub halo_color: Color,
    pub halo_width_px: f32,
}

/// One renderable treatment for a feature. Exactly one of stroke, fill or
/// label applies per layer kind; absence (`None` from [`style`]) means the
/// feature is not rendered at all.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderStyle {
    Stroke(StrokeStyle),
    Fill(FillStyle),
    Label(LabelStyle),
}

/// Resolves the render style for one feature.
///
/// Pure and total: every input combination yields exactly one
/// `Option<RenderStyle>`, equal inputs yield equal outputs, and absent
/// attributes degrade to defaults instead of failing. `zoom` arrives
/// precomputed by the view; it is never derived here.
pub fn style(
    layer_name: &str,
    feature: &Feature,
    zoom: f64,
    palette: &ThemePalette,
) -> Option<RenderStyle> {
    match LayerKind::from_name(layer_name)? {
        LayerKind::Boundaries => Some(RenderStyle::Stroke(StrokeStyle {
            color: palette.boundaries,
            // Absent min_admin_level fails the comparison, giving the
            // minor-boundary width.
            width_px: if feature
                .num("pmap:min_admin_level")
                .is_some_and(|level| level <= 2.0)
            {
                1.0
            } else {
                0.5
            },
            dash: Some([2.0, 2.0]),
        })),
        LayerKind::Earth => Some(RenderStyle::Fill(FillStyle {
            color: palette.earth,
        })),
        LayerKind::Water => Some(RenderStyle::Fill(FillStyle {
            color: palette.water,
        })),
        LayerKind::Roads => Some(RenderStyle::Stroke(StrokeStyle {
            color: palette.roads,
            width_px: if zoom > 14.0 { 2.0 } else { 1.0 },
            dash: None,
        })),
        // Policy: landuse renders nothing. Kept as its own arm so the
        // suppression stays deliberate rather than an unknown-layer fall.
        LayerKind::Landuse => None,
        kind @ (LayerKind::Places | LayerKind::PhysicalPoint) => {
            Some(RenderStyle::Label(LabelStyle {
                text: label_text(feature),
                weight: label_weight(feature),
                size_px: label_size_px(feature),
                italic: kind == LayerKind::PhysicalPoint,
                color: palette.label,
                halo_color: palette.label_halo,
                halo_width_px: 4.0,
            }))
        }
    }
}

fn label_text(feature: &Feature) -> String {
    let name = feature.str_or("name:en", "");
    if feature.str_or("pmap:kind", "") == "locality" {
        name.to_string()
    } else {
        name.to_uppercase()
    }
}

fn label_weight(feature: &Feature) -> u16 {
    if feature.str_or("pmap:kind", "") == "country" {
        800
    } else {
        500
    }
}

fn label_size_px(feature: &Feature) -> f32 {
    if feature.str_or("pmap:kind", "") == "locality" {
        // Absent min_zoom fails the comparison, giving the small size.
        if feature.num("pmap:min_zoom").is_some_and(|z| z < 6.0) {
            12.0
        } else {
            9.0
        }
    } else {
        11.0
    }
}
