//! Map visualization state for a station catalog.
//!
//! [`render_map`] turns a catalog into a [`MapState`]: one marker per station
//! with its style and popup, plus the view settings. The state serializes to
//! JSON and [`html::leaflet_page`] embeds it in a standalone Leaflet page.

pub mod html;
pub mod legend;
pub mod popup;

use serde::Serialize;
use tracing::debug;

use crate::catalog::StationCatalog;
use crate::category::{DeviceCategory, MarkerStyle, default_style};

pub use legend::{LegendEntry, legend};

/// Fixed map center covering the Indonesian archipelago.
pub const MAP_CENTER: LatLng = LatLng {
    lat: -2.5,
    lng: 129.0,
};

pub const ZOOM_WITH_STATIONS: f64 = 4.5;
pub const ZOOM_EMPTY: f64 = 4.0;

/// Base tile layers, the first one shown by default.
pub const BASE_LAYERS: [&str; 2] = ["CartoDB positron", "OpenStreetMap"];

pub const POPUP_MAX_WIDTH: u32 = 350;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id_site: String,
    pub position: LatLng,
    pub style: MarkerStyle,
    pub selected: bool,
    pub tooltip: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapState {
    pub center: LatLng,
    pub zoom: f64,
    pub base_layers: Vec<String>,
    pub layer_control: bool,
    pub popup_max_width: u32,
    pub markers: Vec<Marker>,
}

impl MapState {
    /// Map with no markers, centered on [`MAP_CENTER`].
    pub fn empty() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: ZOOM_EMPTY,
            base_layers: vec![BASE_LAYERS[0].to_string()],
            layer_control: false,
            popup_max_width: POPUP_MAX_WIDTH,
            markers: Vec::new(),
        }
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.selected)
    }
}

/// Builds the map state for a catalog.
///
/// Every station uses the category style, except the one whose `id_site`
/// equals `selected_id`, which gets [`MarkerStyle::HIGHLIGHTED`]. Ids are
/// compared as strings.
pub fn render_map(
    catalog: &StationCatalog,
    selected_id: Option<&str>,
    category: Option<DeviceCategory>,
) -> MapState {
    if catalog.is_empty() {
        return MapState::empty();
    }

    let base = default_style(category);

    let markers: Vec<Marker> = catalog
        .iter()
        .map(|site| {
            let selected = selected_id.is_some_and(|id| site.id_site == id);
            Marker {
                id_site: site.id_site.clone(),
                position: LatLng {
                    lat: site.latitude,
                    lng: site.longitude,
                },
                style: if selected { MarkerStyle::HIGHLIGHTED } else { base },
                selected,
                tooltip: popup::tooltip(site),
                popup_html: popup::popup_html(site),
            }
        })
        .collect();

    debug!(
        sheet = catalog.sheet(),
        markers = markers.len(),
        selected = ?selected_id,
        "Map rendered"
    );

    MapState {
        center: MAP_CENTER,
        zoom: ZOOM_WITH_STATIONS,
        base_layers: BASE_LAYERS.iter().map(|l| l.to_string()).collect(),
        layer_control: true,
        popup_max_width: POPUP_MAX_WIDTH,
        markers,
    }
}
