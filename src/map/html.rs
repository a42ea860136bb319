//! Standalone Leaflet page for a [`MapState`].
//!
//! The page template is kept as a `&'static str` and the map state is
//! injected as JSON, so the output needs nothing but the CDN assets.

use anyhow::Result;

use crate::map::MapState;
use crate::map::legend::LegendEntry;
use crate::map::popup::escape_html;

const STATE_PLACEHOLDER: &str = "__MAP_STATE__";
const LEGEND_PLACEHOLDER: &str = "__LEGEND__";
const TITLE_PLACEHOLDER: &str = "__TITLE__";

pub const LEAFLET_PAGE_HTML: &str = r#"<!doctype html>
<html lang="id">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>__TITLE__</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.2.0/css/bootstrap.min.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.2.0/css/all.min.css" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <style>
    html, body { height: 100%; margin: 0; }
    #map { height: 600px; width: 100%; }
    .legend { font-family: Arial, sans-serif; font-size: 14px; padding: 8px 12px; }
    .legend li { list-style: none; margin: 2px 0; }
  </style>
</head>
<body>
  <div id="map"></div>
  <ul class="legend">__LEGEND__</ul>
  <script>
    const state = __MAP_STATE__;
    const tiles = {
      'CartoDB positron': L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
        attribution: '&copy; OpenStreetMap contributors &copy; CARTO'
      }),
      'OpenStreetMap': L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; OpenStreetMap contributors'
      })
    };
    const map = L.map('map').setView([state.center.lat, state.center.lng], state.zoom);
    const layers = {};
    state.base_layers.forEach((name, i) => {
      if (tiles[name]) {
        layers[name] = tiles[name];
        if (i === 0) tiles[name].addTo(map);
      }
    });
    state.markers.forEach((m) => {
      const icon = L.AwesomeMarkers.icon({ icon: m.style.icon, markerColor: m.style.color, prefix: m.style.prefix });
      L.marker([m.position.lat, m.position.lng], { icon })
        .bindPopup(m.popup_html, { maxWidth: state.popup_max_width })
        .bindTooltip(m.tooltip)
        .addTo(map);
    });
    if (state.layer_control) {
      L.control.layers(layers).addTo(map);
    }
  </script>
</body>
</html>
"#;

fn legend_items(entries: &[LegendEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let code = e.code.map(|c| format!(" ({c})")).unwrap_or_default();
            format!(
                r#"<li><i class="{prefix} {prefix}-{icon}" style="color:{color}"></i> <b>{label}</b>{code}</li>"#,
                prefix = e.style.prefix,
                icon = e.style.icon,
                color = e.style.color,
                label = escape_html(&e.label),
                code = escape_html(&code),
            )
        })
        .collect()
}

/// Renders the map state and legend as a complete HTML document.
pub fn leaflet_page(title: &str, state: &MapState, legend: &[LegendEntry]) -> Result<String> {
    // "</" inside the inline script would end it early
    let json = serde_json::to_string(state)?.replace("</", "<\\/");

    Ok(LEAFLET_PAGE_HTML
        .replace(TITLE_PLACEHOLDER, &escape_html(title))
        .replace(LEGEND_PLACEHOLDER, &legend_items(legend))
        .replace(STATE_PLACEHOLDER, &json))
}
