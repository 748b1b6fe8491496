//! HTML/JS writer implementation
//!
//! Converts composed map figures into an HTML fragment plus a script-tag
//! header for browser rendering with Leaflet.
//!
//! # Mapping Strategy
//!
//! - Viewport ranges → degree bounds the runtime fits on load
//! - Point layer → circle markers drawn from an inline JSON payload
//! - Hover spec → a mousemove hit-test feeding the info panel
//! - Select widgets → `<select multiple>` elements wired to marker visibility
//! - Tile source → a tile layer URL template with attribution
//!
//! # Example
//!
//! ```rust,ignore
//! use protest_map::writer::{Writer, HtmlWriter};
//!
//! let writer = HtmlWriter::new();
//! let artifacts = writer.write(&figure)?;
//! // artifacts.fragment embeds in a page that loads artifacts.script_header
//! ```

use serde_json::{json, Value};

use crate::catalog::ProtestAttribute;
use crate::naming;
use crate::plot::{hover, MapFigure};
use crate::writer::{MapArtifacts, Writer};
use crate::{ProtestMapError, Result};

/// Client-side behavior of the widget. `__MAP_CONFIG__` is replaced with
/// the figure's JSON payload at write time.
const APP_JS: &str = r#"(function () {
  "use strict";
  var config = __MAP_CONFIG__;

  var map = L.map(config.elements.canvas, {
    zoomControl: false,
    scrollWheelZoom: config.tools.indexOf("wheel_zoom") !== -1,
    dragging: config.tools.indexOf("drag_pan") !== -1,
    doubleClickZoom: false,
    boxZoom: false,
    keyboard: false,
    touchZoom: false,
    tap: false
  });
  map.fitBounds([
    [config.bounds.south, config.bounds.west],
    [config.bounds.north, config.bounds.east]
  ]);
  L.tileLayer(config.tiles.url, { attribution: config.tiles.attribution }).addTo(map);

  var style = config.style;
  var markers = config.markers.map(function (m) {
    var layer = L.circleMarker([m.lat, m.lon], {
      radius: style.size / 2,
      fillColor: style.fill,
      fillOpacity: style.fillOpacity,
      color: style.line,
      opacity: style.lineOpacity,
      weight: 1
    });
    layer.addTo(map);
    return { data: m, layer: layer, visible: true };
  });

  var panel = document.getElementById(config.elements.panel);

  function escapeHtml(text) {
    return String(text)
      .replace(/&/g, "&amp;")
      .replace(/</g, "&lt;")
      .replace(/>/g, "&gt;");
  }

  function applyFilters() {
    var active = config.widgets.map(function (w) {
      var select = document.getElementById(w.elementId);
      var chosen = {};
      var count = 0;
      for (var i = 0; i < select.options.length; i++) {
        if (select.options[i].selected) {
          chosen[select.options[i].value] = true;
          count++;
        }
      }
      return { attribute: w.attribute, chosen: chosen, count: count };
    });
    markers.forEach(function (m) {
      var visible = active.every(function (f) {
        // A widget with nothing selected does not filter, and a blank
        // value has no matching option and stays visible.
        if (f.count === 0) { return true; }
        var value = m.data[f.attribute];
        return value === "" || f.chosen[value] === true;
      });
      if (visible && !m.visible) { m.layer.addTo(map); }
      if (!visible && m.visible) { map.removeLayer(m.layer); }
      m.visible = visible;
    });
  }

  config.widgets.forEach(function (w) {
    document.getElementById(w.elementId).addEventListener("change", applyFilters);
  });

  function recordBlock(ordinal, m) {
    return ordinal + "." + "<br>" +
      "Description: " + escapeHtml(m.description) + "<br>" +
      " Location: " + escapeHtml(m.location) + "<br>" +
      " Type of Protest: " + escapeHtml(m.eventType) + "<br>";
  }

  function fillTemplate(template, n) {
    return template.replace("{n}", String(n));
  }

  function renderHits(hits) {
    var wording = config.hover.wording;
    var html = fillTemplate(wording.header, hits.length) + "<br>";
    var shown = Math.min(hits.length, config.hover.maxVisible);
    for (var i = 0; i < shown; i++) {
      html += recordBlock(i + 1, hits[i].data);
    }
    var hidden = hits.length - shown;
    if (hidden === 1) {
      html += "<br><em>" + wording.oneHidden + "</em><br>";
    } else if (hidden > 1) {
      html += "<br><em>" + fillTemplate(wording.manyHidden, hidden) + "</em><br>";
    }
    panel.innerHTML = html;
  }

  map.on("mousemove", function (event) {
    var cursor = event.containerPoint;
    var hits = [];
    markers.forEach(function (m) {
      if (!m.visible) { return; }
      var point = map.latLngToContainerPoint(m.layer.getLatLng());
      if (cursor.distanceTo(point) <= config.hover.radius) { hits.push(m); }
    });
    // The panel keeps its last content between hits.
    if (hits.length !== 0) { renderHits(hits); }
  });
})();
"#;

/// HTML/JS writer
///
/// Generates the embeddable widget fragment and the script-tag header
/// that loads the Leaflet runtime from a CDN.
pub struct HtmlWriter {
    /// CDN base URL for the map runtime files.
    runtime_base: String,
}

impl HtmlWriter {
    /// Create a new HTML writer with default settings
    pub fn new() -> Self {
        Self {
            runtime_base: "https://unpkg.com/leaflet@1.9.4/dist".to_string(),
        }
    }

    /// Script and stylesheet tags that load the map runtime.
    ///
    /// Loaded from a CDN so the embedding site always serves the runtime
    /// version the fragment was generated against.
    pub fn script_header(&self) -> String {
        format!(
            "<link rel=\"stylesheet\" href=\"{base}/leaflet.css\" crossorigin=\"anonymous\">\n<script type=\"text/javascript\" src=\"{base}/leaflet.js\" crossorigin=\"anonymous\"></script>\n",
            base = self.runtime_base
        )
    }

    /// Build the JSON payload the client script consumes.
    fn config_payload(&self, figure: &MapFigure) -> Value {
        let bounds = figure.viewport.lon_lat_bounds();
        let markers: Vec<Value> = figure
            .points
            .markers
            .iter()
            .map(|m| {
                json!({
                    "lon": m.lon,
                    "lat": m.lat,
                    "description": m.description,
                    "location": m.location,
                    "eventType": m.event_type,
                })
            })
            .collect();
        let widgets: Vec<Value> = figure
            .widgets
            .iter()
            .map(|w| {
                json!({
                    "elementId": w.element_id,
                    "attribute": attribute_key(w.attribute),
                })
            })
            .collect();
        json!({
            "elements": {
                "canvas": naming::MAP_ID,
                "panel": naming::PANEL_ID,
            },
            "bounds": {
                "west": bounds.west,
                "south": bounds.south,
                "east": bounds.east,
                "north": bounds.north,
            },
            "tools": figure.viewport.tools.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            "tiles": {
                "url": figure.tiles.url_template,
                "attribution": figure.tiles.attribution,
            },
            "style": {
                "size": figure.points.style.size,
                "fill": figure.points.style.fill,
                "fillOpacity": figure.points.style.fill_opacity,
                "line": figure.points.style.line,
                "lineOpacity": figure.points.style.line_opacity,
            },
            "hover": {
                "radius": figure.hover.radius,
                "maxVisible": figure.hover.max_visible,
                "wording": {
                    "header": hover::HEADER_TEMPLATE,
                    "oneHidden": hover::ONE_HIDDEN_NOTE,
                    "manyHidden": hover::MANY_HIDDEN_TEMPLATE,
                },
            },
            "markers": markers,
            "widgets": widgets,
        })
    }

    /// Markup for the filter column: one labelled multi-select per widget,
    /// every option initially selected.
    fn filters_markup(&self, figure: &MapFigure) -> String {
        let mut html = format!("<div id=\"{}\">\n", naming::FILTERS_ID);
        for widget in &figure.widgets {
            html.push_str("<div>\n");
            html.push_str(&format!(
                "<label for=\"{}\">{}</label><br>\n",
                widget.element_id,
                escape_html(&widget.column)
            ));
            html.push_str(&format!(
                "<select id=\"{}\" multiple size=\"8\">\n",
                widget.element_id
            ));
            for option in &widget.options {
                html.push_str(&format!(
                    "<option selected>{}</option>\n",
                    escape_html(option)
                ));
            }
            html.push_str("</select>\n</div>\n");
        }
        html.push_str("</div>\n");
        html
    }

    /// The widget fragment: layout skeleton plus the inline script.
    fn fragment(&self, figure: &MapFigure) -> Result<String> {
        let payload = serde_json::to_string(&self.config_payload(figure)).map_err(|e| {
            ProtestMapError::WriterError(format!("Failed to serialize map payload: {}", e))
        })?;
        // A literal "</script>" (or "<!--") inside the payload would change
        // how the browser parses the script element, so every "<" in the
        // JSON is emitted as its escape sequence. "<" only occurs inside
        // JSON strings, where "<" means the same character.
        let payload = payload.replace('<', "\\u003c");

        let mut html = format!("<div id=\"{}\">\n", naming::WIDGET_ID);
        html.push_str("<div style=\"display: flex\">\n");
        html.push_str(&format!(
            "<div id=\"{}\" style=\"width: {}px; height: {}px\"></div>\n",
            naming::MAP_ID,
            figure.viewport.width,
            figure.viewport.height
        ));
        html.push_str(&self.filters_markup(figure));
        html.push_str("</div>\n");
        html.push_str(&format!(
            "<div id=\"{}\" style=\"width: {}px; height: {}px; overflow-y: auto\">{}</div>\n",
            naming::PANEL_ID,
            figure.panel.width,
            figure.panel.height,
            escape_html(&figure.panel.resting_text)
        ));
        html.push_str("</div>\n");
        html.push_str("<script type=\"text/javascript\">\n");
        html.push_str(&APP_JS.replace("__MAP_CONFIG__", &payload));
        html.push_str("</script>\n");
        Ok(html)
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlWriter {
    fn write(&self, figure: &MapFigure) -> Result<MapArtifacts> {
        self.validate(figure)?;
        Ok(MapArtifacts {
            title: figure.title.clone(),
            script_header: self.script_header(),
            fragment: self.fragment(figure)?,
        })
    }

    fn validate(&self, figure: &MapFigure) -> Result<()> {
        // JSON has no representation for non-finite numbers, they would
        // serialize as null and break the client script.
        for (index, marker) in figure.points.markers.iter().enumerate() {
            if !marker.lon.is_finite() || !marker.lat.is_finite() {
                return Err(ProtestMapError::WriterError(format!(
                    "Marker {} has a non-finite coordinate",
                    index
                )));
            }
        }

        if figure.viewport.x_range.0 >= figure.viewport.x_range.1
            || figure.viewport.y_range.0 >= figure.viewport.y_range.1
        {
            return Err(ProtestMapError::WriterError(
                "Viewport ranges must run from min to max".to_string(),
            ));
        }

        // Widget ids become DOM ids and must not collide.
        for (i, a) in figure.widgets.iter().enumerate() {
            for b in figure.widgets.iter().skip(i + 1) {
                if a.element_id == b.element_id {
                    return Err(ProtestMapError::WriterError(format!(
                        "Filter widgets '{}' and '{}' collide on element id '{}'",
                        a.column, b.column, a.element_id
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Minimal HTML escaping for text and attribute positions.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Payload key a widget's attribute binds to on each marker object.
fn attribute_key(attribute: ProtestAttribute) -> &'static str {
    match attribute {
        ProtestAttribute::Description => "description",
        ProtestAttribute::Location => "location",
        ProtestAttribute::EventType => "eventType",
    }
}
