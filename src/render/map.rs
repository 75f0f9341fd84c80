//! Country markers for the map page.
//!
//! Coordinates are placeholders derived from the row index, not real
//! locations: marker `i` sits at `MARKER_ORIGIN + i * MARKER_STEP`.

use html_escape::encode_text;
use serde::Serialize;

use crate::config::{MARKER_ORIGIN, MARKER_STEP};
use crate::data::Country;

/// A map marker handed to Leaflet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    /// Escaped HTML shown in the marker popup
    pub popup: String,
}

/// Placeholder (lat, lng) for the country at `index`
pub fn placeholder_location(index: usize) -> (f64, f64) {
    (
        MARKER_ORIGIN.0 + index as f64 * MARKER_STEP.0,
        MARKER_ORIGIN.1 + index as f64 * MARKER_STEP.1,
    )
}

fn popup_html(country: &Country) -> String {
    format!(
        "<b>{}</b><br>GDP: {} B USD<br>Mining Revenue: {} B USD<br>Project: {}",
        encode_text(&country.name),
        country.gdp_billion_usd,
        country.mining_revenue_billion_usd,
        encode_text(&country.key_projects)
    )
}

pub fn markers(countries: &[Country]) -> Vec<Marker> {
    countries
        .iter()
        .enumerate()
        .map(|(i, country)| {
            let (lat, lng) = placeholder_location(i);
            Marker {
                lat,
                lng,
                popup: popup_html(country),
            }
        })
        .collect()
}

/// Markers as JSON that is safe to embed inside a `<script>` element.
pub fn markers_json(markers: &[Marker]) -> String {
    serde_json::to_string(markers)
        .map(|json| json.replace("</", "<\\/"))
        .unwrap_or_else(|e| {
            tracing::error!("Failed to serialize map markers: {}", e);
            "[]".to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, project: &str) -> Country {
        Country {
            id: 1,
            name: name.to_string(),
            gdp_billion_usd: 29.8,
            mining_revenue_billion_usd: 5.2,
            key_projects: project.to_string(),
        }
    }

    #[test]
    fn test_placeholder_locations() {
        assert_eq!(placeholder_location(0), (-10.0, 20.0));
        assert_eq!(placeholder_location(1), (-8.0, 23.0));
        assert_eq!(placeholder_location(3), (-4.0, 29.0));
    }

    #[test]
    fn test_marker_popup() {
        let markers = markers(&[country("Zambia", "Kansanshi"), country("Chile", "Escondida")]);
        assert_eq!(markers.len(), 2);
        assert_eq!(
            markers[0].popup,
            "<b>Zambia</b><br>GDP: 29.8 B USD<br>Mining Revenue: 5.2 B USD<br>Project: Kansanshi"
        );
        assert_eq!((markers[1].lat, markers[1].lng), (-8.0, 23.0));
    }

    #[test]
    fn test_popup_escapes_values() {
        let markers = markers(&[country("<script>", "A & B")]);
        assert!(markers[0].popup.contains("&lt;script&gt;"));
        assert!(markers[0].popup.contains("A &amp; B"));
    }

    #[test]
    fn test_json_cannot_close_script() {
        let marker = Marker {
            lat: 0.0,
            lng: 0.0,
            popup: "</script><script>alert(1)</script>".to_string(),
        };
        let json = markers_json(&[marker]);
        assert!(!json.contains("</script>"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["popup"], "</script><script>alert(1)</script>");
    }
}
