//! Grouped bar chart of the production view, drawn with plotters into an
//! SVG string.
//!
//! One panel per year; within a panel, one group of bars per country and
//! one bar per mineral. Bars for repeated (year, country, mineral) rows are
//! summed.

use std::collections::BTreeMap;

use plotters::prelude::*;

use crate::data::ProductionView;
use crate::error::{DashboardError, Result};

pub const CHART_TITLE: &str = "Annual Mineral Production by Country and Mineral";

const PANEL_WIDTH: u32 = 360;
const HEIGHT: u32 = 440;
/// Share of a country slot left empty on each side of its bar group
const GROUP_MARGIN: f64 = 0.1;

/// Summed production for one (year, country, mineral), as indices into
/// `years()`, `countries()` and `minerals()` of the view.
#[derive(Debug, Clone, PartialEq)]
struct Bar {
    panel: usize,
    country: usize,
    mineral: usize,
    tonnes: f64,
}

/// Render the chart, or `None` when there is nothing to plot.
pub fn production_chart(view: &ProductionView) -> Result<Option<String>> {
    if view.is_empty() {
        return Ok(None);
    }

    let mut svg = String::new();
    draw(view, &mut svg).map_err(|e| DashboardError::ChartFailed(e.to_string()))?;
    Ok(Some(svg))
}

fn bars(view: &ProductionView, years: &[i32], countries: &[&str], minerals: &[&str]) -> Vec<Bar> {
    let mut totals: BTreeMap<(usize, usize, usize), f64> = BTreeMap::new();
    for row in &view.rows {
        let (Some(panel), Some(country), Some(mineral)) = (
            years.iter().position(|y| *y == row.year),
            countries.iter().position(|c| *c == row.country),
            minerals.iter().position(|m| *m == row.mineral),
        ) else {
            continue;
        };
        *totals.entry((panel, country, mineral)).or_default() += row.production_tonnes;
    }

    totals
        .into_iter()
        .map(|((panel, country, mineral), tonnes)| Bar {
            panel,
            country,
            mineral,
            tonnes,
        })
        .collect()
}

fn draw(view: &ProductionView, svg: &mut String) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let years = view.years();
    let countries = view.countries();
    let minerals = view.minerals();
    let bars = bars(view, &years, &countries, &minerals);

    // The axis always includes zero and extends below it for negative totals
    let (low, high) = bars
        .iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), b| (lo.min(b.tonnes), hi.max(b.tonnes)));
    let y_range = if high > low { low * 1.1..high * 1.1 } else { 0.0..1.0 };

    // Ticks fall on slot edges and centres; only centres are labelled
    let country_label = |x: &f64| -> String {
        if (x.fract() - 0.5).abs() < 1e-6 {
            countries.get(x.floor() as usize).map(|c| c.to_string()).unwrap_or_default()
        } else {
            String::new()
        }
    };

    let bar_width = (1.0 - 2.0 * GROUP_MARGIN) / minerals.len() as f64;
    let last_panel = years.len() - 1;

    let root = SVGBackend::with_string(svg, (PANEL_WIDTH * years.len() as u32, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(CHART_TITLE, ("sans-serif", 20))?;

    for (p, panel) in root.split_evenly((1, years.len())).iter().enumerate() {
        let mut chart = ChartBuilder::on(panel)
            .caption(format!("Year={}", years[p]), ("sans-serif", 15))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..countries.len() as f64, y_range.clone())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * countries.len() + 1)
            .x_label_formatter(&country_label)
            .y_desc("Production (tonnes)")
            .draw()?;

        for (m, mineral) in minerals.iter().enumerate() {
            let style = Palette99::pick(m).filled();
            let series = chart.draw_series(bars.iter().filter(|b| b.panel == p && b.mineral == m).map(|b| {
                let x0 = b.country as f64 + GROUP_MARGIN + bar_width * m as f64;
                Rectangle::new([(x0, 0.0), (x0 + bar_width, b.tonnes)], style)
            }))?;

            if p == last_panel {
                series
                    .label(*mineral)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
            }
        }

        if p == last_panel {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProductionRow;

    fn row(country: &str, mineral: &str, year: i32, tonnes: f64) -> ProductionRow {
        ProductionRow {
            country_id: 1,
            mineral_id: 1,
            year,
            production_tonnes: tonnes,
            export_value_billion_usd: 1.0,
            country: country.to_string(),
            gdp_billion_usd: 10.0,
            mining_revenue_billion_usd: 1.0,
            key_projects: String::new(),
            mineral: mineral.to_string(),
            description: String::new(),
            market_price_usd_per_tonne: 100.0,
        }
    }

    fn view_bars(view: &ProductionView) -> Vec<Bar> {
        bars(view, &view.years(), &view.countries(), &view.minerals())
    }

    #[test]
    fn test_empty_view_has_no_chart() {
        assert_eq!(production_chart(&ProductionView::default()), Ok(None));
    }

    #[test]
    fn test_panels_and_legend() {
        let view = ProductionView {
            rows: vec![
                row("Zambia", "Copper", 2022, 830_000.0),
                row("Chile", "Copper", 2022, 5_330_000.0),
                row("Zambia", "Cobalt", 2023, 2_000.0),
            ],
        };

        let svg = production_chart(&view).unwrap().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(CHART_TITLE));
        assert!(svg.contains("Year=2022"));
        assert!(svg.contains("Year=2023"));
        assert!(svg.contains(">Zambia<"));
        assert!(svg.contains(">Chile<"));
        assert!(svg.contains(">Cobalt<"));

        let bars = view_bars(&view);
        assert_eq!(bars.len(), 3);
        assert_eq!(
            bars[0],
            Bar {
                panel: 0,
                country: 0,
                mineral: 0,
                tonnes: 830_000.0
            }
        );
        assert_eq!(bars[2].panel, 1);
        assert_eq!(bars[2].mineral, 1);
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let view = ProductionView {
            rows: vec![
                row("Zambia", "Copper", 2022, 400.0),
                row("Zambia", "Copper", 2022, 600.0),
                row("Zambia", "Copper", 2023, 50.0),
            ],
        };

        let bars = view_bars(&view);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].tonnes, 1000.0);
        assert_eq!(bars[1].tonnes, 50.0);
    }

    #[test]
    fn test_negative_production_stays_valid_svg() {
        let view = ProductionView {
            rows: vec![
                row("Zambia", "Copper", 2022, -500.0),
                row("Chile", "Copper", 2022, 1_000.0),
            ],
        };

        let svg = production_chart(&view).unwrap().unwrap();
        assert!(!svg.contains(r#"height="-"#));
        assert!(!svg.contains(r#"width="-"#));
    }

    #[test]
    fn test_labels_are_escaped() {
        let view = ProductionView {
            rows: vec![row("<Acme & Co>", "Tin", 2021, 5.0)],
        };

        let svg = production_chart(&view).unwrap().unwrap();
        assert!(!svg.contains("<Acme"));
        assert!(svg.contains("Acme &amp; Co"));
    }
}
