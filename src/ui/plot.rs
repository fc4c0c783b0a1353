use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::SpeciesColors;
use crate::render::histogram::HistogramData;
use crate::render::scatter::ScatterData;

// ---------------------------------------------------------------------------
// Histogram card
// ---------------------------------------------------------------------------

/// Stacked histogram, one bar chart per species.
pub fn histogram(ui: &mut Ui, data: &HistogramData, colors: &SpeciesColors) {
    if data.is_empty() {
        ui.weak("No values to show for the current selection.");
    }

    let mut charts: Vec<BarChart> = Vec::with_capacity(data.series.len());
    for series in &data.series {
        let bars: Vec<Bar> = data
            .bins
            .iter()
            .zip(&series.counts)
            .map(|(bin, &count)| Bar::new(bin.center(), count as f64).width(bin.width()))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(series.species.as_str())
            .color(colors.color_for(series.species))
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new("histogram")
        .legend(Legend::default())
        .x_axis_label(data.attribute.column_name())
        .y_axis_label("count")
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatterplot card
// ---------------------------------------------------------------------------

pub fn scatterplot(ui: &mut Ui, data: &ScatterData, colors: &SpeciesColors) {
    if data.point_count() == 0 {
        ui.weak("No values to show for the current selection.");
    }

    Plot::new("scatterplot")
        .legend(Legend::default())
        .x_axis_label(data.x_label())
        .y_axis_label(data.y_label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &data.series {
                let points = Points::new(series.points.clone())
                    .name(series.species.as_str())
                    .color(colors.color_for(series.species))
                    .radius(3.0);
                plot_ui.points(points);
            }
        });
}
