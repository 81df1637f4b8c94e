//! Plotters-powered sweep chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct SweepPlottersChart<'a> {
    /// Assigned fraction vs density.
    pub fraction: &'a [(f64, f64)],
    /// Fiber usage vs density.
    pub usage: &'a [(f64, f64)],
    /// Highlighted probe point(s) on the fraction curve.
    pub probe: &'a [(f64, f64)],
    /// X bounds (density).
    pub x_bounds: [f64; 2],
    /// Y bounds (fraction).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for SweepPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let fraction_color = RGBColor(0, 255, 255); // cyan
            let usage_color = RGBColor(0, 255, 0); // green
            let probe_color = RGBColor(255, 255, 0); // yellow

            chart.draw_series(LineSeries::new(self.fraction.iter().copied(), &fraction_color))?;
            chart.draw_series(LineSeries::new(self.usage.iter().copied(), &usage_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a pixel reads fine.
            chart.draw_series(self.probe.iter().map(|&(x, y)| Pixel::new((x, y), probe_color)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
