// Inline SVG rendering of line charts
use crate::domain::chart::ChartData;
use crate::presentation::render::html_escape;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 200.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 28.0;
const GRID_LINES: usize = 4;
const GRID_COLOR: &str = "#27272a";
const AXIS_COLOR: &str = "#71717a";
const DEFAULT_SERIES_COLOR: &str = "#a1a1aa";

struct Plot {
    count: usize,
    y_max: f64,
}

impl Plot {
    fn width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return MARGIN_LEFT + Self::width() / 2.0;
        }
        MARGIN_LEFT + Self::width() * index as f64 / (self.count - 1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + Self::height() * (1.0 - value / self.y_max)
    }
}

/// Smallest 1/2/5 x 10^n that is >= `value`
pub fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }

    let magnitude = 10f64.powi(value.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

pub fn render_line_chart(chart: &ChartData) -> String {
    let plot = Plot {
        count: chart.labels.len(),
        y_max: nice_ceiling(chart.max_value()),
    };

    let mut svg = format!(
        "<svg class=\"chart\" id=\"{}\" viewBox=\"0 0 {} {}\" width=\"100%\" height=\"{}\" role=\"img\" aria-label=\"{}\">",
        html_escape(&chart.id),
        WIDTH,
        HEIGHT,
        HEIGHT,
        html_escape(&chart.title)
    );

    // Horizontal grid and y axis ticks
    for step in 0..=GRID_LINES {
        let value = plot.y_max * step as f64 / GRID_LINES as f64;
        let y = plot.y(value);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"3 3\"/>",
            MARGIN_LEFT,
            y,
            WIDTH - MARGIN_RIGHT,
            y,
            GRID_COLOR
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"11\" text-anchor=\"end\">{}</text>",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            AXIS_COLOR,
            value.round()
        ));
    }

    // Vertical grid and x axis labels
    for (index, label) in chart.labels.iter().enumerate() {
        let x = plot.x(index);
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"3 3\"/>",
            x,
            MARGIN_TOP,
            x,
            HEIGHT - MARGIN_BOTTOM,
            GRID_COLOR
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"11\" text-anchor=\"middle\">{}</text>",
            x,
            HEIGHT - 8.0,
            AXIS_COLOR,
            html_escape(label)
        ));
    }

    for series in &chart.series {
        if series.points.is_empty() {
            continue;
        }

        let color = html_escape(series.color.as_deref().unwrap_or(DEFAULT_SERIES_COLOR));
        let points: Vec<String> = series
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| format!("{:.1},{:.1}", plot.x(index), plot.y(p.value)))
            .collect();

        svg.push_str(&format!(
            "<polyline class=\"series\" data-series=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>",
            html_escape(&series.id),
            color,
            points.join(" ")
        ));

        for (index, p) in series.points.iter().enumerate() {
            svg.push_str(&format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\" fill=\"{}\"><title>{} {}: {}</title></circle>",
                plot.x(index),
                plot.y(p.value),
                color,
                html_escape(&p.label),
                html_escape(&series.name),
                p.value
            ));
        }
    }

    svg.push_str("</svg>");

    svg.push_str("<div class=\"legend\">");
    for series in &chart.series {
        svg.push_str(&format!(
            "<span class=\"legend-item\" style=\"color: {}\">● {}</span>",
            html_escape(series.color.as_deref().unwrap_or(DEFAULT_SERIES_COLOR)),
            html_escape(&series.name)
        ));
    }
    svg.push_str("</div>");

    svg
}
