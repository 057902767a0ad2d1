//! Embeddable SVG bar charts for diagnosis counts.
//!
//! The renderer takes a title and a series of (label, value) pairs and emits
//! a self-contained `<svg>` element suitable for embedding in an HTML page.
//! The only numeric guarantee is that bar height is proportional to value.
//! An empty series renders a valid placeholder chart, not an error.

const CHART_WIDTH: u32 = 760;
const CHART_HEIGHT: u32 = 420;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 60;
const MARGIN_SIDE: u32 = 40;
const BAR_GAP: u32 = 16;
const BAR_COLOUR: &str = "#4465ad";

/// One bar of the chart: a label beneath the bar and the value it scales by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// Renders `bars` as an SVG bar chart with `title` across the top.
///
/// Bars keep their input order left to right. All user-supplied text is
/// XML-escaped. An empty series yields a placeholder chart with a
/// "no matching visits" message.
pub fn bar_chart(title: &str, bars: &[Bar]) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" \
         height=\"{CHART_HEIGHT}\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" \
         font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"28\" text-anchor=\"middle\" font-size=\"16\">{}</text>\n",
        CHART_WIDTH / 2,
        escape_xml(title)
    ));

    if bars.is_empty() {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"14\" \
             fill=\"#666\">No matching visits</text>\n",
            CHART_WIDTH / 2,
            CHART_HEIGHT / 2
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let max_value = bars.iter().map(|b| b.value).max().unwrap_or(1).max(1);
    let plot_width = CHART_WIDTH - 2 * MARGIN_SIDE;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot_width = plot_width / bars.len() as u32;
    let bar_width = slot_width.saturating_sub(BAR_GAP).max(4);
    let baseline = CHART_HEIGHT - MARGIN_BOTTOM;

    for (i, bar) in bars.iter().enumerate() {
        let height = ((bar.value as f64 / max_value as f64) * plot_height as f64).round() as u32;
        let x = MARGIN_SIDE + i as u32 * slot_width + BAR_GAP / 2;
        let y = baseline - height;
        let centre = x + bar_width / 2;

        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{bar_width}\" height=\"{height}\" \
             fill=\"{BAR_COLOUR}\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{centre}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\">{}</text>\n",
            y.saturating_sub(6),
            bar.value
        ));
        svg.push_str(&format!(
            "  <text x=\"{centre}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\">{}</text>\n",
            baseline + 20,
            escape_xml(&bar.label)
        ));
    }

    svg.push_str(&format!(
        "  <line x1=\"{MARGIN_SIDE}\" y1=\"{baseline}\" x2=\"{}\" y2=\"{baseline}\" \
         stroke=\"#333\"/>\n",
        CHART_WIDTH - MARGIN_SIDE
    ));
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
