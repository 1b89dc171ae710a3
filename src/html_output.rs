//! HTML output for the dashboard page
//!
//! Renders a self-contained page with the site dropdown, the payload range
//! control and two chart containers. The initial figures are embedded as
//! JSON, so the page renders even without the server; when served, control
//! changes fetch fresh figures from the chart endpoints.

use crate::binder::{DashboardCharts, DashboardState};
use crate::dataset::Dataset;
use crate::filter::ALL_SITES;

/// Plotly.js bundle loaded by the page
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Spacing of the suggested payload marks, in kilograms
pub const PAYLOAD_STEP_KG: f64 = 1000.0;

/// Datalist id of the payload marks
pub const PAYLOAD_MARKS_ID: &str = "payload-marks";

/// Element ids shared between the markup and the script
pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const PIE_CHART_ID: &str = "success-pie-chart";
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

/// HTML dashboard formatter
#[derive(Debug)]
pub struct HtmlOutput {
    sites: Vec<String>,
    bounds: (f64, f64),
    state: DashboardState,
    charts: DashboardCharts,
}

impl HtmlOutput {
    /// Create a page for the given control state
    pub fn new(dataset: &Dataset, state: DashboardState) -> Self {
        Self {
            sites: dataset.sites().into_iter().map(str::to_string).collect(),
            bounds: dataset.payload_bounds().unwrap_or((0.0, 0.0)),
            charts: state.render(dataset),
            state,
        }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Make JSON safe to embed inside a `<script>` element
    fn escape_script_json(json: &str) -> String {
        json.replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1 {
            text-align: center;
            color: #503D36;
            font-size: 40px;
        }
        .controls {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            padding: 12px 16px;
            margin-bottom: 20px;
        }
        .controls label {
            font-weight: bold;
            margin-right: 8px;
        }
        .controls select {
            min-width: 280px;
            padding: 4px;
        }
        .controls input[type=number] {
            width: 110px;
            font-family: monospace;
        }
        .payload {
            margin-top: 12px;
        }
        .chart {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            min-height: 450px;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// Format a payload bound for an input attribute
    fn format_mass(mass: f64) -> String {
        if mass.fract() == 0.0 {
            format!("{:.0}", mass)
        } else {
            mass.to_string()
        }
    }

    /// Generate the site dropdown
    fn generate_dropdown(&self) -> String {
        let selected = self.state.site.selection();
        let mut options = vec![("All Sites", ALL_SITES)];
        options.extend(self.sites.iter().map(|s| (s.as_str(), s.as_str())));

        let option_tags: Vec<String> = options
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    Self::escape_html(value),
                    if *value == selected { " selected" } else { "" },
                    Self::escape_html(label)
                )
            })
            .collect();

        format!(
            r#"<label for="{id}">Launch Site</label><select id="{id}" title="Select a Launch Site here">{}</select>"#,
            option_tags.join(""),
            id = SITE_DROPDOWN_ID
        )
    }

    /// Suggested payload values: every multiple of the step within the
    /// bounds, plus the bounds themselves
    fn payload_marks(min: f64, max: f64) -> Vec<f64> {
        let mut marks = vec![min];
        let mut mark = (min / PAYLOAD_STEP_KG).floor() * PAYLOAD_STEP_KG + PAYLOAD_STEP_KG;
        while mark < max {
            marks.push(mark);
            mark += PAYLOAD_STEP_KG;
        }
        if max > min {
            marks.push(max);
        }
        marks
    }

    /// Generate the payload range inputs
    ///
    /// `step="any"` keeps the real dataset bounds valid input values; the
    /// 1000 kg marks are offered through a datalist instead.
    fn generate_payload_range(&self) -> String {
        let (min, max) = self.bounds;
        let input = |id: &str, value: f64| {
            format!(
                r#"<input type="number" id="{}" min="{}" max="{}" step="any" list="{}" value="{}">"#,
                id,
                Self::format_mass(min),
                Self::format_mass(max),
                PAYLOAD_MARKS_ID,
                Self::format_mass(value)
            )
        };
        let marks: String = Self::payload_marks(min, max)
            .into_iter()
            .map(|m| format!(r#"<option value="{}">"#, Self::format_mass(m)))
            .collect();

        format!(
            r#"<div class="payload" id="payload-slider"><label>Payload range (Kg):</label>{} to {}<datalist id="{}">{}</datalist></div>"#,
            input("payload-low", self.state.payload.low),
            input("payload-high", self.state.payload.high),
            PAYLOAD_MARKS_ID,
            marks
        )
    }

    /// Client-side glue: draws the embedded figures and refetches on change
    fn generate_script() -> &'static str {
        r#"
        const initial = JSON.parse(document.getElementById('initial-figures').textContent);
        const site = document.getElementById('site-dropdown');
        const low = document.getElementById('payload-low');
        const high = document.getElementById('payload-high');

        function draw(target, figure) {
            Plotly.react(target, figure.data, figure.layout);
        }

        async function refresh(path, params, target) {
            try {
                const response = await fetch(path + '?' + new URLSearchParams(params));
                if (!response.ok) {
                    console.warn('chart request failed', path, response.status);
                    return;
                }
                draw(target, await response.json());
            } catch (err) {
                console.warn('chart request failed', path, err);
            }
        }

        function refreshProportion() {
            refresh('/api/charts/proportion', { site: site.value }, 'success-pie-chart');
        }

        function refreshCorrelation() {
            refresh('/api/charts/correlation',
                { site: site.value, low: low.value, high: high.value },
                'success-payload-scatter-chart');
        }

        function clampRange(changed) {
            if (Number(low.value) > Number(high.value)) {
                if (changed === low) { high.value = low.value; } else { low.value = high.value; }
            }
        }

        draw('success-pie-chart', initial.proportion);
        draw('success-payload-scatter-chart', initial.correlation);

        site.addEventListener('change', () => {
            refreshProportion();
            refreshCorrelation();
        });
        [low, high].forEach((input) => input.addEventListener('change', () => {
            clampRange(input);
            refreshCorrelation();
        }));
        "#
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        // Head section
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>SpaceX Launch Records Dashboard</title>\n");
        html.push_str(&format!("    <script src=\"{}\"></script>\n", PLOTLY_CDN));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        // Body section
        html.push_str("<body>\n");
        html.push_str("    <h1>SpaceX Launch Records Dashboard</h1>\n");

        html.push_str("    <div class=\"controls\">\n        ");
        html.push_str(&self.generate_dropdown());
        html.push_str("\n        ");
        html.push_str(&self.generate_payload_range());
        html.push_str("\n    </div>\n");

        html.push_str(&format!(
            "    <div class=\"chart\" id=\"{}\"></div>\n",
            PIE_CHART_ID
        ));
        html.push_str(&format!(
            "    <div class=\"chart\" id=\"{}\"></div>\n",
            SCATTER_CHART_ID
        ));

        // Initial figures
        let figures = serde_json::to_string(&self.charts).unwrap_or_else(|_| "{}".to_string());
        html.push_str("    <script type=\"application/json\" id=\"initial-figures\">");
        html.push_str(&Self::escape_script_json(&figures));
        html.push_str("</script>\n");

        html.push_str("    <script>");
        html.push_str(Self::generate_script());
        html.push_str("</script>\n");

        // Footer
        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by launchdash\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
