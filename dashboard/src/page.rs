//! Dashboard page

const TEMPLATE: &str = include_str!("../static/index.html");

/// Render the page with one option per year; `default_year` is preselected when present
pub fn render_index(years: &[i32], default_year: Option<i32>) -> String {
    let has_default = default_year.is_some_and(|y| years.contains(&y));

    let mut options = String::new();
    options.push_str(&format!(
        "      <option value=\"\"{}>Select Year</option>\n",
        if has_default { "" } else { " selected" }
    ));
    for year in years {
        let selected = if has_default && Some(*year) == default_year {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "      <option value=\"{year}\"{selected}>{year}</option>\n"
        ));
    }

    TEMPLATE.replace("{{YEAR_OPTIONS}}", options.trim_end())
}
