use ftpad_schedule::PermutationVector;

use crate::parsers::FormatOptions;

/// Renders `rows` in the requested format, one vector per line.
pub fn render(rows: &[PermutationVector], format: FormatOptions) -> serde_json::Result<String> {
    match format {
        FormatOptions::Plain => Ok(render_plain(rows)),
        FormatOptions::Latex => Ok(render_latex(rows)),
        FormatOptions::Json => serde_json::to_string_pretty(rows),
    }
}

fn render_plain(rows: &[PermutationVector]) -> String {
    rows.iter().map(|row| format!("{row}\n")).collect()
}

/// Rows of a LaTeX `array` body: `&`-separated entries, single digits padded with `\phantom{0}`
/// so the columns line up.
fn render_latex(rows: &[PermutationVector]) -> String {
    let mut out = String::new();
    for row in rows {
        let entries = row
            .iter()
            .map(|entry| {
                if entry < 10 {
                    format!("\\phantom{{0}}{entry}")
                } else {
                    entry.to_string()
                }
            })
            .collect::<Vec<_>>();
        out.push_str(&entries.join(" & "));
        out.push_str(" \\\\\n");
    }
    out
}
