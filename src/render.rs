//! Writing annotated groups out.
//!
//! The annotation core stops at segments; turning them into something a
//! person can look at happens here.

use std::fmt::Write as _;

use satzify_core::colors::parse_hex_color;
use satzify_core::{Category, Group, OutputFormat, Segment};

/// Renders the groups of one category.
pub fn render_groups(groups: &[Group], format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(groups)?);
    }

    let lines: Vec<String> = groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|segment| render_segment(segment, format))
                .collect::<String>()
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Renders several categories one after another, each under its title.
///
/// JSON output becomes a single object keyed by category.
pub fn render_categories(
    results: &[(Category, Vec<Group>)],
    format: OutputFormat,
) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        let object: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(category, groups)| {
                serde_json::to_value(groups).map(|value| (category.name().to_string(), value))
            })
            .collect::<Result<_, _>>()?;
        return Ok(serde_json::to_string_pretty(&object)?);
    }

    let mut out = String::new();
    for (i, (category, groups)) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        writeln!(out, "== {} ==", category.title())?;
        writeln!(out, "{}", render_groups(groups, format)?)?;
    }
    Ok(out)
}

fn render_segment(segment: &Segment, format: OutputFormat) -> String {
    let (text, label, color) = match segment {
        Segment::Plain(text) => return text.clone(),
        Segment::Annotated { label, color, .. } => (segment.text(), label, color),
    };

    match format {
        OutputFormat::Plain | OutputFormat::Json => text.into_owned(),
        OutputFormat::Markup => {
            // Keep trailing whitespace outside the brackets
            let trimmed = text.trim_end();
            format!("[{trimmed}]({label}){}", &text[trimmed.len()..])
        }
        OutputFormat::Ansi => {
            let trimmed = text.trim_end();
            let rest = &text[trimmed.len()..];
            let background = match parse_hex_color(color) {
                Some((r, g, b)) => format!("\x1b[30;48;2;{r};{g};{b}m"),
                None => "\x1b[7m".to_string(),
            };
            format!("{background}{trimmed} \x1b[2m{label}\x1b[0m{rest}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        vec![
            Segment::annotated(["die ", "Wurst "], "Nom+F", "#afa"),
            Segment::plain("hat "),
            Segment::plain("."),
        ]
    }

    #[test]
    fn test_markup() {
        let out = render_groups(&[group()], OutputFormat::Markup).unwrap();
        assert_eq!(out, "[die Wurst](Nom+F) hat .");
    }

    #[test]
    fn test_plain_reproduces_text() {
        let out = render_groups(&[group(), group()], OutputFormat::Plain).unwrap();
        assert_eq!(out, "die Wurst hat .\ndie Wurst hat .");
    }

    #[test]
    fn test_ansi_uses_color() {
        let out = render_groups(&[group()], OutputFormat::Ansi).unwrap();
        assert!(out.starts_with("\x1b[30;48;2;170;255;170mdie Wurst \x1b[2mNom+F\x1b[0m "));
    }

    #[test]
    fn test_json() {
        let out = render_groups(&[group()], OutputFormat::Json).unwrap();
        let back: Vec<Group> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, [group()]);
    }

    #[test]
    fn test_categories_with_titles() {
        let results = vec![(Category::Pos, vec![group()]), (Category::Cases, vec![group()])];
        let out = render_categories(&results, OutputFormat::Plain).unwrap();
        assert!(out.starts_with("== Parts of speech ==\n"));
        assert!(out.contains("\n\n== Cases and genders ==\n"));

        let json = render_categories(&results, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("POS").is_some());
        assert!(value.get("CASES").is_some());
    }
}
