//! SVG 1.1 serialization of draw commands.

use crate::render::{DrawCommand, Drawing, TextAnchor, WIRE_COLOR};

/// Vertical space above each rung in a document, holding its caption.
pub const CAPTION_HEIGHT: f64 = 24.0;

const CAPTION_FONT_SIZE: f64 = 13.0;
const FONT_FAMILY: &str = "Arial, sans-serif";

/// A standalone SVG document for one rung.
#[must_use]
pub fn rung_svg(drawing: &Drawing) -> String {
    let mut out = header(drawing.width, drawing.height);
    for cmd in &drawing.commands {
        push_command(&mut out, cmd);
    }
    out.push_str("</svg>\n");
    out
}

/// A standalone SVG document with every rung stacked top to bottom, each
/// under a `Rung N` caption.
///
/// `labels[i]` names rung `i` in its caption; rungs without a label use
/// their 1-based position.
#[must_use]
pub fn document_svg(drawings: &[Drawing], labels: &[String]) -> String {
    let width = drawings.iter().map(|d| d.width).fold(0.0, f64::max);
    let height: f64 = drawings.iter().map(|d| d.height + CAPTION_HEIGHT).sum();

    let mut out = header(width, height);
    let mut offset = 0.0;
    for (index, drawing) in drawings.iter().enumerate() {
        let label = labels.get(index).map_or_else(|| (index + 1).to_string(), |l| escape(l));
        out.push_str(&format!("<g transform=\"translate(0,{offset})\">\n"));
        out.push_str(&format!(
            "<text x=\"{x}\" y=\"{y}\" font-family=\"{FONT_FAMILY}\" font-size=\"{CAPTION_FONT_SIZE}\" font-weight=\"bold\" fill=\"{WIRE_COLOR}\">Rung {label}</text>\n",
            x = 10.0,
            y = CAPTION_HEIGHT - 7.0,
        ));
        out.push_str(&format!("<g transform=\"translate(0,{CAPTION_HEIGHT})\">\n"));
        for cmd in &drawing.commands {
            push_command(&mut out, cmd);
        }
        out.push_str("</g>\n</g>\n");
        offset += drawing.height + CAPTION_HEIGHT;
    }
    out.push_str("</svg>\n");
    out
}

/// Escape text for use in element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn header(width: f64, height: f64) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n\
         <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n"
    )
}

fn push_command(out: &mut String, cmd: &DrawCommand) {
    let element = match cmd {
        DrawCommand::Line { a, b, stroke, width } => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{width}\"/>",
            a.x, a.y, b.x, b.y
        ),
        DrawCommand::Rect { rect, fill, stroke, corner_radius } => {
            let stroke = stroke.map_or_else(String::new, |s| format!(" stroke=\"{s}\" stroke-width=\"1\""));
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{corner_radius}\" fill=\"{fill}\"{stroke}/>",
                rect.x, rect.y, rect.width, rect.height
            )
        }
        DrawCommand::Circle { center, radius, fill, stroke } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
            center.x, center.y
        ),
        DrawCommand::Text { at, text, font_size, anchor, bold, color } => {
            let weight = if *bold { " font-weight=\"bold\"" } else { "" };
            format!(
                "<text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{font_size}\" text-anchor=\"{}\" fill=\"{color}\"{weight}>{}</text>",
                at.x,
                at.y,
                anchor_name(*anchor),
                escape(text)
            )
        }
    };
    out.push_str(&element);
    out.push('\n');
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
