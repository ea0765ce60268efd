//! Presentation of the results: a plain-text table for the terminal and a standalone HTML page.

use std::fmt::Write;
use std::io::Cursor;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::{dc_try, error::ClassifierError, rank::Prediction};

/// Full list of breeds the model knows about
pub const BREED_LIST_URL: &str =
    "https://htmlpreview.github.io/?https://github.com/willjobs/dog-classifier/blob/main/dog_breeds.html";

/// Example photos are named after the breed, lowercased, with spaces removed.
pub fn example_image_url(base: &str, label: &str) -> String {
    let name: String = label
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect();
    format!("{}/example_dogs/{name}.jpg", base.trim_end_matches('/'))
}

pub fn format_confidence(prediction: &Prediction) -> String {
    format!("{:.2}%", prediction.percentage())
}

pub fn render_text(predictions: &[Prediction]) -> String {
    let width = predictions
        .iter()
        .map(|p| p.label.chars().count())
        .chain(std::iter::once("Breed".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "{:width$}  {:>10}", "Breed", "Confidence");
    for prediction in predictions {
        let _ = writeln!(
            out,
            "{:width$}  {:>10}",
            prediction.label,
            format_confidence(prediction)
        );
    }
    out
}

/// Encodes the upright image as PNG, base64'd for a data URI.
pub fn encode_png_base64(image: &DynamicImage) -> Result<String, ClassifierError> {
    let mut png = Vec::new();
    dc_try!(image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png));
    Ok(BASE64_STANDARD.encode(png))
}

pub fn render_html(image_png_base64: &str, predictions: &[Prediction], examples_base: &str) -> String {
    let mut rows = String::new();
    for prediction in predictions {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td><img src=\"{}\" height=\"150\" /></td></tr>",
            escape_html(&prediction.label),
            format_confidence(prediction),
            escape_html(&example_image_url(examples_base, &prediction.label)),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Dog Breed Classifier</title>
</head>
<body>
<h1>Dog Breed Classifier</h1>
<h2>Your Image</h2>
<img src="data:image/png;base64,{image_png_base64}" width="200" />
<h2>What the model thinks</h2>
<table><tr><th>Breed</th><th>Confidence</th><th>Example</th></tr>{rows}</table>
<p>Don't see your dog's breed? <a href="{BREED_LIST_URL}">See the full list of breeds.</a></p>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
