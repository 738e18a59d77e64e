use box_envelope::{BoxDimensions, CornerStyle, envelope_svg};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;

/// Boxes rendered by `cargo xtask gallery`, as (name, width, height, depth) in mm.
const PRESETS: &[(&str, f64, f64, f64)] = &[
    ("square", 75.0, 75.0, 20.0),
    ("card-deck", 64.0, 89.0, 22.0),
    ("wide", 160.0, 50.0, 15.0),
    ("tall", 40.0, 140.0, 25.0),
    ("deep", 60.0, 60.0, 45.0),
];

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery    Render preset envelopes with and without tabs into gallery/");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

struct Entry {
    name: String,
    dimensions: BoxDimensions,
    tabbed: bool,
    file: Option<String>,
    error: Option<String>,
}

fn gallery() {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let out_dir: Utf8PathBuf = manifest_dir.join("../gallery");
    fs::create_dir_all(&out_dir).expect("Failed to create gallery directory");

    let jobs: Vec<(&str, BoxDimensions, bool)> = PRESETS
        .iter()
        .flat_map(|&(name, w, h, d)| {
            let dims = BoxDimensions::new(w, h, d);
            [(name, dims, false), (name, dims, true)]
        })
        .collect();

    let entries: Vec<Entry> = jobs
        .par_iter()
        .map(|&(name, dimensions, tabbed)| render_entry(&out_dir, name, dimensions, tabbed))
        .collect();

    let index = out_dir.join("index.html");
    fs::write(&index, index_html(&entries)).expect("Failed to write index.html");

    let failed = entries.iter().filter(|e| e.error.is_some()).count();
    println!("Rendered {} envelopes ({} failed) into {}", entries.len(), failed, out_dir);
}

fn render_entry(out_dir: &Utf8Path, name: &str, dimensions: BoxDimensions, tabbed: bool) -> Entry {
    let style = if tabbed { CornerStyle::tabbed() } else { CornerStyle::default() };
    let file_name = format!("{}{}.svg", name, if tabbed { "-tabs" } else { "" });

    eprintln!("Rendering {}...", file_name);

    let (file, error) = match envelope_svg(&dimensions, &style) {
        Ok(svg) => match fs::write(out_dir.join(&file_name), svg) {
            Ok(()) => (Some(file_name), None),
            Err(e) => (None, Some(e.to_string())),
        },
        Err(e) => (None, Some(e.to_string())),
    };

    Entry { name: name.to_string(), dimensions, tabbed, file, error }
}

fn index_html(entries: &[Entry]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Box envelope gallery</title>
<style>
body { font-family: sans-serif; margin: 2em; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 1.5em; }
.card { border: 1px solid #ccc; border-radius: 4px; padding: 1em; }
.card img { width: 100%; height: 280px; object-fit: contain; }
.error { color: #b00; white-space: pre-wrap; }
</style>
</head>
<body>
<h1>Box envelope gallery</h1>
<div class="grid">
"#,
    );

    for entry in entries {
        let body = match (&entry.file, &entry.error) {
            (Some(file), _) => format!(r#"<img src="{}" alt="{}">"#, file, html_escape(&entry.name)),
            (None, Some(error)) => format!(r#"<div class="error">{}</div>"#, html_escape(error)),
            (None, None) => String::new(),
        };
        html.push_str(&format!(
            "<div class=\"card\">\n  <h3>{}{}</h3>\n  <p>{}</p>\n  {}\n</div>\n",
            html_escape(&entry.name),
            if entry.tabbed { " (tabs)" } else { "" },
            entry.dimensions,
            body,
        ));
    }

    html.push_str("</div>\n</body></html>\n");
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
