//! Render mode: markdown in, HTML fragment or block tree out.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use quillpad::core::{html, markdown};

/// Render `source` ("-" for stdin) to stdout.
pub fn run_render_mode(source: &Path, tree: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = if source == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(source)
            .map_err(|e| format!("Cannot read {}: {}", source.display(), e))?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_rendered(&text, tree, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_rendered<W: Write>(text: &str, tree: bool, out: &mut W) -> io::Result<()> {
    let nodes = markdown::render(text);
    if tree {
        for node in &nodes {
            writeln!(out, "{}", node)?;
        }
    } else {
        writeln!(out, "{}", html::to_html(&nodes))?;
    }
    Ok(())
}
