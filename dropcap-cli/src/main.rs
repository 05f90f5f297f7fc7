//! Dropcap CLI
//!
//! A headless probe/layout tool for testing and debugging: loads fonts,
//! probes their visual metrics, lays out a sample drop cap, and prints the
//! style mutations the engine applied.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dropcap_css::{
    Dropcap, NoNativeInitialLetter, TEST_SIZE, PixelRasterizer, probe_font_metrics, to_px_length,
};
use dropcap_dom::{Document, NodeId};
use dropcap_render::{FontHost, FontStore, save_probe_surface};
use owo_colors::OwoColorize;

/// Probe font metrics and lay out a sample drop cap.
#[derive(Parser)]
#[command(name = "dropcap", version, about)]
struct Args {
    /// Load a font file for a family, as FAMILY=PATH (repeatable)
    #[arg(long = "font", value_name = "FAMILY=PATH")]
    fonts: Vec<String>,

    /// Font family of the drop cap
    #[arg(long, default_value = "sans-serif")]
    family: String,

    /// Font family of the paragraph (defaults to the drop cap family)
    #[arg(long)]
    paragraph_family: Option<String>,

    /// The drop cap letter
    #[arg(long, default_value = "L")]
    letter: String,

    /// Paragraph text following the drop cap
    #[arg(long, default_value = "orem ipsum dolor sit amet")]
    text: String,

    /// Paragraph font size in px
    #[arg(long, default_value_t = 16.0)]
    font_size: f64,

    /// Paragraph line height in px (omit for line-height: normal)
    #[arg(long)]
    line_height: Option<f64>,

    /// Drop cap height in text lines
    #[arg(long, default_value_t = 3)]
    height: u32,

    /// Line number the drop cap baseline sits on (defaults to --height)
    #[arg(long)]
    baseline: Option<u32>,

    /// Emit metrics and applied styles as JSON
    #[arg(long)]
    json: bool,

    /// Save the rasterized probe surface of the drop cap family as PNG
    #[arg(long, value_name = "PATH")]
    dump_probe: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut store = FontStore::new();
    for spec in &args.fonts {
        let (family, path) = spec.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("--font expects FAMILY=PATH, got '{spec}'")
        })?;
        store.load_file(family, std::path::Path::new(path))?;
    }
    if let Some(path) = store.load_system_fallback() {
        if !args.json {
            eprintln!("Loaded fallback font: {path}");
        }
    } else if store.is_empty() {
        eprintln!("Warning: no fonts available; probing will fail.");
    }

    let paragraph_family = args
        .paragraph_family
        .clone()
        .unwrap_or_else(|| args.family.clone());

    let (mut doc, paragraph, dcap) = build_sample_document(&args, &paragraph_family);

    let host = FontHost::new(&store);
    let capabilities = NoNativeInitialLetter;
    let mut dropcap = Dropcap::new(&host, &host, &capabilities);
    dropcap.layout(&mut doc, dcap, args.height, args.baseline)?;

    if let Some(path) = &args.dump_probe {
        let surface = host
            .rasterize(&args.family, 'E', TEST_SIZE)
            .map_err(|e| anyhow::anyhow!("cannot dump probe surface: {e}"))?;
        save_probe_surface(&surface, path)?;
    }

    let dcap_metrics = probe_font_metrics(&mut doc, &host, &host, &args.family)?;
    let par_metrics = probe_font_metrics(&mut doc, &host, &host, &paragraph_family)?;

    let strut = doc
        .children(dcap)
        .iter()
        .copied()
        .find(|&c| doc.as_element(c).is_some());

    if args.json {
        print_json(&doc, &args, &paragraph_family, dcap, paragraph, strut, (dcap_metrics, par_metrics));
    } else {
        println!("{}", "=== Font Metrics ===".bold());
        println!(
            "{}: baseline {:.4}  cap height {:.4}",
            args.family.yellow(),
            dcap_metrics.baseline_ratio,
            dcap_metrics.cap_height_ratio
        );
        if paragraph_family != args.family {
            println!(
                "{}: baseline {:.4}  cap height {:.4}",
                paragraph_family.yellow(),
                par_metrics.baseline_ratio,
                par_metrics.cap_height_ratio
            );
        }

        println!("\n{}", "=== Applied Styles ===".bold());
        print_styles(&doc, "drop cap", dcap);
        print_styles(&doc, "paragraph", paragraph);
        if let Some(strut) = strut {
            print_styles(&doc, "strut", strut);
        }
    }

    Ok(())
}

/// Build `<p style="..."><span>letter</span>text</p>` inside a fresh
/// document. Returns the document with the paragraph and drop cap ids.
fn build_sample_document(args: &Args, paragraph_family: &str) -> (Document, NodeId, NodeId) {
    let mut doc = Document::new();

    let paragraph = doc.create_element("p");
    doc.set_style_property(paragraph, "font-family", paragraph_family);
    doc.set_style_property(paragraph, "font-size", to_px_length(args.font_size));
    if let Some(line_height) = args.line_height {
        doc.set_style_property(paragraph, "line-height", to_px_length(line_height));
    }
    doc.append_child(doc.root(), paragraph);

    let dcap = doc.create_element("span");
    doc.set_style_property(dcap, "font-family", &args.family);
    let letter = doc.create_text(&args.letter);
    doc.append_child(dcap, letter);
    doc.append_child(paragraph, dcap);

    let rest = doc.create_text(&args.text);
    doc.append_child(paragraph, rest);

    (doc, paragraph, dcap)
}

/// Print one element's inline declarations.
fn print_styles(doc: &Document, label: &str, node: NodeId) {
    println!("{}:", label.yellow());
    let Some(element) = doc.as_element(node) else {
        return;
    };
    if element.style.is_empty() {
        println!("  (no inline styles)");
        return;
    }
    for (name, value) in element.style.properties() {
        println!("  {name}: {value};");
    }
}

/// Collect one element's inline declarations as a JSON object.
fn styles_json(doc: &Document, node: NodeId) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(element) = doc.as_element(node) {
        for (name, value) in element.style.properties() {
            let _ = obj.insert(name.to_string(), serde_json::json!(value));
        }
    }
    serde_json::Value::Object(obj)
}

#[allow(clippy::too_many_arguments)]
fn print_json(
    doc: &Document,
    args: &Args,
    paragraph_family: &str,
    dcap: NodeId,
    paragraph: NodeId,
    strut: Option<NodeId>,
    metrics: (dropcap_css::FontMetrics, dropcap_css::FontMetrics),
) {
    let (dcap_metrics, par_metrics) = metrics;
    let mut families = serde_json::Map::new();
    let _ = families.insert(args.family.clone(), serde_json::json!(dcap_metrics));
    let _ = families.insert(paragraph_family.to_string(), serde_json::json!(par_metrics));
    let json = serde_json::json!({
        "metrics": families,
        "styles": {
            "dropcap": styles_json(doc, dcap),
            "paragraph": styles_json(doc, paragraph),
            "strut": strut.map(|s| styles_json(doc, s)),
        },
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
    );
}
