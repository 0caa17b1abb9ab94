//! Utility to render a snapshot JSON file without the MCP server
//!
//! Usage: render_snapshot <snapshot.json> [output.pdf|output.png]

use std::path::PathBuf;

use wellness_report::output::{
    default_report_dir, default_report_path, encode_page, generated_at, write_report_file, OutputFormat,
};
use wellness_report::{ReportConfig, ReportEngine, ReportSnapshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: render_snapshot <snapshot.json> [output.pdf|output.png]");
            std::process::exit(2);
        }
    };

    let json = std::fs::read_to_string(&input)?;
    let snapshot = ReportSnapshot::from_json(&json)?;
    println!("Snapshot: {} ({} to {})", snapshot.nickname, snapshot.period.start, snapshot.period.end);

    let output = match args.next() {
        Some(path) => PathBuf::from(path),
        None => default_report_path(
            &default_report_dir(),
            &snapshot,
            generated_at(),
            OutputFormat::Pdf.extension(),
        ),
    };
    let format = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
        _ => OutputFormat::Pdf,
    };

    let engine = ReportEngine::new(ReportConfig::default());
    let rendered = engine.render(&snapshot);
    for section in &rendered.layout.sections {
        println!("  {:?}: top {:.1}, height {:.1}", section.section, section.top, section.height);
    }
    println!("  Score row: {:?}", rendered.layout.secondary_row);
    if rendered.layout.overflow > 0.0 {
        println!("  Warning: {:.0} pt past the bottom margin were clipped", rendered.layout.overflow);
    }

    let bytes = encode_page(&rendered.page, format, engine.config(), &snapshot, 2.0)?;
    write_report_file(&output, &bytes)?;
    println!("Wrote {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}
