use folio_core::parsing::sections::SectionMap;
use folio_core::pipeline::PipelineReport;
use folio_core::Extracted;

pub fn print_sections(sections: &SectionMap) {
    if sections.is_empty() {
        println!("No sections found. Check the table-of-contents pages (--toc-start/--toc-end).");
        return;
    }

    println!("Available sections:\n");
    let width = sections.iter().map(|(slug, _)| slug.len()).max().unwrap_or(10);
    for (slug, section) in sections.iter() {
        let indent = "  ".repeat(section.level as usize);
        println!("  {:<width$}  {}{}", slug, indent, section, width = width);
    }
    println!("\n{} section(s)", sections.len());
}

pub fn print_chunks(extracted: &Extracted, preview: usize) {
    println!(
        "=== {} ({}) ===\n",
        extracted.section, extracted.entity_type
    );

    if extracted.chunks.is_empty() {
        println!("  0 entities found. Try another entity type or a custom --patterns file.");
        return;
    }

    for (i, chunk) in extracted.chunks.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, chunk.header);
        if preview > 0 {
            println!("       {}", excerpt(&chunk.content, preview));
        }
    }
    println!("\n{} entities found", extracted.chunks.len());
}

pub fn print_report(report: &PipelineReport) {
    println!("\n=== {} ({}) ===\n", report.section, report.entity_type);

    if report.dry_run {
        println!("  Dry run: {} entities found\n", report.stats.total);
        for header in &report.headers {
            println!("  - {}", header);
        }
        return;
    }

    let stats = &report.stats;
    println!("  Total:   {}", stats.total);
    println!("  Success: {}", stats.success);
    println!("  Failed:  {}", stats.failed);

    if !stats.errors.is_empty() {
        println!("\n  Failed entities:");
        for failure in &stats.errors {
            println!("  - {}", failure.entity);
            for e in &failure.errors {
                println!("      {}", e);
            }
        }
    }
}

/// First `max` characters of `text` on one line.
fn excerpt(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}
