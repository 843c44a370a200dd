use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kanji_cli::pipeline::BuildReport;
use kanji_fetch::FetchSummary;
use kanji_model::CoverageReport;
use kanji_radical::{RadicalAudit, RadicalTable};

pub fn print_build_summary(report: &BuildReport) {
    println!("Output: {}", report.output_dir.display());
    println!("Canonical: {}", report.canonical_path.display());
    if let Some(path) = &report.fixed_path {
        println!("Fixed: {}", path.display());
    }
    if let Some(digest) = &report.canonical_sha256 {
        println!("SHA-256: {digest}");
    }
    if report.dry_run {
        println!("Dry run: no artifacts written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Skipped"),
        header_cell("Duplicates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for source in &report.sources {
        table.add_row(vec![
            Cell::new(source.kind.tag())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.records),
            count_cell(source.skipped, Color::Yellow),
            count_cell(source.duplicates.len(), Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("MERGED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.record_count).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(report.duplicate_ids.len(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !report.duplicate_ids.is_empty() {
        let ids: Vec<String> = report
            .duplicate_ids
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Duplicate ids: {}", ids.join(", "));
    }

    println!(
        "Radicals: {} missing, {} fixed, {} unfixed",
        report.audit.missing_count(),
        report.fixed_count,
        report.unfixed.len()
    );
    if !report.unfixed.is_empty() {
        println!("Unfixed: {}", char_list(&report.unfixed));
    }

    print_coverage(&report.coverage);
}

pub fn print_coverage(report: &CoverageReport) {
    if report.is_complete() {
        println!(
            "Coverage: complete ({} of {} official characters)",
            report.covered(),
            report.total_official
        );
    } else {
        println!(
            "Coverage: {} of {} official characters ({} missing, {} extra)",
            report.covered(),
            report.total_official,
            report.missing.len(),
            report.extra.len()
        );
        if !report.missing.is_empty() {
            println!("Missing:");
            for line in chunked(&report.missing, 40) {
                println!("  {line}");
            }
        }
        if !report.extra.is_empty() {
            println!("Extra (registered but not official):");
            for line in chunked(&report.extra, 40) {
                println!("  {line}");
            }
        }
    }
}

pub fn print_radical_report(audit: &RadicalAudit) {
    if audit.missing.is_empty() {
        println!("Every registered kanji has a usable radical assignment.");
    } else {
        println!("{} kanji lack a usable radical assignment.", audit.missing_count());
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Grade"),
            header_cell("Strokes"),
            header_cell("Count"),
            header_cell("Characters"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for (key, characters) in &audit.missing_by_triage {
            table.add_row(vec![
                optional_cell(key.grade),
                optional_cell(key.strokes),
                Cell::new(characters.len()),
                Cell::new(char_list(characters)),
            ]);
        }
        println!("{table}");
    }

    let reference = RadicalTable::embedded();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Radical"),
        header_cell("Glyph"),
        header_cell("Reading"),
        header_cell("Position"),
        header_cell("Registered"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for (radical, count) in &audit.per_radical_counts {
        let entry = reference.entry_for_name(radical);
        table.add_row(vec![
            Cell::new(radical),
            match entry {
                Some(entry) => Cell::new(entry.glyph),
                None => dim_cell("-"),
            },
            match entry {
                Some(entry) => Cell::new(&entry.jp),
                None => dim_cell("-"),
            },
            match entry {
                Some(entry) => Cell::new(&entry.position),
                None => dim_cell("-"),
            },
            if *count == 0 {
                dim_cell(0)
            } else {
                Cell::new(count)
            },
        ]);
    }
    println!("{table}");

    let unused = audit.unused_radicals();
    if !unused.is_empty() {
        println!("Unused radicals: {}", unused.join(", "));
    }
}

pub fn print_fetch_summary(summary: &FetchSummary) {
    println!(
        "Assets: {} downloaded, {} skipped, {} failed{}",
        summary.downloaded,
        summary.skipped,
        summary.failed,
        if summary.cancelled { " (cancelled)" } else { "" }
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<u8>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn char_list(characters: &[char]) -> String {
    characters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn chunked(characters: &[char], per_line: usize) -> Vec<String> {
    characters
        .chunks(per_line)
        .map(|chunk| {
            chunk
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
