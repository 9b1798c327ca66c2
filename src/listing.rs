use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::adapters::{self, ReportAdapter};

/// Table of the given adapters: identifier and report format
pub fn adapters_table(adapters: &[Box<dyn ReportAdapter>]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Adapter", "Report format"]);
    for adapter in adapters {
        table.add_row(vec![adapter.name(), adapter.description()]);
    }
    table
}

/// List all available report adapters
pub fn list_adapters() {
    let all = adapters::all_adapters();

    println!();
    println!("📄 codebrowser: supported report formats");
    println!("{}", adapters_table(&all));
    println!("  {} adapters available", all.len());
    println!();
    println!("  Run `codebrowser generate --log build/logs --output build/code-browser`");
    println!("  Run `codebrowser generate ... --adapters checkstyle,pmd` to use specific adapters");
    println!();
}
