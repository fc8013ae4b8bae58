use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use mhhs_form::{Form, FormField, ValidationReport};
use mhhs_model::{Cmo, Interface, PopulationNotes, RejectionCode, SupplierType};
use mhhs_search::{MissingReference, ResolvedComposition, ResolvedRow};

pub fn print_interfaces(interfaces: &[&Interface], is_favorite: impl Fn(&str) -> bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Sender"),
        header_cell("Receiver"),
        header_cell("Supplier"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for interface in interfaces {
        let star = if is_favorite(&interface.id) {
            Cell::new("★").fg(Color::Yellow)
        } else {
            dim_cell("")
        };
        table.add_row(vec![
            star,
            id_cell(&interface.id),
            Cell::new(&interface.name),
            text_cell(&interface.sender),
            text_cell(&interface.receiver),
            supplier_cell(interface.supplier_type),
        ]);
    }
    println!("{table}");
    println!("{} interface(s)", interfaces.len());
}

pub fn print_interface_header(interface: &Interface, favorite: bool) {
    let star = if favorite { " ★" } else { "" };
    println!("{}: {}{star}", interface.id, interface.name);
    if !interface.description.is_empty() {
        println!("{}", interface.description);
    }
    println!("Sender: {}", or_dash(&interface.sender));
    println!("Receiver: {}", or_dash(&interface.receiver));
    println!("Supplier: {}", interface.supplier_type.label());
    if !interface.context.is_empty() {
        println!("Context: {}", interface.context);
    }
    if !interface.event_codes.is_empty() {
        println!("Event codes: {}", interface.event_codes.join(", "));
    }
}

pub fn print_composition(resolved: &ResolvedComposition<'_>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Name"),
        header_cell("CMO"),
        header_cell("Rule"),
        header_cell("Population notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);

    let mut current_node: Option<usize> = None;
    for row in resolved.rows() {
        match row {
            ResolvedRow::Section { title } => {
                table.add_row(vec![section_cell(title)]);
                current_node = None;
            }
            ResolvedRow::Item(item) => {
                if let Some(block) = item.block
                    && current_node != Some(item.node)
                {
                    table.add_row(vec![
                        section_cell(block.title),
                        dim_cell(block.block_id),
                    ]);
                }
                current_node = Some(item.node);
                let notes = item
                    .item
                    .population_notes
                    .as_ref()
                    .map(PopulationNotes::display_text)
                    .unwrap_or_default();
                table.add_row(vec![
                    id_cell(item.item_id),
                    Cell::new(&item.item.name),
                    cmo_cell(item.item.requirement(), &item.item.cmo),
                    text_cell(&item.item.rule),
                    text_cell(&notes),
                ]);
            }
        }
    }
    println!("{table}");
    for missing in resolved.missing() {
        match missing {
            MissingReference::Block { block_id } => {
                println!("  missing data block {block_id}");
            }
            MissingReference::Item { item_id, .. } => {
                println!("  missing data item {item_id}");
            }
        }
    }
}

pub fn print_codes(codes: &[(&str, &RejectionCode)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Reason"),
        header_cell("Resolution"),
    ]);
    apply_table_style(&mut table);
    for (id, code) in codes {
        table.add_row(vec![
            Cell::new(id).fg(Color::Red).add_attribute(Attribute::Bold),
            Cell::new(&code.description),
            optional_cell(code.reason.as_deref()),
            optional_cell(code.resolution.as_deref()),
        ]);
    }
    println!("{table}");
    println!("{} rejection code(s)", codes.len());
}

pub fn print_form(form: &Form) {
    println!(
        "{}: {} ({} -> {})",
        form.header.interface_id,
        form.header.interface_name,
        or_dash(&form.header.sender),
        or_dash(&form.header.receiver)
    );
    if form.is_empty() {
        println!("No data items.");
        return;
    }
    for block in &form.blocks {
        println!();
        println!("{} [{}]", block.title, block.target.path().join("."));
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Item"),
            header_cell("Field"),
            header_cell("Key"),
            header_cell("Input"),
            header_cell("Req"),
            header_cell("Options"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 4, CellAlignment::Center);
        for field in &block.fields {
            table.add_row(vec![
                id_cell(&field.item_id),
                Cell::new(&field.name),
                dim_cell(&field.payload_key),
                input_cell(field),
                required_cell(field),
                options_cell(field),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_validation(report: &ValidationReport) {
    println!("Cannot export: {report}");
    for missing in &report.missing {
        println!("  - {missing}");
    }
}

pub fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    for suggestion in suggestions {
        println!("{suggestion}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 5 {
        let mut constraints = vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ];
        constraints.resize(
            table.column_count(),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
        );
        table.set_constraints(constraints);
    }
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

fn id_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn section_cell(title: &str) -> Cell {
    Cell::new(title)
        .fg(Color::Magenta)
        .add_attribute(Attribute::Bold)
}

fn supplier_cell(supplier: SupplierType) -> Cell {
    match supplier {
        SupplierType::Send => Cell::new("send").fg(Color::Green),
        SupplierType::Receive => Cell::new("receive").fg(Color::Blue),
        SupplierType::Both => Cell::new("both").fg(Color::Cyan),
        SupplierType::NotInvolved => dim_cell("-"),
    }
}

fn cmo_cell(cmo: Option<Cmo>, raw: &str) -> Cell {
    match cmo {
        Some(Cmo::Mandatory) => Cell::new("M").fg(Color::Red).add_attribute(Attribute::Bold),
        Some(cmo) => Cell::new(cmo.as_code()),
        None => dim_cell(or_dash(raw)),
    }
}

fn input_cell(field: &FormField) -> Cell {
    if field.is_read_only() {
        let value = field.auto_value.as_deref().unwrap_or("-");
        dim_cell(format!("auto: {value}"))
    } else if field.is_select() {
        Cell::new("select")
    } else {
        Cell::new(field.kind.as_str())
    }
}

fn required_cell(field: &FormField) -> Cell {
    if field.is_required() {
        Cell::new("*").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell("")
    }
}

fn options_cell(field: &FormField) -> Cell {
    if field.options.is_empty() {
        return dim_cell("-");
    }
    let values: Vec<&str> = field
        .options
        .iter()
        .map(|option| option.value.as_str())
        .collect();
    Cell::new(values.join(", "))
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) if !text.trim().is_empty() => Cell::new(text),
        _ => dim_cell("-"),
    }
}

fn text_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
