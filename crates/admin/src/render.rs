//! Plain-text rendering of the screen.

use unicode_width::UnicodeWidthStr;

use fitstock_inventory::{CategorySchema, Field, InventoryFilter};

use crate::form::ModalState;
use crate::notify::{Notification, Severity};
use crate::screen::{LoadState, Row};

const HEADERS: [&str; 11] = [
    "#", "Name", "SKU", "Category", "Stock", "Reorder", "Price", "Supplier", "Restocked",
    "Expiry", "",
];

const LOW_STOCK_MARKER: &str = "LOW";

/// The inventory table, or a placeholder line for loading/failed/empty states.
pub fn render_table(rows: &[Row<'_>], state: &LoadState) -> String {
    match state {
        LoadState::Loading => return "Loading inventory...\n".to_string(),
        LoadState::Failed(reason) => {
            return format!("Inventory unavailable ({reason}). No items to show.\n");
        }
        LoadState::Ready if rows.is_empty() => return "No items found.\n".to_string(),
        LoadState::Ready => {}
    }

    let cells: Vec<[String; 11]> = rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(|header| header.width());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(rule.join("  ").trim_end());
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row_cells(row: &Row<'_>) -> [String; 11] {
    let item = row.item;
    [
        row.index.to_string(),
        item.name().to_string(),
        item.sku().to_string(),
        item.category().to_string(),
        item.stock().to_string(),
        item.reorder_point().to_string(),
        format!("{:.2}", item.unit_price()),
        item.supplier().to_string(),
        item.last_restocked().to_string(),
        item.expiry_date().map(|d| d.to_string()).unwrap_or_default(),
        if row.low_stock {
            LOW_STOCK_MARKER.to_string()
        } else {
            String::new()
        },
    ]
}

fn push_line(out: &mut String, cells: &[String; 11], widths: &[usize; 11]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Search box and category selector.
pub fn render_filters(filter: &InventoryFilter, options: &[String]) -> String {
    let choices: Vec<String> = options
        .iter()
        .map(|option| {
            if option == filter.category.as_selector() {
                format!("[{option}]")
            } else {
                option.clone()
            }
        })
        .collect();
    format!(
        "Search: \"{}\"  Category: {}\n",
        filter.query,
        choices.join(" ")
    )
}

/// The open modal, or `None` when closed.
pub fn render_modal(modal: &ModalState, schema: &CategorySchema) -> Option<String> {
    let title = modal.title()?;
    let form = modal.form()?;

    let mut out = format!("== {title} ==\n");
    for field in form.visible_fields(schema) {
        let marker = if is_required(field) { "*" } else { " " };
        out.push_str(&format!(
            "  {marker} {:<12} {}\n",
            field.key(),
            form.get(field)
        ));
    }
    out.push_str("  (set <field> <value>, save, cancel)\n");
    Some(out)
}

fn is_required(field: Field) -> bool {
    fitstock_inventory::validation::REQUIRED.contains(&field)
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Success => "ok",
        Severity::Error => "error",
    };
    format!("[{tag}] {}\n", notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitstock_inventory::{CategoryFilter, seed_items};

    use crate::form::FormState;

    fn rows(items: &[fitstock_inventory::InventoryItem]) -> Vec<Row<'_>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Row {
                index: i + 1,
                item,
                low_stock: item.is_low_stock(),
            })
            .collect()
    }

    #[test]
    fn table_lists_every_row_with_aligned_columns() {
        let items = seed_items();
        let table = render_table(&rows(&items), &LoadState::Ready);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#  Name"));
        assert!(lines[2].contains("GymFreak T-Shirt"));
        assert!(lines[3].contains("59.99"));
        assert!(lines[3].contains("2025-06-30"));
        assert!(!table.contains(LOW_STOCK_MARKER));
        let sku_col = lines[0].find("SKU").unwrap();
        assert_eq!(&lines[2][sku_col..sku_col + 9], "GF-TS-001");
        assert_eq!(&lines[3][sku_col..sku_col + 10], "SUP-WP-001");
    }

    #[test]
    fn placeholders_for_non_ready_states() {
        assert_eq!(render_table(&[], &LoadState::Loading), "Loading inventory...\n");
        assert!(render_table(&[], &LoadState::Failed("offline".into())).contains("offline"));
        assert_eq!(render_table(&[], &LoadState::Ready), "No items found.\n");
    }

    #[test]
    fn filters_highlight_selected_category() {
        let filter = InventoryFilter::new()
            .with_query("whey")
            .with_category(CategoryFilter::parse("Supplements"));
        let options = vec!["all".to_string(), "Apparel".into(), "Supplements".into()];
        assert_eq!(
            render_filters(&filter, &options),
            "Search: \"whey\"  Category: all Apparel [Supplements]\n"
        );
    }

    #[test]
    fn modal_shows_expiry_only_for_supplements() {
        let schema = CategorySchema::default();
        let mut form = FormState::blank();
        form.set(Field::Category, "Apparel");
        let apparel = render_modal(&ModalState::AddOpen(form.clone()), &schema).unwrap();
        assert!(apparel.starts_with("== Add Item =="));
        assert!(!apparel.contains("expiryDate"));
        assert!(apparel.contains("* reorderPoint"));

        form.set(Field::Category, "Supplements");
        let supplements = render_modal(&ModalState::AddOpen(form), &schema).unwrap();
        assert!(supplements.contains("expiryDate"));
        assert!(render_modal(&ModalState::Closed, &schema).is_none());
    }

    #[test]
    fn notifications_are_tagged() {
        assert_eq!(
            render_notification(&Notification::error("missing required fields: sku")),
            "[error] missing required fields: sku\n"
        );
    }
}
