//! Console rendering of query results.

use clap::ValueEnum;
use serde::Serialize;

use crate::database::entities::{categories, products};
use crate::queries::{CategoryTotal, OrderLine, ProductWithCategory, QueryDemo};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    Inserted,
    Updated,
    Deleted,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutput {
    Categories { rows: Vec<categories::Model> },
    /// Products shown by name only
    ProductNames { rows: Vec<products::Model> },
    /// Products shown with their price
    ProductPrices { rows: Vec<products::Model> },
    Count { value: i64 },
    ProductsWithCategory { rows: Vec<ProductWithCategory> },
    CategoryTotals { rows: Vec<CategoryTotal> },
    Orders { rows: Vec<OrderLine> },
    RowsAffected { action: Mutation, rows: u64 },
}

impl QueryOutput {
    /// Human-readable lines, one per result row.
    ///
    /// A mutation that touched no rows produces no lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Categories { rows } => rows
                .iter()
                .map(|c| display_name(&c.name).to_string())
                .collect(),
            Self::ProductNames { rows } => rows
                .iter()
                .map(|p| display_name(&p.name).to_string())
                .collect(),
            Self::ProductPrices { rows } => rows
                .iter()
                .map(|p| format!("{}\t - {}", display_name(&p.name), format_amount(p.price)))
                .collect(),
            Self::Count { value } => vec![value.to_string()],
            Self::ProductsWithCategory { rows } => rows
                .iter()
                .map(|row| {
                    format!(
                        "{} - {} - {}",
                        display_name(&row.product.name),
                        format_amount(row.product.price),
                        display_name(&row.category.name)
                    )
                })
                .collect(),
            Self::CategoryTotals { rows } => rows
                .iter()
                .map(|row| {
                    format!(
                        "{} - {}",
                        display_name(&row.category),
                        format_amount(row.total)
                    )
                })
                .collect(),
            Self::Orders { rows } => rows
                .iter()
                .map(|line| {
                    let product = line
                        .product
                        .as_ref()
                        .map(|p| display_name(&p.name))
                        .unwrap_or("(no product)");
                    format!(
                        "{} - {} - {}",
                        product,
                        format_amount(line.order.amount),
                        line.order.purchase_date
                    )
                })
                .collect(),
            Self::RowsAffected { rows: 0, .. } => Vec::new(),
            Self::RowsAffected { action, rows } => vec![match action {
                Mutation::Inserted => format!("{}(s) were inserted", rows),
                Mutation::Updated => format!("Updated {} rows.", rows),
                Mutation::Deleted => format!("Deleted {} rows.", rows),
            }],
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.lines().join("\n")),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

/// Render the results of a whole run.
///
/// Text output concatenates the non-empty renders line by line. JSON output
/// is a single array with one `{"demo", "result"}` entry per demo, in run
/// order, so the whole stdout parses as one document.
pub fn render_run(
    outputs: &[(QueryDemo, QueryOutput)],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => {
            let mut rendered = Vec::with_capacity(outputs.len());
            for (_, output) in outputs {
                let text = output.render(format)?;
                if !text.is_empty() {
                    rendered.push(text);
                }
            }
            Ok(rendered.join("\n"))
        }
        OutputFormat::Json => {
            let entries: Vec<DemoResult<'_>> = outputs
                .iter()
                .map(|(demo, result)| DemoResult {
                    demo: demo.name(),
                    result,
                })
                .collect();
            serde_json::to_string_pretty(&entries)
        }
    }
}

#[derive(Serialize)]
struct DemoResult<'a> {
    demo: &'static str,
    result: &'a QueryOutput,
}

/// Label printed for a NULL name column.
fn display_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("(unnamed)")
}

/// Whole amounts keep one decimal place (`488.0`), others print as-is.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::entities::orders;
    use chrono::NaiveDate;

    fn product(id: i64, name: &str, price: f64) -> products::Model {
        products::Model {
            id,
            name: Some(name.to_string()),
            description: None,
            price,
            category_id: Some(11),
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(488.0), "488.0");
        assert_eq!(format_amount(999.99), "999.99");
        assert_eq!(format_amount(0.5), "0.5");
    }

    #[test]
    fn test_product_price_lines() {
        let output = QueryOutput::ProductPrices {
            rows: vec![product(44, "Canon PIXMA", 89.0), product(43, "HP LaserJet Pro", 312.5)],
        };
        assert_eq!(
            output.lines(),
            vec!["Canon PIXMA\t - 89.0", "HP LaserJet Pro\t - 312.5"]
        );
    }

    #[test]
    fn test_join_and_group_lines() {
        let joined = QueryOutput::ProductsWithCategory {
            rows: vec![ProductWithCategory {
                product: product(41, "MacBook Air", 999.0),
                category: categories::Model {
                    id: 11,
                    name: Some("Computer".to_string()),
                },
            }],
        };
        assert_eq!(joined.lines(), vec!["MacBook Air - 999.0 - Computer"]);

        let totals = QueryOutput::CategoryTotals {
            rows: vec![CategoryTotal {
                total: 401.0,
                category: Some("Printer".to_string()),
            }],
        };
        assert_eq!(totals.lines(), vec!["Printer - 401.0"]);
    }

    #[test]
    fn test_order_lines_show_product_amount_and_date() {
        let output = QueryOutput::Orders {
            rows: vec![
                OrderLine {
                    order: orders::Model {
                        id: 3,
                        customer_name: Some("Carol Diaz".to_string()),
                        purchase_date: NaiveDate::from_ymd_opt(2014, 11, 12).unwrap(),
                        amount: 178.0,
                        product_id: Some(44),
                    },
                    product: Some(product(44, "Canon PIXMA", 89.0)),
                },
                OrderLine {
                    order: orders::Model {
                        id: 7,
                        customer_name: None,
                        purchase_date: NaiveDate::from_ymd_opt(2014, 11, 20).unwrap(),
                        amount: 12.5,
                        product_id: None,
                    },
                    product: None,
                },
            ],
        };
        assert_eq!(
            output.lines(),
            vec![
                "Canon PIXMA - 178.0 - 2014-11-12",
                "(no product) - 12.5 - 2014-11-20"
            ]
        );
    }

    #[test]
    fn test_mutation_lines_only_for_positive_counts() {
        let none = QueryOutput::RowsAffected {
            action: Mutation::Deleted,
            rows: 0,
        };
        assert!(none.lines().is_empty());
        assert_eq!(none.render(OutputFormat::Text).unwrap(), "");

        let inserted = QueryOutput::RowsAffected {
            action: Mutation::Inserted,
            rows: 3,
        };
        assert_eq!(inserted.lines(), vec!["3(s) were inserted"]);

        let updated = QueryOutput::RowsAffected {
            action: Mutation::Updated,
            rows: 1,
        };
        assert_eq!(updated.lines(), vec!["Updated 1 rows."]);
    }

    #[test]
    fn test_null_names_are_labelled() {
        let mut unnamed = product(49, "", 5.0);
        unnamed.name = None;
        let output = QueryOutput::ProductPrices {
            rows: vec![unnamed, product(44, "Canon PIXMA", 89.0)],
        };
        assert_eq!(
            output.lines(),
            vec!["(unnamed)\t - 5.0", "Canon PIXMA\t - 89.0"]
        );

        let totals = QueryOutput::CategoryTotals {
            rows: vec![CategoryTotal {
                total: 12.0,
                category: None,
            }],
        };
        assert_eq!(totals.lines(), vec!["(unnamed) - 12.0"]);
    }

    #[test]
    fn test_json_run_is_one_document() {
        let outputs = vec![
            (QueryDemo::Count, QueryOutput::Count { value: 9 }),
            (
                QueryDemo::Delete,
                QueryOutput::RowsAffected {
                    action: Mutation::Deleted,
                    rows: 0,
                },
            ),
            (QueryDemo::Count, QueryOutput::Count { value: 8 }),
        ];

        let json: serde_json::Value =
            serde_json::from_str(&render_run(&outputs, OutputFormat::Json).unwrap()).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["demo"], "count");
        assert_eq!(entries[0]["result"]["value"], 9);
        assert_eq!(entries[1]["demo"], "delete");
        assert_eq!(entries[1]["result"]["rows"], 0);
        assert_eq!(entries[2]["result"]["value"], 8);

        // Zero-row mutations print nothing in text mode
        assert_eq!(render_run(&outputs, OutputFormat::Text).unwrap(), "9\n8");
    }

    #[test]
    fn test_json_render_is_tagged() {
        let output = QueryOutput::Count { value: 9 };
        let json: serde_json::Value =
            serde_json::from_str(&output.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["kind"], "count");
        assert_eq!(json["value"], 9);
    }
}
