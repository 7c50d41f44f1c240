use dioxus::prelude::*;
use common::{
    count_format::CountFormat,
    facet_summary::{FacetTable, TOTAL_KEY},
    query_terms::field_term_query,
};

use crate::routes::Route;


/// One facet field cross-tabulated against sources.
#[component]
pub fn FacetTableView(field: String, table: FacetTable, sources: Vec<String>, count_format: CountFormat) -> Element {
    rsx! {
        table {
            class: "x-facet-table",
            style: "border-collapse: collapse; margin: 10px 0 30px 0; min-width: 500px;",
            thead {
                tr {
                    th { style: "text-align: left; padding: 4px 10px;", "{field}" }
                    th { style: "text-align: right; padding: 4px 10px;", "{TOTAL_KEY}" }
                    for source in sources.iter() {
                        th {
                            key: "{source}",
                            style: "text-align: right; padding: 4px 10px;",
                            "{source}"
                        }
                    }
                }
            }
            tbody {
                for row_key in table.ordered_keys.iter() {
                    FacetTableRow {
                        key: "{row_key}",
                        field: field.clone(),
                        row_key: row_key.clone(),
                        table: table.clone(),
                        sources: sources.clone(),
                        count_format: count_format.clone(),
                    }
                }
            }
        }
    }
}

#[component]
fn FacetTableRow(
    field: String,
    row_key: String,
    table: FacetTable,
    sources: Vec<String>,
    count_format: CountFormat,
) -> Element {
    let is_total = row_key == TOTAL_KEY;
    let row_style = if is_total {
        "border-top: 2px solid rgba(0,0,0,0.5); font-weight: 500;"
    } else {
        "border-top: 1px solid rgba(0,0,0,0.1);"
    };
    let total_cell = count_format.cell(table.cell(&row_key, TOTAL_KEY));
    let total_color = if is_total { "rgba(0,0,0,0.3)" } else { "black" };

    rsx! {
        tr {
            style: "{row_style}",
            td {
                style: "padding: 4px 10px;",
                if is_total {
                    "{row_key}"
                } else {
                    Link {
                        to: Route::OverviewPage { q: field_term_query(&field, &row_key) },
                        "{row_key}"
                    }
                }
            }
            td {
                style: "text-align: right; padding: 4px 10px; color: {total_color};",
                "{total_cell}"
            }
            for source in sources.iter() {
                td {
                    key: "{source}",
                    style: "text-align: right; padding: 4px 10px;",
                    {count_format.cell(table.cell(&row_key, source))}
                }
            }
        }
    }
}
