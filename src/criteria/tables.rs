//! Comparison tables

use crate::criteria::base::{plural, Criterion, Evaluation};
use crate::models::Article;

pub struct TablesCriterion;

impl Criterion for TablesCriterion {
    fn id(&self) -> u8 {
        8
    }

    fn key(&self) -> &'static str {
        "tables"
    }

    fn name(&self) -> &'static str {
        "Tables"
    }

    fn description(&self) -> &'static str {
        "At least one table with a data row"
    }

    fn recommendation(&self) -> &'static str {
        "Add a table comparing options, dosages, prices or other attributes."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let tables = &article.outline().tables;
        let with_data = tables.iter().filter(|t| t.data_rows > 0).count();

        if with_data > 0 {
            return Evaluation::pass(
                format!("{} with data rows", plural(with_data, "table")),
                with_data,
            );
        }
        if tables.is_empty() {
            return Evaluation::fail("0 tables, need ≥1 with a data row", 0);
        }
        Evaluation::fail(
            format!("{} without data rows, need ≥1 with a data row", plural(tables.len(), "table")),
            0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::tests::article_with_body;

    #[test]
    fn test_table_with_rows() {
        let article = article_with_body(
            "<table><tr><th>Form</th><th>Dose</th></tr><tr><td>Mono</td><td>5 g</td></tr></table>",
        );
        let eval = TablesCriterion.evaluate(&article);
        assert!(eval.passed);
        assert_eq!(eval.detail, "1 table with data rows");
    }

    #[test]
    fn test_header_only_table_fails() {
        let article = article_with_body("<table><tr><th>Only header</th></tr></table>");
        let eval = TablesCriterion.evaluate(&article);
        assert!(!eval.passed);
        assert!(eval.detail.starts_with("1 table without data rows"));
    }

    #[test]
    fn test_no_table() {
        let eval = TablesCriterion.evaluate(&article_with_body("<p>text</p>"));
        assert!(!eval.passed);
        assert_eq!(eval.measured, 0);
    }
}
