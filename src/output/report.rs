use std::fmt::Write;

use crate::detector::analyzer::SourceReport;
use crate::detector::result::{DetectionResult, Severity};

/// Build a markdown report with a per-input summary table and one section per finding.
pub fn build_report(reports: &[SourceReport]) -> String {
    let mut report = String::new();

    writeln!(report, "# SQL Tautology Detection Report").unwrap();
    writeln!(report).unwrap();

    writeln!(report, "## Summary").unwrap();
    writeln!(report).unwrap();
    writeln!(report, "| Source | Dialect | Statements | Findings | Severity |").unwrap();
    writeln!(report, "|--------|---------|------------|----------|----------|").unwrap();

    for sr in reports {
        writeln!(
            report,
            "| {} | {} | {} | {} | {} |",
            escape_cell(&sr.source),
            sr.dialect,
            sr.report.statements.len(),
            sr.report.result.details().len(),
            sr.report.result.severity()
        )
        .unwrap();
    }

    let total = combined(reports);
    writeln!(report).unwrap();
    writeln!(
        report,
        "Overall severity: **{}** ({} finding{})",
        total.severity(),
        total.details().len(),
        if total.details().len() == 1 { "" } else { "s" }
    )
    .unwrap();

    if total.severity() == Severity::None {
        return report;
    }

    writeln!(report).unwrap();
    writeln!(report, "## Findings").unwrap();

    for sr in reports {
        for (index, detail) in sr.report.findings() {
            writeln!(report).unwrap();
            writeln!(report, "### {}, statement #{}", sr.source, index + 1).unwrap();
            writeln!(report).unwrap();
            writeln!(report, "- **Pattern:** `{}`", detail.pattern).unwrap();
            writeln!(
                report,
                "- **Position:** offset {} (length {})",
                detail.position, detail.length
            )
            .unwrap();
            writeln!(report).unwrap();
            writeln!(report, "```sql").unwrap();
            writeln!(report, "{}", detail.fragment).unwrap();
            writeln!(report, "```").unwrap();
        }
    }

    report
}

/// Merge the findings of every input into one result.
pub fn combined(reports: &[SourceReport]) -> DetectionResult {
    let mut total = DetectionResult::new();
    for sr in reports {
        total.absorb(&sr.report.result);
    }
    total
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::analyzer::analyze_sql;
    use crate::parser::sql_parser::SqlDialect;

    fn source_report(name: &str, sql: &str) -> SourceReport {
        SourceReport {
            source: name.to_string(),
            dialect: SqlDialect::MySql,
            report: analyze_sql(sql, SqlDialect::MySql).expect("sql should parse"),
        }
    }

    #[test]
    fn clean_input_has_no_findings_section() {
        let report = build_report(&[source_report("clean.sql", "SELECT * FROM t WHERE a > 1")]);
        assert!(report.contains("| clean.sql | mysql | 1 | 0 | none |"));
        assert!(report.contains("Overall severity: **none** (0 findings)"));
        assert!(!report.contains("## Findings"));
    }

    #[test]
    fn findings_are_listed_per_statement() {
        let report = build_report(&[source_report(
            "login.sql",
            "SELECT 1; SELECT * FROM users WHERE name = '' OR 1=1",
        )]);
        insta::assert_snapshot!(report.trim_end(), @r"
        # SQL Tautology Detection Report

        ## Summary

        | Source | Dialect | Statements | Findings | Severity |
        |--------|---------|------------|----------|----------|
        | login.sql | mysql | 2 | 1 | low |

        Overall severity: **low** (1 finding)

        ## Findings

        ### login.sql, statement #2

        - **Pattern:** `tautology_injection`
        - **Position:** offset 36 (length 16)

        ```sql
        name = '' OR 1=1
        ```
        ");
    }

    #[test]
    fn pipes_in_source_names_are_escaped() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
