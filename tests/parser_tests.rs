use sqli_tautology::detector::condition::ConditionExpr;
use sqli_tautology::detector::result::Severity;
use sqli_tautology::parser::sql_parser::{parse_statements, SqlDialect};

mod support;

#[test]
fn login_fixture_statements_are_lowered_in_order() {
    let statements = parse_statements(&support::read_fixture_sql("login_bypass"), SqlDialect::MySql)
        .expect("fixture should parse");

    let kinds: Vec<&str> = statements.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(kinds, vec!["SELECT", "SELECT", "UPDATE", "DELETE"]);
    assert!(statements.iter().all(|s| s.filter.is_some()));
}

#[test]
fn login_fixture_findings_point_into_the_file() {
    let sql = support::read_fixture_sql("login_bypass");
    let report = support::analyze_fixture("login_bypass");

    assert!(report.result.is_detected());
    assert_eq!(report.result.severity(), Severity::Medium);

    let findings: Vec<(usize, usize, usize, &str)> = report
        .findings()
        .map(|(index, d)| (index, d.position, d.length, d.fragment.as_str()))
        .collect();
    assert_eq!(
        findings,
        vec![
            (1, 158, 20, "name = '' OR '1'='1'"),
            (2, 217, 17, "user_id = user_id"),
        ]
    );

    for (_, detail) in report.findings() {
        let recovered: String = sql
            .chars()
            .skip(detail.position)
            .take(detail.length)
            .collect();
        assert_eq!(recovered, detail.fragment);
    }
}

#[test]
fn parameterized_fixture_is_clean() {
    let report = support::analyze_fixture("clean_app");
    assert_eq!(report.statements.len(), 8);
    assert!(!report.result.is_detected());
    assert_eq!(report.result.severity(), Severity::None);
}

#[test]
fn positions_account_for_multibyte_characters() {
    let sql = "SELECT * FROM t WHERE nom = 'Émile' OR 1 = 1";
    let report = sqli_tautology::analyze_sql(sql, SqlDialect::MySql).expect("sql should parse");
    let detail = &report.result.details()[0];

    assert_eq!(detail.position, 22);
    assert_eq!(detail.fragment, "nom = 'Émile' OR 1 = 1");
    assert_eq!(detail.length, 22);
}

#[test]
fn dialects_disagree_on_double_quotes() {
    // MySQL reads "1" as a string literal, PostgreSQL as a column name.
    let sql = "SELECT * FROM t WHERE \"1\" = \"1\"";

    let mysql = parse_statements(sql, SqlDialect::MySql).expect("mysql should parse");
    let postgres = parse_statements(sql, SqlDialect::PostgreSql).expect("postgres should parse");

    let ConditionExpr::Comparison { left, .. } = &mysql[0].filter.as_ref().unwrap().condition else {
        panic!("expected a comparison");
    };
    assert!(matches!(**left, ConditionExpr::Literal(_)));

    let ConditionExpr::Comparison { left, .. } = &postgres[0].filter.as_ref().unwrap().condition
    else {
        panic!("expected a comparison");
    };
    assert_eq!(**left, ConditionExpr::column("1"));

    // Both are still tautologies: equal strings, or a column compared to itself.
    assert!(sqli_tautology::analyze_sql(sql, SqlDialect::MySql)
        .unwrap()
        .result
        .is_detected());
    assert!(sqli_tautology::analyze_sql(sql, SqlDialect::PostgreSql)
        .unwrap()
        .result
        .is_detected());
}

#[test]
fn invalid_sql_is_an_error_not_a_panic() {
    let err = sqli_tautology::analyze_sql("SELECT * FROM t WHERE", SqlDialect::Generic)
        .expect_err("should fail to parse");
    assert!(err.to_string().contains("generic SQL parse error"));
}
