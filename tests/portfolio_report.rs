use chrono::Utc;
use rpa_roi::format::{format_currency, format_months, format_percentage, Currency};
use rpa_roi::import::ProcessImporter;
use rpa_roi::portfolio::{top_by_metric, PortfolioSummary, RankingMetric};
use rpa_roi::roi::{ProcessClassification, RoiCalculator};
use std::io::Cursor;

const SHEET: &str = "\
process_name,department,complexity,current_time_per_month,people_involved,hourly_rate,rpa_implementation_cost,rpa_monthly_cost,expected_automation_percentage,exception_rate,fines_avoided,sql_savings
Conciliação bancária,Financeiro,Baixa,100,3,100,10000,500,100,0,,
Cadastro de fornecedores,Compras,Média,100,2,100,10000,500,50,0,300,200
Emissão de boletos,Financeiro,Alta,100,1,100,60000,500,80,20,,
Auditoria manual,Controladoria,Alta,20,1,50,30000,800,20,10,,
Linha quebrada,Financeiro,Média,abc,1,50,30000,800,20,10,,
";

#[test]
fn imports_evaluates_and_summarizes_a_portfolio() {
    let outcome = ProcessImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");
    assert_eq!(outcome.submissions.len(), 4);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].line, 6);
    assert_eq!(
        outcome.rejected[0].errors[0].field,
        "current_time_per_month"
    );

    let records = outcome.evaluate(&RoiCalculator::default(), Utc::now());
    let classifications: Vec<ProcessClassification> =
        records.iter().map(|record| record.classification).collect();
    assert_eq!(
        classifications,
        [
            ProcessClassification::QuickWin,
            ProcessClassification::QuickWin,
            ProcessClassification::MediumTerm,
            ProcessClassification::LowPriority,
        ]
    );

    // The legacy SLA column still counts toward the savings.
    assert_eq!(records[1].benefits.sla_savings, 200.0);
    assert!((records[1].monthly_savings() - 5_000.0).abs() < 1e-9);

    let summary = PortfolioSummary::build(&records, 2);
    assert_eq!(summary.aggregate.total_processes, 4);
    assert!((summary.aggregate.total_investment - 110_000.0).abs() < 1e-9);
    assert!(summary.aggregate.max_payback.is_infinite());
    assert_eq!(summary.rankings.by_roi.len(), 2);
    assert_eq!(
        summary.rankings.by_roi[0].process_name,
        "Conciliação bancária"
    );
    assert_eq!(summary.automation_potential.complex, ["Auditoria manual"]);
    assert_eq!(
        summary
            .classifications
            .iter()
            .map(|entry| entry.count)
            .collect::<Vec<_>>(),
        [2, 1, 1]
    );

    let slowest = top_by_metric(&records, RankingMetric::Payback, 4);
    assert_eq!(slowest[3].process_name(), "Auditoria manual");
}

#[test]
fn headline_figures_render_for_reports() {
    let outcome = ProcessImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");
    let records = outcome.evaluate(&RoiCalculator::default(), Utc::now());

    let first = &records[0];
    assert_eq!(
        format_currency(first.monthly_savings(), Currency::Brl),
        "R$ 9.500,00"
    );
    assert_eq!(
        format_currency(first.annual_savings(), Currency::Usd),
        "$114,000.00"
    );
    assert_eq!(format_percentage(first.roi_percentage_first_year(), 1), "1040.0%");
    assert_eq!(format_months(first.payback_period_months()), "1 mês");
    assert_eq!(
        format_months(records[3].payback_period_months()),
        "Indefinido"
    );
}
