//! Comprehensive tests for domain_share_roll

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{approx_eq, AMOUNT_TOLERANCE};

use domain_share_roll::engine::{EngineConfig, ShareRollEngine};
use domain_share_roll::export::{calc_log_csv, inputs_csv, nav_snapshots_csv, summary_csv};
use domain_share_roll::input::{MonthlyActivity, PriorSeries, ShareRollInput};
use domain_share_roll::monthly::OperationOrder;
use domain_share_roll::calc_log::{CalcLog, StepKind};
use domain_share_roll::ledger::SeriesLedger;
use domain_share_roll::monthly::MonthlyProcessor;
use domain_share_roll::rollup::apply_roll_up;
use domain_share_roll::{calculate_share_roll, ShareRollError};

fn single_series_input() -> ShareRollInput {
    ShareRollInput::new(dec!(1000), 2023)
        .with_series(PriorSeries::new("Initial Series", dec!(1000), dec!(1000)))
}

fn january_contribution_input() -> ShareRollInput {
    single_series_input().with_activity(
        MonthlyActivity::new(1)
            .with_contribution(dec!(100000))
            .with_profit_loss(dec!(50000)),
    )
}

fn roll_up_input() -> ShareRollInput {
    ShareRollInput::new(dec!(1000), 2023)
        .with_series(PriorSeries::new("Initial Series", dec!(1000), dec!(1000)))
        .with_series(PriorSeries::new("Series A", dec!(500), dec!(1200)))
        .with_series(PriorSeries::new("Series B", dec!(200), dec!(900)))
}

// ============================================================================
// Initialization
// ============================================================================

mod initialization_tests {
    use super::*;

    #[test]
    fn test_empty_prior_series_is_rejected() {
        let input = ShareRollInput::new(dec!(1000), 2023);
        let err = calculate_share_roll(&input).unwrap_err();
        assert!(matches!(err, ShareRollError::Validation(_)));
    }

    #[test]
    fn test_all_unfunded_series_is_rejected() {
        let input = ShareRollInput::new(dec!(1000), 2023)
            .with_series(PriorSeries::new("Initial Series", dec!(0), dec!(1000)))
            .with_series(PriorSeries::new("  ", dec!(10), dec!(1000)));

        assert!(calculate_share_roll(&input).unwrap_err().is_validation());
    }

    #[test]
    fn test_unrepresentable_prior_balance_is_rejected() {
        let input = ShareRollInput::new(dec!(1000), 2023).with_series(PriorSeries::new(
            "Initial Series",
            dec!(1000000000000000),
            dec!(100000000000000),
        ));

        let err = calculate_share_roll(&input).unwrap_err();
        assert!(matches!(err, ShareRollError::Validation(_)));
    }

    #[test]
    fn test_near_worthless_series_is_repriced_without_panicking() {
        let input = ShareRollInput::new(dec!(1000), 2023)
            .with_series(PriorSeries::new("Initial Series", dec!(1000), dec!(1000)))
            .with_series(PriorSeries::new("Series A", dec!(1000), dec!(0.0000000000000000000001)))
            .with_activity(MonthlyActivity::new(1).with_redemption("Series A", dec!(1000000000000000)));

        let report = calculate_share_roll(&input).unwrap();
        assert_eq!(report.row("Series A").unwrap().ending_shares, Decimal::ZERO);
        assert!(report.reconciliation.is_balanced());
    }

    #[test]
    fn test_first_funded_entry_is_initial() {
        let input = ShareRollInput::new(dec!(1000), 2023)
            .with_series(PriorSeries::new("Blank", dec!(0), dec!(1000)))
            .with_series(PriorSeries::new("Zeta", dec!(10), dec!(1000)))
            .with_series(PriorSeries::new("Alpha", dec!(10), dec!(1000)));

        let report = calculate_share_roll(&input).unwrap();

        assert!(report.balance("Zeta").unwrap().is_initial);
        assert!(!report.balance("Alpha").unwrap().is_initial);
        assert!(report.balance("Blank").is_none());
        assert_eq!(report.rows[0].series, "Zeta");
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        let input = single_series_input().with_activity(MonthlyActivity::new(0));
        assert!(calculate_share_roll(&input).unwrap_err().is_validation());
    }
}

// ============================================================================
// Roll-up
// ============================================================================

mod roll_up_tests {
    use super::*;

    #[test]
    fn test_series_above_par_is_rolled_up() {
        let report = calculate_share_roll(&roll_up_input()).unwrap();

        let initial = report.row("Initial Series").unwrap();
        assert_eq!(initial.transfers_in, dec!(600));
        assert_eq!(initial.ending_shares, dec!(1600));
        assert_eq!(initial.ending_nav_per_share, Some(dec!(1000)));

        let rolled = report.row("Series A").unwrap();
        assert_eq!(rolled.transfers_out, dec!(500));
        assert_eq!(rolled.ending_shares, Decimal::ZERO);
        assert_eq!(rolled.ending_nav_per_share, None);

        let below_par = report.row("Series B").unwrap();
        assert_eq!(below_par.ending_shares, dec!(200));
        assert_eq!(below_par.ending_nav_per_share, Some(dec!(900)));
    }

    #[test]
    fn test_roll_up_log_follows_entry_order() {
        let input = ShareRollInput::new(dec!(1000), 2023)
            .with_series(PriorSeries::new("Initial Series", dec!(1000), dec!(1000)))
            .with_series(PriorSeries::new("Series Z", dec!(10), dec!(1500)))
            .with_series(PriorSeries::new("Series A", dec!(10), dec!(1100)));

        let report = calculate_share_roll(&input).unwrap();
        let sources: Vec<&str> = report
            .calc_log
            .of_kind(StepKind::RollUpTransfer)
            .filter(|e| e.description.starts_with("Rolling up"))
            .map(|e| e.series.as_str())
            .collect();

        assert_eq!(sources, vec!["Series Z", "Series A"]);
    }

    #[test]
    fn test_roll_up_transfer_details() {
        let report = calculate_share_roll(&roll_up_input()).unwrap();
        let entries: Vec<_> = report.calc_log.of_kind(StepKind::RollUpTransfer).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].details, "Shares out: 500.0000 @ $1,200.0000 = $600,000.00");
        assert_eq!(entries[1].series, "Initial Series");
        assert_eq!(entries[1].details, "Shares in: $600,000.00 / $1,000.0000 = 600.0000 shares");
    }

    #[test]
    fn test_no_roll_up_is_logged() {
        let report = calculate_share_roll(&single_series_input()).unwrap();
        let checks: Vec<_> = report.calc_log.of_kind(StepKind::RollUpCheck).collect();

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].description, "Checking if any series NAV > par value ($1,000.00)");
        assert_eq!(checks[1].description, "No roll-ups required");
    }
}

// ============================================================================
// Monthly processing
// ============================================================================

mod monthly_tests {
    use super::*;

    #[test]
    fn test_contribution_and_profit_loss_scenario() {
        let report = calculate_share_roll(&january_contribution_input()).unwrap();

        let initial = report.row("Initial Series").unwrap();
        let new = report.row("Series 1/2024").unwrap();

        assert_eq!(initial.ending_shares, dec!(1000));
        assert_eq!(new.ending_shares, dec!(100));
        assert_eq!(new.contributed_shares, dec!(100));
        assert_eq!(new.beginning_shares, Decimal::ZERO);

        let initial_nav = initial.ending_nav_per_share.unwrap();
        let new_nav = new.ending_nav_per_share.unwrap();
        assert!(approx_eq(initial_nav, dec!(1045.4545), AMOUNT_TOLERANCE));
        assert!(approx_eq(new_nav, dec!(1045.4545), AMOUNT_TOLERANCE));
        assert!(approx_eq(initial_nav, new_nav, dec!(0.000000001)));
    }

    #[test]
    fn test_scenario_log_text() {
        let report = calculate_share_roll(&january_contribution_input()).unwrap();
        let log = report.calc_log.entries();

        assert_eq!(log.len(), 6);
        assert_eq!(log[2].step, StepKind::NewSeries);
        assert_eq!(log[2].period, "January");
        assert_eq!(log[2].description, "Contribution of $100,000.00");
        assert_eq!(log[3].description, "Total P/L: $50,000.00");
        assert_eq!(log[3].details, "Total NAV for allocation: $1,100,000.00");
        assert_eq!(log[4].series, "Initial Series");
        assert_eq!(log[4].description, "P/L share: $45,454.55");
        assert_eq!(log[4].details, "NAV/share: $1,000.0000 → $1,045.4545");
        assert_eq!(log[5].description, "P/L share: $4,545.45");
    }

    #[test]
    fn test_log_is_reproducible() {
        let input = january_contribution_input()
            .with_activity(MonthlyActivity::new(4).with_redemption("Initial Series", dec!(25000)));

        let first = calculate_share_roll(&input).unwrap();
        let second = calculate_share_roll(&input).unwrap();

        assert_eq!(first.calc_log.render(), second.calc_log.render());
        assert_ne!(first.calculation_id, second.calculation_id);
    }

    #[test]
    fn test_months_are_processed_in_order() {
        let input = single_series_input()
            .with_activity(MonthlyActivity::new(6).with_redemption("Series 2/2024", dec!(1000)))
            .with_activity(MonthlyActivity::new(2).with_contribution(dec!(5000)));

        let report = calculate_share_roll(&input).unwrap();

        let series = report.row("Series 2/2024").unwrap();
        assert_eq!(series.redeemed_shares, dec!(1));
        assert_eq!(series.ending_shares, dec!(4));
    }

    #[test]
    fn test_redemption_before_series_exists_is_skipped() {
        let input = single_series_input()
            .with_activity(MonthlyActivity::new(2).with_redemption("Series 6/2024", dec!(1000)))
            .with_activity(MonthlyActivity::new(6).with_contribution(dec!(5000)));

        let report = calculate_share_roll(&input).unwrap();

        assert_eq!(report.row("Series 6/2024").unwrap().redeemed_shares, Decimal::ZERO);
        assert_eq!(report.calc_log.of_kind(StepKind::RedemptionSkipped).count(), 1);
        assert!(report.reconciliation.is_balanced());
    }

    #[test]
    fn test_redemption_of_rolled_up_series_is_skipped() {
        let input = roll_up_input()
            .with_activity(MonthlyActivity::new(1).with_full_redemption("Series A"));

        let report = calculate_share_roll(&input).unwrap();

        let skipped: Vec<_> = report.calc_log.of_kind(StepKind::RedemptionSkipped).collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].details, "Series has no outstanding shares");
        assert_eq!(report.row("Series A").unwrap().redeemed_shares, Decimal::ZERO);
    }

    #[test]
    fn test_full_redemption_zeroes_series() {
        let input = january_contribution_input()
            .with_activity(MonthlyActivity::new(3).with_full_redemption("Series 1/2024"));

        let report = calculate_share_roll(&input).unwrap();

        let row = report.row("Series 1/2024").unwrap();
        assert_eq!(row.ending_shares, Decimal::ZERO);
        assert_eq!(row.redeemed_shares, dec!(100));
        assert_eq!(row.ending_nav_per_share, None);

        let snapshots = report.nav_snapshots.as_ref().unwrap();
        assert!(snapshots.value("End of January", "Series 1/2024").is_some());
        assert!(snapshots.value("End of March", "Series 1/2024").is_none());
        assert!(approx_eq(
            report.check_figures.total_redemptions,
            dec!(104545.4545),
            AMOUNT_TOLERANCE
        ));
    }

    #[test]
    fn test_full_redemption_flag_ignores_amount() {
        let mut activity = MonthlyActivity::new(2).with_full_redemption("Initial Series");
        activity.redemption_amount = dec!(5);

        let report = calculate_share_roll(&single_series_input().with_activity(activity)).unwrap();
        assert_eq!(report.row("Initial Series").unwrap().redeemed_shares, dec!(1000));
    }

    #[test]
    fn test_operation_order_is_reported() {
        let engine = ShareRollEngine::new(
            EngineConfig::default().with_operation_order(OperationOrder::RedemptionFirst),
        );
        let report = engine.calculate(&single_series_input()).unwrap();
        assert_eq!(report.operation_order, OperationOrder::RedemptionFirst);
    }

    #[test]
    fn test_operation_orders_differ_when_both_flows_occur() {
        let input = single_series_input().with_activity(
            MonthlyActivity::new(1)
                .with_contribution(dec!(100000))
                .with_profit_loss(dec!(110000))
                .with_redemption("Initial Series", dec!(50000)),
        );

        let contribution_first = ShareRollEngine::new(EngineConfig::default())
            .calculate(&input)
            .unwrap();
        let redemption_first = ShareRollEngine::new(
            EngineConfig::default().with_operation_order(OperationOrder::RedemptionFirst),
        )
        .calculate(&input)
        .unwrap();

        let a = contribution_first.row("Initial Series").unwrap().ending_shares;
        let b = redemption_first.row("Initial Series").unwrap().ending_shares;
        assert_ne!(a, b);
        assert_eq!(b, dec!(950));
        assert!(contribution_first.reconciliation.is_balanced());
        assert!(redemption_first.reconciliation.is_balanced());
    }
}

// ============================================================================
// Output assembly
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_rows_include_every_series_ever_created() {
        let input = roll_up_input()
            .with_activity(MonthlyActivity::new(2).with_contribution(dec!(20000)))
            .with_activity(MonthlyActivity::new(5).with_full_redemption("Series 2/2024"));

        let report = calculate_share_roll(&input).unwrap();
        let names: Vec<&str> = report.rows.iter().map(|r| r.series.as_str()).collect();

        assert_eq!(names, vec!["Initial Series", "Series A", "Series B", "Series 2/2024"]);
    }

    #[test]
    fn test_totals_row() {
        let report = calculate_share_roll(&roll_up_input()).unwrap();

        assert_eq!(report.totals.beginning_shares, dec!(1700));
        assert_eq!(report.totals.transfers_in, dec!(600));
        assert_eq!(report.totals.transfers_out, dec!(500));
        assert_eq!(report.totals.ending_shares, dec!(1800));
        assert!(report.reconciliation.is_balanced());
    }

    #[test]
    fn test_rendered_summary_uses_placeholder_nav() {
        let report = calculate_share_roll(&roll_up_input()).unwrap();
        let rendered = report.render_summary();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[1],
            "Initial Series\t1,000.0000\t600.0000\t0.0000\t0.0000\t0.0000\t1,600.0000\t$1,000.0000"
        );
        assert_eq!(lines[2], "Series A\t500.0000\t0.0000\t500.0000\t0.0000\t0.0000\t0.0000\t—");
        assert_eq!(lines[4], "TOTAL\t1,700.0000\t600.0000\t500.0000\t0.0000\t0.0000\t1,800.0000\t—");
    }

    #[test]
    fn test_check_figures() {
        let input = roll_up_input()
            .with_activity(MonthlyActivity::new(1).with_profit_loss(dec!(18000)))
            .with_activity(MonthlyActivity::new(2).with_profit_loss(dec!(-9000)));

        let report = calculate_share_roll(&input).unwrap();
        let figures = &report.check_figures;

        assert_eq!(figures.beginning_total_nav, dec!(1780000));
        assert_eq!(figures.total_profit_loss, dec!(9000));
        assert!(approx_eq(figures.total_ending_nav, dec!(1789000), AMOUNT_TOLERANCE));
        assert!(approx_eq(
            figures.expected_ending_nav(),
            figures.total_ending_nav,
            AMOUNT_TOLERANCE
        ));
    }

    #[test]
    fn test_nav_snapshot_rows() {
        let input = january_contribution_input()
            .with_activity(MonthlyActivity::new(2))
            .with_activity(MonthlyActivity::new(3));

        let report = calculate_share_roll(&input).unwrap();
        let table = report.nav_snapshots.unwrap();

        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Beginning of Year", "End of January", "End of February", "End of March"]);
        assert_eq!(table.columns, vec!["Initial Series", "Series 1/2024"]);
        assert_eq!(table.value("Beginning of Year", "Initial Series"), Some(dec!(1000)));
        assert_eq!(table.value("Beginning of Year", "Series 1/2024"), None);
    }

    #[test]
    fn test_report_serializes() {
        let report = calculate_share_roll(&january_contribution_input()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["current_year"], 2024);
        assert_eq!(json["operation_order"], "contribution_first");
        assert_eq!(json["calc_log"][0]["step"], "RollUpCheck");
        assert!(json["rows"].as_array().unwrap().len() == 2);
    }
}

// ============================================================================
// Export
// ============================================================================

mod export_tests {
    use super::*;

    #[test]
    fn test_summary_csv_has_numeric_cells_and_totals() {
        let report = calculate_share_roll(&roll_up_input()).unwrap();
        let csv = summary_csv(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Series,Beginning Shares,Transfers In,Transfers Out,Contributed Shares,Redeemed Shares,Ending Shares,Ending NAV per Share"
        );
        assert_eq!(lines[1], "Initial Series,1000,600,0,0,0,1600,1000");
        assert_eq!(lines[2], "Series A,500,0,500,0,0,0,");
        assert_eq!(lines[4], "TOTAL,1700,600,500,0,0,1800,");
    }

    #[test]
    fn test_calc_log_csv_quotes_fields() {
        let report = calculate_share_roll(&january_contribution_input()).unwrap();
        let csv = calc_log_csv(&report).unwrap();

        assert!(csv.starts_with("Step,Month,Series,Description,Details\n"));
        assert!(csv.contains("New Series,January,Series 1/2024,\"Contribution of $100,000.00\""));
        assert_eq!(csv.lines().count(), report.calc_log.len() + 1);
    }

    #[test]
    fn test_nav_csv_blank_for_inactive() {
        let report = calculate_share_roll(&january_contribution_input()).unwrap();
        let csv = nav_snapshots_csv(&report).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Month,Initial Series,Series 1/2024");
        assert_eq!(lines[1], "Beginning of Year,1000,");
    }

    #[test]
    fn test_inputs_csv() {
        let input = january_contribution_input();
        let csv = inputs_csv(&input).unwrap();

        assert!(csv.contains("Prior Year,2023"));
        assert!(csv.contains("Calculating Year,2024"));
        assert!(csv.contains("Initial Series,1000,1000,1000000,true"));
        assert!(csv.contains("1,50000,100000,0,false,"));
    }
}

// ============================================================================
// Properties
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn prior_series_strategy() -> impl Strategy<Value = Vec<PriorSeries>> {
        prop::collection::vec((1i64..10_000i64, 50_000i64..200_000i64), 1..5).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (shares, nav_cents))| {
                    PriorSeries::new(format!("Series {}", i), Decimal::from(shares), Decimal::new(nav_cents, 2))
                })
                .collect()
        })
    }

    fn activity_strategy() -> impl Strategy<Value = Vec<MonthlyActivity>> {
        prop::collection::vec(
            (
                -500_000i64..2_000_000i64,
                prop_oneof![Just(0i64), 1i64..20_000_000i64],
                prop_oneof![Just(0i64), 1i64..5_000_000i64],
                any::<bool>(),
                0usize..6,
            ),
            12,
        )
        .prop_map(|months| {
            months
                .into_iter()
                .enumerate()
                .map(|(i, (pl, contribution, redemption, full, target))| {
                    let month = i as u32 + 1;
                    let mut activity = MonthlyActivity::new(month)
                        .with_profit_loss(Decimal::new(pl, 2))
                        .with_contribution(Decimal::new(contribution, 2));
                    if redemption > 0 || full {
                        let name = if target == 5 {
                            format!("Series {}/2024", month.saturating_sub(1).max(1))
                        } else {
                            format!("Series {}", target)
                        };
                        activity = if full && redemption % 4 == 0 {
                            activity.with_full_redemption(name)
                        } else {
                            activity.with_redemption(name, Decimal::new(redemption, 2))
                        };
                    }
                    activity
                })
                .collect()
        })
    }

    fn input_strategy() -> impl Strategy<Value = ShareRollInput> {
        (prior_series_strategy(), activity_strategy(), 90_000i64..120_000i64).prop_map(
            |(prior, activity, par_cents)| ShareRollInput {
                par_value: Decimal::new(par_cents, 2),
                prior_year: 2023,
                prior_series: prior,
                monthly_activity: activity,
            },
        )
    }

    proptest! {
        #[test]
        fn share_roll_always_reconciles(input in input_strategy()) {
            let report = calculate_share_roll(&input).unwrap();
            prop_assert!(report.reconciliation.is_balanced(), "{:?}", report.reconciliation);
        }

        #[test]
        fn nav_is_conserved(input in input_strategy()) {
            let report = calculate_share_roll(&input).unwrap();
            let figures = &report.check_figures;
            prop_assert!(approx_eq(figures.expected_ending_nav(), figures.total_ending_nav, AMOUNT_TOLERANCE));
        }

        #[test]
        fn nav_is_conserved_after_every_step(
            input in input_strategy(),
            order in prop_oneof![Just(OperationOrder::ContributionFirst), Just(OperationOrder::RedemptionFirst)],
        ) {
            let mut ledger = SeriesLedger::from_prior_series(&input.prior_series).unwrap();
            let mut log = CalcLog::new();
            let mut expected = input.beginning_total_nav();

            apply_roll_up(&mut ledger, input.par_value, &mut log).unwrap();
            prop_assert!(
                approx_eq(ledger.total_active_nav(), expected, AMOUNT_TOLERANCE),
                "beginning of year: {} != {}", ledger.total_active_nav(), expected
            );

            let processor = MonthlyProcessor::new(order, input.par_value, input.current_year());
            for activity in &input.monthly_activity {
                let outcome = processor.process(&mut ledger, activity, &mut log).unwrap();
                expected += outcome.contribution + outcome.profit_loss_allocated - outcome.redeemed_amount;
                prop_assert!(
                    approx_eq(ledger.total_active_nav(), expected, AMOUNT_TOLERANCE),
                    "end of month {}: {} != {}", activity.month, ledger.total_active_nav(), expected
                );
            }
        }

        #[test]
        fn roll_up_ignores_entry_order(
            initial_nav_cents in prop_oneof![Just(0i64), 50_000i64..200_000i64],
            others in prior_series_strategy(),
        ) {
            let initial = PriorSeries::new("Initial Series", dec!(100), Decimal::new(initial_nav_cents, 2));
            let forward: Vec<PriorSeries> = std::iter::once(initial.clone()).chain(others.iter().cloned()).collect();
            let reversed: Vec<PriorSeries> = std::iter::once(initial).chain(others.iter().rev().cloned()).collect();

            let roll = |prior: &[PriorSeries]| {
                let mut ledger = SeriesLedger::from_prior_series(prior).unwrap();
                apply_roll_up(&mut ledger, dec!(1000), &mut CalcLog::new()).unwrap();
                ledger.get("Initial Series").unwrap().clone()
            };
            let a = roll(&forward);
            let b = roll(&reversed);

            prop_assert!(approx_eq(a.shares, b.shares, AMOUNT_TOLERANCE), "{} != {}", a.shares, b.shares);
            prop_assert!(approx_eq(a.total_nav, b.total_nav, AMOUNT_TOLERANCE));
            prop_assert!(approx_eq(a.transfers_in, b.transfers_in, AMOUNT_TOLERANCE));
        }

        #[test]
        fn balances_stay_consistent(input in input_strategy()) {
            let report = calculate_share_roll(&input).unwrap();
            for series in &report.series {
                prop_assert!(series.shares >= Decimal::ZERO);
                prop_assert!(series.is_consistent(), "{:?}", series);
                if series.rolled_up {
                    prop_assert_eq!(series.shares, Decimal::ZERO);
                    prop_assert_eq!(series.total_nav, Decimal::ZERO);
                }
            }
        }

        #[test]
        fn idle_months_change_nothing(prior in prior_series_strategy()) {
            let opening = ShareRollInput {
                par_value: dec!(1000),
                prior_year: 2023,
                prior_series: prior,
                monthly_activity: Vec::new(),
            };
            let mut idle = opening.clone();
            idle.monthly_activity = (1..=12).map(MonthlyActivity::new).collect();

            let before = calculate_share_roll(&opening).unwrap();
            let after = calculate_share_roll(&idle).unwrap();

            prop_assert_eq!(before.series, after.series);
        }

        #[test]
        fn no_series_above_par_after_roll_up(prior in prior_series_strategy()) {
            let input = ShareRollInput {
                par_value: dec!(1000),
                prior_year: 2023,
                prior_series: prior,
                monthly_activity: Vec::new(),
            };
            let report = calculate_share_roll(&input).unwrap();

            for series in report.series.iter().filter(|s| !s.is_initial && s.is_active()) {
                prop_assert!(series.nav_per_share <= dec!(1000));
            }
        }
    }
}
