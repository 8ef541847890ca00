// ==========================================
// 引擎集成测试
// ==========================================
// 测试目标: 模拟器 + 分级引擎端到端一致性
// ==========================================


use dead_stock_analyzer::config::CatalogConfig;
use dead_stock_analyzer::domain::schema::SIMULATED_COLUMNS;
use dead_stock_analyzer::domain::types::{MovementClass, StockStatus};
use dead_stock_analyzer::engine::classifier::UrgencyInput;
use dead_stock_analyzer::engine::metrics;
use dead_stock_analyzer::{InventorySimulator, StatusThresholds, StockClassifier};
use test_helpers::reference_date;

const SEEDS: [u64; 5] = [1, 7, 42, 2024, 987_654_321];

#[test]
fn test_derived_fields_match_formulas() {
    let simulator = InventorySimulator::default();
    let catalog = CatalogConfig::default();

    for seed in SEEDS {
        for r in simulator.generate_at(120, seed, reference_date()) {
            assert!(r.current_stock <= r.initial_quantity, "{} 超卖", r.sku);
            assert_eq!(r.total_sold, r.initial_quantity - r.current_stock);
            assert!(r.last_sale_date >= r.stock_received_date, "{}", r.sku);
            assert!(r.last_sale_date <= reference_date(), "{}", r.sku);

            assert_eq!(
                r.days_since_last_sale,
                metrics::days_between(r.last_sale_date, reference_date())
            );
            assert_eq!(
                r.days_in_stock,
                metrics::days_between(r.stock_received_date, reference_date())
            );
            assert!(
                (r.stock_value - r.current_stock as f64 * r.unit_cost).abs() < 0.01,
                "{} 库存金额不一致",
                r.sku
            );

            let rate = catalog.holding_rate(&r.category).expect("品类应在目录中");
            assert_eq!(
                r.holding_cost,
                metrics::holding_cost(r.current_stock as f64, r.unit_cost, rate, r.days_in_stock)
            );
            assert_eq!(
                r.monthly_velocity,
                metrics::monthly_velocity(r.total_sold as f64, r.days_in_stock)
            );
            assert!(r.unit_price > r.unit_cost, "{} 售价应高于进价", r.sku);
        }
    }
}

#[test]
fn test_classification_consistent_with_days() {
    let simulator = InventorySimulator::default();
    let classifier = StockClassifier::new();

    for seed in SEEDS {
        for r in simulator.generate_at(120, seed, reference_date()) {
            assert_eq!(r.stock_status, classifier.classify_status(r.days_since_last_sale));
            assert_eq!(
                r.action_required,
                classifier.recommend_action(r.stock_status).to_string()
            );

            let expected = classifier.compute_urgency(&UrgencyInput::new(
                Some(r.days_since_last_sale),
                r.stock_value,
                r.holding_cost,
            ));
            assert_eq!(r.urgency_score, expected);
            assert!((0.0..=100.0).contains(&r.urgency_score));
        }
    }
}

#[test]
fn test_determinism_of_identity_and_prices() {
    let simulator = InventorySimulator::default();
    let a = simulator.generate_at(120, 42, reference_date());
    let b = simulator.generate_at(10, 42, reference_date());

    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.sku, y.sku);
        assert_eq!(x.category, y.category);
        assert_eq!(x.unit_cost, y.unit_cost);
        assert_eq!(x.unit_price, y.unit_price);
        assert_eq!(x.movement_category, y.movement_category);
    }
}

#[test]
fn test_demo_mix_contains_problem_stock() {
    // 默认权重下 113 个商品中应同时出现滞销与活跃
    let records = InventorySimulator::default().generate_at(120, 42, reference_date());
    let dead = records
        .iter()
        .filter(|r| r.movement_category == MovementClass::Dead)
        .count();
    assert!(dead > 0, "应存在滞销类商品");
    assert!(records
        .iter()
        .any(|r| r.stock_status == StockStatus::Active));
}

#[test]
fn test_generate_table_has_full_column_set() {
    let table = InventorySimulator::default().generate(120, 42);
    let columns: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    assert_eq!(columns, SIMULATED_COLUMNS.to_vec());
    assert_eq!(table.len(), 113);
}

#[test]
fn test_custom_catalog_from_json() {
    let raw = r#"{
        "currency": "ZAR",
        "categories": [
            {
                "name": "Hardware",
                "price_range": [20.0, 40.0],
                "holding_cost_rate": 0.01,
                "seasonality_months": [12],
                "movement_weights": [{ "class": "dead", "weight": 1.0 }],
                "products": [
                    { "name": "Hammer", "variant": "Stanley" },
                    { "name": "Nails 1kg", "variant": "Generic" }
                ]
            }
        ]
    }"#;
    let catalog = CatalogConfig::from_json_str(raw).unwrap();
    let records = InventorySimulator::new(catalog).generate_at(2, 3, reference_date());

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sku, "SPZ-HAR-0001");
    assert_eq!(records[1].product_name, "Nails 1kg (Generic)");
    for r in &records {
        assert_eq!(r.movement_category, MovementClass::Dead);
        assert!(r.unit_cost >= 20.0 && r.unit_cost <= 40.0);
    }
}

#[test]
fn test_custom_thresholds_flow_into_simulation() {
    // 阈值整体收紧后,同一批数据的状态只会更严重
    let strict = StockClassifier::with_thresholds(StatusThresholds {
        moderate_days: 7,
        slow_moving_days: 14,
        dead_stock_days: 28,
    });
    let default_records = InventorySimulator::default().generate_at(120, 5, reference_date());
    let strict_records = InventorySimulator::default()
        .with_classifier(strict)
        .generate_at(120, 5, reference_date());

    for (d, s) in default_records.iter().zip(&strict_records) {
        assert!(s.stock_status >= d.stock_status, "{}", d.sku);
    }
}
