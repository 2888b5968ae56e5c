//! Reproducibility, input validation and cancellation tests.
//!
//! # Test Categories
//!
//! 1. **Determinism**: identical seeds give bit-identical prices, whatever
//!    the worker count
//! 2. **Building Blocks**: the orchestrated pricer agrees with a direct
//!    `simulate_paths` + `price_batch` pipeline
//! 3. **Invalid Inputs**: bad counts and scenarios are rejected up front
//! 4. **Cancellation**: cooperative cancellation from another thread

use std::thread;
use std::time::Duration;

use pricer_core::{OptionType, PricingError, ScenarioParameters};
use pricer_pricing::mc::{
    price_batch, simulate_paths, CancellationToken, ExecutionMode, MonteCarloConfig,
    MonteCarloPricer,
};
use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
use proptest::prelude::*;

fn parallel_config(n_simulations: usize, chunk_size: usize, seed: u64) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .n_simulations(n_simulations)
        .n_steps(16)
        .seed(seed)
        .execution(ExecutionMode::Parallel)
        .chunk_size(chunk_size)
        .build()
        .unwrap()
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_parallel_independent_of_thread_count() {
    let scenario = ScenarioParameters::default();
    let pricer = MonteCarloPricer::new(parallel_config(20_000, 512, 99)).unwrap();

    let prices: Vec<f64> = [1, 2, 4]
        .into_iter()
        .map(|threads| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(|| pricer.price(&scenario).unwrap().price)
        })
        .collect();

    assert_eq!(prices[0], prices[1]);
    assert_eq!(prices[1], prices[2]);
}

#[test]
fn test_parallel_seed_sensitivity() {
    let scenario = ScenarioParameters::default();

    let a = MonteCarloPricer::new(parallel_config(5_000, 256, 1))
        .unwrap()
        .price(&scenario)
        .unwrap();
    let b = MonteCarloPricer::new(parallel_config(5_000, 256, 2))
        .unwrap()
        .price(&scenario)
        .unwrap();

    assert_ne!(a.price, b.price);
}

#[test]
fn test_sequential_chunk_size_does_not_change_result() {
    let scenario = ScenarioParameters::default();
    let price = |chunk_size: usize| {
        let config = MonteCarloConfig::builder()
            .n_simulations(3_000)
            .n_steps(8)
            .seed(5)
            .chunk_size(chunk_size)
            .build()
            .unwrap();
        MonteCarloPricer::new(config)
            .unwrap()
            .price(&scenario)
            .unwrap()
            .price
    };

    let reference = price(3_000);
    assert_eq!(price(1), reference);
    assert_eq!(price(7), reference);
    assert_eq!(price(1_024), reference);
}

// ============================================================================
// Building Blocks
// ============================================================================

#[test]
fn test_default_entry_point_matches_building_blocks() {
    let scenario = ScenarioParameters::default();
    let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(0));
    let batch = simulate_paths(4_000, 10, &scenario, &mut normals).unwrap();

    let direct = price_batch(&batch, &scenario, batch.n_runs());
    let entry = pricer_pricing::price(4_000, 10).unwrap();

    assert_eq!(entry, direct);
}

// ============================================================================
// Invalid Inputs
// ============================================================================

#[test]
fn test_invalid_counts_raise_invalid_parameters() {
    assert!(matches!(
        pricer_pricing::price(100, 1),
        Err(PricingError::InvalidParameters { name: "n_steps", .. })
    ));
    assert!(matches!(
        pricer_pricing::price(0, 100),
        Err(PricingError::InvalidParameters {
            name: "n_simulations",
            ..
        })
    ));
}

#[test]
fn test_invalid_scenarios_raise_invalid_parameters() {
    let base = ScenarioParameters::default();
    let cases = [
        ("maturity", ScenarioParameters { maturity: -1.0, ..base }),
        ("volatility", base.with_volatility(-0.1)),
        ("spot", ScenarioParameters { spot: 0.0, ..base }),
        ("strike", ScenarioParameters { strike: f64::NAN, ..base }),
    ];

    for (field, scenario) in cases {
        match pricer_pricing::price_scenario(100, 10, &scenario) {
            Err(PricingError::InvalidParameters { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidParameters for {}, got {:?}", field, other),
        }
    }
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancellation_from_another_thread() {
    let scenario = ScenarioParameters::default();
    let config = MonteCarloConfig::builder()
        .n_simulations(2_000_000)
        .n_steps(50)
        .seed(3)
        .chunk_size(1_000)
        .build()
        .unwrap();
    let pricer = MonteCarloPricer::new(config).unwrap();

    let token = CancellationToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        remote.cancel();
    });

    let result = pricer.price_with_cancellation(&scenario, &token);
    canceller.join().unwrap();

    match result {
        Err(PricingError::Cancelled { completed_runs }) => {
            assert!(completed_runs < 2_000_000);
            assert_eq!(completed_runs % 1_000, 0);
        }
        other => panic!("expected cancellation, got {:?}", other),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_price_finite_and_non_negative(
        seed in any::<u64>(),
        n_simulations in 1usize..500,
        n_steps in 2usize..30,
        spot in 1.0f64..200.0,
        strike in 1.0f64..200.0,
        rate in -0.02f64..0.1,
        vol in 0.0f64..1.0,
        maturity in 0.01f64..5.0,
        call in any::<bool>(),
        parallel in any::<bool>(),
    ) {
        let scenario = ScenarioParameters::new(
            spot, strike, rate, vol, maturity, OptionType::from_call_flag(call),
        );
        let execution = if parallel { ExecutionMode::Parallel } else { ExecutionMode::Sequential };
        let config = MonteCarloConfig::builder()
            .n_simulations(n_simulations)
            .n_steps(n_steps)
            .seed(seed)
            .execution(execution)
            .chunk_size(64)
            .build()
            .unwrap();

        let result = MonteCarloPricer::new(config).unwrap().price(&scenario).unwrap();
        prop_assert!(result.price.is_finite());
        prop_assert!(result.price >= 0.0);
        prop_assert!(result.std_error >= 0.0);
    }
}
