//! Integration tests exercising the full system from pool config to
//! committed swap.
//!
//! These tests go through the public API only: pool creation, exact-in and
//! exact-out swaps, quotes, slippage bounds, tick crossing in both
//! directions, and the failure paths that must leave the store untouched.

#![allow(clippy::panic)]

use concentrated_swap::config::{PoolConfig, SwapEngineConfig};
use concentrated_swap::domain::{
    Amount, Coin, Denom, DenomPair, Position, SpreadFactor, SwapSpec, SwapTermination, Tick,
    TokenIndex,
};
use concentrated_swap::error::SwapError;
use concentrated_swap::math::{tick_to_sqrt_price, Dec, SignedDec};
use concentrated_swap::store::MemStore;
use concentrated_swap::swap::SwapEngine;
use concentrated_swap::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn ueth() -> Denom {
    let Ok(d) = Denom::new("ueth") else {
        panic!("valid denom");
    };
    d
}

fn uusdc() -> Denom {
    let Ok(d) = Denom::new("uusdc") else {
        panic!("valid denom");
    };
    d
}

fn tick(v: i64) -> Tick {
    let Ok(t) = Tick::new(v) else {
        panic!("valid tick");
    };
    t
}

fn dec(s: &str) -> Dec {
    let Ok(d) = s.parse::<Dec>() else {
        panic!("valid literal {s}");
    };
    d
}

fn liq(v: u128) -> Dec {
    let Ok(d) = Dec::from_integer(v) else {
        panic!("fits");
    };
    d
}

fn pos(lower: i64, upper: i64, liquidity: u128) -> Position {
    let Ok(p) = Position::new(tick(lower), tick(upper), liq(liquidity)) else {
        panic!("valid position");
    };
    p
}

fn spread_bps(bps: u32) -> SpreadFactor {
    let Ok(s) = SpreadFactor::from_basis_points(bps) else {
        panic!("valid spread");
    };
    s
}

fn config(positions: Vec<Position>, spread: SpreadFactor) -> PoolConfig {
    let Ok(pair) = DenomPair::new(ueth(), uusdc()) else {
        panic!("distinct denoms");
    };
    let Ok(cfg) = PoolConfig::new(1, pair, spread, 100, Tick::ZERO, positions) else {
        panic!("valid config");
    };
    cfg
}

fn engine_from(cfg: &PoolConfig) -> SwapEngine<MemStore> {
    let mut engine = SwapEngine::new(MemStore::new());
    let Ok(_) = engine.create_pool(cfg) else {
        panic!("pool created");
    };
    engine
}

fn engine(positions: Vec<Position>, spread: SpreadFactor) -> SwapEngine<MemStore> {
    engine_from(&config(positions, spread))
}

fn exact_in(denom_in: Denom, amount: u128, denom_out: Denom) -> SwapSpec {
    let Ok(spec) = SwapSpec::exact_in(Coin::new(denom_in, Amount::new(amount)), denom_out) else {
        panic!("valid spec");
    };
    spec
}

fn exact_out(denom_out: Denom, amount: u128, denom_in: Denom) -> SwapSpec {
    let Ok(spec) = SwapSpec::exact_out(Coin::new(denom_out, Amount::new(amount)), denom_in) else {
        panic!("valid spec");
    };
    spec
}

/// Net liquidity of every initialized tick at or below the current tick.
fn active_liquidity_from_ticks(engine: &SwapEngine<MemStore>) -> SignedDec {
    let Ok(pool) = engine.get_pool(1) else {
        panic!("pool stored");
    };
    let Ok(ticks) = engine.tick_index(1).initialized_ticks() else {
        panic!("ticks readable");
    };
    let mut total = SignedDec::ZERO;
    for (t, info) in &ticks {
        if *t <= pool.current_tick() {
            let Ok(sum) = total.checked_add(&info.liquidity_net()) else {
                panic!("no overflow");
            };
            total = sum;
        }
    }
    total
}

// ===========================================================================
// Suite 1: Single bucket
// ===========================================================================

#[test]
fn single_bucket_exact_in_is_exhausted() {
    let mut e = engine(vec![pos(-100_000, 100_000, 1_000_000_000)], spread_bps(30));
    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 10_000, ueth()), None, None) else {
        panic!("expected Ok");
    };

    assert_eq!(outcome.termination(), SwapTermination::Exhausted);
    assert_eq!(outcome.token_in(), &Coin::new(uusdc(), Amount::new(10_000)));
    assert_eq!(outcome.ticks_crossed(), 0);
    assert_eq!(outcome.steps(), 1);
    assert!(outcome.token_out().amount() < Amount::new(9_970));
    assert!(outcome.token_out().amount() > Amount::new(9_900));

    // 0.30% of 10 000
    assert!(outcome.spread_charge() >= dec("29.99"));
    assert!(outcome.spread_charge() <= dec("30.01"));

    let Ok(pool) = e.get_pool(1) else {
        panic!("pool stored");
    };
    assert_eq!(pool.liquidity(), liq(1_000_000_000));
    assert!(pool.current_tick() > Tick::ZERO);
    assert!(!pool.fee_growth_global(TokenIndex::One).is_zero());
    assert!(pool.fee_growth_global(TokenIndex::Zero).is_zero());
}

#[test]
fn single_bucket_exact_out_charges_at_least_the_output() {
    let mut e = engine(vec![pos(-100_000, 100_000, 1_000_000_000)], SpreadFactor::ZERO);
    let Ok(outcome) = e.swap(1, &exact_out(uusdc(), 500, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.termination(), SwapTermination::Exhausted);
    assert_eq!(outcome.token_out(), &Coin::new(uusdc(), Amount::new(500)));
    assert!(outcome.token_in().amount() >= Amount::new(500));
    assert!(outcome.token_in().amount() <= Amount::new(502));
    assert!(outcome.new_sqrt_price() < Dec::one());
}

// ===========================================================================
// Suite 2: Tick crossing
// ===========================================================================

fn two_bucket_engine(spread: SpreadFactor) -> SwapEngine<MemStore> {
    engine(
        vec![pos(-1_000, 1_000, 1_000_000), pos(1_000, 5_000, 2_000_000)],
        spread,
    )
}

#[test]
fn one_crossing_moves_into_the_next_bucket() {
    let mut e = two_bucket_engine(SpreadFactor::ZERO);
    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 1_000, ueth()), None, None) else {
        panic!("expected Ok");
    };

    assert_eq!(outcome.termination(), SwapTermination::Exhausted);
    assert_eq!(outcome.ticks_crossed(), 1);
    assert_eq!(outcome.new_liquidity(), liq(2_000_000));
    assert!(outcome.new_tick() >= tick(1_000));
    assert!(outcome.new_tick() < tick(5_000));
    assert_eq!(outcome.token_in().amount(), Amount::new(1_000));

    let Ok(boundary) = tick_to_sqrt_price(tick(1_000)) else {
        panic!("valid tick");
    };
    assert!(outcome.new_sqrt_price() > boundary);
    assert_eq!(
        active_liquidity_from_ticks(&e),
        SignedDec::positive(liq(2_000_000))
    );

    // state lives in the store, not the engine
    let reopened = SwapEngine::new(e.into_store());
    let Ok(pool) = reopened.get_pool(1) else {
        panic!("pool stored");
    };
    assert_eq!(pool.current_tick(), outcome.new_tick());
    assert_eq!(pool.liquidity(), liq(2_000_000));
}

#[test]
fn crossed_tick_record_is_persisted() {
    let mut e = two_bucket_engine(spread_bps(30));
    let Ok(before) = e.tick_index(1).get(tick(1_000)) else {
        panic!("tick readable");
    };
    let Some(before) = before else {
        panic!("tick 1000 initialized");
    };
    assert!(before.fee_growth_outside(TokenIndex::One).is_zero());

    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 1_000, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.ticks_crossed(), 1);

    let Ok(Some(after)) = e.tick_index(1).get(tick(1_000)) else {
        panic!("tick 1000 still initialized");
    };
    let Ok(pool) = e.get_pool(1) else {
        panic!("pool stored");
    };
    let outside = after.fee_growth_outside(TokenIndex::One);
    assert!(!outside.is_zero());
    assert!(outside < pool.fee_growth_global(TokenIndex::One));
    assert_eq!(after.liquidity_net(), before.liquidity_net());
}

#[test]
fn crossing_back_restores_the_first_bucket() {
    let mut e = two_bucket_engine(SpreadFactor::ZERO);
    let Ok(up) = e.swap(1, &exact_in(uusdc(), 1_000, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(up.ticks_crossed(), 1);

    let Ok(down) = e.swap(1, &exact_in(ueth(), 1_000, uusdc()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(down.termination(), SwapTermination::Exhausted);
    assert_eq!(down.ticks_crossed(), 1);
    assert!(down.new_tick() < tick(1_000));
    assert!(down.new_tick() >= tick(-1_000));
    assert_eq!(down.new_liquidity(), liq(1_000_000));
    assert_eq!(
        active_liquidity_from_ticks(&e),
        SignedDec::positive(liq(1_000_000))
    );
}

#[test]
fn empty_bucket_is_skipped() {
    let mut e = engine(vec![pos(1_000, 2_000, 1_000_000)], SpreadFactor::ZERO);
    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 100, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.termination(), SwapTermination::Exhausted);
    assert_eq!(outcome.ticks_crossed(), 1);
    assert_eq!(outcome.new_liquidity(), liq(1_000_000));
    assert!(outcome.new_tick() >= tick(1_000));
}

// ===========================================================================
// Suite 3: Price limits
// ===========================================================================

#[test]
fn limit_equal_to_current_price_is_rejected_both_ways() {
    let mut e = engine(vec![pos(-1_000, 1_000, 1_000_000)], SpreadFactor::ZERO);
    let before = e.store().clone();

    let down = e.swap(1, &exact_in(ueth(), 100, uusdc()), None, Some(Dec::one()));
    let Err(SwapError::PriceLimitValidation { limit, .. }) = down else {
        panic!("expected PriceLimitValidation, got {down:?}");
    };
    assert_eq!(limit, Dec::one());

    let up = e.swap(1, &exact_in(uusdc(), 100, ueth()), None, Some(Dec::one()));
    let Err(SwapError::PriceLimitValidation { .. }) = up else {
        panic!("expected PriceLimitValidation, got {up:?}");
    };
    assert_eq!(e.store(), &before);
}

#[test]
fn limit_on_the_wrong_side_is_rejected() {
    let e = engine(vec![pos(-1_000, 1_000, 1_000_000)], SpreadFactor::ZERO);
    let result = e.quote(1, &exact_in(ueth(), 100, uusdc()), None, Some(dec("1.01")));
    let Err(SwapError::PriceLimitValidation { .. }) = result else {
        panic!("expected PriceLimitValidation, got {result:?}");
    };
}

#[test]
fn partial_fill_stops_at_the_limit() {
    let mut e = two_bucket_engine(SpreadFactor::ZERO);
    let limit = dec("1.0002");
    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 1_000_000, ueth()), None, Some(limit)) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.termination(), SwapTermination::PriceLimitReached);
    assert_eq!(outcome.new_sqrt_price(), limit);
    assert_eq!(outcome.ticks_crossed(), 0);
    assert!(outcome.token_in().amount() < Amount::new(1_000_000));

    let Ok(pool) = e.get_pool(1) else {
        panic!("pool stored");
    };
    assert_eq!(pool.current_sqrt_price(), limit);
}

// ===========================================================================
// Suite 4: Failures leave the store untouched
// ===========================================================================

#[test]
fn no_liquidity_leaves_state_unchanged() {
    let mut e = engine(vec![pos(1_000, 2_000, 1_000_000)], SpreadFactor::ZERO);
    let before = e.store().clone();
    assert_eq!(
        e.swap(1, &exact_in(ueth(), 100, uusdc()), None, None),
        Err(SwapError::NoLiquidity { pool_id: 1 })
    );
    assert_eq!(e.store(), &before);
}

#[test]
fn step_cap_leaves_state_unchanged() {
    let cfg = config(
        vec![pos(-300, -200, 1_000), pos(-200, -100, 1_000), pos(-100, 100, 1_000)],
        SpreadFactor::ZERO,
    );
    let Ok(engine_cfg) = SwapEngineConfig::new(2) else {
        panic!("valid");
    };
    let Ok(mut e) = SwapEngine::with_config(MemStore::new(), engine_cfg) else {
        panic!("valid");
    };
    let Ok(_) = e.create_pool(&cfg) else {
        panic!("created");
    };
    let before = e.store().clone();
    assert_eq!(
        e.swap(1, &exact_in(ueth(), 1_000_000, uusdc()), None, None),
        Err(SwapError::IterationLimitExceeded { steps: 2 })
    );
    assert_eq!(e.store(), &before);
}

#[test]
fn slippage_bounds_are_enforced() {
    let mut e = engine(vec![pos(-100_000, 100_000, 1_000_000_000)], SpreadFactor::ZERO);
    let before = e.store().clone();

    assert_eq!(
        e.swap_exact_amount_in(
            1,
            Coin::new(uusdc(), Amount::new(1_000)),
            ueth(),
            Amount::new(1_000),
            None,
        ),
        Err(SwapError::AmountOutBelowMinimum {
            amount: Amount::new(999),
            minimum: Amount::new(1_000),
        })
    );
    let result = e.swap_exact_amount_out(
        1,
        Coin::new(uusdc(), Amount::new(500)),
        ueth(),
        Amount::new(1),
        None,
    );
    let Err(SwapError::AmountInAboveMaximum { maximum, .. }) = result else {
        panic!("expected AmountInAboveMaximum, got {result:?}");
    };
    assert_eq!(maximum, Amount::new(1));
    assert_eq!(e.store(), &before);

    let Ok(outcome) = e.swap_exact_amount_in(
        1,
        Coin::new(uusdc(), Amount::new(1_000)),
        ueth(),
        Amount::new(999),
        None,
    ) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.token_out().amount(), Amount::new(999));
    assert_ne!(e.store(), &before);
}

#[test]
fn quotes_never_write() {
    let e = two_bucket_engine(spread_bps(30));
    let before = e.store().clone();
    let Ok(a) = e.quote(1, &exact_in(uusdc(), 1_000, ueth()), None, None) else {
        panic!("expected Ok");
    };
    let Ok(b) = e.quote(1, &exact_in(uusdc(), 1_000, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(a, b);
    assert_eq!(a.ticks_crossed(), 1);
    assert_eq!(e.store(), &before);
}

// ===========================================================================
// Suite 5: Precision recovery
// ===========================================================================

#[test]
fn tiny_input_against_deep_liquidity_is_consumed() {
    // price 0.25 sits exactly on tick -7 500 000
    let Ok(pair) = DenomPair::new(ueth(), uusdc()) else {
        panic!("distinct denoms");
    };
    let Ok(cfg) = PoolConfig::new(
        1,
        pair,
        SpreadFactor::ZERO,
        100,
        tick(-7_500_000),
        vec![pos(-8_000_000, -7_000_000, 1_000_000_000_000_000_000_000_000_000_000)],
    ) else {
        panic!("valid config");
    };
    let Ok(cfg) = cfg.with_sqrt_price(dec("0.5")) else {
        panic!("sqrt price matches tick");
    };
    let mut e = engine_from(&cfg);

    let Ok(outcome) = e.swap(1, &exact_in(uusdc(), 1, ueth()), None, None) else {
        panic!("expected Ok");
    };
    assert_eq!(outcome.termination(), SwapTermination::Exhausted);
    assert_eq!(outcome.steps(), 1);
    assert_eq!(outcome.token_in().amount(), Amount::new(1));
    // 1 / (L * 0.5 * 0.5) of price movement pays out just under 4
    assert_eq!(outcome.token_out().amount(), Amount::new(3));
    assert_eq!(outcome.new_tick(), tick(-7_500_000));
}
