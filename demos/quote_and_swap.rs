//! Concentrated-liquidity swap walkthrough.
//!
//! Seeds a pool with three overlapping positions, quotes a swap without
//! touching the store, then executes the same exact-in swap with a
//! minimum-output guard and reads the committed pool state back.
//!
//! # Run
//!
//! ```bash
//! cargo run --example quote_and_swap
//! ```

use concentrated_swap::config::PoolConfig;
use concentrated_swap::domain::{Amount, Coin, Denom, DenomPair, Position, SpreadFactor, Tick};
use concentrated_swap::math::Dec;
use concentrated_swap::store::MemStore;
use concentrated_swap::swap::SwapEngine;

const POOL_ID: u64 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Concentrated Liquidity Swap ===\n");

    // ── 1. Denoms ───────────────────────────────────────────────────────
    let ueth = Denom::new("ueth")?;
    let uusdc = Denom::new("uusdc")?;
    let pair = DenomPair::new(ueth.clone(), uusdc.clone())?;

    // ── 2. Positions ────────────────────────────────────────────────────
    //    Tick spacing = 100, so every bound is a multiple of 100.
    //    Ticks -500 000 / -100 000 / 100 000 / 500 000 sit at prices
    //    0.95 / 0.99 / 1.1 / 1.5.
    let positions = vec![
        Position::new(
            Tick::new(-500_000)?,
            Tick::new(-100_000)?,
            Dec::from_integer(2_000_000_000)?,
        )?,
        Position::new(
            Tick::new(-100_000)?,
            Tick::new(100_000)?,
            Dec::from_integer(5_000_000_000)?,
        )?,
        Position::new(
            Tick::new(100_000)?,
            Tick::new(500_000)?,
            Dec::from_integer(2_000_000_000)?,
        )?,
    ];
    for position in &positions {
        println!("Position: {position}");
    }

    // ── 3. Pool ─────────────────────────────────────────────────────────
    let spread = SpreadFactor::from_basis_points(30)?;
    let config = PoolConfig::new(POOL_ID, pair, spread, 100, Tick::ZERO, positions)?;
    let mut engine = SwapEngine::new(MemStore::new());
    let pool = engine.create_pool(&config)?;

    println!("\nPool {POOL_ID} created");
    println!("  Spread:        {spread}");
    println!("  Current tick:  {}", pool.current_tick());
    println!("  Liquidity:     {}", pool.liquidity());
    let price = engine.spot_price(POOL_ID, &ueth, &uusdc)?;
    println!("  Spot price:    {price} uusdc per ueth");

    // ── 4. Quote ────────────────────────────────────────────────────────
    //    Large enough to cross out of the centre range.
    let token_in = Coin::new(ueth.clone(), Amount::new(40_000_000));
    let quote =
        engine.calc_out_amt_given_in(POOL_ID, token_in.clone(), uusdc.clone(), None, None)?;

    println!("\n--- Quote: sell {token_in} ---");
    println!("  Expected out:  {}", quote.token_out());
    println!("  Spread paid:   {}", quote.spread_charge());
    println!("  Ticks crossed: {}", quote.ticks_crossed());
    println!("  Pool tick still {}", engine.get_pool(POOL_ID)?.current_tick());

    // ── 5. Swap with the quote as the minimum ───────────────────────────
    let minimum = quote.token_out().amount();
    let outcome = engine.swap_exact_amount_in(POOL_ID, token_in, uusdc.clone(), minimum, None)?;

    println!("\n--- Swap: exact in ---");
    println!("  Received:      {}", outcome.token_out());
    println!("  Termination:   {}", outcome.termination());
    println!("  New tick:      {}", outcome.new_tick());
    println!("  New liquidity: {}", outcome.new_liquidity());

    let after = engine.get_pool(POOL_ID)?;
    println!("\n  Spot price after swap: {}", after.spot_price(&ueth, &uusdc)?);

    println!("\n=== Done ===");
    Ok(())
}
