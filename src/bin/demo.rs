//! Round-trip demo
//!
//! Stores one value of each kind, reads each back with the matching
//! accessor and checks it matches. Exits non-zero on the first mismatch.

use anyhow::{bail, Context};
use tracing::info;

use instrumented_cache::{Cache, MemoryBackend, Value, STORE_OP};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "instrumented_cache=warn".into()),
        )
        .init();

    let backend = MemoryBackend::new();
    let cache = Cache::connect(&backend).context("cache backend unavailable")?;

    let key = cache.store(b"foo")?;
    expect_eq(cache.get(&key)?, Some(Value::from(b"foo")))?;

    let key = cache.store(123)?;
    expect_eq(cache.get_int(&key)?, Some(123))?;

    let key = cache.store("bar")?;
    expect_eq(cache.get_str(&key)?, Some("bar".to_string()))?;

    for line in cache.replay(STORE_OP)? {
        println!("{}", line);
    }
    info!(stores = cache.call_count(STORE_OP)?, "Round trips verified");
    println!("All test cases passed!");
    Ok(())
}

fn expect_eq<T>(got: Option<T>, expected: Option<T>) -> anyhow::Result<()>
where
    T: PartialEq + std::fmt::Debug,
{
    if got != expected {
        bail!("Expected {:?}, got {:?}", expected, got);
    }
    Ok(())
}
