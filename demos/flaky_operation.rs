//! # Example: flaky_operation
//!
//! Demonstrates how [`RetryExecutor`] retries an operation whose root cause is
//! retryable, runs the type-level hook before each retry, and gives up
//! immediately on a non-retryable root cause.
//!
//! ## Flow
//! ```text
//! execute(inventory::reserve)
//!   ├─► attempt=1 → Err(Busy "row locked #1")
//!   ├─► RetryScheduled{delay=100ms} → sleep → hook
//!   ├─► attempt=2 → Err(Busy "row locked #2")
//!   ├─► RetryScheduled{delay=100ms} → sleep → hook
//!   └─► attempt=3 → Ok(reservation)
//!
//! execute(inventory::release)
//!   └─► attempt=1 → Err(Service ← Invalid) → root cause Invalid → Aborted
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example flaky_operation --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use retryvisor::{
    Fault, LogWriter, OperationDescriptor, RetryConfig, RetryExecutor, TargetContext,
    TypeOverrides,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Busy,
    Service,
    Invalid,
}

static RESERVE_CALLS: AtomicU32 = AtomicU32::new(0);

fn reserve(sku: &str) -> Result<String, Fault<Kind>> {
    let n = RESERVE_CALLS.fetch_add(1, Ordering::Relaxed) + 1;
    if n <= 2 {
        Err(Fault::new(Kind::Busy, format!("row locked #{n}")))
    } else {
        Ok(format!("reservation-{sku}-{n}"))
    }
}

fn release(_reservation: &str) -> Result<(), Fault<Kind>> {
    Err(Fault::wrap(
        Kind::Service,
        "release failed",
        Fault::new(Kind::Invalid, "unknown reservation"),
    ))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Executor with the built-in stdout observer
    let exec = RetryExecutor::builder(RetryConfig::default())
        .with_observer(Arc::new(LogWriter::new()))
        .build();

    // 2. Type-level settings of the owning service, plus its base type
    let target = TargetContext::new(TypeOverrides::<Fault<Kind>>::new("InventoryService").with_callback(
        |op: &OperationDescriptor<Kind>, err: &Fault<Kind>| {
            println!("[hook] {} will be retried after: {err}", op.name());
        },
    ))
    .with_parent(
        TypeOverrides::new("BaseService")
            .with_attempts(3)
            .with_delay(Duration::from_millis(100)),
    );

    // 3. Operations only declare what they retry on
    let reserve_op = OperationDescriptor::new("inventory::reserve")
        .retry_on(Kind::Busy)
        .declares([Kind::Busy, Kind::Invalid]);
    let release_op = OperationDescriptor::new("inventory::release").retry_on(Kind::Busy);

    println!("[main] policy: {:?}", exec.resolve_policy(&reserve_op, &target));

    // 4. Succeeds on the third call
    let reservation = exec
        .execute_async(&reserve_op, &target, || async { reserve("sku-7") })
        .await?;
    println!("[main] reserved: {reservation}");

    // 5. Root cause is not retryable: returned after one call
    match exec.execute(&release_op, &target, || release(&reservation)) {
        Ok(()) => println!("[main] released"),
        Err(err) => println!("[main] release gave up: {err}"),
    }

    println!("[main] done.");
    Ok(())
}
