//! Walks a `Variant![i32, String, Logger]` through every lifecycle transition.
//!
//! Run with `RUST_LOG=trace cargo run --example lifecycle --features tracing`
//! to also see the container's own events.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tvariant::{BadVariantAccess, Variant};

/// Logs its own construction, copies and drops.
#[derive(Debug, PartialEq)]
struct Logger {
    id: i32,
}

impl Logger {
    fn new(id: i32) -> Self {
        info!(id, "Logger constructed");
        Logger { id }
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        info!(id = self.id, "Logger copied");
        Logger { id: self.id }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        info!(id = self.id, "Logger dropped");
    }
}

type V = Variant![i32, String, Logger];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}

fn logger_id(v: &V) -> Result<i32, BadVariantAccess> {
    v.get::<Logger, _>().map(|l| l.id)
}

fn main() -> Result<(), BadVariantAccess> {
    init_tracing();

    info!("value construction");
    let mut v1 = V::new(10i32);
    assert_eq!(v1.index(), Some(0));
    assert_eq!(*v1.get::<i32, _>()?, 10);
    assert!(v1.holds_alternative::<i32>());

    let v2 = V::new(String::from("hello"));
    assert_eq!(v2.index(), Some(1));
    assert_eq!(v2.get::<String, _>()?, "hello");

    info!("assignment from value");
    {
        let mut v: Variant![i32, Logger] = Variant::new(100i32);
        info!("assigning Logger(1)");
        v.assign(Logger::new(1));
        assert_eq!(v.index(), Some(1));
        assert_eq!(v.get::<Logger, _>()?.id, 1);
        info!("leaving scope");
    }

    info!("copy construction");
    let mut v3 = V::new(Logger::new(3));
    let v4 = v3.clone();
    assert_eq!(v3.index(), Some(2));
    assert_eq!(v4.index(), Some(2));
    assert_eq!(logger_id(&v3)?, 3);
    assert_eq!(logger_id(&v4)?, 3);

    info!("move construction");
    let mut v5 = v3.take();
    assert_eq!(v5.index(), Some(2));
    assert_eq!(logger_id(&v5)?, 3);
    assert_eq!(v3.index(), None);

    info!("copy assignment");
    v1.clone_from(&v2);
    assert_eq!(v1.index(), Some(1));
    assert_eq!(v1.get::<String, _>()?, "hello");

    info!("move assignment");
    let mut v6 = V::new(999i32);
    v6.move_from(&mut v5);
    assert_eq!(v6.index(), Some(2));
    assert_eq!(logger_id(&v6)?, 3);
    assert_eq!(v5.index(), None);

    match logger_id(&v5) {
        Err(err) => info!(%err, "reading a moved-from variant"),
        Ok(id) => info!(id, "unexpected live logger"),
    }

    info!("all transitions done; dropping the rest");
    Ok(())
}
