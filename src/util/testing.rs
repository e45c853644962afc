//! Shared test setup: logging and glossary fixtures.

use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::GlossaryTerm;

static TEST_SETUP: Once = Once::new();

/// Install the test logging subscriber once per process.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // Only glosstree's own spans and events; dependencies stay quiet
    let crate_filter = filter_fn(|metadata| metadata.target().starts_with("glosstree"));
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(crate_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Small two-glossary fixture.
///
/// ```text
/// Finance            (1)
/// ├── Revenue        (2)
/// │   └── Net Sales  (4)
/// └── Cost           (3)  display name "Operating Cost"
/// People             (5)  children announced, none in batch
/// ```
pub fn sample_terms() -> Vec<GlossaryTerm> {
    vec![
        GlossaryTerm::new("1", "Finance", "Finance").with_children(["2", "3"]),
        GlossaryTerm::new("2", "Finance.Revenue", "Revenue")
            .with_parent("1", "Finance")
            .with_children(["4"]),
        GlossaryTerm::new("3", "Finance.Cost", "Cost")
            .with_parent("1", "Finance")
            .with_display_name("Operating Cost"),
        GlossaryTerm::new("4", "Finance.Revenue.Net Sales", "Net Sales")
            .with_parent("2", "Finance.Revenue"),
        GlossaryTerm::new("5", "People", "People").with_children(["6"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }
}
