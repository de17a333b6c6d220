use crate::application::registry::SessionRegistry;
use crate::domain::matcher;
use crate::domain::ports::{TransactionSource, TransactionSourceBox, DEFAULT_PAGE_LIMIT};
use crate::domain::transaction::MonitoringCriteria;
use crate::error::{MonitorError, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Terminal state of a monitoring session.
///
/// Unrecoverable conditions (an unsupported ledger, invalid criteria) are
/// rejected before the polling loop starts and surface as errors instead.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SessionOutcome {
    /// A transaction matching the criteria was found.
    Matched,
    /// The subject's stop signal was set while the session was running.
    Cancelled,
    /// The time budget elapsed without a match.
    Expired,
}

/// The main entry point for payment monitoring.
///
/// `PaymentMonitor` owns the capability table of ledger -> transaction
/// source and the registry of per-subject stop signals. Any number of
/// sessions may run concurrently through the same monitor; they share
/// nothing but the signal table.
pub struct PaymentMonitor {
    registry: SessionRegistry,
    sources: HashMap<String, TransactionSourceBox>,
}

impl Default for PaymentMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentMonitor {
    /// Creates a monitor with an empty capability table. Sources are wired
    /// in with [`register_source`](Self::register_source).
    pub fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
            sources: HashMap::new(),
        }
    }

    /// Registers a transaction source for a ledger identifier
    /// (case-insensitive). Replaces any previous source for that ledger.
    pub fn register_source(&mut self, ledger: &str, source: TransactionSourceBox) {
        self.sources.insert(ledger.to_ascii_lowercase(), source);
    }

    /// Waits for a payment matching `criteria` to arrive, on behalf of
    /// `subject`.
    ///
    /// Suspends the calling task until the session reaches a terminal
    /// state and returns `true` only on a match. Rejected synchronously
    /// with [`MonitorError::UnsupportedLedger`] when no source is
    /// registered for the requested ledger.
    pub async fn start_monitoring(
        &self,
        subject: &str,
        criteria: MonitoringCriteria,
    ) -> Result<bool> {
        Ok(self.run_session(subject, criteria).await? == SessionOutcome::Matched)
    }

    /// Requests cancellation of the subject's running session, if any.
    ///
    /// Returns immediately; the session observes the signal at its next
    /// cycle boundary, so cancellation latency is bounded by one
    /// fetch-plus-sleep cycle.
    pub fn stop_monitoring(&self, subject: &str) {
        info!(subject, "stop requested");
        self.registry.request_stop(subject);
    }

    /// Like [`start_monitoring`](Self::start_monitoring), for callers that
    /// need to distinguish cancellation from expiry.
    pub async fn run_session(
        &self,
        subject: &str,
        criteria: MonitoringCriteria,
    ) -> Result<SessionOutcome> {
        if criteria.poll_interval.is_zero() {
            return Err(MonitorError::InvalidCriteria(
                "poll interval must be positive".to_string(),
            ));
        }
        let source = self.source_for(&criteria.ledger)?;

        // Starting a session resets any prior cancellation for this
        // subject, so a previously-cancelled subject gets a fresh run.
        let signal = self.registry.signal_for(subject);
        signal.clear();

        info!(
            subject,
            ledger = %criteria.ledger,
            address = %criteria.address,
            amount = %criteria.expected_amount,
            "monitoring started"
        );

        let mut elapsed = Duration::ZERO;
        // `<=` is deliberate: a match arriving exactly at the budget
        // boundary still gets one more poll, so worst-case wall clock is
        // time_budget plus one poll interval.
        while elapsed <= criteria.time_budget {
            if signal.is_set() {
                info!(subject, "monitoring cancelled");
                return Ok(SessionOutcome::Cancelled);
            }

            let page = match source
                .recent_transactions(&criteria.address, DEFAULT_PAGE_LIMIT, 0)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    // Transient fetch errors are absorbed; the normal poll
                    // interval is the only retry cadence.
                    warn!(subject, error = %e, "fetch failed, treating as empty page");
                    Vec::new()
                }
            };

            for tx in &page {
                if matcher::matches(
                    tx,
                    &criteria.expected_amount,
                    criteria.expected_memo.as_deref(),
                ) {
                    info!(subject, hash = %tx.hash, "matching payment found");
                    return Ok(SessionOutcome::Matched);
                }
            }

            debug!(
                subject,
                checked = page.len(),
                elapsed_secs = elapsed.as_secs_f64(),
                "no match this cycle"
            );
            tokio::time::sleep(criteria.poll_interval).await;
            elapsed += criteria.poll_interval;
        }

        info!(subject, "monitoring expired without a match");
        Ok(SessionOutcome::Expired)
    }

    fn source_for(&self, ledger: &str) -> Result<&dyn TransactionSource> {
        self.sources
            .get(&ledger.to_ascii_lowercase())
            .map(|source| source.as_ref())
            .ok_or_else(|| MonitorError::UnsupportedLedger(ledger.to_string()))
    }
}
