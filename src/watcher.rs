// SPDX-License-Identifier: MIT

//! Polling loop: fetch → diff → notify → persist.
//!
//! A single task runs at most one cycle at a time; all shared
//! state (credentials, known-id set) is owned here, so no locking is
//! needed.

use crate::detect;
use crate::error::Result;
use crate::models::Program;
use crate::services::api::{ProgramApi, TokenExchange};
use crate::services::auth::CredentialManager;
use crate::services::notify::Notifier;
use crate::store::FileStore;
use std::collections::BTreeSet;
use std::time::Duration;

/// The polling loop over the program listing.
pub struct Watcher<A, N> {
    api: A,
    auth: CredentialManager<A>,
    notifier: N,
    store: FileStore,
    known: BTreeSet<String>,
    poll_interval: Duration,
}

impl<A: ProgramApi + TokenExchange, N: Notifier> Watcher<A, N> {
    /// Bootstrap the watcher.
    ///
    /// On a first run (no persisted known-id set) the current listing
    /// seeds the baseline without notifying - those programs are not
    /// new, they are the starting point. If the initial fetch fails and
    /// no persisted set exists there is nothing to diff against, so
    /// bootstrap fails; with a persisted set the watcher starts on the
    /// stale baseline.
    pub async fn bootstrap(
        api: A,
        auth: CredentialManager<A>,
        notifier: N,
        store: FileStore,
        poll_interval: Duration,
    ) -> Result<Self> {
        let known = store.load_known_ids().await;
        tracing::info!(count = known.len(), "loaded known program ids");

        let mut watcher = Self {
            api,
            auth,
            notifier,
            store,
            known,
            poll_interval,
        };

        match watcher.fetch_current().await {
            Ok(programs) => {
                if watcher.known.is_empty() {
                    watcher.known = programs.iter().map(|p| p.id.clone()).collect();
                    watcher.persist_known().await;
                    tracing::info!(
                        count = watcher.known.len(),
                        "first run: seeded baseline without notifying"
                    );
                }
            }
            Err(e) => {
                if watcher.known.is_empty() {
                    tracing::error!(error = %e, "initial fetch failed with no persisted baseline");
                    return Err(e);
                }
                tracing::warn!(error = %e, "initial fetch failed, continuing on stale baseline");
            }
        }

        Ok(watcher)
    }

    /// Run steady-state cycles forever.
    pub async fn run(mut self) -> Result<()> {
        loop {
            tokio::time::sleep(self.poll_interval).await;
            self.run_cycle().await;
        }
    }

    /// One steady-state cycle. Failures never escape: auth and fetch
    /// errors skip the cycle, a notify error skips that record.
    pub async fn run_cycle(&mut self) {
        let current = match self.fetch_current().await {
            Ok(programs) => programs,
            Err(e) => {
                tracing::warn!(error = %e, "cycle skipped");
                return;
            }
        };

        let current_ids: BTreeSet<String> = current.iter().map(|p| p.id.clone()).collect();
        let fresh = detect::new_programs(&self.known, &current);

        if fresh.is_empty() {
            self.known = current_ids;
            self.persist_known().await;
            return;
        }

        tracing::info!(count = fresh.len(), "new programs detected");

        let mut failed: BTreeSet<String> = BTreeSet::new();
        for program in &fresh {
            match self.notifier.notify(program).await {
                Ok(()) => {
                    // Persist per record so a crash mid-cycle cannot
                    // re-announce what was already sent.
                    self.known.insert(program.id.clone());
                    self.persist_known().await;
                    tracing::info!(program_id = %program.id, name = %program.name, "announced new program");
                }
                Err(e) => {
                    tracing::warn!(program_id = %program.id, error = %e, "notification failed, will retry next cycle");
                    failed.insert(program.id.clone());
                }
            }
        }

        // Adopt the current listing as the new baseline, minus the ids
        // whose announcement failed (they stay "new" for the next
        // cycle). Ids that vanished upstream drop out silently.
        self.known = current_ids.difference(&failed).cloned().collect();
        self.persist_known().await;
    }

    /// Ids currently tracked as known.
    pub fn known_ids(&self) -> &BTreeSet<String> {
        &self.known
    }

    async fn fetch_current(&mut self) -> Result<Vec<Program>> {
        let token = self.auth.valid_access_token().await?;
        self.api.fetch_programs(&token).await
    }

    async fn persist_known(&self) {
        if let Err(e) = self.store.save_known_ids(&self.known).await {
            tracing::warn!(error = %e, "failed to persist known ids, in-memory set stays authoritative");
        }
    }
}
