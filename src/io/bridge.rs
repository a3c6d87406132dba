// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background persistence of lines.
//!
//! A single worker thread owns all store access, so jobs run in the order
//! they were submitted: the last save wins, and a load sees every save
//! queued before it. Store failures are logged and never reach the editor.
//!
//! Loads are stamped with a generation number. Only the result of the most
//! recent load is handed back; results for videos the user has already
//! left are dropped.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::store::AnnotationStore;
use crate::models::annotation::Line;
use crate::models::video::VideoKey;

enum Job {
    Save { key: VideoKey, lines: Vec<Line> },
    Load { key: VideoKey, generation: u64 },
}

struct Loaded {
    key: VideoKey,
    generation: u64,
    lines: Vec<Line>,
}

/// Lines loaded for the current video.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub key: VideoKey,
    pub lines: Vec<Line>,
}

pub struct PersistenceBridge {
    jobs: Option<Sender<Job>>,
    results: Receiver<Loaded>,
    generation: u64,
    pending: bool,
    worker: Option<JoinHandle<()>>,
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn AnnotationStore>) -> Self {
        let (job_tx, job_rx) = channel::<Job>();
        let (result_tx, result_rx) = channel();

        let worker = std::thread::spawn(move || {
            for job in job_rx {
                match job {
                    Job::Save { key, lines } => match store.save(&key, &lines) {
                        Ok(()) => log::debug!("Saved {} lines for {}", lines.len(), key),
                        Err(e) => log::error!("Failed to save lines for {}: {:#}", key, e),
                    },
                    Job::Load { key, generation } => {
                        // Errors read as "nothing saved" so the video still opens.
                        let lines = match store.load(&key) {
                            Ok(Some(lines)) => lines,
                            Ok(None) => Vec::new(),
                            Err(e) => {
                                log::error!("Failed to load lines for {}: {:#}", key, e);
                                Vec::new()
                            }
                        };
                        if result_tx.send(Loaded { key, generation, lines }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            generation: 0,
            pending: false,
            worker: Some(worker),
        }
    }

    /// Queue a replacement of `key`'s stored lines. Fire and forget.
    pub fn save(&self, key: &VideoKey, lines: &[Line]) {
        self.submit(Job::Save {
            key: key.clone(),
            lines: lines.to_vec(),
        });
    }

    /// Start loading `key`'s lines. Supersedes any load still in flight.
    pub fn begin_load(&mut self, key: &VideoKey) {
        self.generation += 1;
        self.pending = true;
        self.submit(Job::Load {
            key: key.clone(),
            generation: self.generation,
        });
    }

    /// True while the latest load has not been collected by [`Self::poll`].
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Non-blocking check for the latest load's result.
    pub fn poll(&mut self) -> Option<LoadResult> {
        while let Ok(loaded) = self.results.try_recv() {
            if let Some(result) = self.accept(loaded) {
                return Some(result);
            }
        }
        None
    }

    /// Blocking wait for the latest load's result.
    pub fn wait(&mut self) -> Option<LoadResult> {
        while self.pending {
            let loaded = self.results.recv().ok()?;
            if let Some(result) = self.accept(loaded) {
                return Some(result);
            }
        }
        None
    }

    fn accept(&mut self, loaded: Loaded) -> Option<LoadResult> {
        if loaded.generation != self.generation {
            log::debug!("Dropping stale load for {}", loaded.key);
            return None;
        }
        self.pending = false;
        log::info!("Loaded {} lines for {}", loaded.lines.len(), loaded.key);
        Some(LoadResult {
            key: loaded.key,
            lines: loaded.lines,
        })
    }

    fn submit(&self, job: Job) {
        let sent = self.jobs.as_ref().map(|jobs| jobs.send(job).is_ok());
        if sent != Some(true) {
            log::error!("Persistence worker is not running");
        }
    }
}

impl Drop for PersistenceBridge {
    /// Flush queued saves before exiting.
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
