//! Bounded worker pool for image alt-text resolution.
//!
//! OCR and captioning dominate latency, so images run on their own pool,
//! independent of page-text parallelism: one slow image must not block
//! unrelated pages. Each task carries a deadline; a task that misses it
//! resolves to fallback text and its late result is discarded. A worker
//! thread cannot be interrupted mid-recognition, so deadlines and
//! cancellation are enforced at the coordinator: workers are detached and
//! a hung collaborator call never blocks the document from completing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, RecvTimeoutError};

use crate::error::{Warning, WarningKind};
use crate::model::AltTextSource;
use crate::source::ImageBlock;

use super::{fallback_description, resolve_alt_text, Captioner, TextRecognizer};

/// Configuration for the alt-text pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads
    pub workers: usize,

    /// Per-image deadline
    pub task_timeout: Duration,

    /// Minimum OCR text length to accept
    pub min_ocr_chars: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .min(8),
            task_timeout: Duration::from_secs(20),
            min_ocr_chars: 10,
        }
    }
}

/// One image to resolve.
#[derive(Debug, Clone)]
pub struct AltTask {
    /// Page the image sits on
    pub page: usize,

    /// Index among the page's images
    pub index: usize,

    /// The image itself
    pub image: ImageBlock,
}

/// A resolved image: identity plus attached alternative text.
#[derive(Debug, Clone)]
pub struct ResolvedAlt {
    /// Page the image sits on
    pub page: usize,

    /// Index among the page's images
    pub index: usize,

    /// Attached alternative text (never empty)
    pub alt_text: String,

    /// Origin of the text
    pub source: AltTextSource,
}

/// Cooperative cancellation for a document's in-flight image tasks.
///
/// Cancelling never corrupts the tree: every unresolved image is given
/// the dimension-derived fallback description instead of being left
/// incomplete.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

enum PoolEvent {
    Started {
        task: usize,
        at: Instant,
    },
    Finished {
        task: usize,
        alt_text: String,
        source: AltTextSource,
        warning: Option<Warning>,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum TaskState {
    Queued,
    Running { deadline: Instant },
    Done,
}

/// Identity and dimensions kept for tasks handed to the workers.
struct TaskMeta {
    page: usize,
    index: usize,
    width: u32,
    height: u32,
}

impl TaskMeta {
    fn fallback(&self) -> ResolvedAlt {
        ResolvedAlt {
            page: self.page,
            index: self.index,
            alt_text: fallback_description(self.width, self.height),
            source: AltTextSource::Fallback,
        }
    }
}

/// Bounded-concurrency executor for alt-text tasks.
pub struct AltTextPool {
    config: PoolConfig,
}

impl AltTextPool {
    /// Create a pool with the given configuration.
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }

    /// Resolve all tasks, blocking until every image has alternative text
    /// or its deadline has passed.
    ///
    /// Returns one [`ResolvedAlt`] per task (order matches the input) and
    /// the warnings accumulated along the way.
    pub fn resolve(
        &self,
        tasks: Vec<AltTask>,
        ocr: Arc<dyn TextRecognizer>,
        captioner: Arc<dyn Captioner>,
        cancel: &CancelToken,
    ) -> (Vec<ResolvedAlt>, Vec<Warning>) {
        if tasks.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let workers = self.config.workers.max(1).min(tasks.len());
        let min_ocr_chars = self.config.min_ocr_chars;
        let timeout = self.config.task_timeout;

        let meta: Vec<TaskMeta> = tasks
            .iter()
            .map(|t| TaskMeta {
                page: t.page,
                index: t.index,
                width: t.image.width,
                height: t.image.height,
            })
            .collect();

        let (task_tx, task_rx) = bounded::<(usize, AltTask)>(tasks.len());
        let (event_tx, event_rx) = bounded::<PoolEvent>(tasks.len() * 2);

        for (id, task) in tasks.into_iter().enumerate() {
            let _ = task_tx.send((id, task));
        }
        drop(task_tx);

        // Workers are detached on purpose: a result arriving after its
        // deadline is simply dropped, and the send into a closed channel
        // fails silently once the coordinator has returned.
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let event_tx = event_tx.clone();
            let ocr = Arc::clone(&ocr);
            let captioner = Arc::clone(&captioner);
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                while let Ok((id, task)) = task_rx.recv() {
                    if cancel.is_cancelled() {
                        let _ = event_tx.send(PoolEvent::Finished {
                            task: id,
                            alt_text: fallback_description(task.image.width, task.image.height),
                            source: AltTextSource::Fallback,
                            warning: None,
                        });
                        continue;
                    }

                    let _ = event_tx.send(PoolEvent::Started {
                        task: id,
                        at: Instant::now(),
                    });
                    let outcome = resolve_alt_text(
                        &task.image,
                        ocr.as_ref(),
                        captioner.as_ref(),
                        min_ocr_chars,
                    );
                    let _ = event_tx.send(PoolEvent::Finished {
                        task: id,
                        alt_text: outcome.alt_text,
                        source: outcome.source,
                        warning: outcome.warning,
                    });
                }
            });
        }
        drop(task_rx);
        drop(event_tx);

        let mut states: Vec<TaskState> = vec![TaskState::Queued; meta.len()];
        let mut resolved: Vec<Option<ResolvedAlt>> = meta.iter().map(|_| None).collect();
        let mut warnings: Vec<Warning> = Vec::new();
        let mut outstanding = meta.len();

        while outstanding > 0 {
            let next_deadline = states
                .iter()
                .filter_map(|s| match s {
                    TaskState::Running { deadline } => Some(*deadline),
                    _ => None,
                })
                .min();

            let event = match next_deadline {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match event_rx.recv_timeout(wait) {
                        Ok(event) => Some(event),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match event_rx.recv() {
                    Ok(event) => Some(event),
                    Err(_) => break,
                },
            };

            match event {
                Some(PoolEvent::Started { task, at }) => {
                    if states[task] == TaskState::Queued {
                        states[task] = TaskState::Running {
                            deadline: at + timeout,
                        };
                    }
                }
                Some(PoolEvent::Finished {
                    task,
                    alt_text,
                    source,
                    warning,
                }) => {
                    // A late result for a task already resolved by
                    // deadline is dropped.
                    if states[task] != TaskState::Done {
                        states[task] = TaskState::Done;
                        resolved[task] = Some(ResolvedAlt {
                            page: meta[task].page,
                            index: meta[task].index,
                            alt_text,
                            source,
                        });
                        if let Some(w) = warning {
                            warnings.push(w);
                        }
                        outstanding -= 1;
                    }
                }
                None => {
                    let now = Instant::now();
                    for (id, state) in states.iter_mut().enumerate() {
                        let timed_out = matches!(
                            state,
                            TaskState::Running { deadline } if *deadline <= now
                        );
                        if timed_out {
                            *state = TaskState::Done;
                            log::warn!(
                                "alt-text task for image {} on page {} timed out",
                                meta[id].index,
                                meta[id].page
                            );
                            resolved[id] = Some(meta[id].fallback());
                            warnings.push(
                                Warning::new(
                                    WarningKind::ImageTimeout,
                                    format!("image {} timed out", meta[id].index),
                                )
                                .on_page(meta[id].page),
                            );
                            outstanding -= 1;
                        }
                    }
                }
            }
        }

        // Workers that died (channel disconnect) leave tasks unresolved;
        // they still get fallback text rather than an incomplete tree.
        let resolved = resolved
            .into_iter()
            .enumerate()
            .map(|(id, slot)| slot.unwrap_or_else(|| meta[id].fallback()))
            .collect();

        (resolved, warnings)
    }
}
