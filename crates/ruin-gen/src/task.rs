//! Cooperative, time-budgeted task queue.
//!
//! A program is a flat list of category markers and actions. Each call to
//! [`TaskQueue::step`] runs a prefix of it: a category marker is processed
//! and control returns immediately so the host can redraw progress; actions
//! are batched until the time budget runs out. Reporting progress is left to
//! a [`ProgressListener`], so draining the queue needs no display surface.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::info;

/// A queued unit of work.
pub type Action<C, E> = Box<dyn FnOnce(&mut C) -> Result<(), E>>;

/// One entry of a generation program.
pub enum Task<C, E> {
    /// Opens a labelled category.
    CategoryStart(String),
    /// Closes the innermost category, optionally with a completion label.
    CategoryEnd(Option<String>),
    /// Work to run against the shared context.
    Action(Action<C, E>),
}

impl<C, E> fmt::Debug for Task<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryStart(label) => f.debug_tuple("CategoryStart").field(label).finish(),
            Self::CategoryEnd(label) => f.debug_tuple("CategoryEnd").field(label).finish(),
            Self::Action(_) => f.write_str("Action"),
        }
    }
}

/// Observes a queue being drained.
pub trait ProgressListener {
    /// A category was opened.
    fn category_started(&mut self, label: &str);

    /// A category was closed. `category` is the label it was opened with.
    fn category_finished(&mut self, category: &str, completion: Option<&str>);

    /// A step returned control after `done` of `total` tasks.
    fn yielded(&mut self, _done: usize, _total: usize) {}
}

/// Ignores all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn category_started(&mut self, _label: &str) {}
    fn category_finished(&mut self, _category: &str, _completion: Option<&str>) {}
}

/// Forwards category boundaries to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceProgress;

impl ProgressListener for TraceProgress {
    fn category_started(&mut self, label: &str) {
        info!(category = label, "started");
    }

    fn category_finished(&mut self, category: &str, completion: Option<&str>) {
        match completion {
            Some(done) => info!(category, "{done}"),
            None => info!(category, "finished"),
        }
    }
}

/// A linear program drained a bounded time slice at a time.
pub struct TaskQueue<C, E> {
    tasks: VecDeque<Task<C, E>>,
    open: Vec<String>,
    done: usize,
    budget: Duration,
    aborted: bool,
}

impl<C, E> fmt::Debug for TaskQueue<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("done", &self.done)
            .field("remaining", &self.tasks.len())
            .field("budget", &self.budget)
            .field("aborted", &self.aborted)
            .finish()
    }
}

impl<C, E> TaskQueue<C, E> {
    /// Create an empty queue whose steps run for at most `budget`.
    pub fn new(budget: Duration) -> Self {
        Self {
            tasks: VecDeque::new(),
            open: Vec::new(),
            done: 0,
            budget,
            aborted: false,
        }
    }

    /// Append a category start marker.
    pub fn category_start(&mut self, label: impl Into<String>) {
        self.tasks.push_back(Task::CategoryStart(label.into()));
    }

    /// Append a category end marker.
    pub fn category_end(&mut self, completion: Option<&str>) {
        self.tasks
            .push_back(Task::CategoryEnd(completion.map(str::to_string)));
    }

    /// Append an action.
    pub fn action(&mut self, f: impl FnOnce(&mut C) -> Result<(), E> + 'static) {
        self.tasks.push_back(Task::Action(Box::new(f)));
    }

    /// Append a category holding a single action.
    pub fn category(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut C) -> Result<(), E> + 'static,
    ) {
        let label = label.into();
        let completion = format!("{label} done");
        self.category_start(label);
        self.action(f);
        self.category_end(Some(&completion));
    }

    /// `(done, total)` task counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.done, self.done + self.tasks.len())
    }

    /// Every task ran to completion.
    pub fn is_complete(&self) -> bool {
        self.tasks.is_empty() && !self.aborted
    }

    /// An action failed and the rest of the program was discarded.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Run ready tasks in order, returning `true` once the program is done.
    ///
    /// Category markers return control right after being processed. Actions
    /// run back to back until the budget is spent; at least one runs per
    /// call if one is ready. An action's error is returned as-is and the
    /// remaining program is dropped, so the queue never completes.
    pub fn step(&mut self, ctx: &mut C, progress: &mut dyn ProgressListener) -> Result<bool, E> {
        let started = Instant::now();
        let mut ran = 0usize;

        while let Some(task) = self.tasks.front() {
            if matches!(task, Task::Action(_)) && ran > 0 && started.elapsed() >= self.budget {
                break;
            }
            let Some(task) = self.tasks.pop_front() else {
                break;
            };
            self.done += 1;

            match task {
                Task::CategoryStart(label) => {
                    progress.category_started(&label);
                    self.open.push(label);
                    return Ok(self.yield_control(progress));
                }
                Task::CategoryEnd(completion) => {
                    let category = self.open.pop().unwrap_or_default();
                    progress.category_finished(&category, completion.as_deref());
                    return Ok(self.yield_control(progress));
                }
                Task::Action(f) => {
                    if let Err(e) = f(ctx) {
                        self.tasks.clear();
                        self.aborted = true;
                        return Err(e);
                    }
                    ran += 1;
                }
            }
        }

        Ok(self.yield_control(progress))
    }

    fn yield_control(&self, progress: &mut dyn ProgressListener) -> bool {
        let (done, total) = self.progress();
        progress.yielded(done, total);
        self.is_complete()
    }
}
