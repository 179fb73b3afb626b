use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const REDUCTION_TICK_MS: u64 = 100;

/// Milestones of a hydrodynamic size estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    SamplingStarted { ensemble_size: u64 },
    ConformerAccumulated,
    SamplingFinished,

    ReductionStarted { replicates: u64 },
    ReductionFinished,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional observer.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

/// Console view of an estimation: a conformer bar with the sampling rate while
/// the ensemble is drawn, then a spinner over the bootstrap replicates.
#[derive(Clone)]
pub struct ConsoleProgress {
    bar: Arc<Mutex<ProgressBar>>,
}

impl ConsoleProgress {
    /// Draws on stderr.
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        Self {
            bar: Arc::new(Mutex::new(bar)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = Arc::clone(&self.bar);
        Box::new(move |event: Progress| {
            let Ok(bar) = bar.lock() else {
                warn!("Console progress bar lock is poisoned; dropping {:?}.", event);
                return;
            };
            Self::render(&bar, event);
        })
    }

    fn render(bar: &ProgressBar, event: Progress) {
        match event {
            Progress::SamplingStarted { ensemble_size } => {
                bar.reset();
                bar.set_style(Self::sampling_style());
                bar.set_length(ensemble_size);
                bar.set_message("Sampling conformers");
            }
            Progress::ConformerAccumulated => bar.inc(1),
            Progress::SamplingFinished => {
                bar.finish_with_message(format!("Sampled {} conformers", bar.position()));
            }
            Progress::ReductionStarted { replicates } => {
                bar.reset();
                bar.set_style(Self::reduction_style());
                bar.set_length(replicates);
                bar.set_message(format!("Evaluating {} bootstrap replicates", replicates));
                bar.enable_steady_tick(Duration::from_millis(REDUCTION_TICK_MS));
            }
            Progress::ReductionFinished => {
                bar.disable_steady_tick();
                if let Some(replicates) = bar.length() {
                    bar.set_position(replicates);
                }
                bar.finish_with_message("Bootstrap reduction complete");
            }
        }
    }

    fn sampling_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} [{bar:40.green/white}] {pos}/{len} ({per_sec}, eta {eta})",
        )
        .expect("Failed to create sampling bar template")
        .progress_chars("=> ")
    }

    fn reduction_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("Failed to create reduction spinner template")
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}
