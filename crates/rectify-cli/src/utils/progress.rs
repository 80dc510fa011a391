use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use rectify::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders relaxation progress on stderr: a spinner per phase, a bar per pass, and the best
/// total separation seen so far appended to the bar message.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    phase: Arc<Mutex<String>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            phase: Arc::new(Mutex::new(String::new())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb = Arc::clone(&self.pb);
        let phase = Arc::clone(&self.phase);

        Box::new(move |event: Progress| match (pb.lock(), phase.lock()) {
            (Ok(bar), Ok(mut phase)) => render(&bar, &mut phase, event),
            _ => warn!("Progress state lock was poisoned; dropping event."),
        })
    }
}

fn render(bar: &ProgressBar, phase: &mut String, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            *phase = name.to_string();
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_style(bar_style());
            bar.set_length(total_steps);
        }
        Progress::TaskIncrement => bar.inc(1),
        Progress::TaskFinish => {
            if let Some(len) = bar.length() {
                bar.set_position(len);
            }
            bar.finish();
        }
        Progress::StatusUpdate { text } => bar.set_message(format!("{phase} ({text})")),
        Progress::BestImproved { total } => {
            bar.set_message(format!("{phase} (best {total:.4} nm)"));
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message(format!("✓ {phase}"));
        }
        Progress::Message(text) if bar.is_finished() => bar.set_message(text),
        Progress::Message(text) => bar.println(format!("  {text}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .expect("spinner template is valid")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<40} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .expect("bar template is valid")
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("=>-")
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
