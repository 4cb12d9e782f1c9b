//! Replays a recorded landmark stream through the classifier.
//!
//! A tracker worker publishes the recorded frames at the recording's frame rate, while the main
//! thread consumes whatever result is newest and prints its caption, the same way a live camera
//! display would.

use std::{env, path::PathBuf, thread, time::Instant};

use anyhow::{anyhow, bail, Context, Result};
use pawawwewism::Worker;

use gestellence::{
    frame::{FrameResult, Presentation},
    handoff::{self, Publisher},
    options::TrackerOptions,
    replay::load_recording,
};

const USAGE: &str =
    "usage: gestellence [--policy first|last|all] [--no-mirror] [--max-hands N] [--fast] <recording.csv>";

struct Args {
    recording: PathBuf,
    presentation: Option<Presentation>,
    no_mirror: bool,
    max_hands: Option<usize>,
    /// Publish frames as fast as possible instead of at the recording's frame rate.
    fast: bool,
}

fn parse_args() -> Result<Args> {
    let mut recording = None;
    let mut presentation = None;
    let mut no_mirror = false;
    let mut max_hands = None;
    let mut fast = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--policy" => {
                let value = args.next().ok_or_else(|| anyhow!("`--policy` needs a value"))?;
                presentation = Some(value.parse()?);
            }
            "--max-hands" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("`--max-hands` needs a value"))?;
                max_hands = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid hand count `{value}`"))?,
                );
            }
            "--no-mirror" => no_mirror = true,
            "--fast" => fast = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => bail!("unknown option `{arg}`\n{USAGE}"),
            _ => {
                if recording.is_some() {
                    bail!("{USAGE}");
                }
                recording = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(Args {
        recording: recording.ok_or_else(|| anyhow!("{USAGE}"))?,
        presentation,
        no_mirror,
        max_hands,
        fast,
    })
}

fn main() -> Result<()> {
    gestellence::init_logger!();

    let args = parse_args()?;
    let mut opts = TrackerOptions::from_env()?;
    if let Some(presentation) = args.presentation {
        opts = opts.presentation(presentation);
    }
    if args.no_mirror {
        opts = opts.mirror(false);
    }
    if let Some(max_hands) = args.max_hands {
        opts = opts.max_hands(max_hands);
    }

    let frames = load_recording(&args.recording, opts.get_frame_interval())?;
    log::info!(
        "replaying {} frames from {}",
        frames.len(),
        args.recording.display()
    );

    let (publisher, latest) = handoff::latest();
    let total = frames.len();
    let feeder = {
        let opts = opts.clone();
        let fast = args.fast;
        thread::Builder::new()
            .name("feeder".into())
            .spawn(move || -> Result<()> {
                let mut tracker = tracker_worker(&opts, publisher)?;
                let start = Instant::now();
                for frame in frames {
                    if !fast {
                        // Wait until the frame's capture time, like a live camera would.
                        let due = std::time::Duration::from_millis(frame.timestamp_ms());
                        if let Some(wait) = due.checked_sub(start.elapsed()) {
                            thread::sleep(wait);
                        }
                    }
                    tracker.send(frame);
                }
                Ok(())
            })?
    };

    let presentation = opts.get_presentation();
    let mut shown = 0;
    while let Ok(frame) = latest.wait() {
        let caption = frame.caption(presentation);
        log::trace!("frame @{}ms: {:?}", frame.timestamp_ms(), caption.color);
        println!("{}\t{}", frame.timestamp_ms(), caption.text);
        shown += 1;
    }

    match feeder.join() {
        Ok(res) => res?,
        Err(payload) => std::panic::resume_unwind(payload),
    }

    log::info!(
        "shown {shown} of {total} frames ({} dropped)",
        latest.dropped()
    );
    Ok(())
}

/// Spawns the worker that stands in for the asynchronous hand tracker.
fn tracker_worker(
    opts: &TrackerOptions,
    publisher: Publisher<FrameResult>,
) -> Result<Worker<FrameResult>> {
    let max_hands = opts.get_max_hands();
    let mirror = opts.get_mirror();

    let worker = Worker::builder()
        .name("tracker")
        .spawn(move |mut frame: FrameResult| {
            frame.truncate(max_hands);
            if mirror {
                frame.mirror();
            }
            publisher.publish(frame);
        })?;
    Ok(worker)
}
