//! Loading of recorded hand landmark streams.
//!
//! Recordings are CSV files with the header `frame,hand,landmark,x,y,z`, one row per landmark.
//! `z` may be left empty. A row with an empty `hand` column (and empty landmark columns) marks a
//! frame in which no hand was detected.
//!
//! ```text
//! frame,hand,landmark,x,y,z
//! 0,,,,,
//! 1,0,0,0.51,0.88,0.0
//! 1,0,1,0.44,0.81,-0.01
//! ...
//! ```

use std::{collections::BTreeMap, io, path::Path, time::Duration};

use anyhow::{bail, ensure, Context, Result};
use csv::ReaderBuilder;

use crate::frame::FrameResult;
use crate::hand::Hand;
use crate::landmark::Landmark;

type PartialHand = [Option<Landmark>; Hand::NUM_LANDMARKS];

/// Loads a recording from a CSV file.
///
/// Frame `n` of the recording gets a timestamp of `n * frame_interval`.
pub fn load_recording(
    path: impl AsRef<Path>,
    frame_interval: Duration,
) -> Result<Vec<FrameResult>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open recording {}", path.display()))?;
    read_recording(file, frame_interval)
        .with_context(|| format!("failed to load recording {}", path.display()))
}

/// Reads a recording in CSV format from `reader`.
///
/// Frames are returned in ascending frame number order, and hands in ascending hand number order.
/// Frame numbers that do not appear in the recording are skipped, not filled in.
pub fn read_recording<R: io::Read>(reader: R, frame_interval: Duration) -> Result<Vec<FrameResult>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut frames: BTreeMap<u64, BTreeMap<usize, PartialHand>> = BTreeMap::new();
    for (row_idx, record) in reader.records().enumerate() {
        let row = row_idx + 2; // 1-based, after the header
        let record = record.with_context(|| format!("invalid row {row}"))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let frame: u64 = field(0)
            .parse()
            .with_context(|| format!("invalid frame number in row {row}"))?;
        let hands = frames.entry(frame).or_default();
        if field(1).is_empty() {
            continue;
        }

        let hand: usize = field(1)
            .parse()
            .with_context(|| format!("invalid hand number in row {row}"))?;
        let landmark: usize = field(2)
            .parse()
            .with_context(|| format!("invalid landmark index in row {row}"))?;
        ensure!(
            landmark < Hand::NUM_LANDMARKS,
            "landmark index {landmark} out of range in row {row}"
        );
        let x: f32 = field(3)
            .parse()
            .with_context(|| format!("invalid x in row {row}"))?;
        let y: f32 = field(4)
            .parse()
            .with_context(|| format!("invalid y in row {row}"))?;
        let z: f32 = match field(5) {
            "" => 0.0,
            z => z.parse().with_context(|| format!("invalid z in row {row}"))?,
        };

        let slot = &mut hands.entry(hand).or_insert([None; Hand::NUM_LANDMARKS])[landmark];
        if slot.is_some() {
            bail!("duplicate landmark {landmark} for frame {frame}, hand {hand} in row {row}");
        }
        *slot = Some(Landmark::new([x, y, z]));
    }

    let frame_ms = frame_interval.as_millis() as u64;
    let mut result = Vec::with_capacity(frames.len());
    for (frame, hands) in frames {
        let hands = hands
            .into_iter()
            .map(|(hand, landmarks)| {
                let missing = landmarks.iter().position(Option::is_none);
                if let Some(missing) = missing {
                    bail!("frame {frame}, hand {hand} is missing landmark {missing}");
                }
                Ok(Hand::new(landmarks.into_iter().flatten())?)
            })
            .collect::<Result<Vec<_>>>()?;
        let timestamp_ms = frame.checked_mul(frame_ms).with_context(|| {
            format!("frame number {frame} is too large for a {frame_ms}ms frame interval")
        })?;
        result.push(FrameResult::new(timestamp_ms, hands));
    }

    log::debug!("loaded recording with {} frames", result.len());
    Ok(result)
}
