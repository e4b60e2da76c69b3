//! Frame selection parsing and chunking.
//!
//! A frame expression such as `"3, 5-10, 47-327"` is parsed into a
//! [`FrameSet`], which is then cut into [`FrameChunk`]s of bounded size. Each
//! chunk becomes one render task, so the chunk size bounds per-task render
//! time.

use renderforge_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Most chunks a single frame set may be cut into. Each chunk becomes one task.
pub const MAX_CHUNKS: u64 = 1_000_000;

/// An ordered set of distinct frame numbers.
///
/// Stored as sorted, non-overlapping, non-adjacent inclusive runs, so
/// `"1-1000000"` costs one entry rather than a million.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    runs: Vec<RangeInclusive<u32>>,
}

impl FrameSet {
    /// Parse a frame expression.
    ///
    /// Accepts single frames (`47`), inclusive ranges (`1-30`) and any mix of
    /// them separated by commas and/or whitespace. Overlapping and
    /// out-of-order parts are fine; the result is always sorted and
    /// deduplicated.
    ///
    /// # Examples
    ///
    /// ```
    /// use renderforge_compiler::FrameSet;
    ///
    /// let frames = FrameSet::parse("3, 5-10, 47-327")?;
    /// assert_eq!(frames.len(), 1 + 6 + 281);
    /// assert_eq!(frames.to_string(), "3,5-10,47-327");
    /// # Ok::<(), renderforge_common::Error>(())
    /// ```
    pub fn parse(expr: &str) -> Result<Self> {
        let mut runs = Vec::new();

        for token in expr
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            runs.push(parse_token(expr, token)?);
        }

        if runs.is_empty() {
            return Err(Error::invalid_frames(expr, "no frames given"));
        }

        Ok(Self::from_runs(runs))
    }

    fn from_runs(mut runs: Vec<RangeInclusive<u32>>) -> Self {
        runs.sort_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(runs.len());
        for run in runs {
            if let Some(last) = merged.last_mut() {
                if u64::from(*run.start()) <= u64::from(*last.end()) + 1 {
                    if run.end() > last.end() {
                        *last = *last.start()..=*run.end();
                    }
                    continue;
                }
            }
            merged.push(run);
        }

        Self { runs: merged }
    }

    /// Number of frames in the set.
    pub fn len(&self) -> u64 {
        self.runs
            .iter()
            .map(|r| u64::from(*r.end()) - u64::from(*r.start()) + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn contains(&self, frame: u32) -> bool {
        self.runs.iter().any(|r| r.contains(&frame))
    }

    /// The maximal runs of consecutive frames, ascending.
    pub fn runs(&self) -> &[RangeInclusive<u32>] {
        &self.runs
    }

    /// Iterate over every frame in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs.iter().flat_map(|r| r.clone())
    }

    /// Partition the set into chunks of at most `chunk_size` frames.
    ///
    /// Every maximal run of consecutive frames is chunked on its own and cut
    /// at each `chunk_size`-th frame; frames from different runs never share
    /// a chunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] when `chunk_size` is below 1, and
    /// [`Error::InvalidFrameExpression`] when the set would be cut into more
    /// than [`MAX_CHUNKS`] chunks.
    ///
    /// # Examples
    ///
    /// ```
    /// use renderforge_compiler::FrameSet;
    ///
    /// let chunks = FrameSet::parse("1-3,5,7-9")?.chunk(2)?;
    /// let names: Vec<String> = chunks.iter().map(|c| c.to_string()).collect();
    /// assert_eq!(names, ["1-2", "3", "5", "7-8", "9"]);
    /// # Ok::<(), renderforge_common::Error>(())
    /// ```
    pub fn chunk(&self, chunk_size: i64) -> Result<Vec<FrameChunk>> {
        if chunk_size < 1 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        // A chunk can never hold more than u32::MAX + 1 frames anyway.
        let step = u64::try_from(chunk_size).unwrap_or(u64::MAX);

        let count: u64 = self
            .runs
            .iter()
            .map(|r| (u64::from(*r.end()) - u64::from(*r.start())) / step + 1)
            .sum();
        if count > MAX_CHUNKS {
            return Err(Error::invalid_frames(
                self.to_string(),
                format!(
                    "chunk size {chunk_size} gives {count} chunks, more than the limit of {MAX_CHUNKS}"
                ),
            ));
        }

        let mut chunks = Vec::with_capacity(count as usize);
        for run in &self.runs {
            let end = u64::from(*run.end());
            let mut first = u64::from(*run.start());
            while first <= end {
                let last = end.min(first.saturating_add(step - 1));
                chunks.push(FrameChunk {
                    first: first as u32,
                    last: last as u32,
                });
                first = last + 1;
            }
        }
        Ok(chunks)
    }
}

fn parse_token(expr: &str, token: &str) -> Result<RangeInclusive<u32>> {
    let parse_frame = |s: &str| -> Result<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_frames(
                expr,
                format!("{token:?} is not a frame number or range"),
            ));
        }
        s.parse::<u32>().map_err(|_| {
            Error::invalid_frames(expr, format!("frame {s} in {token:?} is out of range"))
        })
    };

    match token.split_once('-') {
        None => {
            let frame = parse_frame(token)?;
            Ok(frame..=frame)
        }
        Some((start, end)) => {
            let start = parse_frame(start)?;
            let end = parse_frame(end)?;
            if start > end {
                return Err(Error::invalid_frames(
                    expr,
                    format!("range {token:?} ends before it starts"),
                ));
            }
            Ok(start..=end)
        }
    }
}

impl fmt::Display for FrameSet {
    /// Compact form, e.g. `3,5-10,47-327`. Parses back to the same set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if run.start() == run.end() {
                write!(f, "{}", run.start())?;
            } else {
                write!(f, "{}-{}", run.start(), run.end())?;
            }
        }
        Ok(())
    }
}

/// A contiguous range of frames rendered by a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameChunk {
    pub first: u32,
    pub last: u32,
}

impl FrameChunk {
    /// Number of frames in the chunk.
    pub fn frame_count(&self) -> u64 {
        u64::from(self.last) - u64::from(self.first) + 1
    }

    /// The chunk in the renderer's frame notation: `first..last`, or `N`.
    pub fn to_render_range(&self) -> String {
        self.to_string().replace('-', "..")
    }
}

impl fmt::Display for FrameChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}
