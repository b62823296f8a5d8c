use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

use simt16::channels::{pad_to, to_logical, to_physical};

/// Views of a data memory dump read back after a run.
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub channels: usize,
    pub raw: Vec<i64>,
    /// How the striped memory holds the data, one lane per channel
    pub lanes: Vec<Vec<i64>>,
    /// Thread order rebuilt from the linear dump
    pub deinterleaved: Vec<i64>,
    pub rows: Vec<Vec<i64>>,
}

pub fn analyze_dump(data: &[i64], channels: usize, row_width: usize) -> Result<DumpReport> {
    anyhow::ensure!(row_width > 0, "row width must be at least 1");
    Ok(DumpReport {
        channels,
        raw: data.to_vec(),
        lanes: to_physical(data, channels)?,
        deinterleaved: to_logical(data, channels)?,
        rows: data.chunks(row_width).map(<[i64]>::to_vec).collect(),
    })
}

pub fn render_dump(r: &DumpReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "RAW MEMORY ({} values):", r.raw.len());
    let _ = writeln!(s, "{:?}", r.raw);
    let _ = writeln!(s, "\nBY MEMORY CHANNEL ({} channels):", r.channels);
    for (i, lane) in r.lanes.iter().enumerate() {
        let _ = writeln!(s, "lane{i}: {lane:?}");
    }
    let _ = writeln!(s, "\nDE-INTERLEAVED (thread order):");
    let _ = writeln!(s, "{:?}", r.deinterleaved);
    if r.deinterleaved.len() < r.raw.len() {
        let _ = writeln!(
            s,
            "  ({} trailing values outside a full row not shown)",
            r.raw.len() - r.deinterleaved.len()
        );
    }
    let _ = writeln!(s, "\nAS ROWS:");
    for row in &r.rows {
        let _ = writeln!(s, "{row:?}");
    }
    s
}

/// A logical data image laid out for a run: padded to the address space
/// and split across channels.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub channels: usize,
    pub image: Vec<i64>,
    pub lanes: Vec<Vec<i64>>,
}

pub fn layout_image(data: &[i64], channels: usize, size: Option<usize>) -> Result<LayoutReport> {
    let image = match size {
        Some(size) => pad_to(data, size)?,
        None => data.to_vec(),
    };
    let lanes = to_physical(&image, channels)?;
    Ok(LayoutReport {
        channels,
        image,
        lanes,
    })
}

pub fn render_layout(r: &LayoutReport) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{:<6} {:<7} {:<7} value", "addr", "channel", "offset");
    for (addr, v) in r.image.iter().enumerate() {
        let _ = writeln!(
            s,
            "{addr:<6} {:<7} {:<7} {v}",
            addr % r.channels,
            addr / r.channels
        );
    }
    for (i, lane) in r.lanes.iter().enumerate() {
        let _ = writeln!(s, "lane{i}: {lane:?}");
    }
    s
}
