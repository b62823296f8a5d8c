//! Channel interleaving for striped multi-bank data memory.
//!
//! Logical element `i` lives in channel `i % C` at offset `i / C`. A linear
//! dump of the memory therefore walks the channels fastest. Everything here
//! is a pure function of its inputs.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel count must be at least 1, got {0}")]
    ChannelCountInvalid(usize),
    #[error("{len} elements do not fit an address space of {size}")]
    ImageTooLarge { len: usize, size: usize },
}

/// Position of one element inside the channel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAddr {
    pub channel: usize,
    pub offset: usize,
}

impl ChannelAddr {
    /// Linear address for this position. `channel` must be below `channels`.
    pub fn linear(self, channels: usize) -> usize {
        self.offset * channels + self.channel
    }
}

fn check(channels: usize) -> Result<(), ChannelError> {
    if channels == 0 {
        return Err(ChannelError::ChannelCountInvalid(channels));
    }
    Ok(())
}

pub fn locate(index: usize, channels: usize) -> Result<ChannelAddr, ChannelError> {
    check(channels)?;
    Ok(ChannelAddr {
        channel: index % channels,
        offset: index / channels,
    })
}

/// Split a logical buffer into `channels` lanes. When the length is not a
/// multiple of `channels` the trailing lanes come out one element short.
pub fn to_physical<T: Clone>(logical: &[T], channels: usize) -> Result<Vec<Vec<T>>, ChannelError> {
    check(channels)?;
    let mut lanes: Vec<Vec<T>> = (0..channels)
        .map(|_| Vec::with_capacity(logical.len().div_ceil(channels)))
        .collect();
    for (lane, v) in (0..channels).cycle().zip(logical) {
        lanes[lane].push(v.clone());
    }
    Ok(lanes)
}

/// Concatenate lanes channel-fastest: element 0 of every lane, then element
/// 1 of every lane, and so on. Lanes that run out are skipped.
pub fn flatten<T: Clone>(lanes: &[Vec<T>]) -> Vec<T> {
    let depth = lanes.iter().map(Vec::len).max().unwrap_or(0);
    (0..depth)
        .flat_map(|row| lanes.iter().filter_map(move |lane| lane.get(row).cloned()))
        .collect()
}

/// Rebuild thread order from a linearly addressed dump. Only complete rows
/// of `channels` elements are read; a trailing partial row is dropped.
pub fn to_logical<T: Clone>(dump: &[T], channels: usize) -> Result<Vec<T>, ChannelError> {
    check(channels)?;
    let rows = dump.len() / channels;
    let out = (0..rows)
        .flat_map(|offset| (0..channels).map(move |channel| ChannelAddr { channel, offset }))
        .filter_map(|addr| dump.get(addr.linear(channels)).cloned())
        .collect();
    Ok(out)
}

/// Zero-fill `data` up to an address space of `size` elements.
pub fn pad_to<T: Clone + Default>(data: &[T], size: usize) -> Result<Vec<T>, ChannelError> {
    if data.len() > size {
        return Err(ChannelError::ImageTooLarge {
            len: data.len(),
            size,
        });
    }
    let mut out = data.to_vec();
    out.resize(size, T::default());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_matches_lane_membership() {
        let lanes = to_physical(&(0..10).collect::<Vec<usize>>(), 3).unwrap();
        for i in 0..10 {
            let a = locate(i, 3).unwrap();
            assert_eq!(lanes[a.channel][a.offset], i);
            assert_eq!(a.linear(3), i);
        }
    }

    #[test]
    fn zero_channels_rejected() {
        assert_eq!(locate(0, 0), Err(ChannelError::ChannelCountInvalid(0)));
    }

    #[test]
    fn pad_fills_with_default() {
        assert_eq!(pad_to(&[1u8, 2], 4).unwrap(), vec![1, 2, 0, 0]);
        assert_eq!(
            pad_to(&[1u8, 2, 3], 2),
            Err(ChannelError::ImageTooLarge { len: 3, size: 2 })
        );
    }
}
