use std::collections::BTreeMap;
use std::fmt;

use sf_core::Image;

use crate::config::{CanonicalSize, ChannelWeights, FusionParams};

/// Feature channel. Orientation channels are indexed by their position in
/// the configured angle list.
///
/// `Display` has no access to the angle list, so it prints orientation
/// channels by index (`O#1`). Use [`FeatureMaps::channel_name`] for the
/// angle-based label (`O45`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Intensity,
    RedGreen,
    BlueYellow,
    Orientation(usize),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Intensity => f.write_str("I"),
            Channel::RedGreen => f.write_str("CRG"),
            Channel::BlueYellow => f.write_str("CBY"),
            Channel::Orientation(idx) => write!(f, "O#{idx}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Dimensions of the pyramid level the map was computed on.
    Native,
    /// The configured canonical grid.
    Canonical,
}

/// One 2-D map with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMap {
    pub channel: Channel,
    /// Pyramid level the map was computed on (never 0).
    pub level: usize,
    pub resolution: Resolution,
    pub map: Image<f32>,
}

/// Native and canonical maps of one channel, both in ascending level order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMaps {
    native: Vec<FeatureMap>,
    canonical: Vec<FeatureMap>,
}

impl ChannelMaps {
    pub(crate) fn new(native: Vec<FeatureMap>, canonical: Vec<FeatureMap>) -> Self {
        debug_assert_eq!(native.len(), canonical.len());
        Self { native, canonical }
    }

    pub fn native(&self) -> &[FeatureMap] {
        &self.native
    }

    pub fn canonical(&self) -> &[FeatureMap] {
        &self.canonical
    }

    pub fn at(&self, resolution: Resolution) -> &[FeatureMap] {
        match resolution {
            Resolution::Native => &self.native,
            Resolution::Canonical => &self.canonical,
        }
    }

    pub fn num_levels(&self) -> usize {
        self.native.len()
    }
}

/// Everything the fusion stage consumes for one image.
///
/// Channels that were not selected in the configuration are absent. The
/// channel weights and fusion parameters are carried unchanged from the
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMaps {
    image_dims: (usize, usize),
    levels: Vec<usize>,
    angles_deg: Vec<f64>,
    canonical_size: CanonicalSize,
    weights: ChannelWeights,
    fusion: FusionParams,
    channels: BTreeMap<Channel, ChannelMaps>,
}

impl FeatureMaps {
    pub(crate) fn new(
        image_dims: (usize, usize),
        levels: Vec<usize>,
        angles_deg: Vec<f64>,
        canonical_size: CanonicalSize,
        weights: ChannelWeights,
        fusion: FusionParams,
    ) -> Self {
        Self {
            image_dims,
            levels,
            angles_deg,
            canonical_size,
            weights,
            fusion,
            channels: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, channel: Channel, maps: ChannelMaps) {
        self.channels.insert(channel, maps);
    }

    pub fn get(&self, channel: Channel) -> Option<&ChannelMaps> {
        self.channels.get(&channel)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.channels.contains_key(&channel)
    }

    /// Channels in enumeration order: intensity, red-green, blue-yellow,
    /// then orientations by angle index.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelMaps)> {
        self.channels.iter().map(|(&c, m)| (c, m))
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Short label such as `I`, `CRG` or `O45`.
    pub fn channel_name(&self, channel: Channel) -> String {
        match channel {
            Channel::Orientation(idx) => match self.angles_deg.get(idx) {
                Some(angle) => format!("O{angle}"),
                None => channel.to_string(),
            },
            other => other.to_string(),
        }
    }

    pub fn angle_deg(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::Orientation(idx) => self.angles_deg.get(idx).copied(),
            _ => None,
        }
    }

    pub fn weight(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Intensity => self.weights.intensity,
            Channel::RedGreen | Channel::BlueYellow => self.weights.color,
            Channel::Orientation(_) => self.weights.orientation,
        }
    }

    pub fn channel_weights(&self) -> &ChannelWeights {
        &self.weights
    }

    pub fn fusion_params(&self) -> &FusionParams {
        &self.fusion
    }

    pub fn canonical_size(&self) -> CanonicalSize {
        self.canonical_size
    }

    /// `(width, height)` of the input image.
    pub fn image_dims(&self) -> (usize, usize) {
        self.image_dims
    }

    /// Pyramid levels that carry maps, ascending.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use sf_core::Image;

    use crate::config::{CANONICAL_SIZE, ChannelWeights, FusionParams};
    use crate::maps::{Channel, ChannelMaps, FeatureMap, FeatureMaps, Resolution};

    fn single(channel: Channel, level: usize) -> ChannelMaps {
        let map = |resolution, w, h| FeatureMap {
            channel,
            level,
            resolution,
            map: Image::new_fill(w, h, 0.0f32),
        };
        ChannelMaps::new(
            vec![map(Resolution::Native, 8, 8)],
            vec![map(Resolution::Canonical, 32, 28)],
        )
    }

    fn sample() -> FeatureMaps {
        let weights = ChannelWeights {
            color: 0.5,
            intensity: 2.0,
            orientation: 1.5,
        };
        let mut maps = FeatureMaps::new(
            (16, 16),
            vec![1],
            vec![0.0, 22.5],
            CANONICAL_SIZE,
            weights,
            FusionParams::default(),
        );
        maps.insert(Channel::Orientation(1), single(Channel::Orientation(1), 1));
        maps.insert(Channel::RedGreen, single(Channel::RedGreen, 1));
        maps.insert(Channel::Intensity, single(Channel::Intensity, 1));
        maps
    }

    #[test]
    fn iteration_follows_channel_order() {
        let maps = sample();
        let order: Vec<Channel> = maps.channels().collect();
        assert_eq!(
            order,
            vec![Channel::Intensity, Channel::RedGreen, Channel::Orientation(1)]
        );
        assert!(!maps.contains(Channel::BlueYellow));
        assert_eq!(maps.len(), 3);
    }

    #[test]
    fn names_and_weights() {
        let maps = sample();
        assert_eq!(maps.channel_name(Channel::Intensity), "I");
        assert_eq!(maps.channel_name(Channel::BlueYellow), "CBY");
        assert_eq!(maps.channel_name(Channel::Orientation(0)), "O0");
        assert_eq!(maps.channel_name(Channel::Orientation(1)), "O22.5");
        assert_eq!(maps.channel_name(Channel::Orientation(7)), "O#7");
        assert_eq!(Channel::Orientation(1).to_string(), "O#1");
        assert_eq!(Channel::RedGreen.to_string(), maps.channel_name(Channel::RedGreen));

        assert_eq!(maps.weight(Channel::Intensity), 2.0);
        assert_eq!(maps.weight(Channel::BlueYellow), 0.5);
        assert_eq!(maps.weight(Channel::Orientation(0)), 1.5);
        assert_eq!(maps.angle_deg(Channel::Orientation(1)), Some(22.5));
        assert_eq!(maps.angle_deg(Channel::RedGreen), None);
    }

    #[test]
    fn resolution_accessor_selects_variant() {
        let maps = sample();
        let rg = maps.get(Channel::RedGreen).expect("present");
        assert_eq!(rg.num_levels(), 1);
        assert_eq!(rg.at(Resolution::Native)[0].map.dims(), (8, 8));
        assert_eq!(rg.at(Resolution::Canonical)[0].map.dims(), (32, 28));
        assert_eq!(rg.canonical()[0].resolution, Resolution::Canonical);
    }
}
