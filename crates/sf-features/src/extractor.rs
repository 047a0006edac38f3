use std::sync::Arc;

use rayon::prelude::*;
use sf_core::{Image, ImageView};
use sf_filter::FilterBank;
use tracing::{debug, info_span, trace};

use crate::canonical::CanonicalResampler;
use crate::config::FeatureConfig;
use crate::error::Result;
use crate::maps::{Channel, ChannelMaps, FeatureMap, FeatureMaps, Resolution};
use crate::opponency::{blue_yellow, red_green};
use crate::orientation::orientation_energy;
use crate::pyramids::{ChannelPyramids, build_channel_pyramids};

/// Reusable feature extractor.
///
/// The configuration is validated and the Gabor bank synthesized once in
/// [`FeatureExtractor::new`]; [`FeatureExtractor::extract`] then only reads
/// them, so one extractor can serve many images (and threads).
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: FeatureConfig,
    bank: Arc<FilterBank>,
    resampler: CanonicalResampler,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;

        let angles: &[f64] = if config.channels.orientation {
            &config.gabor_angles
        } else {
            &[]
        };
        let bank = FilterBank::new(config.gabor, angles)?;
        debug!(
            angles = bank.len(),
            radius = ?config.gabor.radius().ok(),
            "synthesized gabor bank"
        );

        Ok(Self {
            resampler: CanonicalResampler::new(config.canonical_size),
            bank: Arc::new(bank),
            config,
        })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn bank(&self) -> &FilterBank {
        &self.bank
    }

    /// Computes every enabled feature map of `image` at pyramid levels
    /// `1..pyramid_levels`, natively and on the canonical grid.
    ///
    /// Input and resolution checks run before any filtering; on error no
    /// maps are returned. The result depends only on the image and the
    /// configuration.
    pub fn extract(&self, image: &ImageView<'_, [f32; 3]>) -> Result<FeatureMaps> {
        let num_levels = self.config.pyramid_levels;
        let _span = info_span!(
            "extract_features",
            width = image.width(),
            height = image.height(),
            levels = num_levels,
            channels = %self.config.channels,
        )
        .entered();

        let pyramids = build_channel_pyramids(image, num_levels)?;
        debug!(dims = ?pyramids.level_dims(), "built channel pyramids");

        let levels: Vec<usize> = (1..num_levels).collect();
        let channels = self.config.channels;
        let mut maps = FeatureMaps::new(
            (image.width(), image.height()),
            levels.clone(),
            self.bank_angles(),
            self.config.canonical_size,
            self.config.channel_weights,
            self.config.fusion.clone(),
        );

        if channels.intensity {
            let native = pyramids.intensity[1..].to_vec();
            maps.insert(
                Channel::Intensity,
                self.channel_maps(Channel::Intensity, &levels, native),
            );
            debug!("intensity maps done");
        }

        if channels.color {
            let (rg, by) = opponency_maps(&pyramids, &levels)?;
            maps.insert(
                Channel::RedGreen,
                self.channel_maps(Channel::RedGreen, &levels, rg),
            );
            maps.insert(
                Channel::BlueYellow,
                self.channel_maps(Channel::BlueYellow, &levels, by),
            );
            debug!("color opponency maps done");
        }

        if channels.orientation {
            for (angle_idx, native) in self.orientation_maps(&pyramids, &levels)
                .into_iter()
                .enumerate()
            {
                let channel = Channel::Orientation(angle_idx);
                maps.insert(channel, self.channel_maps(channel, &levels, native));
            }
            debug!(angles = self.bank.len(), "orientation maps done");
        }

        Ok(maps)
    }

    fn bank_angles(&self) -> Vec<f64> {
        (0..self.bank.len())
            .filter_map(|i| self.bank.angle_deg(i))
            .collect()
    }

    /// One energy map per (angle, level), grouped by angle.
    fn orientation_maps(
        &self,
        pyramids: &ChannelPyramids,
        levels: &[usize],
    ) -> Vec<Vec<Image<f32>>> {
        let jobs: Vec<(usize, usize)> = (0..self.bank.len())
            .flat_map(|a| levels.iter().map(move |&l| (a, l)))
            .collect();

        let mut energies: Vec<Image<f32>> = jobs
            .par_iter()
            .map(|&(angle_idx, level)| {
                let (even, odd) = self
                    .bank
                    .pair(angle_idx)
                    .expect("job angle index comes from the bank");
                trace!(angle = even.angle_deg, level, "orientation energy");
                orientation_energy(&pyramids.intensity[level].as_view(), even, odd)
            })
            .collect();

        let mut grouped = Vec::with_capacity(self.bank.len());
        for _ in 0..self.bank.len() {
            let rest = energies.split_off(levels.len());
            grouped.push(energies);
            energies = rest;
        }
        grouped
    }

    fn channel_maps(
        &self,
        channel: Channel,
        levels: &[usize],
        native: Vec<Image<f32>>,
    ) -> ChannelMaps {
        debug_assert_eq!(native.len(), levels.len());

        let canonical: Vec<FeatureMap> = native
            .par_iter()
            .zip(levels.par_iter())
            .map(|(map, &level)| FeatureMap {
                channel,
                level,
                resolution: Resolution::Canonical,
                map: self.resampler.resample(&map.as_view()),
            })
            .collect();

        let native = native
            .into_iter()
            .zip(levels)
            .map(|(map, &level)| FeatureMap {
                channel,
                level,
                resolution: Resolution::Native,
                map,
            })
            .collect();

        ChannelMaps::new(native, canonical)
    }
}

type OpponencyMaps = (Vec<Image<f32>>, Vec<Image<f32>>);

fn opponency_maps(pyramids: &ChannelPyramids, levels: &[usize]) -> Result<OpponencyMaps> {
    let pairs: Vec<(Image<f32>, Image<f32>)> = levels
        .par_iter()
        .map(|&l| -> Result<_> {
            let (r, g, b, i) = (
                &pyramids.red[l],
                &pyramids.green[l],
                &pyramids.blue[l],
                &pyramids.intensity[l],
            );
            Ok((red_green(r, g, i)?, blue_yellow(r, g, b, i)?))
        })
        .collect::<Result<_>>()?;

    Ok(pairs.into_iter().unzip())
}

/// One-shot extraction: validates `config`, builds the filter bank and
/// extracts the maps of `image`.
///
/// Prefer [`FeatureExtractor`] when processing several images with the same
/// configuration.
pub fn extract_feature_maps(
    image: &ImageView<'_, [f32; 3]>,
    config: &FeatureConfig,
) -> Result<FeatureMaps> {
    FeatureExtractor::new(config.clone())?.extract(image)
}
