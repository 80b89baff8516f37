//! Frame composition.
//!
//! Every channel draws onto its own off-screen layer, and the layers are then
//! stacked onto the output: summed with `lighter` in additive mode, or
//! combined by per-channel minimum with `darker` in subtractive mode.

use crate::channel::{Channel, ColorMode};
use crate::config::DotSizeOsc;
use crate::grid::ParticleSet;
use crate::surface::Surface;
use crate::visuals::{BlendMode, Rgb};

/// Owns the output surface and one layer per channel.
#[derive(Debug)]
pub struct Compositor<S> {
    output: S,
    layers: Vec<(Channel, S)>,
    mode: ColorMode,
}

impl<S: Surface> Compositor<S> {
    pub fn new(output: S, channels: &[Channel], mode: ColorMode) -> Self {
        let layers = channels
            .iter()
            .map(|&channel| (channel, output.create_layer()))
            .collect();
        Self {
            output,
            layers,
            mode,
        }
    }

    /// Resize the output and every layer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.output.resize(width, height);
        for (_, layer) in &mut self.layers {
            layer.resize(width, height);
        }
    }

    pub fn output(&self) -> &S {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut S {
        &mut self.output
    }

    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    /// Channels in layer order.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.layers.iter().map(|(c, _)| *c)
    }

    /// Draw one frame of `particles` at `time` seconds.
    pub fn render(&mut self, particles: &ParticleSet, time: f32, osc: &DotSizeOsc) {
        let background = Rgb::background(self.mode);
        let blend = BlendMode::for_mode(self.mode);

        self.output.clear(background);

        for (channel, layer) in &mut self.layers {
            layer.clear(background);
            layer.set_blend_mode(BlendMode::Normal);

            let fill = Rgb::channel_fill(*channel, self.mode);
            for particle in particles.channel(*channel) {
                particle.render(layer, fill, time, osc);
            }

            self.output.draw_layer(layer, blend);
        }
    }
}
